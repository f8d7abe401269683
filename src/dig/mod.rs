//! 到達可能性解析
//!
//! ルートパッケージの `main` 関数から、パッケージ修飾付きの呼び出し
//! `pkg.Func(...)` をたどって実際に使われる宣言を集める。
//! 結果は最初に発見した順に並び、同じ宣言は一度しか現れない。
//!
//! 修飾なしの呼び出し（同じパッケージ内の関数）や、解析対象外の
//! パッケージへの呼び出しは辺を作らない。

mod collector;

use std::collections::VecDeque;

use indexmap::IndexSet;

use crate::error::{ZouniError, ZouniResult};
use crate::logf;
use crate::logger::Logger;
use crate::program::{DeclId, DeclRef, Package, Program, ROOT_PACKAGE_KEY};

use collector::{Reference, ReferenceCollector, ReferenceKind};

/// 解析のオプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigOptions {
    /// `pkg.Type` の参照と、発見した型のメソッドもたどる
    pub follow_types: bool,
}

/// 到達可能な宣言を掘り出す
pub struct Digger<'p> {
    program: &'p Program,
    logger: &'p dyn Logger,
    options: DigOptions,
    /// 発見済みの宣言（挿入順が発見順）
    found: IndexSet<DeclId>,
    worklist: VecDeque<DeclId>,
}

impl<'p> Digger<'p> {
    pub fn new(program: &'p Program, logger: &'p dyn Logger) -> Self {
        Self {
            program,
            logger,
            options: DigOptions::default(),
            found: IndexSet::new(),
            worklist: VecDeque::new(),
        }
    }

    pub fn with_options(mut self, options: DigOptions) -> Self {
        self.options = options;
        self
    }

    /// `main` から到達できる宣言を発見順に返す
    pub fn dig(mut self) -> ZouniResult<Vec<DeclRef<'p>>> {
        let root = self.program.root();
        let entry = root
            .find_function_by_name("main")
            .ok_or_else(|| ZouniError::EntryPointNotFound {
                package: package_label(root),
            })?;
        self.discover(entry);

        while let Some(id) = self.worklist.pop_front() {
            let Some(decl) = self.program.decl(id) else {
                continue;
            };
            logf!(self.logger, "dig {}", decl.describe());

            let mut collector = ReferenceCollector::new(self.options.follow_types);
            collector.collect_in_decl(decl.decl());
            for reference in collector.into_references() {
                self.follow(&reference);
            }
        }

        let program = self.program;
        Ok(self
            .found
            .iter()
            .filter_map(|&id| program.decl(id))
            .collect())
    }

    /// 参照先の宣言を解決して、未発見なら作業リストに積む
    fn follow(&mut self, reference: &Reference<'_>) {
        let Some(package) = self.resolve_package(reference) else {
            return;
        };

        let target = match reference.kind {
            ReferenceKind::Call => package.find_function_by_name(reference.name),
            ReferenceKind::Qualified => package.find_type_by_name(reference.name),
        };

        match target {
            Some(decl) => self.discover(decl),
            None => {
                if reference.kind == ReferenceKind::Call {
                    logf!(
                        self.logger,
                        "function {} is not found in {}",
                        reference.name,
                        package.key()
                    );
                }
            }
        }
    }

    /// 参照の修飾子を、参照しているファイルのインポートから解決する
    fn resolve_package(&self, reference: &Reference<'_>) -> Option<&'p Package> {
        let program = self.program;
        let Some(file) = program.file_at(reference.pos) else {
            logf!(self.logger, "no file at position {}", reference.pos);
            return None;
        };

        let Some(key) = file.find_package_by_selector(reference.qualifier) else {
            if reference.kind == ReferenceKind::Call {
                logf!(
                    self.logger,
                    "path is not found for '{}' in {}",
                    reference.qualifier,
                    file.name()
                );
            }
            return None;
        };

        let package = program.package(key);
        if package.is_none() && reference.kind == ReferenceKind::Call {
            logf!(self.logger, "package {} is not loaded", key);
        }
        package
    }

    /// 初めて見る宣言なら記録して作業リストに積む
    fn discover(&mut self, decl: DeclRef<'p>) {
        if !self.found.insert(decl.id()) {
            return;
        }
        self.worklist.push_back(decl.id());

        if self.options.follow_types {
            let names = decl.type_names();
            if names.is_empty() {
                return;
            }
            let methods: Vec<DeclId> = decl
                .package()
                .methods_of(&names)
                .map(|method| method.id())
                .collect();
            for id in methods {
                if self.found.insert(id) {
                    self.worklist.push_back(id);
                }
            }
        }
    }
}

/// ルートパッケージの表示名
fn package_label(package: &Package) -> String {
    if package.key() == ROOT_PACKAGE_KEY {
        format!("{} ({})", package.name(), package.dir().display())
    } else {
        package.key().to_string()
    }
}

/// `main` から到達できる宣言を発見順に返す
pub fn dig<'p>(program: &'p Program, logger: &'p dyn Logger) -> ZouniResult<Vec<DeclRef<'p>>> {
    Digger::new(program, logger).dig()
}
