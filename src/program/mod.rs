//! パッケージグラフの読み込み
//!
//! ルートディレクトリのパッケージから import を幅優先でたどり、
//! 解析対象のパッケージをすべて読み込んで構文解析する。
//! 読み込んだ結果の `Program` は以降変更されない。
//!
//! パッケージはインポートパスをキーに登録する。相対インポート（`./util`）だけは
//! インポートしたディレクトリから解決した絶対パスがキーになる。

pub mod constraint;
mod file;
mod package;
pub mod resolver;

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{ZouniError, ZouniResult};
use crate::logf;
use crate::logger::Logger;
use crate::source_map::{FileId, FileSet, Position};

pub use file::SourceFile;
pub use package::{DeclId, DeclRef, Package};
pub use constraint::BuildContext;
pub use resolver::{package_key, BuildPackage, ModuleResolver, PackageResolver, Resolution};

/// ルートパッケージを登録するキー
pub const ROOT_PACKAGE_KEY: &str = "main";

/// 読み込み済みのパッケージ全体
#[derive(Debug, Clone)]
pub struct Program {
    /// インポートパスからパッケージへの対応（登録順）
    packages: IndexMap<String, Package>,
    fset: FileSet,
    /// FileId ごとの (パッケージ, ファイル) の添字
    locations: Vec<(usize, usize)>,
}

impl Program {
    /// `entry_dir` のパッケージとそこから到達できるパッケージを読み込む
    pub fn load(
        entry_dir: &Path,
        resolver: &dyn PackageResolver,
        logger: &dyn Logger,
    ) -> ZouniResult<Program> {
        let entry_dir = if entry_dir.is_absolute() {
            entry_dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(entry_dir)
        };
        logf!(logger, "rootDir = {}", entry_dir.display());

        let root = resolver.import_dir(&entry_dir)?;
        logf!(logger, "root pkg = {} ({})", root.name, root.import_path);

        let mut loader = Loader {
            logger,
            fset: FileSet::new(),
            packages: IndexMap::new(),
            locations: Vec::new(),
        };
        loader.register(ROOT_PACKAGE_KEY, root.clone())?;

        let mut queue = VecDeque::from([root]);
        while let Some(record) = queue.pop_front() {
            for import_path in &record.imports {
                let key = package_key(import_path, &record.dir);
                // 菱形の依存や循環は一度読んだパッケージで止まる
                if loader.packages.contains_key(&key) {
                    continue;
                }

                match resolver.find_dir(import_path, &record.dir)? {
                    Resolution::External => {
                        logf!(logger, "skip external package {}", import_path);
                    }
                    Resolution::Local(dir) => {
                        let next = resolver.import_dir(&dir)?;
                        logf!(logger, "next package = {} ({})", next.name, dir.display());
                        loader.register(&key, next.clone())?;
                        queue.push_back(next);
                    }
                }
            }
        }

        Ok(Program {
            packages: loader.packages,
            fset: loader.fset,
            locations: loader.locations,
        })
    }

    /// ルートパッケージ
    pub fn root(&self) -> &Package {
        &self.packages[0]
    }

    /// 登録キー（インポートパスかルートの予約キー、相対インポートは絶対パス）でパッケージを探す
    pub fn package(&self, key: &str) -> Option<&Package> {
        self.packages.get(key)
    }

    /// 登録順のパッケージ
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn file_set(&self) -> &FileSet {
        &self.fset
    }

    /// グローバル位置を含むソースファイル
    pub fn file_at(&self, pos: usize) -> Option<&SourceFile> {
        let FileId(id) = self.fset.file_at(pos)?;
        let &(package, file) = self.locations.get(id)?;
        self.packages.get_index(package)?.1.files().get(file)
    }

    pub fn position(&self, pos: usize) -> Option<Position> {
        self.fset.position(pos)
    }

    /// すべてのパッケージの宣言（パッケージの登録順）
    pub fn decls(&self) -> impl Iterator<Item = DeclRef<'_>> {
        self.packages.values().flat_map(|package| package.decls())
    }

    pub fn decl(&self, id: DeclId) -> Option<DeclRef<'_>> {
        self.packages.get_index(id.package)?.1.decl(id)
    }
}

/// 読み込み中の状態
struct Loader<'a> {
    logger: &'a dyn Logger,
    fset: FileSet,
    packages: IndexMap<String, Package>,
    locations: Vec<(usize, usize)>,
}

impl Loader<'_> {
    /// パッケージのファイルをすべて構文解析して登録する
    fn register(&mut self, key: &str, build: BuildPackage) -> ZouniResult<()> {
        let index = self.packages.len();
        let mut files = Vec::with_capacity(build.go_files.len());

        for file_name in &build.go_files {
            let path = build.dir.join(file_name);
            let source = fs::read_to_string(&path).map_err(|e| ZouniError::FileRead {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let name = if build.name == "main" {
                file_name.clone()
            } else {
                format!("{}/{}", build.import_path, file_name)
            };

            let file = SourceFile::parse(path, name, source, &mut self.fset)?;
            logf!(self.logger, "parsed {}", file.path().display());
            self.locations.push((index, files.len()));
            files.push(file);
        }

        self.packages.insert(
            key.to_string(),
            Package::new(index, key.to_string(), build, files),
        );
        Ok(())
    }
}
