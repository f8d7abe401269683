//! パッケージと宣言の参照

use std::path::Path;

use crate::ast::{Decl, DeclKeyword, GenDecl, Span, Spec};
use crate::source_map::Position;

use super::file::SourceFile;
use super::resolver::BuildPackage;

/// 宣言の識別子（パッケージ・ファイル・ファイル内の順番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId {
    pub package: usize,
    pub file: usize,
    pub index: usize,
}

/// 1つのインポートパスに対応するパッケージ
#[derive(Debug, Clone)]
pub struct Package {
    index: usize,
    key: String,
    build: BuildPackage,
    files: Vec<SourceFile>,
}

impl Package {
    pub(crate) fn new(index: usize, key: String, build: BuildPackage, files: Vec<SourceFile>) -> Self {
        Self {
            index,
            key,
            build,
            files,
        }
    }

    /// 登録に使ったキー（インポートパス、ルートなら予約キー）
    pub fn key(&self) -> &str {
        &self.key
    }

    /// パッケージ節の名前
    pub fn name(&self) -> &str {
        &self.build.name
    }

    pub fn import_path(&self) -> &str {
        &self.build.import_path
    }

    pub fn dir(&self) -> &Path {
        &self.build.dir
    }

    pub fn build(&self) -> &BuildPackage {
        &self.build
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// ファイル順、ファイル内の出現順にすべての宣言を返す
    pub fn decls(&self) -> impl Iterator<Item = DeclRef<'_>> {
        self.files.iter().enumerate().flat_map(move |(file_index, file)| {
            file.decls()
                .iter()
                .enumerate()
                .map(move |(index, decl)| DeclRef {
                    id: DeclId {
                        package: self.index,
                        file: file_index,
                        index,
                    },
                    package: self,
                    file,
                    decl,
                })
        })
    }

    pub fn decl(&self, id: DeclId) -> Option<DeclRef<'_>> {
        if id.package != self.index {
            return None;
        }
        let file = self.files.get(id.file)?;
        let decl = file.decls().get(id.index)?;
        Some(DeclRef {
            id,
            package: self,
            file,
            decl,
        })
    }

    /// レシーバーを持たない関数を名前で探す（最初に見つかったもの）
    pub fn find_function_by_name(&self, name: &str) -> Option<DeclRef<'_>> {
        self.decls().find(|decl| match decl.decl {
            Decl::Func(func) => !func.is_method() && func.name.name == name,
            Decl::Gen(_) => false,
        })
    }

    /// 指定した名前の型指定を含む `type` 宣言を探す
    pub fn find_type_by_name(&self, name: &str) -> Option<DeclRef<'_>> {
        self.decls().find(|decl| match decl.decl {
            Decl::Gen(gen) => type_names(gen).any(|type_name| type_name == name),
            Decl::Func(_) => false,
        })
    }

    /// レシーバーの基底型がいずれかの名前であるメソッド
    pub fn methods_of<'a>(&'a self, names: &'a [&'a str]) -> impl Iterator<Item = DeclRef<'a>> {
        self.decls().filter(move |decl| match decl.decl {
            Decl::Func(func) => func
                .receiver_type_name()
                .is_some_and(|recv| names.iter().any(|name| *name == recv)),
            Decl::Gen(_) => false,
        })
    }
}

/// `type` 宣言で定義される型の名前
pub(crate) fn type_names(gen: &GenDecl) -> impl Iterator<Item = &str> {
    gen.specs.iter().filter_map(move |spec| match spec {
        Spec::Type(ty) if gen.keyword == DeclKeyword::Type => Some(ty.name.name.as_str()),
        _ => None,
    })
}

/// プログラム内の宣言への参照
#[derive(Debug, Clone, Copy)]
pub struct DeclRef<'p> {
    id: DeclId,
    package: &'p Package,
    file: &'p SourceFile,
    decl: &'p Decl,
}

impl<'p> DeclRef<'p> {
    pub fn id(&self) -> DeclId {
        self.id
    }

    pub fn decl(&self) -> &'p Decl {
        self.decl
    }

    pub fn package(&self) -> &'p Package {
        self.package
    }

    pub fn file(&self) -> &'p SourceFile {
        self.file
    }

    /// `func` または `import`/`const`/`var`/`type`
    pub fn keyword(&self) -> &'static str {
        match self.decl {
            Decl::Func(_) => "func",
            Decl::Gen(gen) => gen.keyword.as_str(),
        }
    }

    /// 宣言の名前。グループ化された宣言では最初の指定の名前
    pub fn name(&self) -> Option<&'p str> {
        match self.decl {
            Decl::Func(func) => Some(&func.name.name),
            Decl::Gen(gen) => match gen.specs.first()? {
                Spec::Import(import) => Some(
                    import
                        .name
                        .as_ref()
                        .map(|name| name.name.as_str())
                        .unwrap_or(import.path.value.as_str()),
                ),
                Spec::Value(value) => value.names.first().map(|name| name.name.as_str()),
                Spec::Type(ty) => Some(&ty.name.name),
            },
        }
    }

    /// メソッドならレシーバーの基底型名
    pub fn receiver_type_name(&self) -> Option<&'p str> {
        match self.decl {
            Decl::Func(func) => func.receiver_type_name(),
            Decl::Gen(_) => None,
        }
    }

    /// `type` 宣言なら定義している型の名前
    pub fn type_names(&self) -> Vec<&'p str> {
        match self.decl {
            Decl::Gen(gen) => type_names(gen).collect(),
            Decl::Func(_) => Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.decl.span()
    }

    /// 宣言の先頭のグローバル位置
    pub fn pos(&self) -> usize {
        self.decl.span().start
    }

    pub fn position(&self) -> Option<Position> {
        self.file.position(self.pos())
    }
}

impl PartialEq for DeclRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DeclRef<'_> {}
