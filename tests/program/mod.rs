//! プログラムテストの共通モジュール
//!
//! Goモジュールのディレクトリ構成を一時ディレクトリに作るヘルパーを定義する。

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use zouni::{
    dig, DeclRef, DigOptions, Digger, ModuleResolver, NopLogger, Program, ZouniError, ZouniResult,
};

/// 一時ディレクトリ上のGoソースツリー
pub struct GoTree {
    dir: TempDir,
}

impl GoTree {
    /// go.mod を持たないツリー
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// `module` をモジュールパスとする go.mod を置いたツリー
    pub fn module(module: &str) -> Self {
        Self::new().file("go.mod", &format!("module {}\n\ngo 1.21\n", module))
    }

    /// ファイルを書き込む（親ディレクトリも作る）
    pub fn file(self, path: &str, content: &str) -> Self {
        let path = self.dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create directory");
        }
        fs::write(&path, content).expect("failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// ルートディレクトリのパッケージを読み込む
    pub fn load(&self) -> ZouniResult<Program> {
        Program::load(self.path(), &ModuleResolver::new(), &NopLogger)
    }

    /// ルートからの相対ディレクトリのパッケージを読み込む
    pub fn load_dir(&self, dir: &str) -> ZouniResult<Program> {
        Program::load(&self.path().join(dir), &ModuleResolver::new(), &NopLogger)
    }
}

/// 宣言を `lib.Add`・`lib.Point.Norm` のような名前で表す
pub fn label(decl: &DeclRef<'_>) -> String {
    let package = decl.package().name();
    let name = decl.name().unwrap_or("?");
    match decl.receiver_type_name() {
        Some(recv) => format!("{}.{}.{}", package, recv, name),
        None => format!("{}.{}", package, name),
    }
}

/// 解析結果を名前の列にする
pub fn labels(decls: &[DeclRef<'_>]) -> Vec<String> {
    decls.iter().map(label).collect()
}

/// 既定の設定で解析して名前の列を返す
pub fn dig_labels(program: &Program) -> Vec<String> {
    match dig(program, &NopLogger) {
        Ok(decls) => labels(&decls),
        Err(e) => panic!("dig should succeed: {}", e),
    }
}

/// 型の参照もたどって解析して名前の列を返す
pub fn dig_labels_with_types(program: &Program) -> Vec<String> {
    let options = DigOptions { follow_types: true };
    match Digger::new(program, &NopLogger).with_options(options).dig() {
        Ok(decls) => labels(&decls),
        Err(e) => panic!("dig should succeed: {}", e),
    }
}

/// 読み込みに失敗することを確認して、そのエラーを返す
pub fn assert_load_error(tree: &GoTree) -> ZouniError {
    match tree.load() {
        Ok(program) => panic!("Loading should fail, got {}", program),
        Err(e) => e,
    }
}

// サブモジュールの宣言
#[cfg(test)]
mod dig_test;
#[cfg(test)]
mod fixture_test;
