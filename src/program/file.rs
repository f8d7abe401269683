//! パッケージに含まれる1つのソースファイル

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::resolver::package_key;
use crate::ast::{self, Decl, Span};
use crate::error::{ZouniError, ZouniResult};
use crate::lexer::literal_parser::{last_path_segment, trim_quote};
use crate::parser::parse_file;
use crate::source_map::{FileSet, Position};

/// 解析済みのソースファイル
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    /// 位置表示に使う論理名（`main.go` や `example.com/app/lib/lib.go`）
    name: String,
    source: String,
    base: usize,
    ast: ast::File,
    /// セレクタ（別名または最後の要素）からパッケージの登録キーへの対応
    selectors: IndexMap<String, String>,
}

impl SourceFile {
    /// ファイル集合に登録してから構文解析する
    pub(crate) fn parse(
        path: PathBuf,
        name: String,
        source: String,
        fset: &mut FileSet,
    ) -> ZouniResult<Self> {
        let (_, base) = fset.add_file(name.clone(), &source);
        let ast = parse_file(&source, base).map_err(|error| ZouniError::Parse {
            path: path.clone(),
            error,
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let selectors = ast
            .imports
            .iter()
            .map(|import| {
                let import_path = trim_quote(&import.path.value);
                let selector = match &import.name {
                    Some(name) => name.name.clone(),
                    None => last_path_segment(import_path).to_string(),
                };
                (selector, package_key(import_path, dir))
            })
            .collect();

        Ok(Self {
            path,
            name,
            source,
            base,
            ast,
            selectors,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn ast(&self) -> &ast::File {
        &self.ast
    }

    /// パッケージ節の名前
    pub fn package_name(&self) -> &str {
        &self.ast.package.name
    }

    pub fn decls(&self) -> &[Decl] {
        &self.ast.decls
    }

    /// セレクタに対応するパッケージの登録キー
    pub fn find_package_by_selector(&self, selector: &str) -> Option<&str> {
        self.selectors.get(selector).map(String::as_str)
    }

    /// このファイルのセレクタとインポートパスの組
    pub fn selectors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selectors
            .iter()
            .map(|(selector, path)| (selector.as_str(), path.as_str()))
    }

    /// グローバルなスパンに対応するソースの断片
    pub fn text(&self, span: Span) -> Option<&str> {
        let start = span.start.checked_sub(self.base)?;
        let end = span.end.checked_sub(self.base)?;
        self.source.get(start..end)
    }

    /// グローバル位置を行・列に変換する
    pub fn position(&self, pos: usize) -> Option<Position> {
        let offset = pos.checked_sub(self.base)?;
        let before = self.source.get(..offset)?;
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(idx) => offset - idx,
            None => offset + 1,
        };
        Some(Position {
            file: self.name.clone(),
            line,
            column,
        })
    }
}
