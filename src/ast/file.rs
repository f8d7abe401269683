//! ソースファイル構造

use serde::Serialize;

use super::{BasicLit, Decl, Ident, Span};

/// ASTのルートノード（1つのGoソースファイルを表す）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub package: Ident,
    /// すべてのインポート指定（宣言の中のものを出現順に並べたもの）
    pub imports: Vec<ImportSpec>,
    /// トップレベル宣言（import宣言も含む）
    pub decls: Vec<Decl>,
    pub span: Span,
}

/// インポート指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    /// 明示的な別名（`.` や `_` も含む）
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub span: Span,
}

/// ファイル先頭部分（パッケージ節とインポート）だけを読んだ結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
}
