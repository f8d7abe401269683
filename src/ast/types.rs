//! 型式の定義
//!
//! Goでは型も式の一種として構文木に現れるため、ここでの構造体はすべて
//! `Expr` のバリアントとして使われる。

use serde::Serialize;

use super::{BasicLit, Expr, Ident, Span};

/// パラメータ・結果・フィールド・型パラメータのリスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub span: Span,
}

/// リストの1要素（名前なしの場合は型だけ、または埋め込み）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
    pub span: Span,
}

/// 関数型（シグネチャ）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncType {
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
    pub span: Span,
}

/// `[N]T`、`[]T`（`len` が `None`）、`[...]T`（`len` が `Ellipsis`）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayType {
    pub len: Option<Box<Expr>>,
    pub elem: Box<Expr>,
    pub span: Span,
}

/// `...T`（可変長パラメータ）または配列長の `...`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ellipsis {
    pub elem: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapType {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

/// チャネルの方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChanType {
    pub dir: ChanDir,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructType {
    pub fields: FieldList,
    pub span: Span,
}

/// インターフェース型。メソッドは名前付きフィールド、埋め込みと型集合は名前なしフィールド
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceType {
    pub methods: FieldList,
    pub span: Span,
}
