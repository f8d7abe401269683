//! 式の定義

use serde::Serialize;

use super::{
    ArrayType, BasicLit, Block, ChanType, Ellipsis, FuncType, Ident, InterfaceType, MapType, Span,
    StructType,
};

/// 式（型式を含む）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    CompositeLit(CompositeLit),
    FuncLit(FuncLit),
    Paren(ParenExpr),
    Selector(SelectorExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    TypeAssert(TypeAssertExpr),
    Call(CallExpr),
    Star(StarExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    KeyValue(KeyValueExpr),

    // 型式
    ArrayType(ArrayType),
    Ellipsis(Ellipsis),
    FuncType(FuncType),
    MapType(MapType),
    ChanType(ChanType),
    StructType(StructType),
    InterfaceType(InterfaceType),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(e) => e.span,
            Expr::BasicLit(e) => e.span,
            Expr::CompositeLit(e) => e.span,
            Expr::FuncLit(e) => e.span,
            Expr::Paren(e) => e.span,
            Expr::Selector(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Slice(e) => e.span,
            Expr::TypeAssert(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Star(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::KeyValue(e) => e.span,
            Expr::ArrayType(e) => e.span,
            Expr::Ellipsis(e) => e.span,
            Expr::FuncType(e) => e.span,
            Expr::MapType(e) => e.span,
            Expr::ChanType(e) => e.span,
            Expr::StructType(e) => e.span,
            Expr::InterfaceType(e) => e.span,
        }
    }

    /// 複合リテラルの型として `T{...}` の形で現れうる型名かどうか
    pub(crate) fn is_type_name(&self) -> bool {
        match self {
            Expr::Ident(_) => true,
            Expr::Selector(sel) => matches!(*sel.x, Expr::Ident(_)),
            Expr::Index(index) => index.x.is_type_name(),
            _ => false,
        }
    }

    /// 括弧を外した式
    pub fn unparen(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.x.unparen(),
            _ => self,
        }
    }
}

/// 複合リテラル（`T{a, b}`、型が省略された `{a, b}`）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeLit {
    pub ty: Option<Box<Expr>>,
    pub elts: Vec<Expr>,
    pub span: Span,
}

/// 関数リテラル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenExpr {
    pub x: Box<Expr>,
    pub span: Span,
}

/// セレクタ式 `x.sel`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
    pub span: Span,
}

/// インデックス式 `x[i]`。型引数の明示 `f[int, string]` では複数になる
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexExpr {
    pub x: Box<Expr>,
    pub indices: Vec<Expr>,
    pub span: Span,
}

/// スライス式 `x[low:high:max]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceExpr {
    pub x: Box<Expr>,
    pub low: Option<Box<Expr>>,
    pub high: Option<Box<Expr>>,
    pub max: Option<Box<Expr>>,
    pub span: Span,
}

/// 型アサーション `x.(T)`。`x.(type)` では `ty` が `None`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAssertExpr {
    pub x: Box<Expr>,
    pub ty: Option<Box<Expr>>,
    pub span: Span,
}

/// 関数呼び出し（型変換も同じ形になる）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub args: Vec<Expr>,
    /// 最後の引数に `...` が付いているか
    pub has_ellipsis: bool,
    pub span: Span,
}

/// ポインタ型 `*T` または間接参照 `*p`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarExpr {
    pub x: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Xor,
    Addr,
    Recv,
    Tilde,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub x: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    LogOr,
    LogAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    /// Goの演算子優先順位（大きいほど強く結合する）
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::LogOr => 1,
            BinaryOp::LogAnd => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => 4,
            BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub x: Box<Expr>,
    pub y: Box<Expr>,
    pub span: Span,
}

/// 複合リテラル内の `key: value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValueExpr {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}
