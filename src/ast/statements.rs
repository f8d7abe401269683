//! 文の定義

use serde::Serialize;

use super::{Expr, GenDecl, Ident, Span};

/// 文
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Decl(GenDecl),
    Empty(Span),
    Labeled(LabeledStmt),
    Expr(Expr),
    Send(SendStmt),
    IncDec(IncDecStmt),
    Assign(AssignStmt),
    Go(GoStmt),
    Defer(DeferStmt),
    Return(ReturnStmt),
    Branch(BranchStmt),
    Block(Block),
    If(IfStmt),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
    Select(SelectStmt),
    For(ForStmt),
    Range(RangeStmt),
}

/// ブロック `{ ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Box<Stmt>,
    pub span: Span,
}

/// チャネル送信 `ch <- v`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendStmt {
    pub chan: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncDecStmt {
    pub x: Expr,
    pub inc: bool,
    pub span: Span,
}

/// 代入の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `+=` や `<<=` などの複合代入（演算子の表記を保持）
    Op(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    pub op: AssignOp,
    pub rhs: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoStmt {
    pub call: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeferStmt {
    pub call: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchStmt {
    pub kind: BranchKind,
    pub label: Option<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub then_branch: Block,
    /// `else if` は `Stmt::If`、`else { }` は `Stmt::Block`
    pub else_branch: Option<Box<Stmt>>,
    pub span: Span,
}

/// `case` 節（`default` では `list` が空）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseClause {
    pub list: Vec<Expr>,
    pub is_default: bool,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub tag: Option<Expr>,
    pub clauses: Vec<CaseClause>,
    pub span: Span,
}

/// 型スイッチ。`assign` は `x := y.(type)` または `y.(type)` の文
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub assign: Box<Stmt>,
    pub clauses: Vec<CaseClause>,
    pub span: Span,
}

/// `select` の節。`comm` が `None` なら `default`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommClause {
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStmt {
    pub clauses: Vec<CommClause>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Block,
    pub span: Span,
}

/// `for k, v := range x { }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `:=` で宣言しているか（`=` なら false）
    pub define: bool,
    pub x: Expr,
    pub body: Block,
    pub span: Span,
}
