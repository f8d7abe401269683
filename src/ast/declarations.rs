//! 宣言の定義

use serde::Serialize;

use super::{Block, Expr, FieldList, FuncType, Ident, ImportSpec, Span};

/// トップレベル宣言
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Func(func) => func.span,
            Decl::Gen(gen) => gen.span,
        }
    }
}

/// 関数・メソッド宣言
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncDecl {
    /// メソッドのレシーバー（関数なら `None`）
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    /// 本体（アセンブリ実装などの外部関数なら `None`）
    pub body: Option<Block>,
    pub span: Span,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }

    /// レシーバーの基底型名（`func (p *Point[T]) ...` なら `Point`）
    pub fn receiver_type_name(&self) -> Option<&str> {
        let field = self.recv.as_ref()?.fields.first()?;
        base_type_name(&field.ty)
    }
}

fn base_type_name(ty: &Expr) -> Option<&str> {
    match ty {
        Expr::Ident(ident) => Some(&ident.name),
        Expr::Star(star) => base_type_name(&star.x),
        Expr::Paren(paren) => base_type_name(&paren.x),
        Expr::Index(index) => base_type_name(&index.x),
        _ => None,
    }
}

/// `import`/`const`/`var`/`type` のどれか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclKeyword {
    Import,
    Const,
    Var,
    Type,
}

impl DeclKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKeyword::Import => "import",
            DeclKeyword::Const => "const",
            DeclKeyword::Var => "var",
            DeclKeyword::Type => "type",
        }
    }
}

/// 一般宣言（グループ化された `var ( ... )` も1つの宣言として扱う）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub specs: Vec<Spec>,
    pub grouped: bool,
    pub span: Span,
}

/// 一般宣言の各指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `const`・`var` の指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// 型の指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// `type A = B` 形式の別名かどうか
    pub alias: bool,
    pub ty: Expr,
    pub span: Span,
}
