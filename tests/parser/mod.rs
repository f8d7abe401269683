//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use zouni::ast::*;
use zouni::parser::{parse_file, ParseError};

/// ソースコードを解析してASTを取得するヘルパー関数
pub fn parse_source(source: &str) -> Result<File, ParseError> {
    parse_file(source, 0)
}

/// 解析に成功することを確認するヘルパー関数
pub fn assert_parse_success(source: &str) -> File {
    match parse_source(source) {
        Ok(file) => file,
        Err(e) => panic!("Parsing should succeed: {}", e),
    }
}

/// 解析に失敗することを確認するヘルパー関数
pub fn assert_parse_error(source: &str) -> ParseError {
    match parse_source(source) {
        Ok(_) => panic!("Parsing should fail"),
        Err(e) => e,
    }
}

/// 名前で関数宣言を探す
pub fn find_func<'a>(file: &'a File, name: &str) -> &'a FuncDecl {
    file.decls
        .iter()
        .find_map(|decl| match decl {
            Decl::Func(func) if func.name.name == name => Some(func),
            _ => None,
        })
        .unwrap_or_else(|| panic!("function {} not found", name))
}

/// `package main` の `main` 関数の本体として文を解析する
pub fn parse_body(body: &str) -> Vec<Stmt> {
    let source = format!("package main\n\nfunc main() {{\n{}\n}}\n", body);
    let file = assert_parse_success(&source);
    find_func(&file, "main")
        .body
        .clone()
        .expect("main has a body")
        .stmts
}

/// 1つの式を解析する
pub fn parse_expr(expr: &str) -> Expr {
    let mut stmts = parse_body(&format!("_ = {}", expr));
    match stmts.remove(0) {
        Stmt::Assign(mut assign) => assign.rhs.remove(0),
        other => panic!("Expected assignment, got {:?}", other),
    }
}

// サブモジュールの宣言
#[cfg(test)]
mod declaration_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod expression_test;
