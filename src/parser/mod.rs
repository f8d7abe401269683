//! パーサーモジュール
//!
//! Goのソースファイルをトークン列から抽象構文木（AST）に解析する。
//! 再帰下降構文解析を使い、二項演算子は優先順位に従って結合する。
//!
//! 構文木のスパンはファイルセット上のグローバル位置で、呼び出し側が
//! 渡す `base` をファイル内オフセットに足したものになる。
//! エラーのスパンはファイル内オフセットのまま返す。
//!
//! ```go
//! package lib
//!
//! type Number interface {
//!     int | int32 | int64
//! }
//!
//! func Add[V Number](a, b V) V {
//!     return a + b
//! }
//! ```

mod decl_parser;
mod expr_parser;
mod parser_impl;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use crate::ast::{File, Header, Span};
use crate::error::ParserError;
use crate::lexer::{Lexer, Token, TokenWithPosition};

pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;

/// ソースファイル全体を解析する
pub fn parse_file(source: &str, base: usize) -> ParseResult<File> {
    let tokens = tokenize(source)?;
    Parser::new(tokens, base).parse()
}

/// パッケージ節とインポートだけを解析する
///
/// 宣言部分は読まないので、ビルド対象のファイル一覧を作るときに使う。
pub fn parse_header(source: &str) -> ParseResult<Header> {
    let tokens = tokenize(source)?;
    Parser::new(tokens, 0).parse_header()
}

fn tokenize(source: &str) -> ParseResult<Vec<TokenWithPosition>> {
    let tokens = Lexer::new(source).collect_tokens();
    if let Some(bad) = tokens.iter().find(|t| t.token == Token::Error) {
        return Err(ParserError::UnrecognizedToken {
            token: source.get(bad.span.clone()).unwrap_or_default().to_string(),
            span: Span::from(bad.span.clone()),
        });
    }
    Ok(tokens)
}
