//! Lexical analysis module for Go source files.
//!
//! This module tokenizes Go source code into a stream of tokens. Literal
//! tokens keep their source spelling, and newlines are turned into
//! semicolons following Go's automatic semicolon insertion rule, so the
//! parser only ever sees explicit statement terminators.

mod lexer;
pub mod literal_parser;
mod token;

pub use lexer::{Lexer, TokenWithPosition};
pub use token::Token;
