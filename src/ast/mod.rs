//! Abstract Syntax Tree (AST) definitions for Go source files.
//!
//! Every span is a global position in the program's [`FileSet`], so any node
//! can be mapped back to the file it came from.
//!
//! [`FileSet`]: crate::source_map::FileSet

use serde::Serialize;

mod declarations;
mod expressions;
mod file;
mod statements;
mod types;

pub use declarations::*;
pub use expressions::*;
pub use file::*;
pub use statements::*;
pub use types::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Identifier with its location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Literal kinds, spelled exactly as in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Basic literal (`42`, `"fmt"`, `'a'`, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}
