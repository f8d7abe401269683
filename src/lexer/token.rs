//! トークン定義

use logos::Logos;
use std::fmt;

/// Go言語のトークン型
///
/// リテラルはソース上の表記をそのまま保持する（引用符も含む）。
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f\r]+")] // 空白文字をスキップ（改行以外）
#[logos(skip(r"//[^\n]*", allow_greedy = true))] // 行コメント
pub enum Token {
    // キーワード
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    // 識別子（キーワードの後に来る必要がある）
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // 数値リテラル
    #[regex(
        r"[0-9][0-9_]*|0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+",
        |lex| lex.slice().to_owned()
    )]
    Int(String),

    #[regex(
        r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?|[0-9][0-9_]*[eE][+-]?[0-9_]+|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?",
        |lex| lex.slice().to_owned()
    )]
    // 16進浮動小数点（指数部 `p` は必須）
    #[regex(
        r"0[xX][0-9a-fA-F_]*\.?[0-9a-fA-F_]*[pP][+-]?[0-9_]+",
        |lex| lex.slice().to_owned()
    )]
    Float(String),

    #[regex(
        r"([0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?)i",
        |lex| lex.slice().to_owned()
    )]
    #[regex(
        r"0[xX][0-9a-fA-F_]*\.?[0-9a-fA-F_]*[pP][+-]?[0-9_]+i",
        |lex| lex.slice().to_owned()
    )]
    Imag(String),

    // ルーンリテラル
    #[regex(r"'([^'\\\n]|\\[^\n])([^'\\\n]|\\[^\n])*'", |lex| lex.slice().to_owned())]
    Char(String),

    // 文字列リテラル（解釈付き・raw）
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_owned())]
    #[regex(r"`[^`]*`", |lex| lex.slice().to_owned())]
    String(String),

    // 算術演算子
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Or,
    #[token("^")]
    Caret,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("&^")]
    AndNot,

    // 代入演算子
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("&^=")]
    AndNotAssign,
    #[token("=")]
    Assign,
    #[token(":=")]
    Define,

    // 論理・比較演算子
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("...")]
    Ellipsis,

    // デリミタ
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // 特殊トークン（セミコロン自動挿入の判定にだけ使う）
    #[regex(r"\n")]
    Newline,

    // ブロックコメント。改行を含むかどうかを保持する
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().contains('\n'))]
    BlockComment(bool),

    // エラートークン
    Error,
}

impl Token {
    /// 直後の改行でセミコロンが自動挿入されるトークンかどうか
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Int(_)
                | Token::Float(_)
                | Token::Imag(_)
                | Token::Char(_)
                | Token::String(_)
                | Token::Break
                | Token::Continue
                | Token::Fallthrough
                | Token::Return
                | Token::Inc
                | Token::Dec
                | Token::RightParen
                | Token::RightBracket
                | Token::RightBrace
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Break => write!(f, "break"),
            Token::Case => write!(f, "case"),
            Token::Chan => write!(f, "chan"),
            Token::Const => write!(f, "const"),
            Token::Continue => write!(f, "continue"),
            Token::Default => write!(f, "default"),
            Token::Defer => write!(f, "defer"),
            Token::Else => write!(f, "else"),
            Token::Fallthrough => write!(f, "fallthrough"),
            Token::For => write!(f, "for"),
            Token::Func => write!(f, "func"),
            Token::Go => write!(f, "go"),
            Token::Goto => write!(f, "goto"),
            Token::If => write!(f, "if"),
            Token::Import => write!(f, "import"),
            Token::Interface => write!(f, "interface"),
            Token::Map => write!(f, "map"),
            Token::Package => write!(f, "package"),
            Token::Range => write!(f, "range"),
            Token::Return => write!(f, "return"),
            Token::Select => write!(f, "select"),
            Token::Struct => write!(f, "struct"),
            Token::Switch => write!(f, "switch"),
            Token::Type => write!(f, "type"),
            Token::Var => write!(f, "var"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Int(s) | Token::Float(s) | Token::Imag(s) => write!(f, "{}", s),
            Token::Char(s) | Token::String(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Ampersand => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::LtLt => write!(f, "<<"),
            Token::GtGt => write!(f, ">>"),
            Token::AndNot => write!(f, "&^"),
            Token::PlusAssign => write!(f, "+="),
            Token::MinusAssign => write!(f, "-="),
            Token::StarAssign => write!(f, "*="),
            Token::SlashAssign => write!(f, "/="),
            Token::PercentAssign => write!(f, "%="),
            Token::AndAssign => write!(f, "&="),
            Token::OrAssign => write!(f, "|="),
            Token::CaretAssign => write!(f, "^="),
            Token::ShlAssign => write!(f, "<<="),
            Token::ShrAssign => write!(f, ">>="),
            Token::AndNotAssign => write!(f, "&^="),
            Token::Assign => write!(f, "="),
            Token::Define => write!(f, ":="),
            Token::AndAnd => write!(f, "&&"),
            Token::OrOr => write!(f, "||"),
            Token::Arrow => write!(f, "<-"),
            Token::Inc => write!(f, "++"),
            Token::Dec => write!(f, "--"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Bang => write!(f, "!"),
            Token::Tilde => write!(f, "~"),
            Token::Ellipsis => write!(f, "..."),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Dot => write!(f, "."),
            Token::Newline => write!(f, "\\n"),
            Token::BlockComment(_) => write!(f, "comment"),
            Token::Error => write!(f, "error"),
        }
    }
}
