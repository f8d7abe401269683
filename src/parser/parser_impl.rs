//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// Goパーサー
///
/// トークンのスパンはファイル内オフセットで、構文木には `base` を足した
/// グローバル位置を記録する。
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
    pub(super) base: usize,
    /// 式のネストレベル。負の値は制御節（`if x {` など）の中を表し、
    /// そこでは型名を使った複合リテラルを許さない
    pub(super) expr_lev: i32,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>, base: usize) -> Self {
        Self {
            tokens,
            current: 0,
            base,
            expr_lev: 0,
        }
    }

    /// ソースファイル全体を解析
    pub fn parse(&mut self) -> ParseResult<File> {
        let start = self.pos();
        let package = self.parse_package_clause()?;

        let mut imports = Vec::new();
        let mut decls = Vec::new();

        // import宣言は他の宣言より前に置かれる
        while self.check(&Token::Import) {
            let decl = self.parse_gen_decl()?;
            imports.extend(decl.specs.iter().filter_map(|spec| match spec {
                Spec::Import(import) => Some(import.clone()),
                _ => None,
            }));
            decls.push(Decl::Gen(decl));
            self.expect_semicolon()?;
        }

        while !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            decls.push(self.parse_decl()?);
            self.expect_semicolon()?;
        }

        Ok(File {
            package,
            imports,
            decls,
            span: self.span_from(start),
        })
    }

    /// パッケージ節とインポートだけを解析
    pub fn parse_header(&mut self) -> ParseResult<Header> {
        let package = self.parse_package_clause()?;

        let mut imports = Vec::new();
        while self.check(&Token::Import) {
            let decl = self.parse_gen_decl()?;
            imports.extend(decl.specs.into_iter().filter_map(|spec| match spec {
                Spec::Import(import) => Some(import),
                _ => None,
            }));
            self.expect_semicolon()?;
        }

        Ok(Header { package, imports })
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のトークンのファイル内開始位置
    pub(super) fn pos(&self) -> usize {
        match self.tokens.get(self.current) {
            Some(t) => t.span.start,
            None => self.tokens.last().map(|t| t.span.end).unwrap_or(0),
        }
    }

    /// 現在のトークンのファイル内スパン
    fn current_span(&self) -> Span {
        match self.tokens.get(self.current) {
            Some(t) => Span::from(t.span.clone()),
            None => {
                let end = self.pos();
                Span::new(end, end)
            }
        }
    }

    /// 開始位置から直前のトークンまでのグローバルなスパンを作成
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start)
        } else {
            start
        };
        Span::new(self.base + start, self.base + end.max(start))
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// オフセット先のトークンの種類をチェック
    pub(super) fn check_at(&self, offset: usize, token_type: &Token) -> bool {
        self.peek(offset)
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token_type))
    }

    pub(super) fn check_ident(&self) -> bool {
        matches!(self.current_token(), Some(Token::Identifier(_)))
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<()> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", token_type)))
        }
    }

    /// 文・宣言の区切りを期待する。`)` と `}` の直前では省略できる
    pub(super) fn expect_semicolon(&mut self) -> ParseResult<()> {
        if self.is_at_end() || self.check(&Token::RightParen) || self.check(&Token::RightBrace) {
            return Ok(());
        }
        self.expect(Token::Semicolon)
    }

    /// 識別子を期待
    pub(super) fn expect_ident(&mut self) -> ParseResult<Ident> {
        match self.tokens.get(self.current) {
            Some(TokenWithPosition {
                token: Token::Identifier(name),
                span,
            }) => {
                let ident = Ident::new(
                    name.clone(),
                    Span::new(self.base + span.start, self.base + span.end),
                );
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("識別子")),
        }
    }

    /// 識別子のリスト `a, b, c` を解析
    pub(super) fn parse_ident_list(&mut self) -> ParseResult<Vec<Ident>> {
        let mut idents = vec![self.expect_ident()?];
        while self.match_token(&Token::Comma) {
            idents.push(self.expect_ident()?);
        }
        Ok(idents)
    }

    /// 文字列リテラルを期待
    pub(super) fn expect_string(&mut self) -> ParseResult<BasicLit> {
        match self.tokens.get(self.current) {
            Some(TokenWithPosition {
                token: Token::String(value),
                span,
            }) => {
                let lit = BasicLit {
                    kind: LitKind::String,
                    value: value.clone(),
                    span: Span::new(self.base + span.start, self.base + span.end),
                };
                self.advance();
                Ok(lit)
            }
            _ => Err(self.unexpected("文字列リテラル")),
        }
    }

    /// 括弧 `[` の対応する `]` の直後に型が続くか
    ///
    /// `buf [4]byte` のような配列型のフィールドと、`List[T]` のような
    /// 型引数付きの型名を区別するために使う。`offset` は `[` の位置。
    pub(super) fn bracket_followed_by_type(&self, offset: usize) -> bool {
        let mut depth = 0usize;
        let mut i = offset;
        while let Some(token) = self.peek(i) {
            match token {
                Token::LeftBracket => depth += 1,
                Token::RightBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return self.peek(i + 1).is_some_and(starts_type);
                    }
                }
                Token::Semicolon | Token::LeftBrace | Token::RightBrace => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    /// エラーを作成
    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        ParserError::SyntaxError {
            message: message.into(),
            span: self.current_span(),
        }
    }

    /// 予期しないトークンエラーを作成
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        match self.current_token() {
            Some(token) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("'{}'", token),
                span: self.current_span(),
            },
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.current_span(),
            },
        }
    }
}

/// 型の開始になりうるトークンか
pub(super) fn starts_type(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::Star
            | Token::LeftBracket
            | Token::LeftParen
            | Token::Map
            | Token::Chan
            | Token::Arrow
            | Token::Func
            | Token::Struct
            | Token::Interface
    )
}
