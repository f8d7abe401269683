//! レキサーのメイン実装

use logos::{Lexer as LogosLexer, Logos, Span};

use super::token::Token;

const BOM: char = '\u{feff}';

/// 位置情報付きトークン
///
/// `span` はファイル先頭からのバイトオフセット。
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub span: Span,
}

/// Go言語のレキサー
///
/// Goの規則に従ってセミコロンを自動挿入する。行末のトークンが
/// 識別子・リテラル・`return` などの場合、改行を `;` に置き換える。
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    insert_semicolon: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    ///
    /// 先頭の BOM は読み飛ばす。スパンは BOM を含む入力からのオフセットのまま。
    pub fn new(input: &'a str) -> Self {
        let mut inner = Token::lexer(input);
        if input.starts_with(BOM) {
            inner.bump(BOM.len_utf8());
        }
        Self {
            inner,
            insert_semicolon: false,
            finished: false,
        }
    }

    /// 次のトークンを取得
    pub fn next_token(&mut self) -> Option<TokenWithPosition> {
        loop {
            let Some(result) = self.inner.next() else {
                return self.finish();
            };
            let span = self.inner.span();
            let token = result.unwrap_or(Token::Error);

            match token {
                Token::Newline | Token::BlockComment(true) => {
                    if self.insert_semicolon {
                        self.insert_semicolon = false;
                        return Some(TokenWithPosition {
                            token: Token::Semicolon,
                            span: span.start..span.start,
                        });
                    }
                }
                Token::BlockComment(false) => {}
                token => {
                    self.insert_semicolon = token.ends_statement();
                    return Some(TokenWithPosition { token, span });
                }
            }
        }
    }

    /// 入力終端での処理。最終行に改行がなくてもセミコロンを補う
    fn finish(&mut self) -> Option<TokenWithPosition> {
        if self.finished {
            return None;
        }
        self.finished = true;

        if self.insert_semicolon {
            self.insert_semicolon = false;
            let end = self.inner.source().len();
            return Some(TokenWithPosition {
                token: Token::Semicolon,
                span: end..end,
            });
        }
        None
    }

    /// すべてのトークンを収集
    pub fn collect_tokens(mut self) -> Vec<TokenWithPosition> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
