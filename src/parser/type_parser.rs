//! 型式の解析

use crate::ast::*;
use crate::lexer::Token;

use super::parser_impl::starts_type;
use super::{ParseResult, Parser};

impl Parser {
    /// 型を解析
    pub(super) fn parse_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        match self.current_token() {
            Some(Token::Identifier(_)) => self.parse_type_name(),
            Some(Token::Star) => {
                self.advance();
                let x = self.parse_type()?;
                Ok(Expr::Star(StarExpr {
                    x: Box::new(x),
                    span: self.span_from(start),
                }))
            }
            Some(Token::LeftBracket) => self.parse_array_type(),
            Some(Token::Map) => self.parse_map_type(),
            Some(Token::Chan) | Some(Token::Arrow) => self.parse_chan_type(),
            Some(Token::Func) => {
                self.advance();
                let ty = self.parse_signature(start, None)?;
                Ok(Expr::FuncType(ty))
            }
            Some(Token::Struct) => self.parse_struct_type(),
            Some(Token::Interface) => self.parse_interface_type(),
            Some(Token::LeftParen) => {
                self.advance();
                let x = self.parse_type()?;
                self.expect(Token::RightParen)?;
                Ok(Expr::Paren(ParenExpr {
                    x: Box::new(x),
                    span: self.span_from(start),
                }))
            }
            _ => Err(self.unexpected("型")),
        }
    }

    /// `T`、`pkg.T`、`T[int]`、`pkg.T[K, V]`
    fn parse_type_name(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        let ident = self.expect_ident()?;
        let mut ty = Expr::Ident(ident);

        if self.match_token(&Token::Dot) {
            let sel = self.expect_ident()?;
            ty = Expr::Selector(SelectorExpr {
                x: Box::new(ty),
                sel,
                span: self.span_from(start),
            });
        }

        if self.check(&Token::LeftBracket) && !self.check_at(1, &Token::RightBracket) {
            self.advance();
            let indices = self.parse_type_list(&Token::RightBracket)?;
            self.expect(Token::RightBracket)?;
            ty = Expr::Index(IndexExpr {
                x: Box::new(ty),
                indices,
                span: self.span_from(start),
            });
        }

        Ok(ty)
    }

    /// 閉じ括弧までのカンマ区切りの型リスト（末尾のカンマを許す）
    fn parse_type_list(&mut self, close: &Token) -> ParseResult<Vec<Expr>> {
        let mut types = Vec::new();
        while !self.check(close) && !self.is_at_end() {
            types.push(self.parse_type()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        if types.is_empty() {
            return Err(self.unexpected("型"));
        }
        Ok(types)
    }

    /// `[]T`、`[N]T`、`[...]T`
    fn parse_array_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        self.expect(Token::LeftBracket)?;

        let len = if self.check(&Token::RightBracket) {
            None
        } else if self.check(&Token::Ellipsis) && self.check_at(1, &Token::RightBracket) {
            let ellipsis_start = self.pos();
            self.advance();
            Some(Box::new(Expr::Ellipsis(Ellipsis {
                elem: None,
                span: self.span_from(ellipsis_start),
            })))
        } else {
            let prev = self.expr_lev;
            self.expr_lev += 1;
            let len = self.parse_expr()?;
            self.expr_lev = prev;
            Some(Box::new(len))
        };
        self.expect(Token::RightBracket)?;

        let elem = self.parse_type()?;
        Ok(Expr::ArrayType(ArrayType {
            len,
            elem: Box::new(elem),
            span: self.span_from(start),
        }))
    }

    fn parse_map_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        self.expect(Token::Map)?;
        self.expect(Token::LeftBracket)?;
        let key = self.parse_type()?;
        self.expect(Token::RightBracket)?;
        let value = self.parse_type()?;
        Ok(Expr::MapType(MapType {
            key: Box::new(key),
            value: Box::new(value),
            span: self.span_from(start),
        }))
    }

    /// `chan T`、`chan<- T`、`<-chan T`
    pub(super) fn parse_chan_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        let dir = if self.match_token(&Token::Arrow) {
            self.expect(Token::Chan)?;
            ChanDir::Recv
        } else {
            self.expect(Token::Chan)?;
            if self.match_token(&Token::Arrow) {
                ChanDir::Send
            } else {
                ChanDir::Both
            }
        };
        let value = self.parse_type()?;
        Ok(Expr::ChanType(ChanType {
            dir,
            value: Box::new(value),
            span: self.span_from(start),
        }))
    }

    /// 構造体型を解析
    fn parse_struct_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        self.expect(Token::Struct)?;
        let fields_start = self.pos();
        self.expect(Token::LeftBrace)?;

        let mut fields = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            fields.push(self.parse_struct_field()?);
            self.expect_semicolon()?;
        }
        self.expect(Token::RightBrace)?;

        Ok(Expr::StructType(StructType {
            fields: FieldList {
                fields,
                span: self.span_from(fields_start),
            },
            span: self.span_from(start),
        }))
    }

    /// フィールド宣言または埋め込みフィールド
    fn parse_struct_field(&mut self) -> ParseResult<Field> {
        let start = self.pos();

        let embedded = match self.current_token() {
            Some(Token::Star) => true,
            Some(Token::Identifier(_)) => match self.peek(1) {
                Some(Token::Dot)
                | Some(Token::Semicolon)
                | Some(Token::RightBrace)
                | Some(Token::String(_))
                | None => true,
                Some(Token::LeftBracket) => !self.bracket_followed_by_type(1),
                _ => false,
            },
            _ => false,
        };

        let (names, ty) = if embedded {
            (Vec::new(), self.parse_type()?)
        } else {
            let names = self.parse_ident_list()?;
            (names, self.parse_type()?)
        };

        let tag = if self.check(&Token::String(String::new())) {
            Some(self.expect_string()?)
        } else {
            None
        };

        Ok(Field {
            names,
            ty,
            tag,
            span: self.span_from(start),
        })
    }

    /// インターフェース型を解析
    fn parse_interface_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        self.expect(Token::Interface)?;
        let methods_start = self.pos();
        self.expect(Token::LeftBrace)?;

        let mut methods = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let elem_start = self.pos();
            if self.check_ident() && self.check_at(1, &Token::LeftParen) {
                let name = self.expect_ident()?;
                let sig = self.parse_signature(elem_start, None)?;
                methods.push(Field {
                    names: vec![name],
                    ty: Expr::FuncType(sig),
                    tag: None,
                    span: self.span_from(elem_start),
                });
            } else {
                // 埋め込みインターフェースまたは型集合 `~int | ~string`
                let ty = self.parse_constraint()?;
                methods.push(Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span: self.span_from(elem_start),
                });
            }
            self.expect_semicolon()?;
        }
        self.expect(Token::RightBrace)?;

        Ok(Expr::InterfaceType(InterfaceType {
            methods: FieldList {
                fields: methods,
                span: self.span_from(methods_start),
            },
            span: self.span_from(start),
        }))
    }

    /// 型制約 `A | ~B | C`
    pub(super) fn parse_constraint(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        let mut x = self.parse_constraint_term()?;
        while self.match_token(&Token::Or) {
            let y = self.parse_constraint_term()?;
            x = Expr::Binary(BinaryExpr {
                op: BinaryOp::Or,
                x: Box::new(x),
                y: Box::new(y),
                span: self.span_from(start),
            });
        }
        Ok(x)
    }

    fn parse_constraint_term(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        if self.match_token(&Token::Tilde) {
            let x = self.parse_type()?;
            Ok(Expr::Unary(UnaryExpr {
                op: UnaryOp::Tilde,
                x: Box::new(x),
                span: self.span_from(start),
            }))
        } else {
            self.parse_type()
        }
    }

    /// 型パラメータリスト `[K comparable, V any]`
    pub(super) fn parse_type_params(&mut self) -> ParseResult<FieldList> {
        let start = self.pos();
        self.expect(Token::LeftBracket)?;

        let mut fields = Vec::new();
        while !self.check(&Token::RightBracket) && !self.is_at_end() {
            let field_start = self.pos();
            let names = self.parse_ident_list()?;
            let ty = self.parse_constraint()?;
            fields.push(Field {
                names,
                ty,
                tag: None,
                span: self.span_from(field_start),
            });
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightBracket)?;

        if fields.is_empty() {
            return Err(self.error("型パラメータリストが空です"));
        }

        Ok(FieldList {
            fields,
            span: self.span_from(start),
        })
    }

    /// パラメータと結果を解析して関数型を作る。`start` は `func` キーワードなどの位置
    pub(super) fn parse_signature(
        &mut self,
        start: usize,
        type_params: Option<FieldList>,
    ) -> ParseResult<FuncType> {
        let params = self.parse_parameters()?;

        let results = if self.check(&Token::LeftParen) {
            Some(self.parse_parameters()?)
        } else if self.current_token().is_some_and(starts_type) {
            let result_start = self.pos();
            let ty = self.parse_type()?;
            let span = self.span_from(result_start);
            Some(FieldList {
                fields: vec![Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span,
                }],
                span,
            })
        } else {
            None
        };

        Ok(FuncType {
            type_params,
            params,
            results,
            span: self.span_from(start),
        })
    }

    /// 括弧付きのパラメータリスト
    ///
    /// `(a, b int)` と `(int, string)` は区切りまで読んでから区別する。
    /// 2つ目の要素を持つ項目が1つでもあれば名前付き、なければすべて型。
    pub(super) fn parse_parameters(&mut self) -> ParseResult<FieldList> {
        let start = self.pos();
        self.expect(Token::LeftParen)?;

        let mut entries: Vec<(Expr, Option<Expr>)> = Vec::new();
        while !self.check(&Token::RightParen) && !self.is_at_end() {
            let first = self.parse_param_type()?;
            let second = if !self.check(&Token::Comma) && !self.check(&Token::RightParen) {
                Some(self.parse_param_type()?)
            } else {
                None
            };
            entries.push((first, second));
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;

        let mut fields = Vec::new();
        if entries.iter().any(|(_, ty)| ty.is_some()) {
            let mut names = Vec::new();
            for (first, second) in entries {
                let Expr::Ident(name) = first else {
                    return Err(self.error("パラメータ名が必要です"));
                };
                names.push(name);
                if let Some(ty) = second {
                    let span = names[0].span.to(ty.span());
                    fields.push(Field {
                        names: std::mem::take(&mut names),
                        ty,
                        tag: None,
                        span,
                    });
                }
            }
            if !names.is_empty() {
                return Err(self.error("パラメータの型がありません"));
            }
        } else {
            for (ty, _) in entries {
                let span = ty.span();
                fields.push(Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span,
                });
            }
        }

        Ok(FieldList {
            fields,
            span: self.span_from(start),
        })
    }

    /// パラメータリストの要素（名前・型・`...T` のいずれか）
    fn parse_param_type(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        if self.match_token(&Token::Ellipsis) {
            let elem = self.parse_type()?;
            return Ok(Expr::Ellipsis(Ellipsis {
                elem: Some(Box::new(elem)),
                span: self.span_from(start),
            }));
        }

        // `buf [4]byte` の `buf` は名前として読む
        if self.check_ident()
            && self.check_at(1, &Token::LeftBracket)
            && (self.check_at(2, &Token::RightBracket) || self.bracket_followed_by_type(1))
        {
            return Ok(Expr::Ident(self.expect_ident()?));
        }

        self.parse_type()
    }
}
