//! 式の解析
//!
//! 二項演算子は優先順位上昇法で、単項式と一次式は再帰下降で解析する。

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary_expr(1)
    }

    /// カンマ区切りの式リスト
    pub(super) fn parse_expr_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.match_token(&Token::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut x = self.parse_unary_expr()?;

        while let Some(op) = self.current_token().and_then(binary_op) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let y = self.parse_binary_expr(prec + 1)?;
            let span = x.span().to(y.span());
            x = Expr::Binary(BinaryExpr {
                op,
                x: Box::new(x),
                y: Box::new(y),
                span,
            });
        }

        Ok(x)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let start = self.pos();

        let op = match self.current_token() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Minus,
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Caret) => UnaryOp::Xor,
            Some(Token::Ampersand) => UnaryOp::Addr,
            Some(Token::Tilde) => UnaryOp::Tilde,
            Some(Token::Arrow) => {
                // `<-chan T` はチャネル型、それ以外は受信
                if self.check_at(1, &Token::Chan) {
                    return self.parse_chan_type();
                }
                UnaryOp::Recv
            }
            Some(Token::Star) => {
                self.advance();
                let x = self.parse_unary_expr()?;
                return Ok(Expr::Star(StarExpr {
                    x: Box::new(x),
                    span: self.span_from(start),
                }));
            }
            _ => return self.parse_primary_expr(),
        };

        self.advance();
        let x = self.parse_unary_expr()?;
        Ok(Expr::Unary(UnaryExpr {
            op,
            x: Box::new(x),
            span: self.span_from(start),
        }))
    }

    /// オペランドとその後に続くセレクタ・インデックス・呼び出しなど
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        let mut x = self.parse_operand()?;

        loop {
            match self.current_token() {
                Some(Token::Dot) => {
                    self.advance();
                    if self.check_ident() {
                        let sel = self.expect_ident()?;
                        x = Expr::Selector(SelectorExpr {
                            x: Box::new(x),
                            sel,
                            span: self.span_from(start),
                        });
                    } else if self.match_token(&Token::LeftParen) {
                        let ty = if self.match_token(&Token::Type) {
                            None
                        } else {
                            Some(Box::new(self.parse_type()?))
                        };
                        self.expect(Token::RightParen)?;
                        x = Expr::TypeAssert(TypeAssertExpr {
                            x: Box::new(x),
                            ty,
                            span: self.span_from(start),
                        });
                    } else {
                        return Err(self.unexpected("セレクタまたは型アサーション"));
                    }
                }
                Some(Token::LeftBracket) => {
                    x = self.parse_index_or_slice(start, x)?;
                }
                Some(Token::LeftParen) => {
                    x = self.parse_call(start, x)?;
                }
                Some(Token::LeftBrace) => {
                    if !self.composite_lit_allowed(&x) {
                        break;
                    }
                    x = self.parse_composite_lit(start, Some(x))?;
                }
                _ => break,
            }
        }

        Ok(x)
    }

    /// `{` の前の式を複合リテラルの型として扱ってよいか
    ///
    /// 制御節の中では `if x {` と区別できないため、型名だけの型は認めない。
    fn composite_lit_allowed(&self, x: &Expr) -> bool {
        let literal_type = match x {
            Expr::ArrayType(_) | Expr::MapType(_) | Expr::StructType(_) => true,
            _ => x.is_type_name(),
        };
        literal_type && (self.expr_lev >= 0 || !x.is_type_name())
    }

    fn parse_operand(&mut self) -> ParseResult<Expr> {
        let start = self.pos();
        let span = |p: &Self| p.span_from(start);

        match self.current_token().cloned() {
            Some(Token::Identifier(_)) => Ok(Expr::Ident(self.expect_ident()?)),
            Some(Token::Int(value)) => self.basic_lit(LitKind::Int, value),
            Some(Token::Float(value)) => self.basic_lit(LitKind::Float, value),
            Some(Token::Imag(value)) => self.basic_lit(LitKind::Imag, value),
            Some(Token::Char(value)) => self.basic_lit(LitKind::Char, value),
            Some(Token::String(value)) => self.basic_lit(LitKind::String, value),
            Some(Token::LeftParen) => {
                self.advance();
                let prev = self.expr_lev;
                self.expr_lev += 1;
                let x = self.parse_expr()?;
                self.expr_lev = prev;
                self.expect(Token::RightParen)?;
                Ok(Expr::Paren(ParenExpr {
                    x: Box::new(x),
                    span: span(self),
                }))
            }
            Some(Token::Func) => {
                self.advance();
                let ty = self.parse_signature(start, None)?;
                if !self.check(&Token::LeftBrace) {
                    return Ok(Expr::FuncType(ty));
                }
                let prev = self.expr_lev;
                self.expr_lev = 0;
                let body = self.parse_block()?;
                self.expr_lev = prev;
                Ok(Expr::FuncLit(FuncLit {
                    ty,
                    body,
                    span: span(self),
                }))
            }
            Some(Token::LeftBracket)
            | Some(Token::Map)
            | Some(Token::Chan)
            | Some(Token::Struct)
            | Some(Token::Interface) => self.parse_type(),
            _ => Err(self.unexpected("式")),
        }
    }

    fn basic_lit(&mut self, kind: LitKind, value: String) -> ParseResult<Expr> {
        let start = self.pos();
        self.advance();
        Ok(Expr::BasicLit(BasicLit {
            kind,
            value,
            span: self.span_from(start),
        }))
    }

    /// `x[i]`、`f[T1, T2]`、`x[low:high:max]`
    fn parse_index_or_slice(&mut self, start: usize, x: Expr) -> ParseResult<Expr> {
        self.expect(Token::LeftBracket)?;
        let prev = self.expr_lev;
        self.expr_lev += 1;

        let first = if self.check(&Token::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let expr = if self.check(&Token::Colon) {
            let mut bounds: [Option<Box<Expr>>; 3] = [first.map(Box::new), None, None];
            let mut colons = 0;
            while colons < 2 && self.match_token(&Token::Colon) {
                colons += 1;
                if !self.check(&Token::Colon) && !self.check(&Token::RightBracket) {
                    bounds[colons] = Some(Box::new(self.parse_expr()?));
                }
            }
            if colons == 2 && (bounds[1].is_none() || bounds[2].is_none()) {
                return Err(self.error("3つのインデックスを持つスライス式では上限と容量が必要です"));
            }
            self.expr_lev = prev;
            self.expect(Token::RightBracket)?;
            let [low, high, max] = bounds;
            Expr::Slice(SliceExpr {
                x: Box::new(x),
                low,
                high,
                max,
                span: self.span_from(start),
            })
        } else {
            let Some(first) = first else {
                return Err(self.unexpected("インデックス"));
            };
            let mut indices = vec![first];
            while self.match_token(&Token::Comma) {
                if self.check(&Token::RightBracket) {
                    break;
                }
                indices.push(self.parse_expr()?);
            }
            self.expr_lev = prev;
            self.expect(Token::RightBracket)?;
            Expr::Index(IndexExpr {
                x: Box::new(x),
                indices,
                span: self.span_from(start),
            })
        };

        Ok(expr)
    }

    /// 関数呼び出し（型変換 `T(x)` や `make([]int, n)` も含む）
    fn parse_call(&mut self, start: usize, fun: Expr) -> ParseResult<Expr> {
        self.expect(Token::LeftParen)?;
        let prev = self.expr_lev;
        self.expr_lev += 1;

        let mut args = Vec::new();
        let mut has_ellipsis = false;
        while !self.check(&Token::RightParen) && !self.is_at_end() {
            args.push(self.parse_expr()?);
            if self.match_token(&Token::Ellipsis) {
                has_ellipsis = true;
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expr_lev = prev;
        self.expect(Token::RightParen)?;

        Ok(Expr::Call(CallExpr {
            fun: Box::new(fun),
            args,
            has_ellipsis,
            span: self.span_from(start),
        }))
    }

    /// 複合リテラル `T{...}`。要素内の `{...}` は型を省略した複合リテラル
    fn parse_composite_lit(&mut self, start: usize, ty: Option<Expr>) -> ParseResult<Expr> {
        self.expect(Token::LeftBrace)?;
        let prev = self.expr_lev;
        self.expr_lev = 0;

        let mut elts = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let elt_start = self.pos();
            let key = self.parse_element()?;
            let elt = if self.match_token(&Token::Colon) {
                let value = self.parse_element()?;
                Expr::KeyValue(KeyValueExpr {
                    key: Box::new(key),
                    value: Box::new(value),
                    span: self.span_from(elt_start),
                })
            } else {
                key
            };
            elts.push(elt);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expr_lev = prev;
        self.expect(Token::RightBrace)?;

        Ok(Expr::CompositeLit(CompositeLit {
            ty: ty.map(Box::new),
            elts,
            span: self.span_from(start),
        }))
    }

    fn parse_element(&mut self) -> ParseResult<Expr> {
        if self.check(&Token::LeftBrace) {
            let start = self.pos();
            self.parse_composite_lit(start, None)
        } else {
            self.parse_expr()
        }
    }
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    let op = match token {
        Token::OrOr => BinaryOp::LogOr,
        Token::AndAnd => BinaryOp::LogAnd,
        Token::EqEq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::Ne,
        Token::Lt => BinaryOp::Lt,
        Token::LtEq => BinaryOp::Le,
        Token::Gt => BinaryOp::Gt,
        Token::GtEq => BinaryOp::Ge,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Or => BinaryOp::Or,
        Token::Caret => BinaryOp::Xor,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Percent => BinaryOp::Rem,
        Token::LtLt => BinaryOp::Shl,
        Token::GtGt => BinaryOp::Shr,
        Token::Ampersand => BinaryOp::And,
        Token::AndNot => BinaryOp::AndNot,
        _ => return None,
    };
    Some(op)
}
