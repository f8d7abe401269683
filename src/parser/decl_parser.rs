//! 宣言（パッケージ節、import、関数、const/var/type）の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// `package name` を解析
    pub(super) fn parse_package_clause(&mut self) -> ParseResult<Ident> {
        self.expect(Token::Package)?;
        let name = self.expect_ident()?;
        self.expect_semicolon()?;
        Ok(name)
    }

    /// トップレベル宣言を解析
    pub(super) fn parse_decl(&mut self) -> ParseResult<Decl> {
        match self.current_token() {
            Some(Token::Func) => Ok(Decl::Func(self.parse_func_decl()?)),
            Some(Token::Const) | Some(Token::Var) | Some(Token::Type) => {
                Ok(Decl::Gen(self.parse_gen_decl()?))
            }
            Some(Token::Import) => Err(self.error("import宣言は他の宣言より前に置く必要があります")),
            _ => Err(self.unexpected("宣言")),
        }
    }

    /// 関数・メソッド宣言を解析
    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        let start = self.pos();
        self.expect(Token::Func)?;

        let recv = if self.check(&Token::LeftParen) {
            Some(self.parse_parameters()?)
        } else {
            None
        };

        let name = self.expect_ident()?;

        let type_params = if self.check(&Token::LeftBracket) {
            Some(self.parse_type_params()?)
        } else {
            None
        };

        let ty = self.parse_signature(start, type_params)?;

        let body = if self.check(&Token::LeftBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(FuncDecl {
            recv,
            name,
            ty,
            body,
            span: self.span_from(start),
        })
    }

    /// `import`/`const`/`var`/`type` 宣言を解析（グループ化も扱う）
    pub(super) fn parse_gen_decl(&mut self) -> ParseResult<GenDecl> {
        let start = self.pos();
        let keyword = match self.current_token() {
            Some(Token::Import) => DeclKeyword::Import,
            Some(Token::Const) => DeclKeyword::Const,
            Some(Token::Var) => DeclKeyword::Var,
            Some(Token::Type) => DeclKeyword::Type,
            _ => return Err(self.unexpected("宣言キーワード")),
        };
        self.advance();

        let mut specs = Vec::new();
        let grouped = self.match_token(&Token::LeftParen);
        if grouped {
            while !self.check(&Token::RightParen) && !self.is_at_end() {
                specs.push(self.parse_spec(keyword)?);
                self.expect_semicolon()?;
            }
            self.expect(Token::RightParen)?;
        } else {
            specs.push(self.parse_spec(keyword)?);
        }

        Ok(GenDecl {
            keyword,
            specs,
            grouped,
            span: self.span_from(start),
        })
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> ParseResult<Spec> {
        match keyword {
            DeclKeyword::Import => Ok(Spec::Import(self.parse_import_spec()?)),
            DeclKeyword::Const | DeclKeyword::Var => Ok(Spec::Value(self.parse_value_spec()?)),
            DeclKeyword::Type => Ok(Spec::Type(self.parse_type_spec()?)),
        }
    }

    /// `[name] "path"`（名前には `.` と `_` も使える）
    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.pos();
        let name = if self.check_ident() {
            Some(self.expect_ident()?)
        } else if self.check(&Token::Dot) {
            let dot_start = self.pos();
            self.advance();
            Some(Ident::new(".", self.span_from(dot_start)))
        } else {
            None
        };
        let path = self.expect_string()?;

        Ok(ImportSpec {
            name,
            path,
            span: self.span_from(start),
        })
    }

    /// `a, b T = x, y` の形。constでは型も値も省略できる
    fn parse_value_spec(&mut self) -> ParseResult<ValueSpec> {
        let start = self.pos();
        let names = self.parse_ident_list()?;

        let ty = if !self.check(&Token::Assign)
            && !self.check(&Token::Semicolon)
            && !self.check(&Token::RightParen)
            && !self.is_at_end()
        {
            Some(self.parse_type()?)
        } else {
            None
        };

        let values = if self.match_token(&Token::Assign) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };

        Ok(ValueSpec {
            names,
            ty,
            values,
            span: self.span_from(start),
        })
    }

    /// `Name[T any] Type` または `Name = Type`
    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        let start = self.pos();
        let name = self.expect_ident()?;

        let type_params = if self.check(&Token::LeftBracket) && self.starts_type_params() {
            Some(self.parse_type_params()?)
        } else {
            None
        };

        let alias = self.match_token(&Token::Assign);
        let ty = self.parse_type()?;

        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
            span: self.span_from(start),
        })
    }

    /// 型名の後の `[` が型パラメータリストの開始かどうか
    ///
    /// `type A [N]int` は配列型、`type L[T any] ...` は型パラメータ。
    /// 括弧内の先頭が識別子で、その後に制約の始まりが続くときだけ型パラメータとみなす。
    fn starts_type_params(&self) -> bool {
        if !matches!(self.peek(1), Some(Token::Identifier(_))) {
            return false;
        }
        matches!(
            self.peek(2),
            Some(
                Token::Identifier(_)
                    | Token::Comma
                    | Token::Interface
                    | Token::Tilde
                    | Token::Func
                    | Token::Map
                    | Token::Chan
                    | Token::Struct
                    | Token::LeftBracket
            )
        )
    }
}
