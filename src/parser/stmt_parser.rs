//! 文の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

/// 単純文の解析で `range` 節や ラベルを受け付けるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimpleMode {
    Basic,
    LabelOk,
    RangeOk,
}

/// 単純文の解析結果。`for` のヘッダーでは `range` 節になることがある
enum Simple {
    Stmt(Stmt),
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        x: Expr,
    },
}

impl Parser {
    /// ブロックを解析
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.pos();
        self.expect(Token::LeftBrace)?;
        let stmts = self.parse_stmt_list()?;
        self.expect(Token::RightBrace)?;
        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    /// `}` か `case`/`default` までの文の並び
    fn parse_stmt_list(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(&Token::RightBrace)
            && !self.check(&Token::Case)
            && !self.check(&Token::Default)
            && !self.is_at_end()
        {
            let stmt = self.parse_stmt()?;
            stmts.push(stmt);
            self.expect_semicolon()?;
        }
        Ok(stmts)
    }

    /// 文を解析
    pub(super) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.pos();

        match self.current_token() {
            Some(Token::Const) | Some(Token::Var) | Some(Token::Type) => {
                Ok(Stmt::Decl(self.parse_gen_decl()?))
            }
            Some(Token::Go) => {
                self.advance();
                let call = self.parse_expr()?;
                Ok(Stmt::Go(GoStmt {
                    call,
                    span: self.span_from(start),
                }))
            }
            Some(Token::Defer) => {
                self.advance();
                let call = self.parse_expr()?;
                Ok(Stmt::Defer(DeferStmt {
                    call,
                    span: self.span_from(start),
                }))
            }
            Some(Token::Return) => {
                self.advance();
                let results = if self.check(&Token::Semicolon) || self.check(&Token::RightBrace) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                Ok(Stmt::Return(ReturnStmt {
                    results,
                    span: self.span_from(start),
                }))
            }
            Some(Token::Break) | Some(Token::Continue) | Some(Token::Goto) => {
                let kind = match self.current_token() {
                    Some(Token::Break) => BranchKind::Break,
                    Some(Token::Continue) => BranchKind::Continue,
                    _ => BranchKind::Goto,
                };
                self.advance();
                let label = if self.check_ident() {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                Ok(Stmt::Branch(BranchStmt {
                    kind,
                    label,
                    span: self.span_from(start),
                }))
            }
            Some(Token::Fallthrough) => {
                self.advance();
                Ok(Stmt::Branch(BranchStmt {
                    kind: BranchKind::Fallthrough,
                    label: None,
                    span: self.span_from(start),
                }))
            }
            Some(Token::LeftBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(Token::If) => self.parse_if_stmt(),
            Some(Token::Switch) => self.parse_switch_stmt(),
            Some(Token::Select) => self.parse_select_stmt(),
            Some(Token::For) => self.parse_for_stmt(),
            Some(Token::Semicolon) => {
                let pos = self.base + start;
                Ok(Stmt::Empty(Span::new(pos, pos)))
            }
            Some(_) => match self.parse_simple_stmt(SimpleMode::LabelOk)? {
                Simple::Stmt(stmt) => Ok(stmt),
                Simple::Range { .. } => Err(self.error("range節はfor文の中でしか使えません")),
            },
            None => Err(self.unexpected("文")),
        }
    }

    /// 式文・代入・短縮変数宣言・送信・インクリメント・ラベル付き文
    fn parse_simple_stmt(&mut self, mode: SimpleMode) -> ParseResult<Simple> {
        let start = self.pos();

        if mode == SimpleMode::RangeOk && self.match_token(&Token::Range) {
            let x = self.parse_expr()?;
            return Ok(Simple::Range {
                key: None,
                value: None,
                define: false,
                x,
            });
        }

        let mut lhs = self.parse_expr_list()?;

        let op = match self.current_token() {
            Some(Token::Define) => Some(AssignOp::Define),
            Some(Token::Assign) => Some(AssignOp::Assign),
            Some(token) => assign_op(token).map(AssignOp::Op),
            None => None,
        };

        if let Some(op) = op {
            self.advance();

            if mode == SimpleMode::RangeOk
                && matches!(op, AssignOp::Define | AssignOp::Assign)
                && self.match_token(&Token::Range)
            {
                if lhs.len() > 2 {
                    return Err(self.error("range節の左辺は2つまでです"));
                }
                let x = self.parse_expr()?;
                let mut lhs = lhs.into_iter();
                return Ok(Simple::Range {
                    key: lhs.next(),
                    value: lhs.next(),
                    define: op == AssignOp::Define,
                    x,
                });
            }

            let rhs = self.parse_expr_list()?;
            return Ok(Simple::Stmt(Stmt::Assign(AssignStmt {
                lhs,
                op,
                rhs,
                span: self.span_from(start),
            })));
        }

        if lhs.len() > 1 {
            return Err(self.unexpected("':=' または '='"));
        }
        let x = lhs.remove(0);

        if mode == SimpleMode::LabelOk && self.check(&Token::Colon) {
            if let Expr::Ident(label) = x {
                self.advance();
                // ラベルの直後が `}` なら空文にラベルが付いている
                let stmt = if self.check(&Token::RightBrace) {
                    let pos = self.base + self.pos();
                    Stmt::Empty(Span::new(pos, pos))
                } else {
                    self.parse_stmt()?
                };
                return Ok(Simple::Stmt(Stmt::Labeled(LabeledStmt {
                    label,
                    stmt: Box::new(stmt),
                    span: self.span_from(start),
                })));
            }
            return Err(self.error("ラベルには識別子が必要です"));
        }

        let stmt = match self.current_token() {
            Some(Token::Arrow) => {
                self.advance();
                let value = self.parse_expr()?;
                Stmt::Send(SendStmt {
                    chan: x,
                    value,
                    span: self.span_from(start),
                })
            }
            Some(Token::Inc) | Some(Token::Dec) => {
                let inc = self.check(&Token::Inc);
                self.advance();
                Stmt::IncDec(IncDecStmt {
                    x,
                    inc,
                    span: self.span_from(start),
                })
            }
            _ => Stmt::Expr(x),
        };

        Ok(Simple::Stmt(stmt))
    }

    fn parse_simple_stmt_only(&mut self) -> ParseResult<Stmt> {
        match self.parse_simple_stmt(SimpleMode::Basic)? {
            Simple::Stmt(stmt) => Ok(stmt),
            Simple::Range { .. } => Err(self.error("range節はfor文の中でしか使えません")),
        }
    }

    /// 単純文を条件式として取り出す
    fn into_cond(&self, stmt: Stmt) -> ParseResult<Expr> {
        match stmt {
            Stmt::Expr(x) => Ok(x),
            _ => Err(self.error("条件式を期待しました")),
        }
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.pos();
        self.expect(Token::If)?;

        if self.check(&Token::LeftBrace) {
            return Err(self.error("if文に条件式がありません"));
        }

        let prev = self.expr_lev;
        self.expr_lev = -1;

        let mut init = None;
        let first = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_simple_stmt_only()?)
        };
        let cond_stmt = if self.match_token(&Token::Semicolon) {
            init = first.map(Box::new);
            if self.check(&Token::LeftBrace) {
                return Err(self.error("if文に条件式がありません"));
            }
            self.parse_simple_stmt_only()?
        } else {
            match first {
                Some(stmt) => stmt,
                None => return Err(self.error("if文に条件式がありません")),
            }
        };
        let cond = self.into_cond(cond_stmt)?;

        self.expr_lev = prev;

        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            match self.current_token() {
                Some(Token::If) => Some(Box::new(self.parse_if_stmt()?)),
                Some(Token::LeftBrace) => Some(Box::new(Stmt::Block(self.parse_block()?))),
                _ => return Err(self.unexpected("'if' または '{'")),
            }
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            init,
            cond,
            then_branch,
            else_branch,
            span: self.span_from(start),
        }))
    }

    fn parse_switch_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.pos();
        self.expect(Token::Switch)?;

        let prev = self.expr_lev;
        self.expr_lev = -1;

        let mut init = None;
        let mut tag = None;
        if !self.check(&Token::LeftBrace) {
            if !self.check(&Token::Semicolon) {
                tag = Some(self.parse_simple_stmt_only()?);
            }
            if self.match_token(&Token::Semicolon) {
                init = tag.take().map(Box::new);
                if !self.check(&Token::LeftBrace) {
                    tag = Some(self.parse_simple_stmt_only()?);
                }
            }
        }

        self.expr_lev = prev;

        let is_type_switch = tag.as_ref().is_some_and(is_type_switch_guard);

        self.expect(Token::LeftBrace)?;
        let mut clauses = Vec::new();
        while self.check(&Token::Case) || self.check(&Token::Default) {
            clauses.push(self.parse_case_clause()?);
        }
        self.expect(Token::RightBrace)?;

        let span = self.span_from(start);
        match tag {
            Some(assign) if is_type_switch => Ok(Stmt::TypeSwitch(TypeSwitchStmt {
                init,
                assign: Box::new(assign),
                clauses,
                span,
            })),
            tag => {
                let tag = match tag {
                    Some(stmt) => Some(self.into_cond(stmt)?),
                    None => None,
                };
                Ok(Stmt::Switch(SwitchStmt {
                    init,
                    tag,
                    clauses,
                    span,
                }))
            }
        }
    }

    /// `case x, y:` または `default:`（型スイッチでは型のリスト）
    fn parse_case_clause(&mut self) -> ParseResult<CaseClause> {
        let start = self.pos();
        let (list, is_default) = if self.match_token(&Token::Case) {
            (self.parse_expr_list()?, false)
        } else {
            self.expect(Token::Default)?;
            (Vec::new(), true)
        };
        self.expect(Token::Colon)?;
        let body = self.parse_stmt_list()?;

        Ok(CaseClause {
            list,
            is_default,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_select_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.pos();
        self.expect(Token::Select)?;
        self.expect(Token::LeftBrace)?;

        let mut clauses = Vec::new();
        while self.check(&Token::Case) || self.check(&Token::Default) {
            let clause_start = self.pos();
            let comm = if self.match_token(&Token::Case) {
                Some(Box::new(self.parse_simple_stmt_only()?))
            } else {
                self.expect(Token::Default)?;
                None
            };
            self.expect(Token::Colon)?;
            let body = self.parse_stmt_list()?;
            clauses.push(CommClause {
                comm,
                body,
                span: self.span_from(clause_start),
            });
        }
        self.expect(Token::RightBrace)?;

        Ok(Stmt::Select(SelectStmt {
            clauses,
            span: self.span_from(start),
        }))
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.pos();
        self.expect(Token::For)?;

        let prev = self.expr_lev;
        self.expr_lev = -1;

        let mut init = None;
        let mut cond = None;
        let mut post = None;
        let mut range = None;

        if !self.check(&Token::LeftBrace) {
            let first = if self.check(&Token::Semicolon) {
                None
            } else {
                Some(self.parse_simple_stmt(SimpleMode::RangeOk)?)
            };

            match first {
                Some(Simple::Range {
                    key,
                    value,
                    define,
                    x,
                }) => range = Some((key, value, define, x)),
                Some(Simple::Stmt(stmt)) => (init, cond, post) = self.parse_for_clauses(Some(stmt))?,
                None => (init, cond, post) = self.parse_for_clauses(None)?,
            }
        }

        self.expr_lev = prev;

        let body = self.parse_block()?;
        let span = self.span_from(start);

        if let Some((key, value, define, x)) = range {
            return Ok(Stmt::Range(RangeStmt {
                key,
                value,
                define,
                x,
                body,
                span,
            }));
        }

        Ok(Stmt::For(ForStmt {
            init,
            cond,
            post,
            body,
            span,
        }))
    }
}

impl Parser {
    /// `for` のヘッダーの残り。3節形式なら `(init, cond, post)`、そうでなければ条件式だけ
    #[allow(clippy::type_complexity)]
    fn parse_for_clauses(
        &mut self,
        first: Option<Stmt>,
    ) -> ParseResult<(Option<Box<Stmt>>, Option<Expr>, Option<Box<Stmt>>)> {
        if !self.match_token(&Token::Semicolon) {
            let cond = match first {
                Some(stmt) => Some(self.into_cond(stmt)?),
                None => None,
            };
            return Ok((None, cond, None));
        }

        let mut cond = None;
        if !self.check(&Token::Semicolon) {
            let stmt = self.parse_simple_stmt_only()?;
            cond = Some(self.into_cond(stmt)?);
        }
        self.expect(Token::Semicolon)?;

        let post = if self.check(&Token::LeftBrace) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt_only()?))
        };

        Ok((first.map(Box::new), cond, post))
    }
}

/// `x.(type)` または `v := x.(type)` の形か
fn is_type_switch_guard(stmt: &Stmt) -> bool {
    let is_guard = |x: &Expr| matches!(x, Expr::TypeAssert(assert) if assert.ty.is_none());
    match stmt {
        Stmt::Expr(x) => is_guard(x),
        Stmt::Assign(assign) => {
            assign.op == AssignOp::Define
                && assign.lhs.len() == 1
                && assign.rhs.len() == 1
                && is_guard(&assign.rhs[0])
        }
        _ => false,
    }
}

/// 複合代入演算子の表記
fn assign_op(token: &Token) -> Option<&'static str> {
    let op = match token {
        Token::PlusAssign => "+=",
        Token::MinusAssign => "-=",
        Token::StarAssign => "*=",
        Token::SlashAssign => "/=",
        Token::PercentAssign => "%=",
        Token::AndAssign => "&=",
        Token::OrAssign => "|=",
        Token::CaretAssign => "^=",
        Token::ShlAssign => "<<=",
        Token::ShrAssign => ">>=",
        Token::AndNotAssign => "&^=",
        _ => return None,
    };
    Some(op)
}
