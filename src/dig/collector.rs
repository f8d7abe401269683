//! 宣言の構文木から他パッケージへの参照を集める

use crate::ast::*;

/// 参照の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ReferenceKind {
    /// `pkg.Func(...)` の呼び出し
    Call,
    /// `pkg.Name` の形の参照（型としての解決を試みる）
    Qualified,
}

/// `qualifier.name` の形の参照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Reference<'a> {
    pub kind: ReferenceKind,
    pub qualifier: &'a str,
    pub name: &'a str,
    /// 修飾子のグローバル位置（どのファイルの参照かを引くのに使う）
    pub pos: usize,
}

/// 宣言を走査して参照を出現順に集める
pub(super) struct ReferenceCollector<'a> {
    follow_types: bool,
    refs: Vec<Reference<'a>>,
}

impl<'a> ReferenceCollector<'a> {
    pub(super) fn new(follow_types: bool) -> Self {
        Self {
            follow_types,
            refs: Vec::new(),
        }
    }

    pub(super) fn into_references(self) -> Vec<Reference<'a>> {
        self.refs
    }

    /// 宣言全体（シグネチャ、本体、入れ子の関数リテラル）を走査
    pub(super) fn collect_in_decl(&mut self, decl: &'a Decl) {
        match decl {
            Decl::Func(func) => {
                if let Some(recv) = &func.recv {
                    self.collect_in_field_list(recv);
                }
                self.collect_in_func_type(&func.ty);
                if let Some(body) = &func.body {
                    self.collect_in_block(body);
                }
            }
            Decl::Gen(gen) => self.collect_in_gen_decl(gen),
        }
    }

    fn collect_in_gen_decl(&mut self, gen: &'a GenDecl) {
        for spec in &gen.specs {
            match spec {
                Spec::Import(_) => {}
                Spec::Value(value) => {
                    if let Some(ty) = &value.ty {
                        self.collect_in_expr(ty);
                    }
                    for expr in &value.values {
                        self.collect_in_expr(expr);
                    }
                }
                Spec::Type(ty) => {
                    if let Some(params) = &ty.type_params {
                        self.collect_in_field_list(params);
                    }
                    self.collect_in_expr(&ty.ty);
                }
            }
        }
    }

    fn collect_in_block(&mut self, block: &'a Block) {
        for stmt in &block.stmts {
            self.collect_in_stmt(stmt);
        }
    }

    fn collect_in_stmts(&mut self, stmts: &'a [Stmt]) {
        for stmt in stmts {
            self.collect_in_stmt(stmt);
        }
    }

    fn collect_in_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Decl(gen) => self.collect_in_gen_decl(gen),
            Stmt::Empty(_) | Stmt::Branch(_) => {}
            Stmt::Labeled(labeled) => self.collect_in_stmt(&labeled.stmt),
            Stmt::Expr(expr) => self.collect_in_expr(expr),
            Stmt::Send(send) => {
                self.collect_in_expr(&send.chan);
                self.collect_in_expr(&send.value);
            }
            Stmt::IncDec(inc_dec) => self.collect_in_expr(&inc_dec.x),
            Stmt::Assign(assign) => {
                self.collect_in_exprs(&assign.lhs);
                self.collect_in_exprs(&assign.rhs);
            }
            Stmt::Go(go) => self.collect_in_expr(&go.call),
            Stmt::Defer(defer) => self.collect_in_expr(&defer.call),
            Stmt::Return(ret) => self.collect_in_exprs(&ret.results),
            Stmt::Block(block) => self.collect_in_block(block),
            Stmt::If(if_stmt) => {
                if let Some(init) = &if_stmt.init {
                    self.collect_in_stmt(init);
                }
                self.collect_in_expr(&if_stmt.cond);
                self.collect_in_block(&if_stmt.then_branch);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.collect_in_stmt(else_branch);
                }
            }
            Stmt::Switch(switch) => {
                if let Some(init) = &switch.init {
                    self.collect_in_stmt(init);
                }
                if let Some(tag) = &switch.tag {
                    self.collect_in_expr(tag);
                }
                self.collect_in_clauses(&switch.clauses);
            }
            Stmt::TypeSwitch(switch) => {
                if let Some(init) = &switch.init {
                    self.collect_in_stmt(init);
                }
                self.collect_in_stmt(&switch.assign);
                self.collect_in_clauses(&switch.clauses);
            }
            Stmt::Select(select) => {
                for clause in &select.clauses {
                    if let Some(comm) = &clause.comm {
                        self.collect_in_stmt(comm);
                    }
                    self.collect_in_stmts(&clause.body);
                }
            }
            Stmt::For(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    self.collect_in_stmt(init);
                }
                if let Some(cond) = &for_stmt.cond {
                    self.collect_in_expr(cond);
                }
                if let Some(post) = &for_stmt.post {
                    self.collect_in_stmt(post);
                }
                self.collect_in_block(&for_stmt.body);
            }
            Stmt::Range(range) => {
                if let Some(key) = &range.key {
                    self.collect_in_expr(key);
                }
                if let Some(value) = &range.value {
                    self.collect_in_expr(value);
                }
                self.collect_in_expr(&range.x);
                self.collect_in_block(&range.body);
            }
        }
    }

    fn collect_in_clauses(&mut self, clauses: &'a [CaseClause]) {
        for clause in clauses {
            self.collect_in_exprs(&clause.list);
            self.collect_in_stmts(&clause.body);
        }
    }

    fn collect_in_exprs(&mut self, exprs: &'a [Expr]) {
        for expr in exprs {
            self.collect_in_expr(expr);
        }
    }

    fn collect_in_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Ident(_) | Expr::BasicLit(_) => {}
            Expr::Call(call) => {
                if let Some((qualifier, name)) = qualified_callee(&call.fun) {
                    self.refs.push(Reference {
                        kind: ReferenceKind::Call,
                        qualifier: &qualifier.name,
                        name: &name.name,
                        pos: qualifier.span.start,
                    });
                }
                // 呼び出し先の式（`f()()` や `x.m()` の `x`）と引数も必ずたどる
                self.collect_in_expr(&call.fun);
                self.collect_in_exprs(&call.args);
            }
            Expr::Selector(sel) => {
                if let Expr::Ident(qualifier) = sel.x.as_ref() {
                    if self.follow_types {
                        self.refs.push(Reference {
                            kind: ReferenceKind::Qualified,
                            qualifier: &qualifier.name,
                            name: &sel.sel.name,
                            pos: qualifier.span.start,
                        });
                    }
                } else {
                    self.collect_in_expr(&sel.x);
                }
            }
            Expr::CompositeLit(lit) => {
                if let Some(ty) = &lit.ty {
                    self.collect_in_expr(ty);
                }
                self.collect_in_exprs(&lit.elts);
            }
            Expr::FuncLit(func) => {
                self.collect_in_func_type(&func.ty);
                self.collect_in_block(&func.body);
            }
            Expr::Paren(paren) => self.collect_in_expr(&paren.x),
            Expr::Index(index) => {
                self.collect_in_expr(&index.x);
                self.collect_in_exprs(&index.indices);
            }
            Expr::Slice(slice) => {
                self.collect_in_expr(&slice.x);
                for bound in [&slice.low, &slice.high, &slice.max].into_iter().flatten() {
                    self.collect_in_expr(bound);
                }
            }
            Expr::TypeAssert(assert) => {
                self.collect_in_expr(&assert.x);
                if let Some(ty) = &assert.ty {
                    self.collect_in_expr(ty);
                }
            }
            Expr::Star(star) => self.collect_in_expr(&star.x),
            Expr::Unary(unary) => self.collect_in_expr(&unary.x),
            Expr::Binary(binary) => {
                self.collect_in_expr(&binary.x);
                self.collect_in_expr(&binary.y);
            }
            Expr::KeyValue(kv) => {
                self.collect_in_expr(&kv.key);
                self.collect_in_expr(&kv.value);
            }
            Expr::ArrayType(array) => {
                if let Some(len) = &array.len {
                    self.collect_in_expr(len);
                }
                self.collect_in_expr(&array.elem);
            }
            Expr::Ellipsis(ellipsis) => {
                if let Some(elem) = &ellipsis.elem {
                    self.collect_in_expr(elem);
                }
            }
            Expr::FuncType(func) => self.collect_in_func_type(func),
            Expr::MapType(map) => {
                self.collect_in_expr(&map.key);
                self.collect_in_expr(&map.value);
            }
            Expr::ChanType(chan) => self.collect_in_expr(&chan.value),
            Expr::StructType(st) => self.collect_in_field_list(&st.fields),
            Expr::InterfaceType(iface) => self.collect_in_field_list(&iface.methods),
        }
    }

    fn collect_in_func_type(&mut self, func: &'a FuncType) {
        if let Some(params) = &func.type_params {
            self.collect_in_field_list(params);
        }
        self.collect_in_field_list(&func.params);
        if let Some(results) = &func.results {
            self.collect_in_field_list(results);
        }
    }

    fn collect_in_field_list(&mut self, list: &'a FieldList) {
        for field in &list.fields {
            self.collect_in_expr(&field.ty);
        }
    }
}

/// 呼び出し先が `X.Name` の形なら `(X, Name)` を返す
///
/// 括弧で囲まれていても、`X.Name[T]` のように型引数を明示していてもよい。
fn qualified_callee(fun: &Expr) -> Option<(&Ident, &Ident)> {
    match fun.unparen() {
        Expr::Selector(sel) => match sel.x.as_ref() {
            Expr::Ident(qualifier) => Some((qualifier, &sel.sel)),
            _ => None,
        },
        Expr::Index(index) => qualified_callee(&index.x),
        _ => None,
    }
}
