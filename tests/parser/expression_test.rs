//! 式のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(binary) => binary,
        other => panic!("Expected binary expression, got {:?}", other),
    }
}

fn ident_name(expr: &Expr) -> &str {
    match expr {
        Expr::Ident(ident) => &ident.name,
        other => panic!("Expected identifier, got {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    // a + (b * c)
    let expr = parse_expr("a + b*c");
    let add = binary(&expr);
    assert_eq!(add.op, BinaryOp::Add);
    assert_eq!(ident_name(&add.x), "a");
    assert_eq!(binary(&add.y).op, BinaryOp::Mul);

    // (a * b) - c
    let expr = parse_expr("a*b - c");
    let sub = binary(&expr);
    assert_eq!(sub.op, BinaryOp::Sub);
    assert_eq!(binary(&sub.x).op, BinaryOp::Mul);

    // a || (b && c)
    let expr = parse_expr("a || b && c");
    let or = binary(&expr);
    assert_eq!(or.op, BinaryOp::LogOr);
    assert_eq!(binary(&or.y).op, BinaryOp::LogAnd);

    // (x == 1) && (y != 2)
    let expr = parse_expr("x == 1 && y != 2");
    let and = binary(&expr);
    assert_eq!(and.op, BinaryOp::LogAnd);
    assert_eq!(binary(&and.x).op, BinaryOp::Eq);
    assert_eq!(binary(&and.y).op, BinaryOp::Ne);
}

#[test]
fn test_left_associativity() {
    // (a - b) - c
    let expr = parse_expr("a - b - c");
    let outer = binary(&expr);
    assert_eq!(ident_name(&outer.y), "c");
    let inner = binary(&outer.x);
    assert_eq!(ident_name(&inner.x), "a");
    assert_eq!(ident_name(&inner.y), "b");
}

#[test_case("x << 2", BinaryOp::Shl; "shift left")]
#[test_case("x >> 2", BinaryOp::Shr; "shift right")]
#[test_case("x &^ y", BinaryOp::AndNot; "and not")]
#[test_case("x | y", BinaryOp::Or; "bit or")]
#[test_case("x ^ y", BinaryOp::Xor; "bit xor")]
#[test_case("x % y", BinaryOp::Rem; "remainder")]
#[test_case("x <= y", BinaryOp::Le; "less or equal")]
#[test_case("x >= y", BinaryOp::Ge; "greater or equal")]
fn test_binary_operators(source: &str, op: BinaryOp) {
    assert_eq!(binary(&parse_expr(source)).op, op);
}

#[test_case("-x", UnaryOp::Minus; "minus")]
#[test_case("+x", UnaryOp::Plus; "plus")]
#[test_case("!ok", UnaryOp::Not; "not")]
#[test_case("^mask", UnaryOp::Xor; "complement")]
#[test_case("&value", UnaryOp::Addr; "address")]
#[test_case("<-ch", UnaryOp::Recv; "receive")]
fn test_unary_operators(source: &str, op: UnaryOp) {
    match parse_expr(source) {
        Expr::Unary(unary) => assert_eq!(unary.op, op),
        other => panic!("Expected unary expression, got {:?}", other),
    }
}

#[test]
fn test_pointer_dereference() {
    // `*p` はStarExpr
    assert!(matches!(parse_expr("*p"), Expr::Star(_)));
    assert!(matches!(parse_expr("**pp"), Expr::Star(star) if matches!(*star.x, Expr::Star(_))));
}

#[test]
fn test_literals() {
    // 基本リテラル
    let cases = [
        ("42", LitKind::Int, "42"),
        ("0x1F", LitKind::Int, "0x1F"),
        ("3.14", LitKind::Float, "3.14"),
        ("1e9", LitKind::Float, "1e9"),
        ("2i", LitKind::Imag, "2i"),
        ("'a'", LitKind::Char, "'a'"),
        ("'\\n'", LitKind::Char, "'\\n'"),
        ("\"hello\"", LitKind::String, "\"hello\""),
        ("`raw\\n`", LitKind::String, "`raw\\n`"),
    ];

    for (source, kind, value) in cases {
        match parse_expr(source) {
            Expr::BasicLit(lit) => {
                assert_eq!(lit.kind, kind, "{}", source);
                assert_eq!(lit.value, value);
            }
            other => panic!("Expected literal for {}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_selector_and_call_chain() {
    // a.b.c(1)(2)
    let expr = parse_expr("a.b.c(1)(2)");

    let outer = match &expr {
        Expr::Call(call) => call,
        other => panic!("Expected call, got {:?}", other),
    };
    assert_eq!(outer.args.len(), 1);

    let inner = match outer.fun.as_ref() {
        Expr::Call(call) => call,
        other => panic!("Expected call, got {:?}", other),
    };
    match inner.fun.as_ref() {
        Expr::Selector(sel) => {
            assert_eq!(sel.sel.name, "c");
            match sel.x.as_ref() {
                Expr::Selector(sel) => {
                    assert_eq!(sel.sel.name, "b");
                    assert_eq!(ident_name(&sel.x), "a");
                }
                other => panic!("Expected selector, got {:?}", other),
            }
        }
        other => panic!("Expected selector, got {:?}", other),
    }
}

#[test]
fn test_variadic_call() {
    // append(xs, ys...)
    match parse_expr("append(xs, ys...)") {
        Expr::Call(call) => {
            assert_eq!(call.args.len(), 2);
            assert!(call.has_ellipsis);
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_index_expressions() {
    // インデックスと型引数
    match parse_expr("m[key]") {
        Expr::Index(index) => assert_eq!(index.indices.len(), 1),
        other => panic!("Expected index, got {:?}", other),
    }

    // lib.Map[int, string](xs)
    match parse_expr("lib.Map[int, string](xs)") {
        Expr::Call(call) => match call.fun.as_ref() {
            Expr::Index(index) => {
                assert_eq!(index.indices.len(), 2);
                assert!(matches!(*index.x, Expr::Selector(_)));
            }
            other => panic!("Expected index, got {:?}", other),
        },
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_slice_expressions() {
    // スライス式
    match parse_expr("s[1:]") {
        Expr::Slice(slice) => {
            assert!(slice.low.is_some());
            assert!(slice.high.is_none());
            assert!(slice.max.is_none());
        }
        other => panic!("Expected slice, got {:?}", other),
    }
    match parse_expr("s[:n]") {
        Expr::Slice(slice) => {
            assert!(slice.low.is_none());
            assert!(slice.high.is_some());
        }
        other => panic!("Expected slice, got {:?}", other),
    }
    match parse_expr("s[0:n:cap]") {
        Expr::Slice(slice) => assert!(slice.max.is_some()),
        other => panic!("Expected slice, got {:?}", other),
    }
    assert!(matches!(parse_expr("s[:]"), Expr::Slice(_)));
}

#[test]
fn test_type_assertion() {
    match parse_expr("v.(fmt.Stringer)") {
        Expr::TypeAssert(assert) => {
            assert!(matches!(assert.ty.as_deref(), Some(Expr::Selector(_))));
        }
        other => panic!("Expected type assertion, got {:?}", other),
    }
}

#[test]
fn test_composite_literals() {
    // 型付き・要素の型を省略したもの・キー付き
    match parse_expr("Point{X: 1, Y: 2}") {
        Expr::CompositeLit(lit) => {
            assert!(lit.ty.is_some());
            assert_eq!(lit.elts.len(), 2);
            assert!(matches!(lit.elts[0], Expr::KeyValue(_)));
        }
        other => panic!("Expected composite literal, got {:?}", other),
    }

    match parse_expr("[][]int{{1, 2}, {3}}") {
        Expr::CompositeLit(lit) => {
            assert!(matches!(lit.ty.as_deref(), Some(Expr::ArrayType(_))));
            assert_eq!(lit.elts.len(), 2);
            match &lit.elts[0] {
                Expr::CompositeLit(inner) => {
                    assert!(inner.ty.is_none());
                    assert_eq!(inner.elts.len(), 2);
                }
                other => panic!("Expected composite literal, got {:?}", other),
            }
        }
        other => panic!("Expected composite literal, got {:?}", other),
    }

    match parse_expr("map[string][]int{\"a\": {1}, \"b\": nil,}") {
        Expr::CompositeLit(lit) => {
            assert!(matches!(lit.ty.as_deref(), Some(Expr::MapType(_))));
            assert_eq!(lit.elts.len(), 2);
        }
        other => panic!("Expected composite literal, got {:?}", other),
    }

    assert!(matches!(parse_expr("&lib.Config{}"), Expr::Unary(_)));
    assert!(matches!(parse_expr("[...]string{\"x\"}"), Expr::CompositeLit(_)));
    assert!(matches!(parse_expr("struct{ a int }{1}"), Expr::CompositeLit(_)));
}

#[test]
fn test_multiline_composite_literal() {
    // 末尾のカンマがあれば要素を複数行に書ける
    let stmts = parse_body(
        r#"
        points := []Point{
            {1, 2},
            {X: 3, Y: 4},
        }
        "#,
    );

    match &stmts[0] {
        Stmt::Assign(assign) => match &assign.rhs[0] {
            Expr::CompositeLit(lit) => assert_eq!(lit.elts.len(), 2),
            other => panic!("Expected composite literal, got {:?}", other),
        },
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_function_literals() {
    // 関数リテラルと即時呼び出し
    match parse_expr("func(x int) int { return x * 2 }(21)") {
        Expr::Call(call) => match call.fun.as_ref() {
            Expr::FuncLit(lit) => {
                assert_eq!(lit.ty.params.fields.len(), 1);
                assert_eq!(lit.body.stmts.len(), 1);
            }
            other => panic!("Expected function literal, got {:?}", other),
        },
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_conversions() {
    // 型変換は呼び出しとして表現される
    match parse_expr("[]byte(s)") {
        Expr::Call(call) => assert!(matches!(*call.fun, Expr::ArrayType(_))),
        other => panic!("Expected call, got {:?}", other),
    }
    match parse_expr("(*Point)(p)") {
        Expr::Call(call) => assert!(matches!(*call.fun, Expr::Paren(_))),
        other => panic!("Expected call, got {:?}", other),
    }
    match parse_expr("make(chan int, 1)") {
        Expr::Call(call) => assert!(matches!(call.args[0], Expr::ChanType(_))),
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_expression_spans() {
    // 二項式のスパンは両辺を覆う
    let source = "package main\n\nvar total = price * count\n";
    let file = parse_file(source, 0).unwrap();

    let value = match &file.decls[0] {
        Decl::Gen(gen) => match &gen.specs[0] {
            Spec::Value(value) => &value.values[0],
            other => panic!("Expected value spec, got {:?}", other),
        },
        other => panic!("Expected var declaration, got {:?}", other),
    };

    let start = source.find("price").unwrap();
    let end = source.find("count").unwrap() + "count".len();
    assert_eq!(value.span(), Span::new(start, end));
    assert_eq!(&source[value.span().start..value.span().end], "price * count");
}
