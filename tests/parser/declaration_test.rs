//! 宣言のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_minimal_file() {
    // 最小限のファイル
    let source = r#"
    package main

    func main() {
    }
    "#;

    let file = assert_parse_success(source);

    assert_eq!(file.package.name, "main");
    assert!(file.imports.is_empty());
    assert_eq!(file.decls.len(), 1);

    let main = find_func(&file, "main");
    assert!(!main.is_method());
    assert!(main.ty.params.fields.is_empty());
    assert!(main.ty.results.is_none());
    assert!(main.body.as_ref().unwrap().stmts.is_empty());
}

#[test]
fn test_imports() {
    // 単独・グループ化・別名付きのインポート
    let source = r#"
    package main

    import "fmt"
    import (
        "os"

        str "strings"
        . "math"
        _ "embed"
    )

    func main() {}
    "#;

    let file = assert_parse_success(source);

    let paths: Vec<&str> = file.imports.iter().map(|i| i.path.value.as_str()).collect();
    assert_eq!(paths, vec!["\"fmt\"", "\"os\"", "\"strings\"", "\"math\"", "\"embed\""]);

    let names: Vec<Option<&str>> = file
        .imports
        .iter()
        .map(|i| i.name.as_ref().map(|n| n.name.as_str()))
        .collect();
    assert_eq!(names, vec![None, None, Some("str"), Some("."), Some("_")]);

    // import宣言も宣言リストに含まれる
    assert_eq!(file.decls.len(), 3);
    match &file.decls[1] {
        Decl::Gen(gen) => {
            assert_eq!(gen.keyword, DeclKeyword::Import);
            assert!(gen.grouped);
            assert_eq!(gen.specs.len(), 4);
        }
        other => panic!("Expected import declaration, got {:?}", other),
    }
}

#[test]
fn test_raw_string_import() {
    // バッククォートのパスも使える
    let source = "package main\n\nimport `fmt`\n";

    let file = assert_parse_success(source);
    assert_eq!(file.imports[0].path.value, "`fmt`");
}

#[test]
fn test_methods() {
    // レシーバー付きの関数宣言
    let source = r#"
    package geom

    type Point struct {
        X, Y float64
    }

    func (p Point) Norm() float64 {
        return p.X*p.X + p.Y*p.Y
    }

    func (p *Point) Scale(k float64) {
        p.X *= k
        p.Y *= k
    }

    func (l *List[T]) Push(v T) {}
    "#;

    let file = assert_parse_success(source);

    let norm = find_func(&file, "Norm");
    assert!(norm.is_method());
    assert_eq!(norm.receiver_type_name(), Some("Point"));

    let scale = find_func(&file, "Scale");
    assert_eq!(scale.receiver_type_name(), Some("Point"));
    assert_eq!(scale.body.as_ref().unwrap().stmts.len(), 2);

    let push = find_func(&file, "Push");
    assert_eq!(push.receiver_type_name(), Some("List"));
}

#[test]
fn test_generic_functions() {
    // 型パラメータ付きの関数
    let source = r#"
    package lib

    func Keys[K comparable, V any](m map[K]V) []K {
        return nil
    }

    func Add[V Number](a, b V) V {
        return a + b
    }

    func Sum[T ~int | ~float64](xs ...T) (total T) {
        for _, x := range xs {
            total += x
        }
        return
    }
    "#;

    let file = assert_parse_success(source);

    let keys = find_func(&file, "Keys");
    let type_params = keys.ty.type_params.as_ref().unwrap();
    assert_eq!(type_params.fields.len(), 2);
    assert_eq!(type_params.fields[0].names[0].name, "K");
    assert_eq!(type_params.fields[1].names[0].name, "V");

    let add = find_func(&file, "Add");
    assert_eq!(add.ty.params.fields.len(), 1);
    let names: Vec<&str> = add.ty.params.fields[0]
        .names
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let sum = find_func(&file, "Sum");
    assert!(matches!(sum.ty.params.fields[0].ty, Expr::Ellipsis(_)));
    let results = sum.ty.results.as_ref().unwrap();
    assert_eq!(results.fields[0].names[0].name, "total");
}

#[test]
fn test_external_function() {
    // 本体のない関数宣言
    let source = r#"
    package math

    func sqrt(x float64) float64

    func main() {}
    "#;

    let file = assert_parse_success(source);

    assert!(find_func(&file, "sqrt").body.is_none());
    assert!(find_func(&file, "main").body.is_some());
}

#[test]
fn test_grouped_constants() {
    // iotaを使ったグループ化された定数
    let source = r#"
    package main

    const (
        A = iota
        B
        C
    )

    const Pi float64 = 3.14
    "#;

    let file = assert_parse_success(source);

    assert_eq!(file.decls.len(), 2);
    match &file.decls[0] {
        Decl::Gen(gen) => {
            assert_eq!(gen.keyword, DeclKeyword::Const);
            assert!(gen.grouped);
            assert_eq!(gen.specs.len(), 3);
            match &gen.specs[1] {
                Spec::Value(value) => {
                    assert_eq!(value.names[0].name, "B");
                    assert!(value.ty.is_none());
                    assert!(value.values.is_empty());
                }
                other => panic!("Expected value spec, got {:?}", other),
            }
        }
        other => panic!("Expected const declaration, got {:?}", other),
    }

    match &file.decls[1] {
        Decl::Gen(gen) => {
            assert!(!gen.grouped);
            match &gen.specs[0] {
                Spec::Value(value) => {
                    assert!(value.ty.is_some());
                    assert_eq!(value.values.len(), 1);
                }
                other => panic!("Expected value spec, got {:?}", other),
            }
        }
        other => panic!("Expected const declaration, got {:?}", other),
    }
}

#[test]
fn test_variables() {
    // 変数宣言
    let source = r#"
    package main

    var x, y int = 1, 2
    var (
        name = "zouni"
        err error
    )
    var handler = func(s string) error { return nil }
    "#;

    let file = assert_parse_success(source);

    assert_eq!(file.decls.len(), 3);
    match &file.decls[0] {
        Decl::Gen(gen) => match &gen.specs[0] {
            Spec::Value(value) => {
                assert_eq!(value.names.len(), 2);
                assert_eq!(value.values.len(), 2);
            }
            other => panic!("Expected value spec, got {:?}", other),
        },
        other => panic!("Expected var declaration, got {:?}", other),
    }
}

#[test]
fn test_type_declarations() {
    // 型宣言のさまざまな形
    let source = r#"
    package main

    type (
        Alias = Target
        List[T any] struct {
            items []T
        }
        Pair[K comparable, V any] struct{ k K; v V }
        Buf [4]byte
        Arr [N]int
        Handler func(int) error
    )
    "#;

    let file = assert_parse_success(source);

    let specs = match &file.decls[0] {
        Decl::Gen(gen) => &gen.specs,
        other => panic!("Expected type declaration, got {:?}", other),
    };
    let types: Vec<&TypeSpec> = specs
        .iter()
        .map(|spec| match spec {
            Spec::Type(ty) => ty,
            other => panic!("Expected type spec, got {:?}", other),
        })
        .collect();
    assert_eq!(types.len(), 6);

    assert!(types[0].alias);
    assert!(types[0].type_params.is_none());

    assert!(!types[1].alias);
    assert_eq!(types[1].type_params.as_ref().unwrap().fields.len(), 1);
    assert!(matches!(types[1].ty, Expr::StructType(_)));

    assert_eq!(types[2].type_params.as_ref().unwrap().fields.len(), 2);

    // `[4]byte` と `[N]int` は配列型であって型パラメータではない
    assert!(types[3].type_params.is_none());
    assert!(matches!(types[3].ty, Expr::ArrayType(_)));
    assert!(types[4].type_params.is_none());
    assert!(matches!(types[4].ty, Expr::ArrayType(_)));

    assert!(matches!(types[5].ty, Expr::FuncType(_)));
}

#[test]
fn test_global_spans() {
    // スパンはbaseを足したグローバル位置になる
    let source = "package main\n\nfunc main() {}\n";
    let base = 100;

    let file = parse_file(source, base).unwrap();

    assert_eq!(file.package.span, Span::new(base + 8, base + 12));
    let main = find_func(&file, "main");
    let start = source.find("func").unwrap();
    let end = source.find('}').unwrap() + 1;
    assert_eq!(main.span, Span::new(base + start, base + end));
    assert_eq!(main.name.span.start, base + start + 5);
}

#[test]
fn test_header_only() {
    // ヘッダーだけの解析は宣言部分の誤りを無視する
    let source = r#"
    package lib

    import (
        "fmt"
        "example.com/app/util"
    )

    func broken( {
    "#;

    assert_parse_error(source);

    let header = zouni::parser::parse_header(source).unwrap();
    assert_eq!(header.package.name, "lib");
    assert_eq!(header.imports.len(), 2);
    assert_eq!(header.imports[1].path.value, "\"example.com/app/util\"");
}

#[test]
fn test_serializes_to_json() {
    // ASTはJSONとして書き出せる
    let source = "package main\n\nfunc main() {}\n";

    let file = assert_parse_success(source);
    let json = serde_json::to_value(&file).unwrap();

    assert_eq!(json["package"]["name"], "main");
    assert_eq!(json["decls"][0]["Func"]["name"]["name"], "main");
}
