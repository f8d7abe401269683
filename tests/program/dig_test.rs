//! 到達可能性解析のテスト

use super::*;
use pretty_assertions::assert_eq;
use zouni::logger::RecordingLogger;

/// `example.com/app` モジュールに main.go と任意のパッケージを置く
fn app(main: &str) -> GoTree {
    GoTree::module("example.com/app").file("main.go", main)
}

#[test]
fn test_only_reachable_functions() {
    let tree = app(r#"package main

import (
	"fmt"

	"example.com/app/lib"
)

func main() {
	fmt.Println(lib.Add(1, 2))
}

func unused() int {
	return lib.Sub(3, 1)
}
"#)
    .file(
        "lib/lib.go",
        r#"package lib

func Add(a, b int) int {
	return a + b
}

func Sub(a, b int) int {
	return a - b
}
"#,
    );

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "lib.Add"]);
}

#[test]
fn test_discovery_order_is_breadth_first() {
    let tree = app(r#"package main

import (
	"example.com/app/a"
	"example.com/app/b"
)

func main() {
	a.X()
	b.Y()
}
"#)
    .file(
        "a/a.go",
        "package a\n\nimport \"example.com/app/c\"\n\nfunc X() { c.Z() }\n",
    )
    .file("b/b.go", "package b\n\nfunc Y() {}\n")
    .file("c/c.go", "package c\n\nfunc Z() {}\n");

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "a.X", "b.Y", "c.Z"]);

    // 同じ入力なら何度解析しても同じ順序
    assert_eq!(dig_labels(&program), dig_labels(&program));
}

#[test]
fn test_each_declaration_appears_once() {
    let tree = app(r#"package main

import (
	"example.com/app/lib"
	"example.com/app/other"
)

func main() {
	lib.F()
	lib.F()
	other.H()
}
"#)
    .file("lib/lib.go", "package lib\n\nfunc F() {}\n")
    .file(
        "other/other.go",
        "package other\n\nimport \"example.com/app/lib\"\n\nfunc H() { lib.F() }\n",
    );

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "lib.F", "other.H"]);
}

#[test]
fn test_mutual_recursion() {
    let tree = app("package main\n\nimport \"example.com/app/a\"\n\nfunc main() { a.A(3) }\n")
        .file(
            "a/a.go",
            r#"package a

import "example.com/app/b"

func A(n int) {
	if n > 0 {
		b.B(n - 1)
	}
}
"#,
        )
        .file(
            "b/b.go",
            r#"package b

import "example.com/app/a"

func B(n int) {
	if n > 0 {
		a.A(n - 1)
	}
}
"#,
        );

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "a.A", "b.B"]);
}

#[test]
fn test_import_alias() {
    let tree = app(r#"package main

import l "example.com/app/lib"

func main() {
	l.Add(1, 2)
}
"#)
    .file("lib/lib.go", "package lib\n\nfunc Add(a, b int) int { return a + b }\n");

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "lib.Add"]);
}

#[test]
fn test_package_name_differs_from_path() {
    // セレクタはインポートパスの最後の要素で、パッケージ節の名前ではない
    let tree = app(r#"package main

import "example.com/app/v2"

func main() {
	v2.Run()
}
"#)
    .file("v2/run.go", "package tool\n\nfunc Run() {}\n");

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "tool.Run"]);
}

#[test]
fn test_unqualified_calls_are_not_followed() {
    // 同じパッケージ内の呼び出しは辺を作らない
    let tree = app(r#"package main

import "example.com/app/lib"

func main() {
	helper()
}

func helper() {
	lib.F()
}
"#)
    .file("lib/lib.go", "package lib\n\nfunc F() {}\n");

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main"]);
}

#[test]
fn test_dot_import_is_not_followed() {
    let tree = app(r#"package main

import . "example.com/app/lib"

func main() {
	F()
}
"#)
    .file("lib/lib.go", "package lib\n\nfunc F() {}\n");

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main"]);
}

#[test]
fn test_methods_are_not_call_targets() {
    let tree = app(r#"package main

import (
	"example.com/app/a"
	"example.com/app/b"
)

func main() {
	a.Start()
	b.Start()
}
"#)
    .file(
        "a/a.go",
        "package a\n\ntype Server struct{}\n\nfunc (s *Server) Start() {}\n",
    )
    .file(
        "b/b.go",
        "package b\n\ntype Server struct{}\n\nfunc (s *Server) Start() {}\n\nfunc Start() {}\n",
    );

    let program = tree.load().unwrap();
    assert_eq!(dig_labels(&program), vec!["main.main", "b.Start"]);
}

#[test]
fn test_calls_in_nested_positions() {
    // クロージャ・go/defer・引数・制御節の中の呼び出しもたどる
    let tree = app(r#"package main

import (
	"fmt"

	"example.com/app/lib"
)

func main() {
	defer lib.A()
	go func() {
		lib.B()
	}()
	xs := []int{lib.C()}
	if lib.D() {
		fmt.Println(lib.E(), xs)
	}
	for i := range lib.Items() {
		switch lib.Kind(i) {
		case 0:
			lib.Map[int](xs)
		}
	}
}
"#)
    .file(
        "lib/lib.go",
        r#"package lib

func A()            {}
func B()            {}
func C() int        { return 0 }
func D() bool       { return true }
func E() int        { return 0 }
func Items() []int  { return nil }
func Kind(i int) int { return i }

func Map[T any](xs []T) []T { return xs }

func Unused() {}
"#,
    );

    let program = tree.load().unwrap();
    assert_eq!(
        dig_labels(&program),
        vec![
            "main.main",
            "lib.A",
            "lib.B",
            "lib.C",
            "lib.D",
            "lib.E",
            "lib.Items",
            "lib.Kind",
            "lib.Map",
        ]
    );
}

#[test]
fn test_local_selectors_and_missing_targets_are_skipped() {
    let tree = app(r#"package main

import (
	"fmt"

	"example.com/app/lib"
)

func main() {
	s := lib.New()
	s.Run()
	lib.Missing()
	fmt.Println(s)
}
"#)
    .file("lib/lib.go", "package lib\n\ntype S struct{}\n\nfunc New() S { return S{} }\n");

    let program = tree.load().unwrap();
    let logger = RecordingLogger::new();
    let decls = Digger::new(&program, &logger).dig().unwrap();

    assert_eq!(labels(&decls), vec!["main.main", "lib.New"]);

    let lines = logger.lines();
    assert_eq!(lines[0], "dig func main (main.go:9:1)");
    assert!(lines.iter().any(|l| l == "path is not found for 's' in main.go"), "{:?}", lines);
    assert!(
        lines.iter().any(|l| l == "function Missing is not found in example.com/app/lib"),
        "{:?}",
        lines
    );
    assert!(lines.iter().any(|l| l == "package fmt is not loaded"), "{:?}", lines);
}

#[test]
fn test_excluded_package_is_a_leaf() {
    let tree = app("package main\n\nimport \"example.com/app/a\"\n\nfunc main() { a.A() }\n")
        .file(
            "a/a.go",
            "package a\n\nimport \"example.com/app/c\"\n\nfunc A() { c.C() }\n",
        )
        .file("c/c.go", "package c\n\nfunc C() {}\n");

    let resolver = ModuleResolver::with_excludes(vec!["example.com/app/c".to_string()]);
    let program = Program::load(tree.path(), &resolver, &NopLogger).unwrap();

    assert_eq!(dig_labels(&program), vec!["main.main", "a.A"]);
}

#[test]
fn test_entry_point_not_found() {
    let tree = app("package main\n\ntype T struct{}\n\nfunc (t T) main() {}\n\nvar main = 1\n");

    let program = tree.load().unwrap();
    let err = dig(&program, &NopLogger).unwrap_err();
    match err {
        ZouniError::EntryPointNotFound { package } => assert!(package.starts_with("main ("), "{}", package),
        other => panic!("Expected entry point error, got {:?}", other),
    }
}

#[test]
fn test_types_are_not_followed_by_default() {
    let tree = point_app();
    let program = tree.load().unwrap();

    assert_eq!(dig_labels(&program), vec!["main.main"]);
}

#[test]
fn test_follow_types_adds_types_and_methods() {
    let tree = point_app();
    let program = tree.load().unwrap();

    assert_eq!(
        dig_labels_with_types(&program),
        vec![
            "main.main",
            "lib.Point",
            "lib.Point.Norm",
            "lib.Point.Scale",
            "util.Abs",
        ]
    );
}

/// 型だけを使うプログラム
fn point_app() -> GoTree {
    app(r#"package main

import "example.com/app/lib"

func main() {
	p := lib.Point{X: 1}
	_ = p
}
"#)
    .file(
        "lib/point.go",
        r#"package lib

import "example.com/app/util"

type Point struct {
	X, Y int
}

func (p Point) Norm() int {
	return util.Abs(p.X) + util.Abs(p.Y)
}

func (p *Point) Scale(k int) {
	p.X *= k
}

type Other int

func (o Other) M() {}
"#,
    )
    .file(
        "util/util.go",
        r#"package util

func Abs(x int) int {
	if x < 0 {
		return -x
	}
	return x
}
"#,
    )
}
