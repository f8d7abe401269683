//! エラーケースのパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_missing_package() {
    // package節が無い場合のエラー
    let source = r#"
    func main() {
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_missing_closing_brace() {
    // 閉じ括弧が無い場合のエラー
    let source = r#"
    package main

    func main() {
        x := 42
    "#;

    let err = assert_parse_error(source);
    assert!(matches!(err, ParseError::UnexpectedEof { .. }), "{:?}", err);
}

#[test]
fn test_unrecognized_token() {
    // 認識できない文字
    let source = "package main\n\nfunc main() {\n\tx := @\n}\n";

    let err = assert_parse_error(source);
    match err {
        ParseError::UnrecognizedToken { token, span } => {
            assert_eq!(token, "@");
            assert_eq!(span.start, source.find('@').unwrap());
        }
        other => panic!("Expected unrecognized token, got {:?}", other),
    }
}

#[test]
fn test_error_span_is_file_local() {
    // baseを指定してもエラーのスパンはファイル内オフセット
    let source = "package main\n\nfunc main() {\n\tx := \n}\n";

    let err = parse_file(source, 1000).unwrap_err();
    assert_eq!(err.span().start, source.rfind('}').unwrap());
}

#[test]
fn test_import_after_declaration() {
    // import宣言は他の宣言より前に置く
    let source = r#"
    package main

    func main() {}

    import "fmt"
    "#;

    let err = assert_parse_error(source);
    assert!(matches!(err, ParseError::SyntaxError { .. }), "{:?}", err);
}

#[test]
fn test_range_outside_for() {
    let source = r#"
    package main

    func main() {
        x := range items
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_too_many_range_variables() {
    let source = r#"
    package main

    func main() {
        for a, b, c := range items {
        }
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_if_without_condition() {
    let source = r#"
    package main

    func main() {
        if {
        }
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_else_on_new_line() {
    // `}` の後の改行でセミコロンが入るので、次の行のelseは構文エラー
    let source = r#"
    package main

    func main() {
        if x {
        }
        else {
        }
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_parameter_without_type() {
    let source = r#"
    package main

    func f(a int, b) {}
    "#;

    assert_parse_error(source);
}

#[test]
fn test_full_slice_needs_bounds() {
    let source = r#"
    package main

    func main() {
        _ = s[1:2:]
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_label_must_be_identifier() {
    let source = r#"
    package main

    func main() {
        a.b: x++
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_missing_closing_paren() {
    let source = r#"
    package main

    func add(a, b int int {
        return a + b
    }
    "#;

    assert_parse_error(source);
}

#[test]
fn test_unterminated_string() {
    let source = "package main\n\nvar s = \"abc\n";

    assert_parse_error(source);
}
