//! testdata 以下のモジュールを使ったテスト

use super::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

#[test]
fn test_code01_describe() {
    let program = Program::load(&fixture("code01"), &ModuleResolver::new(), &NopLogger).unwrap();
    let decls = dig(&program, &NopLogger).unwrap();

    let lines: Vec<String> = decls.iter().map(|d| d.describe()).collect();
    assert_eq!(
        lines,
        vec![
            "func main (main.go:9:1)",
            "func Add (example.com/code01/lib/lib.go:7:1)",
        ]
    );
}

#[test]
fn test_code01_source_text() {
    let program = Program::load(&fixture("code01"), &ModuleResolver::new(), &NopLogger).unwrap();
    let decls = dig(&program, &NopLogger).unwrap();

    let texts: Vec<&str> = decls.iter().map(|d| d.source_text()).collect();
    assert_eq!(
        texts,
        vec![
            "func main() {\n\tfmt.Println(lib.Add(1, 2))\n}",
            "func Add[V Number](a, b V) V {\n\treturn a + b\n}",
        ]
    );
}

#[test]
fn test_code01_with_types() {
    // 型の参照をたどっても、修飾なしの制約 `Number` は辺にならない
    let program = Program::load(&fixture("code01"), &ModuleResolver::new(), &NopLogger).unwrap();

    assert_eq!(dig_labels_with_types(&program), vec!["main.main", "lib.Add"]);
}

#[test]
fn test_code01_through_config() {
    // 設定ファイルを通した読み込み（除外なし）
    let config = zouni::ZouniConfig::default();
    let program = zouni::load(&config, &fixture("code01"), &NopLogger).unwrap();

    assert_eq!(dig_labels(&program), vec!["main.main", "lib.Add"]);
}

#[test]
fn test_config_excludes_package() {
    let config = zouni::ZouniConfig {
        excludes: vec!["example.com/code01/lib".to_string()],
        debug: false,
    };
    let program = zouni::load(&config, &fixture("code01"), &NopLogger).unwrap();

    assert_eq!(program.packages().count(), 1);
    assert_eq!(dig_labels(&program), vec!["main.main"]);
}
