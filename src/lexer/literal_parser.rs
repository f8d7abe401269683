//! リテラルの解析

/// 文字列リテラルの両端の引用符を取り除く
///
/// 解釈付き文字列（`"..."`）と raw 文字列（`` `...` ``）の両方を扱う。
/// インポートパスはエスケープを含まないので、中身はそのまま返す。
pub fn trim_quote(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('`'))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('`'))
        .unwrap_or(value)
}

/// インポートパスの最後の要素を取得（`"a/b/c"` なら `c`）
pub fn last_path_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
