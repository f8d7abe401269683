//! インポートパスからパッケージディレクトリを探すための解決処理
//!
//! ローダーは `PackageResolver` を通してだけファイルシステム上の
//! パッケージ配置を知る。標準の実装は go.mod を手がかりにする `ModuleResolver`。

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::constraint::BuildContext;
use crate::error::{ZouniError, ZouniResult};
use crate::lexer::literal_parser::trim_quote;
use crate::parser::parse_header;

/// ディレクトリから読み取ったパッケージのメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPackage {
    /// パッケージ節の名前
    pub name: String,
    /// パッケージのディレクトリ（絶対パス）
    pub dir: PathBuf,
    /// インポートパス（モジュール外なら `.`）
    pub import_path: String,
    /// ビルド対象のソースファイル名（名前順）
    pub go_files: Vec<String>,
    /// インポートしているパス（重複なし、名前順）
    pub imports: Vec<String>,
}

/// インポートパスの解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 解析対象として読み込むディレクトリ
    Local(PathBuf),
    /// 標準ライブラリや除外対象など、読み込まないパッケージ
    External,
}

/// パッケージ配置の解決
pub trait PackageResolver {
    /// `src_dir` にあるパッケージからインポートされた `import_path` を探す
    fn find_dir(&self, import_path: &str, src_dir: &Path) -> ZouniResult<Resolution>;

    /// ディレクトリを1つのパッケージとして読み取る
    fn import_dir(&self, dir: &Path) -> ZouniResult<BuildPackage>;
}

const GO_MOD: &str = "go.mod";
const VENDOR: &str = "vendor";

/// go.mod に基づく解決
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    excludes: Vec<String>,
    context: BuildContext,
}

/// 見つかったモジュール
#[derive(Debug, Clone, PartialEq, Eq)]
struct Module {
    root: PathBuf,
    path: String,
}

impl Module {
    /// モジュールパス配下のインポートパスなら、モジュール内の相対パスを返す
    fn relative<'a>(&self, import_path: &'a str) -> Option<&'a str> {
        if import_path == self.path {
            return Some("");
        }
        import_path
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }

    /// モジュール内のディレクトリに対応するインポートパス
    fn import_path_of(&self, dir: &Path) -> Option<String> {
        let rest = dir.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = rest
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        // vendor 以下はベンダリングされたパッケージ自身のパス
        if segments.first().map(String::as_str) == Some(VENDOR) {
            return Some(segments[1..].join("/"));
        }
        if segments.is_empty() {
            Some(self.path.clone())
        } else {
            Some(format!("{}/{}", self.path, segments.join("/")))
        }
    }
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定したパス（とその配下）を解析対象から外す
    pub fn with_excludes(excludes: Vec<String>) -> Self {
        Self {
            excludes,
            ..Self::default()
        }
    }

    /// ファイルを選ぶときのプラットフォームを指定する
    pub fn with_context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    fn is_excluded(&self, import_path: &str) -> bool {
        self.excludes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            import_path == prefix
                || import_path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl PackageResolver for ModuleResolver {
    fn find_dir(&self, import_path: &str, src_dir: &Path) -> ZouniResult<Resolution> {
        if self.is_excluded(import_path) {
            return Ok(Resolution::External);
        }

        if is_relative_import(import_path) {
            let dir = clean_path(&src_dir.join(import_path));
            return if dir.is_dir() {
                Ok(Resolution::Local(dir))
            } else {
                Err(missing_dir(import_path, &dir))
            };
        }

        let module = find_module(src_dir)?;

        if let Some(module) = &module {
            if let Some(rest) = module.relative(import_path) {
                let dir = if rest.is_empty() {
                    module.root.clone()
                } else {
                    module.root.join(rest)
                };
                return if dir.is_dir() {
                    Ok(Resolution::Local(dir))
                } else {
                    Err(missing_dir(import_path, &dir))
                };
            }

            let vendored = module.root.join(VENDOR).join(import_path);
            if vendored.is_dir() {
                return Ok(Resolution::Local(vendored));
            }
        }

        if is_standard_import(import_path) || module.is_some() {
            return Ok(Resolution::External);
        }

        Err(ZouniError::DirectoryResolution {
            target: import_path.to_string(),
            reason: format!("{} から go.mod が見つかりません", src_dir.display()),
        })
    }

    fn import_dir(&self, dir: &Path) -> ZouniResult<BuildPackage> {
        let entries = fs::read_dir(dir).map_err(|e| ZouniError::DirectoryResolution {
            target: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut candidates: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_buildable_name(name))
            .filter(|name| self.context.matches_file_name(name))
            .collect();
        candidates.sort();

        let mut name: Option<String> = None;
        let mut go_files = Vec::new();
        let mut imports = BTreeSet::new();

        for file_name in candidates {
            let path = dir.join(&file_name);
            let source = fs::read_to_string(&path).map_err(|e| ZouniError::FileRead {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            if !self.context.matches_header(&source) {
                continue;
            }

            let header = parse_header(&source).map_err(|error| ZouniError::Parse {
                path: path.clone(),
                error,
            })?;

            match &name {
                None => name = Some(header.package.name.clone()),
                Some(existing) if *existing != header.package.name => {
                    return Err(ZouniError::DirectoryResolution {
                        target: dir.display().to_string(),
                        reason: format!(
                            "パッケージ名が一致しません: {} と {} ({})",
                            existing, header.package.name, file_name
                        ),
                    });
                }
                Some(_) => {}
            }

            imports.extend(
                header
                    .imports
                    .iter()
                    .map(|import| trim_quote(&import.path.value).to_string()),
            );
            go_files.push(file_name);
        }

        let Some(name) = name else {
            return Err(ZouniError::DirectoryResolution {
                target: dir.display().to_string(),
                reason: "ビルド対象のGoファイルがありません".to_string(),
            });
        };

        let import_path = find_module(dir)?
            .and_then(|module| module.import_path_of(dir))
            .unwrap_or_else(|| ".".to_string());

        Ok(BuildPackage {
            name,
            dir: dir.to_path_buf(),
            import_path,
            go_files,
            imports: imports.into_iter().collect(),
        })
    }
}

fn missing_dir(import_path: &str, dir: &Path) -> ZouniError {
    ZouniError::DirectoryResolution {
        target: import_path.to_string(),
        reason: format!("ディレクトリ {} が存在しません", dir.display()),
    }
}

/// 標準ライブラリのパスは最初の要素にドットを含まない
fn is_standard_import(import_path: &str) -> bool {
    let first = import_path.split('/').next().unwrap_or(import_path);
    !first.contains('.')
}

/// テストファイルや `_`・`.` で始まるファイルはビルド対象外
fn is_buildable_name(name: &str) -> bool {
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('_')
        && !name.starts_with('.')
}

/// `./` または `../` で始まるインポートパス
pub fn is_relative_import(import_path: &str) -> bool {
    import_path == "."
        || import_path == ".."
        || import_path.starts_with("./")
        || import_path.starts_with("../")
}

/// レジストリでパッケージを識別するキー
///
/// 相対インポートは書いた場所で指す先が変わるので、`src_dir` から解決した
/// 絶対ディレクトリをキーにする。それ以外はインポートパスそのもの。
pub fn package_key(import_path: &str, src_dir: &Path) -> String {
    if is_relative_import(import_path) {
        clean_path(&src_dir.join(import_path)).display().to_string()
    } else {
        import_path.to_string()
    }
}

/// `.` と `..` を字句的に取り除く
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// `dir` から親をたどって go.mod を探す
fn find_module(dir: &Path) -> ZouniResult<Option<Module>> {
    for candidate in dir.ancestors() {
        let go_mod = candidate.join(GO_MOD);
        if !go_mod.is_file() {
            continue;
        }

        let content = fs::read_to_string(&go_mod).map_err(|e| ZouniError::FileRead {
            path: go_mod.clone(),
            reason: e.to_string(),
        })?;
        let path = module_path(&content).ok_or_else(|| ZouniError::DirectoryResolution {
            target: go_mod.display().to_string(),
            reason: "module ディレクティブがありません".to_string(),
        })?;

        return Ok(Some(Module {
            root: candidate.to_path_buf(),
            path,
        }));
    }
    Ok(None)
}

/// go.mod の `module` ディレクティブを読む
fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        };
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = trim_quote(rest.trim());
        (!path.is_empty()).then(|| path.to_string())
    })
}
