//! `.zounirc` による設定
//!
//! 対象ディレクトリから親ディレクトリへ順に `.zounirc` を探し、
//! 最初に見つかったものを JSON として読み込む。見つからなければ既定値を使う。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ZouniError, ZouniResult};
use crate::logger::{Logger, NopLogger, StdLogger};
use crate::program::ModuleResolver;

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".zounirc";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZouniConfig {
    /// 解析対象から外すインポートパス（配下のパッケージも含む）
    pub excludes: Vec<String>,
    /// デバッグ出力を有効にするか
    pub debug: bool,
}

impl ZouniConfig {
    /// `dir` とその祖先から設定ファイルを探して読み込む
    pub fn load(dir: &Path) -> ZouniResult<Self> {
        match Self::find(dir)? {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 最も近い設定ファイルのパス
    pub fn find(dir: &Path) -> ZouniResult<Option<PathBuf>> {
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(dir)
        };

        Ok(dir
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file()))
    }

    /// 設定ファイルを読み込む
    pub fn load_from(path: &Path) -> ZouniResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ZouniError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ZouniError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 設定に応じたロガー
    pub fn logger(&self) -> Box<dyn Logger> {
        if self.debug {
            Box::new(StdLogger)
        } else {
            Box::new(NopLogger)
        }
    }

    /// 設定に応じたパッケージ解決
    pub fn resolver(&self) -> ModuleResolver {
        ModuleResolver::with_excludes(self.excludes.clone())
    }
}
