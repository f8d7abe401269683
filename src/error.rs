//! 統一的なエラーハンドリングモジュール
//!
//! パッケージの読み込みと到達可能性解析で発生するエラーを定義する。
//! ここに並ぶエラーはすべて致命的で、発生した時点で処理全体を中断する。
//! 解析対象外のパッケージへの呼び出しなど、通常の解析で起きる
//! 解決の失敗はエラーとして扱わない。

use std::path::PathBuf;

use crate::ast::Span;
use thiserror::Error;

/// zouniの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum ZouniError {
    /// インポートパスやディレクトリをパッケージとして解決できない
    #[error("パッケージを解決できません: {target}: {reason}")]
    DirectoryResolution { target: String, reason: String },

    /// ソースファイルを読み込めない
    #[error("ファイルを読み込めません: {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    /// ソースファイルの構文解析に失敗した
    #[error("構文解析エラー: {}: {error}", path.display())]
    Parse { path: PathBuf, error: ParserError },

    /// ルートパッケージに `main` 関数がない
    #[error("エントリポイントが見つかりません: パッケージ {package} に main 関数がありません")]
    EntryPointNotFound { package: String },

    /// 設定ファイルが不正
    #[error("設定ファイルを読み込めません: {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// その他のファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),
}

/// パーサーエラーの詳細
///
/// スパンはファイル先頭からのバイトオフセット。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("予期しないトークン: {expected}を期待しましたが、{found}が見つかりました")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("予期しない入力の終了: {expected}を期待していました")]
    UnexpectedEof { expected: String, span: Span },

    #[error("認識できないトークン: '{token}'")]
    UnrecognizedToken { token: String, span: Span },

    #[error("構文エラー: {message}")]
    SyntaxError { message: String, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::UnrecognizedToken { span, .. }
            | ParserError::SyntaxError { span, .. } => *span,
        }
    }
}

/// Result型のエイリアス
pub type ZouniResult<T> = Result<T, ZouniError>;

impl From<std::io::Error> for ZouniError {
    fn from(e: std::io::Error) -> Self {
        ZouniError::Io(e.to_string())
    }
}
