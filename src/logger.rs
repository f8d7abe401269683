//! ロガー
//!
//! 解析処理には `&dyn Logger` を引数で渡す。グローバルな状態は持たない。

use std::fmt;
use std::sync::Mutex;

/// 書式付き出力と1行出力だけを持つロガー
pub trait Logger {
    fn printf(&self, args: fmt::Arguments<'_>);
    fn println(&self, line: &str);
}

/// `printf` を `format!` と同じ書式で呼ぶ
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger::Logger::printf($logger, format_args!($($arg)*))
    };
}

/// 何も出力しないロガー
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn printf(&self, _args: fmt::Arguments<'_>) {}

    fn println(&self, _line: &str) {}
}

/// `log` クレートの debug レベルに転送するロガー
#[derive(Debug, Default, Clone, Copy)]
pub struct StdLogger;

impl StdLogger {
    pub const TARGET: &'static str = "zouni";
}

impl Logger for StdLogger {
    fn printf(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: Self::TARGET, "{}", args);
    }

    fn println(&self, line: &str) {
        log::debug!(target: Self::TARGET, "{}", line);
    }
}

/// 出力を行ごとに溜めておくロガー（テストでの確認用）
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録した行を取り出す
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, line: String) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

impl Logger for RecordingLogger {
    fn printf(&self, args: fmt::Arguments<'_>) {
        self.push(args.to_string());
    }

    fn println(&self, line: &str) {
        self.push(line.to_string());
    }
}
