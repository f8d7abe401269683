//! zouni: Goプログラムの未使用宣言の検出
//!
//! ルートパッケージとそこから import されるパッケージを読み込み、
//! `main` 関数から到達できる宣言だけを取り出す。

pub mod ast;
pub mod config;
mod describe;
pub mod dig;
pub mod error;
pub mod lexer;
pub mod logger;
pub mod parser;
pub mod program;
pub mod source_map;

use std::path::Path;

// Re-export commonly used types
pub use config::ZouniConfig;
pub use dig::{dig, DigOptions, Digger};
pub use error::{ParserError, ZouniError, ZouniResult};
pub use logger::{Logger, NopLogger, StdLogger};
pub use program::{
    BuildContext, DeclId, DeclRef, ModuleResolver, Package, PackageResolver, Program,
};

/// 設定に従ってパッケージを解決し、`dir` のプログラムを読み込む
pub fn load(config: &ZouniConfig, dir: &Path, logger: &dyn Logger) -> ZouniResult<Program> {
    let resolver = config.resolver();
    Program::load(dir, &resolver, logger)
}
