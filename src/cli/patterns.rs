//! # check-ignores 子命令 CLI 定义
//!
//! 检查忽略模式是否有效，并测试其对相对路径的匹配
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/patterns.rs`

use clap::Args;
use std::path::PathBuf;

/// check-ignores 子命令参数
#[derive(Args, Debug)]
pub struct CheckIgnoresArgs {
    /// Glob pattern to check (repeatable)
    #[arg(long, required = true)]
    pub ignore: Vec<String>,

    /// Relative paths to test against the compiled patterns
    pub paths: Vec<PathBuf>,
}
