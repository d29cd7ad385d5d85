//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `load`: 枚举根目录下的路径并分批输出
//! - `check-ignores`: 检查忽略模式是否有效及其匹配情况
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: load, patterns

pub mod load;
pub mod patterns;

use clap::{ArgAction, Parser, Subcommand};

/// pathloader - 批量、去重的多根目录路径枚举
#[derive(Parser)]
#[command(name = "pathloader")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batched, de-duplicated path enumeration across root directories", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate paths under one or more roots and emit them in batches
    Load(load::LoadArgs),

    /// Validate ignore patterns and test them against relative paths
    CheckIgnores(patterns::CheckIgnoresArgs),
}
