//! # load 子命令 CLI 定义
//!
//! 枚举一个或多个根目录下的路径，过滤忽略模式，分批输出
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/load.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// One absolute path per line
    Plain,
    /// One JSON event per line (paths-found batches, then done)
    Json,
    /// CSV with batch index and path columns
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// load 子命令参数
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Root directories to enumerate
    #[arg(required = true)]
    pub roots: Vec<PathBuf>,

    /// Follow symbolic links into directories
    #[arg(long, default_value_t = false)]
    pub follow_symlinks: bool,

    /// Honor .gitignore and other VCS ignore files
    #[arg(long, default_value_t = false)]
    pub ignore_vcs_ignores: bool,

    /// Glob pattern to ignore (repeatable; comma separated in the env var)
    #[arg(long, env = "PATHLOADER_IGNORES", value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Maximum number of paths per batch
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// Number of roots scanned in parallel (0 = all CPUs)
    #[arg(short, long, env = "PATHLOADER_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Print a per-root summary table when finished
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Hide the progress spinner and status messages
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
