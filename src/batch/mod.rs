//! # 批量路径加载模块
//!
//! 对多个根目录进行过滤、去重和分批的路径枚举。
//!
//! ## 功能
//! - 忽略模式编译（glob）
//! - 目录遍历（ignore，可选 VCS 忽略规则）
//! - 跨根目录去重
//! - 分批投递与并行调度
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `rayon` 进行并行处理

pub mod collector;
pub mod patterns;
pub mod runner;
pub mod scanner;
pub mod seen;
pub mod sink;

pub use collector::{PathLoader, PATHS_CHUNK_SIZE};
pub use patterns::{compile_ignore_patterns, IgnorePattern, IgnoreSet};
pub use runner::{load_paths, Dispatcher, LoadOptions};
pub use scanner::{PathScanner, ScanOptions, WalkScanner};
pub use seen::SeenPaths;
pub use sink::{ChannelSink, CollectingSink, PathSink};
