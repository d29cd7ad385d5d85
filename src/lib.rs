//! # pathloader - 批量、去重的多根目录路径枚举
//!
//! 递归枚举一个或多个根目录下的文件和目录，过滤忽略模式（可选 VCS 忽略文件），
//! 按固定容量分批报告给宿主。宿主可直接调用 `batch::Dispatcher`，
//! 也可使用 `pathloader` 可执行文件。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (模式编译、扫描、去重、分批、调度)
//!   │     └── models/    (宿主事件与统计)
//!   ├── utils/      (输出、进度、日志)
//!   └── error.rs    (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod utils;

pub use batch::{load_paths, Dispatcher, LoadOptions, PathSink};
pub use error::{PathLoaderError, Result};
pub use models::{LoadEvent, LoadSummary};
