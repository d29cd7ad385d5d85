//! # 统一错误处理模块
//!
//! 定义 pathloader 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// pathloader 统一错误类型
#[derive(Error, Debug)]
pub enum PathLoaderError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to write output: {target}")]
    FileWriteError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 模式与扫描错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid ignore pattern ({pattern}): {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to scan {path}: {reason}")]
    Scan { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 调度错误
    // ─────────────────────────────────────────────────────────────
    #[error("Path sink closed before the load finished")]
    SinkClosed,

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PathLoaderError>;
