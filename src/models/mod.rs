//! # 数据模型模块
//!
//! 定义宿主消息和加载统计数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 子模块: event, summary

pub mod event;
pub mod summary;

pub use event::LoadEvent;
pub use summary::{LoadSummary, RootReport};
