//! # 宿主消息模型
//!
//! 加载过程中发送给宿主的事件：路径批次与最终完成信号。
//!
//! ## 依赖关系
//! - 被 `batch/sink.rs` 和 `commands/load.rs` 使用

use serde::{Deserialize, Serialize};

/// 发送给宿主的加载事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum LoadEvent {
    /// 一批新发现的绝对路径
    PathsFound { paths: Vec<String> },
    /// 所有根目录扫描完成
    Done,
}

impl LoadEvent {
    /// 事件中携带的路径数
    pub fn path_count(&self) -> usize {
        match self {
            LoadEvent::PathsFound { paths } => paths.len(),
            LoadEvent::Done => 0,
        }
    }
}
