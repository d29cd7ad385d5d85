//! # 批次投递通道
//!
//! 宿主接收路径批次和完成信号的接口。
//!
//! ## 实现
//! - `ChannelSink`: 通过 mpsc 通道发送 `LoadEvent`，由接收端线程消费
//! - `CollectingSink`: 在内存中收集所有批次
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs`, `batch/runner.rs` 调用
//! - 使用 `models/event.rs`

use crate::error::{PathLoaderError, Result};
use crate::models::LoadEvent;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// 宿主侧的批次接收者
///
/// 多个 PathLoader 并行调用，必须是 `Send + Sync`。
pub trait PathSink: Send + Sync {
    /// 接收一批新发现的路径（可能为空）
    fn paths_found(&self, paths: Vec<String>) -> Result<()>;

    /// 所有根目录扫描完成
    fn done(&self) -> Result<()>;
}

/// 基于 mpsc 通道的 sink
pub struct ChannelSink {
    tx: Sender<LoadEvent>,
}

impl ChannelSink {
    /// 创建 sink 及其对应的事件接收端
    pub fn new() -> (Self, Receiver<LoadEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: LoadEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| PathLoaderError::SinkClosed)
    }
}

impl PathSink for ChannelSink {
    fn paths_found(&self, paths: Vec<String>) -> Result<()> {
        self.send(LoadEvent::PathsFound { paths })
    }

    fn done(&self) -> Result<()> {
        self.send(LoadEvent::Done)
    }
}

/// 在内存中收集批次
#[derive(Debug, Default)]
pub struct CollectingSink {
    batches: Mutex<Vec<Vec<String>>>,
    done: Mutex<bool>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按接收顺序返回所有批次
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches
            .lock()
            .map(|b| b.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// 所有批次中的路径
    pub fn paths(&self) -> Vec<String> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn is_done(&self) -> bool {
        self.done.lock().map(|d| *d).unwrap_or_else(|e| *e.into_inner())
    }
}

impl PathSink for CollectingSink {
    fn paths_found(&self, paths: Vec<String>) -> Result<()> {
        self.batches
            .lock()
            .map_err(|e| PathLoaderError::Other(e.to_string()))?
            .push(paths);
        Ok(())
    }

    fn done(&self) -> Result<()> {
        *self
            .done
            .lock()
            .map_err(|e| PathLoaderError::Other(e.to_string()))? = true;
        Ok(())
    }
}
