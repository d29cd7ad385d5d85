//! # 加载统计模型
//!
//! 记录每个根目录的扫描统计以及整体汇总。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs`, `batch/runner.rs` 生成
//! - 被 `commands/load.rs` 用于汇总输出

use std::path::PathBuf;
use std::time::Duration;

/// 单个根目录的扫描统计
#[derive(Debug, Clone, Default)]
pub struct RootReport {
    /// 根目录
    pub root: PathBuf,
    /// 发送给宿主的路径数
    pub emitted: usize,
    /// 被忽略模式过滤的路径数
    pub ignored: usize,
    /// 已被其他根目录报告过的路径数
    pub duplicates: usize,
    /// 扫描错误数
    pub errors: usize,
    /// 发送的批次数（含最后的空批次）
    pub batches: usize,
    /// 耗时
    pub elapsed: Duration,
}

/// 一次加载操作的汇总
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub roots: Vec<RootReport>,
    /// 所有根目录累计的唯一路径数
    pub unique_paths: usize,
}

impl LoadSummary {
    pub fn total_emitted(&self) -> usize {
        self.roots.iter().map(|r| r.emitted).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.roots.iter().map(|r| r.errors).sum()
    }
}
