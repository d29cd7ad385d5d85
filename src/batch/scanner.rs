//! # 路径扫描器
//!
//! 遍历目录树并逐个报告发现的路径。
//!
//! ## 功能
//! - 可选遵守 `.gitignore` 等 VCS 忽略规则
//! - 可选跟随符号链接
//! - 包含隐藏文件
//! - 排除 glob 列表，跳过匹配的子树
//!
//! 扫描结果是一个有限的惰性序列，序列耗尽即表示扫描完成。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 调用
//! - 使用 `ignore` 遍历目录

use crate::error::{PathLoaderError, Result};

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// 子树跳过判定，返回 true 时不进入该路径
pub type SkipFn = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// 扫描选项
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 遵守 VCS 忽略文件
    pub exclude_vcs_ignores: bool,
    /// 跟随符号链接
    pub follow_symlinks: bool,
    /// 包含隐藏文件
    pub include_hidden: bool,
    /// 额外排除的 glob 列表
    pub exclusions: Vec<String>,
}

/// 扫描结果序列
pub type ScanIter<'a> = Box<dyn Iterator<Item = Result<PathBuf>> + 'a>;

/// 路径扫描器
pub trait PathScanner: Send + Sync {
    /// 扫描 `root`，根目录本身作为第一个结果返回
    fn scan(&self, root: &Path, options: &ScanOptions, skip: SkipFn) -> ScanIter<'_>;
}

/// 基于 `ignore::WalkBuilder` 的扫描器
#[derive(Debug, Clone, Default)]
pub struct WalkScanner;

impl WalkScanner {
    pub fn new() -> Self {
        Self
    }

    /// 将排除列表编译为 override（全部为忽略规则）
    fn build_overrides(root: &Path, exclusions: &[String]) -> Option<Override> {
        if exclusions.is_empty() {
            return None;
        }

        let mut builder = OverrideBuilder::new(root);
        for glob in exclusions {
            if let Err(e) = builder.add(&format!("!{}", glob)) {
                warn!("Scanner skipped exclusion ({}): {}", glob, e);
            }
        }

        match builder.build() {
            Ok(overrides) => Some(overrides),
            Err(e) => {
                warn!("Failed to build scanner exclusions: {}", e);
                None
            }
        }
    }
}

impl PathScanner for WalkScanner {
    fn scan(&self, root: &Path, options: &ScanOptions, skip: SkipFn) -> ScanIter<'_> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!options.include_hidden)
            .follow_links(options.follow_symlinks)
            .git_ignore(options.exclude_vcs_ignores)
            .git_exclude(options.exclude_vcs_ignores)
            .git_global(options.exclude_vcs_ignores)
            .parents(options.exclude_vcs_ignores)
            .require_git(false)
            .ignore(false)
            .filter_entry(move |entry| entry.depth() == 0 || !skip(entry.path()));

        if let Some(overrides) = Self::build_overrides(root, &options.exclusions) {
            builder.overrides(overrides);
        }

        let root_display = root.display().to_string();
        Box::new(builder.build().map(move |entry| {
            entry
                .map(|e| e.into_path())
                .map_err(|e| PathLoaderError::Scan {
                    path: root_display.clone(),
                    reason: e.to_string(),
                })
        }))
    }
}
