//! # 路径加载器
//!
//! 对单个根目录生成过滤、去重并分批的路径流。
//!
//! ## 功能
//! - 相对根目录的忽略模式检查（根目录本身豁免）
//! - 跨根目录去重（共享 `SeenPaths`）
//! - 按固定容量分批投递给宿主
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `batch/scanner.rs` 遍历目录
//! - 使用 `batch/patterns.rs`, `batch/seen.rs`, `batch/sink.rs`

use super::patterns::IgnoreSet;
use super::scanner::{PathScanner, ScanOptions, SkipFn};
use super::seen::SeenPaths;
use super::sink::PathSink;
use crate::error::Result;
use crate::models::RootReport;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 默认批次容量
pub const PATHS_CHUNK_SIZE: usize = 100;

/// 单个根目录的路径加载器
pub struct PathLoader<'a> {
    /// 根目录
    root: PathBuf,
    /// 跟随符号链接
    follow_symlinks: bool,
    /// 遵守 VCS 忽略文件
    ignore_vcs_ignores: bool,
    /// 共享的忽略模式
    ignores: Arc<IgnoreSet>,
    /// 共享的已发现路径
    seen: Arc<SeenPaths>,
    /// 扫描器
    scanner: &'a dyn PathScanner,
    /// 批次容量
    chunk_size: usize,
    /// 当前批次
    paths: Vec<String>,
    /// 统计
    report: RootReport,
}

impl<'a> PathLoader<'a> {
    /// 创建新的路径加载器
    pub fn new(
        root: PathBuf,
        ignores: Arc<IgnoreSet>,
        seen: Arc<SeenPaths>,
        scanner: &'a dyn PathScanner,
    ) -> Self {
        Self {
            report: RootReport {
                root: root.clone(),
                ..Default::default()
            },
            root,
            follow_symlinks: false,
            ignore_vcs_ignores: false,
            ignores,
            seen,
            scanner,
            chunk_size: PATHS_CHUNK_SIZE,
            paths: Vec::with_capacity(PATHS_CHUNK_SIZE),
        }
    }

    /// 设置是否跟随符号链接
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// 设置是否遵守 VCS 忽略文件
    pub fn ignore_vcs_ignores(mut self, ignore: bool) -> Self {
        self.ignore_vcs_ignores = ignore;
        self
    }

    /// 设置批次容量（至少为 1）
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// 加载整个根目录，完成后返回统计
    pub fn load(mut self, sink: &dyn PathSink) -> Result<RootReport> {
        let start = Instant::now();
        info!("Load start: {}", self.root.display());

        let root = self.root.clone();
        self.load_path(&root, true, sink)?;
        self.flush_paths(sink)?;

        self.report.elapsed = start.elapsed();
        info!(
            "Load end: {} in {} ms, paths: {}",
            self.root.display(),
            self.report.elapsed.as_millis(),
            self.seen.len()
        );

        Ok(self.report)
    }

    /// 检查路径（相对根目录）是否被忽略
    pub fn is_ignored(&self, path: &Path) -> bool {
        is_ignored_under(&self.root, &self.ignores, path)
    }

    /// 处理扫描器报告的单个路径
    pub fn path_loaded(&mut self, path: &Path, sink: &dyn PathSink) -> Result<()> {
        if self.is_ignored(path) {
            self.report.ignored += 1;
        } else {
            let path = path.to_string_lossy().into_owned();
            if self.seen.insert(&path) {
                self.paths.push(path);
                self.report.emitted += 1;
            } else {
                self.report.duplicates += 1;
            }
        }

        if self.paths.len() >= self.chunk_size {
            self.flush_paths(sink)?;
        }
        Ok(())
    }

    /// 发送当前批次并清空
    pub fn flush_paths(&mut self, sink: &dyn PathSink) -> Result<()> {
        let batch = std::mem::replace(&mut self.paths, Vec::with_capacity(self.chunk_size));
        self.report.batches += 1;
        sink.paths_found(batch)
    }

    /// 扫描 `path`；被忽略的非根路径直接跳过，不会进入子树
    pub fn load_path(&mut self, path: &Path, is_root: bool, sink: &dyn PathSink) -> Result<()> {
        if self.is_ignored(path) && !is_root {
            return Ok(());
        }

        let options = ScanOptions {
            exclude_vcs_ignores: self.ignore_vcs_ignores,
            follow_symlinks: self.follow_symlinks,
            include_hidden: true,
            exclusions: self.ignores.globs(),
        };

        let skip: SkipFn = {
            let root = self.root.clone();
            let ignores = Arc::clone(&self.ignores);
            Arc::new(move |p: &Path| is_ignored_under(&root, &ignores, p))
        };

        let scanner = self.scanner;
        for result in scanner.scan(path, &options, skip) {
            match result {
                Ok(found) => self.path_loaded(&found, sink)?,
                Err(e) => {
                    warn!("{}", e);
                    self.report.errors += 1;
                }
            }
        }

        debug!("Done! {}", path.display());
        Ok(())
    }
}

/// 计算相对 `root` 的路径并检查忽略模式
fn is_ignored_under(root: &Path, ignores: &IgnoreSet, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    ignores.is_match(relative)
}
