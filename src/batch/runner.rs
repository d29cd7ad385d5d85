//! # 加载调度器
//!
//! 为每个根目录并行运行一个 PathLoader，全部完成后发送完成信号。
//!
//! ## 功能
//! - 编译忽略模式（所有加载器共享）
//! - 基于 rayon 线程池的根目录并行
//! - 单次操作内的跨根目录去重
//!
//! ## 依赖关系
//! - 被 `commands/load.rs` 调用
//! - 使用 `batch/collector.rs` 加载单个根目录
//! - 使用 `rayon` 进行并行

use super::collector::{PathLoader, PATHS_CHUNK_SIZE};
use super::patterns::{compile_ignore_patterns, IgnoreSet};
use super::scanner::{PathScanner, WalkScanner};
use super::seen::SeenPaths;
use super::sink::PathSink;
use crate::error::{PathLoaderError, Result};
use crate::models::{LoadSummary, RootReport};

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// 加载选项
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// 跟随符号链接
    pub follow_symlinks: bool,
    /// 遵守 VCS 忽略文件
    pub ignore_vcs_ignores: bool,
    /// 原始忽略模式
    pub ignores: Vec<String>,
    /// 批次容量
    pub batch_size: usize,
    /// 并行作业数（0 表示使用全部 CPU）
    pub jobs: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_vcs_ignores: false,
            ignores: Vec::new(),
            batch_size: PATHS_CHUNK_SIZE,
            jobs: 0,
        }
    }
}

/// 加载调度器
pub struct Dispatcher {
    options: LoadOptions,
    scanner: Box<dyn PathScanner>,
}

impl Dispatcher {
    /// 使用默认扫描器创建调度器
    pub fn new(options: LoadOptions) -> Self {
        Self::with_scanner(options, Box::new(WalkScanner::new()))
    }

    /// 使用指定扫描器创建调度器
    pub fn with_scanner(options: LoadOptions, scanner: Box<dyn PathScanner>) -> Self {
        Self { options, scanner }
    }

    /// 并行加载所有根目录
    ///
    /// 所有加载器完成后调用 `sink.done()`；任一加载器失败时返回第一个错误，
    /// 不发送完成信号。
    pub fn run(&self, roots: &[PathBuf], sink: &dyn PathSink) -> Result<LoadSummary> {
        let ignores: Arc<IgnoreSet> = Arc::new(compile_ignore_patterns(&self.options.ignores));
        let seen = Arc::new(SeenPaths::new());

        let jobs = if self.options.jobs == 0 {
            num_cpus::get()
        } else {
            self.options.jobs
        };
        debug!(
            "Loading {} roots with {} jobs, {} ignore patterns",
            roots.len(),
            jobs,
            ignores.len()
        );

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| PathLoaderError::ThreadPool(e.to_string()))?;

        let scanner: &dyn PathScanner = self.scanner.as_ref();
        let results: Vec<Result<RootReport>> = pool.install(|| {
            roots
                .par_iter()
                .map(|root| {
                    PathLoader::new(root.clone(), Arc::clone(&ignores), Arc::clone(&seen), scanner)
                        .follow_symlinks(self.options.follow_symlinks)
                        .ignore_vcs_ignores(self.options.ignore_vcs_ignores)
                        .chunk_size(self.options.batch_size)
                        .load(sink)
                })
                .collect()
        });

        let reports = results.into_iter().collect::<Result<Vec<_>>>()?;
        sink.done()?;

        Ok(LoadSummary {
            roots: reports,
            unique_paths: seen.len(),
        })
    }
}

/// 使用默认批次容量和扫描器加载根目录
pub fn load_paths<S: AsRef<str>>(
    roots: &[PathBuf],
    follow_symlinks: bool,
    ignore_vcs_ignores: bool,
    ignores: &[S],
    sink: &dyn PathSink,
) -> Result<LoadSummary> {
    let options = LoadOptions {
        follow_symlinks,
        ignore_vcs_ignores,
        ignores: ignores.iter().map(|s| s.as_ref().to_string()).collect(),
        ..Default::default()
    };
    Dispatcher::new(options).run(roots, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::sink::{ChannelSink, CollectingSink};
    use crate::models::LoadEvent;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn proj() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
        dir
    }

    fn path_set(paths: Vec<String>) -> BTreeSet<String> {
        paths.into_iter().collect()
    }

    fn s(p: &Path) -> String {
        p.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_example_tree() {
        let dir = proj();
        let root = dir.path().to_path_buf();
        let sink = CollectingSink::new();

        load_paths(&[root.clone()], false, false, &["*.log"], &sink).unwrap();

        let expected: BTreeSet<String> = [
            s(&root),
            s(&root.join("a.txt")),
            s(&root.join("sub")),
            s(&root.join("sub/c.txt")),
        ]
        .into_iter()
        .collect();
        assert_eq!(path_set(sink.paths()), expected);
        assert!(sink.is_done());
    }

    #[test]
    fn test_overlapping_roots_report_each_path_once() {
        let dir = proj();
        let root = dir.path().to_path_buf();
        let roots = vec![root.clone(), root.join("sub"), root.clone()];
        let sink = CollectingSink::new();

        let summary = load_paths::<&str>(&roots, false, false, &[], &sink).unwrap();

        let paths = sink.paths();
        assert_eq!(paths.len(), path_set(paths.clone()).len());
        assert_eq!(paths.len(), 5);
        assert_eq!(summary.unique_paths, 5);
        assert_eq!(summary.total_emitted(), 5);
        assert_eq!(summary.roots.len(), 3);
    }

    #[test]
    fn test_total_matches_entry_count() {
        let dir = TempDir::new().unwrap();
        for i in 0..30 {
            let sub = dir.path().join(format!("d{}", i % 4));
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(format!("f{}.txt", i)), "x").unwrap();
            fs::write(sub.join(format!(".h{}", i)), "x").unwrap();
        }
        let sink = CollectingSink::new();

        load_paths::<&str>(&[dir.path().to_path_buf()], false, false, &[], &sink).unwrap();

        let expected: BTreeSet<String> = WalkDir::new(dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| s(e.path()))
            .collect();
        assert_eq!(expected.len(), 1 + 4 + 60);
        assert_eq!(path_set(sink.paths()), expected);
    }

    #[test]
    fn test_ignored_subtree_never_reported() {
        let dir = proj();
        fs::create_dir_all(dir.path().join("node_modules/pkg/lib")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/lib/index.js"), "x").unwrap();
        let sink = CollectingSink::new();

        load_paths(
            &[dir.path().to_path_buf()],
            false,
            false,
            &["node_modules"],
            &sink,
        )
        .unwrap();

        assert!(sink.paths().iter().all(|p| !p.contains("node_modules")));
        assert_eq!(sink.paths().len(), 5);
    }

    #[test]
    fn test_invalid_pattern_does_not_abort() {
        let dir = proj();
        let sink = CollectingSink::new();

        let summary = load_paths(
            &[dir.path().to_path_buf()],
            false,
            false,
            &["a[", "", "*.log"],
            &sink,
        )
        .unwrap();

        assert_eq!(summary.total_emitted(), 4);
        assert!(sink.paths().iter().all(|p| !p.ends_with("b.log")));
    }

    #[test]
    fn test_batch_size_respected_across_roots() {
        let dirs: Vec<TempDir> = (0..3).map(|_| TempDir::new().unwrap()).collect();
        for dir in &dirs {
            for i in 0..120 {
                fs::write(dir.path().join(format!("{}.dat", i)), "").unwrap();
            }
        }
        let roots: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
        let options = LoadOptions {
            batch_size: 50,
            jobs: 2,
            ..Default::default()
        };
        let sink = CollectingSink::new();

        let summary = Dispatcher::new(options).run(&roots, &sink).unwrap();

        assert!(sink.batches().iter().all(|b| b.len() <= 50));
        assert_eq!(summary.unique_paths, 3 * 121);
        assert_eq!(sink.paths().len(), 3 * 121);
    }

    #[test]
    fn test_repeated_runs_yield_same_paths() {
        let dir = proj();
        let roots = vec![dir.path().to_path_buf(), dir.path().join("sub")];

        let first = CollectingSink::new();
        load_paths(&roots, false, false, &["*.txt"], &first).unwrap();
        let second = CollectingSink::new();
        load_paths(&roots, false, false, &["*.txt"], &second).unwrap();

        assert_eq!(path_set(first.paths()), path_set(second.paths()));
    }

    #[test]
    fn test_channel_sink_ends_with_done() {
        let dir = proj();
        let (sink, rx) = ChannelSink::new();

        load_paths::<&str>(&[dir.path().to_path_buf()], false, false, &[], &sink).unwrap();
        drop(sink);

        let events: Vec<LoadEvent> = rx.iter().collect();
        assert_eq!(events.last(), Some(&LoadEvent::Done));
        assert_eq!(
            events.iter().filter(|e| **e == LoadEvent::Done).count(),
            1
        );
        let total: usize = events.iter().map(|e| e.path_count()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_vcs_ignores_honored_only_when_asked() {
        let dir = proj();
        fs::write(dir.path().join(".gitignore"), "sub\n*.log\n").unwrap();
        let root = dir.path().to_path_buf();

        let honored = CollectingSink::new();
        load_paths::<&str>(&[root.clone()], false, true, &[], &honored).unwrap();
        let expected: BTreeSet<String> = [
            s(&root),
            s(&root.join(".gitignore")),
            s(&root.join("a.txt")),
        ]
        .into_iter()
        .collect();
        assert_eq!(path_set(honored.paths()), expected);

        let plain = CollectingSink::new();
        load_paths::<&str>(&[root.clone()], false, false, &[], &plain).unwrap();
        let paths = path_set(plain.paths());
        assert!(paths.contains(&s(&root.join("sub/c.txt"))));
        assert!(paths.contains(&s(&root.join("b.log"))));
    }

    #[cfg(unix)]
    fn symlink_tree() -> (TempDir, TempDir) {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("x.txt"), "x").unwrap();

        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real/y.txt"), "y").unwrap();
        symlink(outside.path(), dir.path().join("link")).unwrap();
        symlink(dir.path(), dir.path().join("real/loop")).unwrap();
        (dir, outside)
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed_by_default() {
        let (dir, _outside) = symlink_tree();
        let root = dir.path().to_path_buf();
        let sink = CollectingSink::new();

        let summary = load_paths::<&str>(&[root.clone()], false, false, &[], &sink).unwrap();

        let expected: BTreeSet<String> = [
            s(&root),
            s(&root.join("link")),
            s(&root.join("real")),
            s(&root.join("real/loop")),
            s(&root.join("real/y.txt")),
        ]
        .into_iter()
        .collect();
        assert_eq!(path_set(sink.paths()), expected);
        assert_eq!(summary.total_errors(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_descends_and_reports_loop() {
        let (dir, _outside) = symlink_tree();
        let root = dir.path().to_path_buf();
        let sink = CollectingSink::new();

        let summary = load_paths::<&str>(&[root.clone()], true, false, &[], &sink).unwrap();

        let paths = path_set(sink.paths());
        assert!(paths.contains(&s(&root.join("link/x.txt"))));
        assert!(paths.contains(&s(&root.join("real/y.txt"))));
        assert!(!paths.contains(&s(&root.join("real/loop/real"))));
        assert_eq!(summary.total_errors(), 1);
        assert!(sink.is_done());
    }

    #[test]
    fn test_brace_pattern_filters_like_scanner() {
        let dir = proj();
        fs::write(dir.path().join("notes.md"), "n").unwrap();
        let root = dir.path().to_path_buf();
        let sink = CollectingSink::new();

        load_paths(&[root.clone()], false, false, &["*.{txt,md}"], &sink).unwrap();

        let expected: BTreeSet<String> = [s(&root), s(&root.join("b.log")), s(&root.join("sub"))]
            .into_iter()
            .collect();
        assert_eq!(path_set(sink.paths()), expected);
    }

    #[test]
    fn test_closed_sink_fails_without_done() {
        let dir = proj();
        let (sink, rx) = ChannelSink::new();
        drop(rx);

        let result = load_paths::<&str>(&[dir.path().to_path_buf()], false, false, &[], &sink);

        assert!(matches!(result, Err(PathLoaderError::SinkClosed)));
    }
}
