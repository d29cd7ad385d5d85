//! # 已发现路径集合
//!
//! 一次加载操作内所有 PathLoader 共享的去重集合，只增不减。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs`, `batch/runner.rs` 使用

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// 线程安全的只增集合
#[derive(Debug, Default)]
pub struct SeenPaths {
    inner: Mutex<HashSet<String>>,
}

impl SeenPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入路径，返回是否为新路径
    pub fn insert(&self, path: &str) -> bool {
        self.lock().insert(path.to_string())
    }

    /// 当前已发现的路径总数
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // 集合只增不减，中毒后的数据依然有效
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_insert_reports_new_once() {
        let seen = SeenPaths::new();
        assert!(seen.insert("/proj/a.txt"));
        assert!(!seen.insert("/proj/a.txt"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_concurrent_insert() {
        let seen = SeenPaths::new();
        let paths: Vec<String> = (0..500).map(|i| format!("/p/{}", i % 100)).collect();

        let fresh = paths.par_iter().filter(|p| seen.insert(p)).count();

        assert_eq!(fresh, 100);
        assert_eq!(seen.len(), 100);
    }
}
