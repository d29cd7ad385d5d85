//! # 忽略模式编译器
//!
//! 将原始 glob 字符串编译为可匹配的忽略模式。
//!
//! ## 匹配规则
//! - 区分大小写
//! - 通配符可匹配以 `.` 开头的文件名
//! - `*` 不跨越 `/`
//! - 不含 `/` 的模式匹配文件名（basename），含 `/` 的模式匹配整个相对路径
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs`, `batch/runner.rs`, `commands/patterns.rs` 使用
//! - 使用 `globset` 编译模式（与扫描器的 override 使用同一方言，支持 `{a,b}`）

use crate::error::{PathLoaderError, Result};

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path};
use tracing::warn;

/// 已编译的忽略模式
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    /// 原始 glob 字符串
    glob: String,
    /// 编译后的匹配器
    matcher: GlobMatcher,
    /// 仅匹配文件名
    match_base: bool,
}

impl IgnorePattern {
    /// 编译单个模式
    pub fn new(glob: &str) -> Result<Self> {
        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .case_insensitive(false)
            .build()
            .map_err(|e| PathLoaderError::InvalidPattern {
                pattern: glob.to_string(),
                reason: e.kind().to_string(),
            })?
            .compile_matcher();

        Ok(Self {
            glob: glob.to_string(),
            matcher,
            match_base: !glob.contains('/'),
        })
    }

    /// 原始 glob 字符串
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// 检查相对路径是否匹配
    pub fn matches(&self, relative: &Path) -> bool {
        if self.match_base {
            return match relative.file_name() {
                Some(name) => self.matcher.is_match(name),
                None => false,
            };
        }

        let joined = to_slash(relative);
        !joined.is_empty() && self.matcher.is_match(&joined)
    }
}

/// 有序的忽略模式集合，构建后只读
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreSet {
    /// 检查相对路径是否被任一模式忽略
    pub fn is_match(&self, relative: &Path) -> bool {
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.patterns.iter().any(|p| p.matches(relative))
    }

    /// 已编译模式的原始字符串（传给扫描器作为排除项）
    pub fn globs(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.glob.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// 编译忽略模式列表
///
/// 空字符串被跳过；编译失败的模式记录警告后丢弃，不会中断整个操作。
pub fn compile_ignore_patterns<S: AsRef<str>>(raw: &[S]) -> IgnoreSet {
    let mut patterns = Vec::with_capacity(raw.len());

    for ignore in raw {
        let ignore = ignore.as_ref();
        if ignore.trim().is_empty() {
            continue;
        }

        match IgnorePattern::new(ignore) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => warn!("Error parsing ignore pattern ({}): {}", ignore, e),
        }
    }

    IgnoreSet { patterns }
}

/// 以 `/` 连接路径分量
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
