//! # 日志初始化
//!
//! 安装 `tracing_subscriber` 的 fmt 订阅器，日志写入 stderr。
//!
//! ## 过滤规则
//! - 设置了 `RUST_LOG` 时以其为准
//! - 否则按 `-v` 次数：0 = warn, 1 = info, 2+ = debug
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// 根据 verbose 次数返回默认过滤规则
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "pathloader=warn",
        1 => "pathloader=info",
        _ => "pathloader=debug",
    }
}

/// 初始化日志
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // 重复初始化（如测试中）时忽略错误
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
