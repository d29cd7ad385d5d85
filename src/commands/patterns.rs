//! # check-ignores 命令实现
//!
//! 编译每个忽略模式并报告其状态，再用有效模式测试给定的相对路径。
//!
//! ## 依赖关系
//! - 使用 `cli/patterns.rs` 定义的参数
//! - 使用 `batch/patterns.rs`
//! - 使用 `utils/output.rs`

use crate::batch::IgnorePattern;
use crate::cli::patterns::CheckIgnoresArgs;
use crate::error::{PathLoaderError, Result};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 模式检查结果行
#[derive(Debug, Clone, Tabled)]
struct PatternRow {
    #[tabled(rename = "Pattern")]
    pattern: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// 执行 check-ignores 命令
pub fn execute(args: CheckIgnoresArgs) -> Result<()> {
    output::print_header("Checking Ignore Patterns");

    let (rows, compiled) = check_patterns(&args.ignore);
    let invalid = rows.iter().filter(|r| r.status == "invalid").count();
    println!("{}", Table::new(&rows));

    for path in &args.paths {
        let matched = matching_globs(&compiled, path);
        if matched.is_empty() {
            output::print_info(&format!("{}: not ignored", path.display()));
        } else {
            output::print_warning(&format!(
                "{}: ignored by {}",
                path.display(),
                matched.join(", ")
            ));
        }
    }

    if invalid > 0 {
        return Err(PathLoaderError::InvalidArgument(format!(
            "{} of {} ignore pattern(s) failed to compile",
            invalid,
            rows.len()
        )));
    }

    output::print_success(&format!("{} pattern(s) compiled", compiled.len()));
    Ok(())
}

/// 编译每个模式，返回报告行和编译成功的模式
fn check_patterns(raw: &[String]) -> (Vec<PatternRow>, Vec<IgnorePattern>) {
    let mut rows = Vec::with_capacity(raw.len());
    let mut compiled = Vec::new();

    for glob in raw {
        if glob.trim().is_empty() {
            rows.push(PatternRow {
                pattern: glob.clone(),
                status: "skipped",
                detail: "empty pattern".to_string(),
            });
            continue;
        }

        match IgnorePattern::new(glob) {
            Ok(pattern) => {
                let detail = if glob.contains('/') {
                    "matches relative path"
                } else {
                    "matches base name"
                };
                rows.push(PatternRow {
                    pattern: glob.clone(),
                    status: "ok",
                    detail: detail.to_string(),
                });
                compiled.push(pattern);
            }
            Err(e) => rows.push(PatternRow {
                pattern: glob.clone(),
                status: "invalid",
                detail: e.to_string(),
            }),
        }
    }

    (rows, compiled)
}

/// 返回匹配该相对路径的模式
fn matching_globs<'a>(patterns: &'a [IgnorePattern], path: &Path) -> Vec<&'a str> {
    patterns
        .iter()
        .filter(|p| p.matches(path))
        .map(|p| p.glob())
        .collect()
}
