//! # load 命令实现
//!
//! 扮演宿主角色：运行调度器，并将批次事件写到 stdout。
//!
//! ## 功能
//! - 校验根目录并转为绝对路径
//! - 调度器在工作线程运行，事件经 mpsc 通道回到主线程写出
//! - 输出格式：纯文本 / JSON 行 / CSV
//! - spinner 显示已发现路径数，可选汇总表
//!
//! ## 依赖关系
//! - 使用 `cli/load.rs` 定义的参数
//! - 使用 `batch/` 进行加载
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{ChannelSink, Dispatcher, LoadOptions};
use crate::cli::load::{LoadArgs, OutputFormat};
use crate::error::{PathLoaderError, Result};
use crate::models::{LoadEvent, LoadSummary};
use crate::utils::{output, progress};

use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "Paths")]
    emitted: usize,
    #[tabled(rename = "Ignored")]
    ignored: usize,
    #[tabled(rename = "Duplicates")]
    duplicates: usize,
    #[tabled(rename = "Errors")]
    errors: usize,
    #[tabled(rename = "Batches")]
    batches: usize,
    #[tabled(rename = "Time (ms)")]
    elapsed_ms: u128,
}

/// CSV 输出行
#[derive(Serialize)]
struct PathRow<'a> {
    batch: usize,
    path: &'a str,
}

enum Target<W: Write> {
    Plain(W),
    Json(W),
    Csv(csv::Writer<W>),
}

/// 按输出格式写出加载事件
pub struct EventWriter<W: Write> {
    target: Target<W>,
    /// 已写出的批次数
    batches: usize,
}

impl<W: Write> EventWriter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        let target = match format {
            OutputFormat::Plain => Target::Plain(out),
            OutputFormat::Json => Target::Json(out),
            OutputFormat::Csv => Target::Csv(csv::Writer::from_writer(out)),
        };
        Self { target, batches: 0 }
    }

    /// 写出单个事件
    pub fn write_event(&mut self, event: &LoadEvent) -> Result<()> {
        match &mut self.target {
            Target::Plain(out) => {
                if let LoadEvent::PathsFound { paths } = event {
                    for path in paths {
                        writeln!(out, "{}", path).map_err(write_error)?;
                    }
                }
            }
            Target::Json(out) => {
                serde_json::to_writer(&mut *out, event)?;
                writeln!(out).map_err(write_error)?;
            }
            Target::Csv(out) => {
                if let LoadEvent::PathsFound { paths } = event {
                    for path in paths {
                        out.serialize(PathRow {
                            batch: self.batches,
                            path,
                        })?;
                    }
                }
            }
        }

        if matches!(event, LoadEvent::PathsFound { .. }) {
            self.batches += 1;
        }
        Ok(())
    }

    /// 刷新并取回底层输出
    pub fn finish(self) -> Result<W> {
        match self.target {
            Target::Plain(mut out) | Target::Json(mut out) => {
                out.flush().map_err(write_error)?;
                Ok(out)
            }
            Target::Csv(out) => out
                .into_inner()
                .map_err(|e| PathLoaderError::Other(e.to_string())),
        }
    }
}

fn write_error(source: io::Error) -> PathLoaderError {
    PathLoaderError::FileWriteError {
        target: "stdout".to_string(),
        source,
    }
}

/// 执行 load 命令
pub fn execute(args: LoadArgs) -> Result<()> {
    if !args.quiet {
        output::print_header("Loading Paths");
    }

    let roots = resolve_roots(&args.roots)?;
    let options = LoadOptions {
        follow_symlinks: args.follow_symlinks,
        ignore_vcs_ignores: args.ignore_vcs_ignores,
        ignores: args.ignore.clone(),
        batch_size: args.batch_size as usize,
        jobs: args.jobs,
    };

    if !args.quiet {
        output::print_info(&format!(
            "Scanning {} root(s) with {} ignore pattern(s)...",
            roots.len(),
            options.ignores.len()
        ));
    }

    let pb = if args.quiet {
        progress::create_hidden()
    } else {
        progress::create_spinner("")
    };

    let stdout = io::stdout();
    let mut writer = EventWriter::new(args.format, BufWriter::new(stdout.lock()));
    let dispatcher = Dispatcher::new(options);
    let (sink, events) = ChannelSink::new();

    let summary = thread::scope(|scope| -> Result<LoadSummary> {
        let roots = &roots;
        let handle = scope.spawn(move || dispatcher.run(roots, &sink));

        for event in events.iter() {
            pb.inc(event.path_count() as u64);
            pb.suspend(|| writer.write_event(&event))?;
        }

        handle
            .join()
            .map_err(|_| PathLoaderError::Other("Loader thread panicked".to_string()))?
    })?;

    pb.finish_and_clear();
    writer.finish()?;

    if args.summary {
        print_summary(&summary);
    }

    if !args.quiet {
        let errors = summary.total_errors();
        if errors > 0 {
            output::print_warning(&format!("{} entries could not be scanned", errors));
        }
        output::print_done(&format!(
            "Found {} unique paths under {} root(s)",
            summary.unique_paths,
            summary.roots.len()
        ));
    }

    Ok(())
}

/// 校验根目录并转为绝对路径
fn resolve_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir().map_err(|e| PathLoaderError::Other(e.to_string()))?;
    roots.iter().map(|root| resolve_root(&cwd, root)).collect()
}

fn resolve_root(cwd: &Path, root: &Path) -> Result<PathBuf> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        cwd.join(root)
    };

    if !absolute.exists() {
        return Err(PathLoaderError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }
    if !absolute.is_dir() {
        return Err(PathLoaderError::NotADirectory {
            path: root.display().to_string(),
        });
    }
    Ok(absolute)
}

/// 打印每个根目录的统计表
fn print_summary(summary: &LoadSummary) {
    let rows: Vec<SummaryRow> = summary
        .roots
        .iter()
        .map(|r| SummaryRow {
            root: r.root.display().to_string(),
            emitted: r.emitted,
            ignored: r.ignored,
            duplicates: r.duplicates,
            errors: r.errors,
            batches: r.batches,
            elapsed_ms: r.elapsed.as_millis(),
        })
        .collect();

    eprintln!("{}", Table::new(&rows));
}
