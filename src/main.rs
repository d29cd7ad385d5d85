//! # pathloader 命令行入口
//!
//! ## 子命令
//! - `load`          - 枚举路径并分批输出（纯文本 / JSON 行 / CSV）
//! - `check-ignores` - 检查忽略模式并测试匹配

use clap::Parser;
use pathloader::cli::Cli;
use pathloader::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
