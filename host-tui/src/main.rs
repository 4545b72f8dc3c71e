//! # NovaAdmin 终端宿主
//!
//! 终端版仪表盘入口：解析命令行、装配日志、加载配置，然后进入
//! TUI 事件循环或 headless 冒烟模式。
//!
//! ## 架构
//!
//! ```text
//! ┌─────────────────────────────┐
//! │   host-tui（本 crate）      │
//! │   终端渲染 / 按键 / 配置    │
//! └──────────┬──────────────────┘
//!            │ FrameScheduler 注入
//! ┌──────────▼──────────────────┐
//! │   nova-runtime              │
//! │   计数动画 / 缓动 / 数据    │
//! └─────────────────────────────┘
//! ```

mod app;
mod config;
mod frame;
mod headless;
mod theme;
mod ui;

use clap::Parser;
use tracing::info;

use crate::config::AppConfig;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "nova-admin", about = "NovaAdmin 终端仪表盘")]
struct Args {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    config: String,

    /// headless 冒烟模式：不进 TUI，动画收敛后退出
    #[arg(long)]
    headless: bool,

    /// headless 模式的虚拟帧数上限
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// headless 模式结束后输出 JSON 快照
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 日志走 stderr，stdout 留给 TUI 和 headless 输出
    tracing_subscriber::fmt()
        .with_max_level(if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = AppConfig::load(&args.config);
    config.validate()?;

    if args.headless {
        info!("以 headless 模式启动");
        return headless::run(&config, args.frames, args.json);
    }

    info!("启动 TUI 仪表盘");
    app::run_dashboard(&config)
}
