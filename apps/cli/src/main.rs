//! # Vibrator CLI
//!
//! Command-line interface for sysfs haptic drivers.
//!
//! ```bash
//! # 配置节点目录
//! vibrator-cli config set sysfs_root /sys/bus/i2c/drivers/aw8697_haptic/2-005a/
//!
//! # 播放预定义效果并等待结束
//! vibrator-cli perform click --strength strong --wait
//!
//! # 离线编码 PWLE 组合（不访问设备）
//! vibrator-cli encode ramp.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vibrator_driver::Vibrator;

mod commands;
mod composition;

use commands::config::CliConfig;
use commands::{
    ComposeCommand, ComposePwleCommand, ConfigCommand, EncodeCommand, OnCommand, PerformCommand,
};

/// Vibrator CLI - 振动器命令行工具
#[derive(Parser, Debug)]
#[command(name = "vibrator-cli")]
#[command(about = "Command-line interface for the vibrator HAL", long_about = None)]
#[command(version)]
struct Cli {
    /// sysfs 节点目录（覆盖配置）
    #[arg(long, global = true)]
    sysfs_root: Option<PathBuf>,

    /// PWLE 节点文件名（覆盖配置）
    #[arg(long, global = true)]
    pwle_node: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 显示设备能力与参数
    Info,

    /// 振动指定时长
    On {
        #[command(flatten)]
        args: OnCommand,
    },

    /// 停止振动
    Off,

    /// 播放预定义效果
    Perform {
        #[command(flatten)]
        args: PerformCommand,
    },

    /// 播放组合效果（JSON 文件）
    Compose {
        #[command(flatten)]
        args: ComposeCommand,
    },

    /// 播放 PWLE 组合（JSON 文件）
    Pwle {
        #[command(flatten)]
        args: ComposePwleCommand,
    },

    /// 离线编码 PWLE 组合并打印指令串
    Encode {
        #[command(flatten)]
        args: EncodeCommand,
    },
}

impl Cli {
    /// 按 命令行 > 配置文件 > 默认值 的顺序构造服务
    fn open_vibrator(&self) -> Result<Vibrator> {
        let config = CliConfig::load()?;

        let mut builder = Vibrator::builder().capabilities(config.capabilities());
        if let Some(root) = self.sysfs_root.clone().or(config.sysfs_root) {
            builder = builder.sysfs_root(root);
        }
        if let Some(node) = self.pwle_node.clone().or(config.pwle_node) {
            builder = builder.pwle_node(node);
        }

        builder.build().context("打开振动器失败")
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vibrator_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Config(cmd) => cmd.execute(),

        // 离线命令，不打开设备
        Commands::Encode { args } => args.execute(),

        Commands::Info => commands::info::execute(&cli.open_vibrator()?),

        Commands::On { args } => args.execute(&cli.open_vibrator()?),

        Commands::Off => {
            cli.open_vibrator()?.off()?;
            println!("✅ 已停止");
            Ok(())
        },

        Commands::Perform { args } => args.execute(&cli.open_vibrator()?),

        Commands::Compose { args } => args.execute(&cli.open_vibrator()?),

        Commands::Pwle { args } => args.execute(&cli.open_vibrator()?),
    }
}
