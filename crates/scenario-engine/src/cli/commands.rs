//! 命令行参数定义

use clap::{Parser, Subcommand};

/// 商品管理场景执行工具
#[derive(Parser, Debug)]
#[command(name = "scenario-runner")]
#[command(version, about = "针对商品管理后端回放脚本化用户场景")]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// 后端基础地址，覆盖配置文件
    #[arg(long)]
    pub base_url: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 延时缩放系数（1.0 原始节奏，0.0 关闭延时），覆盖配置文件
    #[arg(long)]
    pub time_scale: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 列出目录中的所有场景
    List,

    /// 预置场景用户账号（幂等，可重复执行）
    SetupUsers,

    /// 执行单个场景
    Run {
        /// 场景名称（见 list 子命令）
        #[arg(short, long)]
        name: String,
    },

    /// 顺序执行目录中的全部场景
    RunAll {
        /// 执行前先预置账号
        #[arg(long)]
        setup: bool,

        /// 场景间冷却时间（毫秒），覆盖配置文件
        #[arg(long)]
        cool_down_ms: Option<u64>,
    },
}
