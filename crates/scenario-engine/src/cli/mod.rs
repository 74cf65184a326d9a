//! 命令行接口

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
