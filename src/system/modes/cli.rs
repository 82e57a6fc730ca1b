//! CLI mode
//!
//! 管理命令的执行逻辑：统计查询与配置文件生成。
//! 命令直接连接数据库，不经过 HTTP 服务。

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::StaticConfig;
use crate::storage::StorageFactory;

/// 执行 stats 命令：打印聚合统计
pub async fn run_stats() -> Result<()> {
    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;

    let stats = storage.stats().await.context("Failed to load stats")?;

    println!("{}", "Lovemeter Statistics".bold().green());
    println!("  {}: {}", "Backend".cyan(), storage.backend_name());
    println!("  {}: {}", "Total visitors".cyan(), stats.total_visitors);
    println!("  {}: {}", "Active loves".cyan(), stats.active_loves);
    println!("  {}: {}", "Total events".cyan(), stats.total_events);

    storage.close().await.context("Failed to close storage")?;
    Ok(())
}

/// 执行 config 子命令
pub async fn run_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path, force } => {
            config_generate(output_path, force).await
        }
    }
}

/// Generate example configuration file
async fn config_generate(output_path: Option<String>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    // 检查文件是否存在，非 --force 模式下交互确认
    if !force && Path::new(&path).exists() {
        print!(
            "{} {} {}",
            "File already exists:".yellow(),
            path.blue(),
            "Overwrite? [y/N] ".yellow()
        );
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    let config = StaticConfig::default();
    match config.save_to_file(&path) {
        Ok(()) => {
            println!(
                "  {} {}",
                "Configuration file generated successfully".green(),
                path.blue()
            );
            println!(
                "  {}",
                "Please edit the configuration file and restart the service".yellow()
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "  {} {}",
                "Failed to generate configuration file".red(),
                e.to_string().red()
            );
            Err(e).context("Unable to write configuration file")
        }
    }
}
