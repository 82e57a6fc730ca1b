use clap::Parser;
use tracing::error;

use lovemeter::cli::{Cli, Commands};
use lovemeter::config;
use lovemeter::system::{logging, modes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 初始化配置（-c 指定路径时优先生效）
    match cli.config.as_deref() {
        Some(path) => config::init_config_from(path),
        None => config::init_config(),
    }

    // 初始化日志系统，guard 必须存活到进程结束
    let _guard = logging::init_logging(&config::get_config());

    let result = match cli.command {
        None | Some(Commands::Serve) => modes::run_server().await,
        Some(Commands::Stats) => modes::cli::run_stats().await,
        Some(Commands::Config { action }) => modes::cli::run_config_command(action).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
