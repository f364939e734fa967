use clap::Parser;
use std::process::ExitCode;

use wellness_app::presentation::bootstrap::{build_app_state, StoreBackend};
use wellness_app::presentation::cli::Cli;
use wellness_app::presentation::commands::execute;
use wellness_app::presentation::error::CommandError;
use wellness_infrastructure::config::AppConfig;
use wellness_infrastructure::logging;

fn report(err: &CommandError) -> ExitCode {
    tracing::error!("❌ {}", err);
    match serde_json::to_string_pretty(err) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", err),
    }
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report(&CommandError::from(e)),
    };
    if let Some(db_path) = cli.db_path.clone() {
        config.db_path = db_path;
    }

    match logging::init_logger(config.log_dir.clone()) {
        Ok(()) => {
            tracing::info!("🚀 wellness starting...");
            tracing::info!("📝 File logging initialized at: {}", config.log_dir.display());
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to console logging only");
            logging::init_console_logger();
        }
    }

    let backend = if cli.ephemeral {
        StoreBackend::InMemory
    } else {
        StoreBackend::Sqlite
    };

    let state = match build_app_state(&config, backend).await {
        Ok(state) => state,
        Err(e) => return report(&CommandError::from(e)),
    };

    match execute(&state, cli.command).await {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(e) => return report(&CommandError::from(e)),
            }
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}
