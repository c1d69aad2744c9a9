//! Task API server binary.

use std::process::ExitCode;

use task_api::{config::AppConfig, server, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            telemetry::init("info");
            tracing::error!(%error, "configuration error");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init(&config.log_level);
    if dotenv_loaded {
        tracing::debug!("loaded .env file");
    }

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "server failed");
            ExitCode::FAILURE
        }
    }
}
