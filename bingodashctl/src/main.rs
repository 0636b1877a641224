mod cli;
mod commands;
mod render;
mod session;

use std::process::ExitCode;

use anyhow::Result;
use bingodash_config::{ConfigLoad, ConfigLoader};
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use crate::commands::App;

fn load_config(cli: &Cli) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    if cli.no_env_file {
        loader = loader.without_env_file();
    }
    Ok(loader.load()?)
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let load = match load_config(&cli) {
        Ok(load) => load,
        Err(err) => {
            init_tracing("info");
            error!("configuration error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&load.config.logging.filter);
    for warning in &load.warnings {
        warn!("{warning}");
    }
    debug!(
        config = ?load.config.metadata.config_path,
        env_file = load.config.metadata.env_file_loaded,
        overrides = ?load.config.metadata.env_overrides,
        "configuration loaded"
    );

    let app = match App::from_config(&load.config).await {
        Ok(app) => app,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if commands::is_auth_expired(&err) => {
            app.expire_session().await;
            eprintln!(
                "session expired; sign in again with `bingodashctl login`"
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
