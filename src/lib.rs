pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use services::{ExportJob, ExportReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().or_else(Config::find_config_file);
    let config = match &config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    config.validate()?;

    init_tracing(&config);

    match &config_path {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match cli.command.unwrap_or(Commands::Export) {
        Commands::Export => cli::cmd_export(&config).await,
        Commands::Add { fields } => cli::cmd_add_chain(&config, &fields).await,
        Commands::Show { filter } => cli::cmd_show_chain(&config, &filter).await,
        Commands::List { filter } => cli::cmd_list_chains(&config, &filter).await,
        Commands::Update { id, fields, clear } => {
            cli::cmd_update_chain(&config, id, &fields, &clear).await
        }
        Commands::Stats => cli::cmd_stats(&config).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

/// Exports the chains table to the lookup JSON files and the README.
pub async fn export(config: &Config) -> anyhow::Result<ExportReport> {
    let store = Store::from_config(&config.general)
        .await
        .with_context(|| format!("Failed to open database: {}", config.general.database_path))?;

    store.ping().await.context("Database is not reachable")?;

    info!("Starting export");
    let report = ExportJob::new(store, config.export.clone()).run().await?;
    Ok(report)
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
