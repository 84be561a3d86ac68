//! Workshop Admin - command-line dashboard
//!
//! Manages workshops, materials, inventory, transfers and processing runs
//! against the dashboard REST backend.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workshop_admin_client::{
    cli::{self, Cli, Output},
    ApiClient, Config, FileSessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workshop_admin=info,workshop_admin_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }

    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Backend: {}", config.api.base_url);

    let session = FileSessionStore::open(&config.session.path)
        .with_context(|| format!("failed to open session file {:?}", config.session.path))?;
    let client = ApiClient::new(&config.api, Arc::new(session))?;

    let out = Output::new(args.json);
    if let Err(err) = cli::run(&client, args.command, &out, config.locale).await {
        let notification = err.notification();
        eprintln!("{}", notification);
        if let Some(page) = err.redirect() {
            eprintln!(
                "Sign in again with `workshop-admin login` ({})",
                page.path(config.locale)
            );
        }
        std::process::exit(1);
    }

    Ok(())
}
