use anyhow::Context;
use dotenvy::dotenv;
use lambda_runtime::{Error, run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod infrastructure;
mod modules;
mod state;

use config::settings::AppConfig;
use modules::job::handler::start_media_convert_job;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    // Lambda stamps each line itself
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    info!("Starting media convert trigger...");

    let config = AppConfig::new().context("failed to load configuration")?;
    let state = app::create_state(config).await;

    info!("Waiting for S3 notifications");

    run(service_fn(|event| start_media_convert_job(&state, event))).await
}
