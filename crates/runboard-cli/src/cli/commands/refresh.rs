//! Refresh command handler.

use anyhow::{Context, Result};
use runboard_core::client::ApiClient;
use runboard_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(config.server_url.as_str());
    client.trigger_refresh().await.context("refresh data")?;
    println!("Refresh complete.");
    Ok(())
}
