//! Stats command handler.

use anyhow::{Context, Result};
use runboard_core::client::ApiClient;
use runboard_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(config.server_url.as_str());
    let stats = client.fetch_stats().await.context("fetch stats")?;

    println!("Total events: {}", stats.total);
    if let Some(updated) = stats.formatted_update() {
        println!("Last updated: {updated}");
    }

    if !stats.types.is_empty() {
        println!();
        println!("Top event types:");
        for entry in stats.top_types(5) {
            println!(
                "  {}: {} ({:.1}%)",
                entry.event_type, entry.count, entry.percentage
            );
        }
    }

    if !stats.seeds.is_empty() {
        println!();
        println!("Recent games:");
        for game in stats.recent_games(3) {
            println!("  Seed {} - {} events", game.seed, game.count);
            for (event_type, count) in &game.types {
                println!("    {event_type}: {count}");
            }
        }
    }

    Ok(())
}
