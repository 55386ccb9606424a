//! Events command handler.

use anyhow::{Context, Result};
use runboard_core::client::ApiClient;
use runboard_core::config::Config;
use runboard_core::filter::FilterState;
use runboard_core::page::{page_slice, total_pages, PER_PAGE};

pub async fn run(config: &Config, filter: &FilterState, page: usize) -> Result<()> {
    let client = ApiClient::new(config.server_url.as_str());
    let events = client.fetch_events().await.context("fetch events")?;
    let view = filter.apply(&events);

    let total = total_pages(view.len(), PER_PAGE);
    let page = page.clamp(1, total);
    let slice = page_slice(&view, page, PER_PAGE);

    if slice.is_empty() {
        println!("No events match the current filters.");
    } else {
        println!(
            "{:<24} {:<16} {:>12} {:>8} {:>8}  {}",
            "ID", "TYPE", "TIMESTAMP", "SEED", "LEVEL", "DATA"
        );
        for (i, event) in slice.iter().enumerate() {
            println!(
                "{:<24} {:<16} {:>12} {:>8} {:>8}  {}",
                event.display_id(i + 1),
                event.display_type(),
                event.timestamp,
                event.seed_label(),
                event.level_label(),
                event.data_preview(50)
            );
        }
    }

    println!();
    println!(
        "Page {page} of {total} | {} events ({} total)",
        view.len(),
        events.len()
    );
    Ok(())
}
