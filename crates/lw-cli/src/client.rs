//! SSE client for `lw watch`: follows a running server's change feed and
//! prints each state as it lands.

use anyhow::{Context, Result};
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use lw_core::{Balance, Category};
use serde::Deserialize;

/// Shape of one change-feed event.
#[derive(Debug, Deserialize)]
struct StateEvent {
    state: Balance,
    total: i32,
}

pub async fn watch(url: &str) -> Result<()> {
    let events_url = format!("{}/api/events", url.trim_end_matches('/'));

    let response = reqwest::get(&events_url)
        .await
        .with_context(|| format!("failed to connect to {events_url}"))?
        .error_for_status()
        .with_context(|| format!("server rejected {events_url}"))?;

    println!("watching {events_url}");

    let mut stream = response.bytes_stream().eventsource();
    while let Some(event) = stream.next().await {
        match event {
            Ok(event) => match serde_json::from_str::<StateEvent>(&event.data) {
                Ok(change) => println!("{}", format_change(&change)),
                Err(e) => tracing::warn!("unparseable event '{}': {e}", event.data),
            },
            Err(e) => {
                tracing::warn!("change feed ended: {e}");
                break;
            }
        }
    }

    Ok(())
}

fn format_change(change: &StateEvent) -> String {
    let pairs: Vec<String> = Category::ALL
        .iter()
        .map(|&cat| format!("{}={}", cat.as_str(), change.state.get(cat)))
        .collect();
    format!("{}  total={}", pairs.join(" "), change.total)
}
