use std::sync::Arc;

use chrono::Local;
use matchday::{MatchBoard, PlaylistClient, StatusTab, SystemClock};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("usage: list_matches <playlist-url> [all|live|upcoming]");
        std::process::exit(2);
    };
    let tab: StatusTab = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or_default();

    let mut board = MatchBoard::new(PlaylistClient::new(url), Arc::new(SystemClock));
    match board.reload().await {
        Ok(count) => info!(count, "loaded playlist"),
        Err(e) => {
            error!(error = %e, "error loading events");
            std::process::exit(1);
        }
    }

    let cards = board.view(tab, &Local);
    println!("{}", serde_json::to_string_pretty(&cards).unwrap());

    let period = board.client().config().refresh_interval();
    board.start_ticker(period, |records, now| {
        info!(matches = records.len(), %now, "tick");
    });
    tokio::time::sleep(period * 3).await;
    board.stop_ticker();
}
