use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::status::{StatusEngine, DEFAULT_LIVE_WINDOW};

fn default_fetch_timeout() -> u64 {
    15
}

fn default_live_window() -> u64 {
    DEFAULT_LIVE_WINDOW.num_seconds().unsigned_abs()
}

fn default_refresh_interval() -> u64 {
    1
}

/// Settings for a [`PlaylistClient`](crate::PlaylistClient). Durations are
/// given in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub playlist_url: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// How long after kickoff a match counts as live.
    #[serde(default = "default_live_window")]
    pub live_window: u64,
    /// Switch countdowns to `HH:MM:SS` below this lead time.
    #[serde(default)]
    pub fine_countdown_horizon: Option<u64>,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl ClientConfig {
    pub fn new(playlist_url: impl Into<String>) -> Self {
        Self {
            playlist_url: playlist_url.into(),
            fetch_timeout: default_fetch_timeout(),
            live_window: default_live_window(),
            fine_countdown_horizon: None,
            refresh_interval: default_refresh_interval(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.max(1))
    }

    pub fn status_engine(&self) -> StatusEngine {
        StatusEngine {
            live_window: seconds(self.live_window),
            fine_countdown_horizon: self.fine_countdown_horizon.map(seconds),
        }
    }
}

fn seconds(value: u64) -> TimeDelta {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"playlist_url": "https://example.com/playlist.m3u"}"#)
                .unwrap();
        assert_eq!(config, ClientConfig::new("https://example.com/playlist.m3u"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.status_engine(), StatusEngine::default());
    }

    #[test]
    fn test_deserialize_overrides() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "playlist_url": "https://example.com/playlist.m3u",
                "fetch_timeout": 5,
                "live_window": 7200,
                "fine_countdown_horizon": 3600,
                "refresh_interval": 0
            }"#,
        )
        .unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
        let engine = config.status_engine();
        assert_eq!(engine.live_window, TimeDelta::hours(2));
        assert_eq!(engine.fine_countdown_horizon, Some(TimeDelta::hours(1)));
    }
}
