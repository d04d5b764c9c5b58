use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::*;
use crate::player::{self, Lookup};
use crate::playlist;
use crate::status::StatusEngine;

/// The main entry point for loading a match playlist.
///
/// `PlaylistClient` wraps a [`reqwest::Client`] together with a
/// [`ClientConfig`] and exposes the fetch-and-parse operations shared by the
/// listing and player pages.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchday::Result<()> {
/// use matchday::{status, PlaylistClient};
///
/// let client = PlaylistClient::new("https://example.com/playlist.m3u");
/// let matches = client.load_all().await?;
/// let now = chrono::Utc::now();
/// for record in &matches {
///     println!("{}", status(record.match_time.as_deref(), now).phase_text);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlaylistClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PlaylistClient {
    /// Create a client for `playlist_url` with default settings.
    pub fn new(playlist_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(playlist_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Status engine configured with this client's live window and countdown
    /// horizon.
    pub fn status_engine(&self) -> StatusEngine {
        self.config.status_engine()
    }

    /// Fetch and parse the whole playlist.
    #[instrument(skip(self), fields(url = %self.config.playlist_url))]
    pub async fn load_all(&self) -> Result<MatchList> {
        let body = playlist::get_text(
            &self.http,
            &self.config.playlist_url,
            self.config.fetch_timeout(),
        )
        .await?;
        let matches = playlist::parse(&body);
        debug!(count = matches.len(), "loaded playlist");
        Ok(matches)
    }

    /// Fetch the playlist and look up one match by its composite key.
    #[instrument(skip(self))]
    pub async fn find_match(
        &self,
        category: &str,
        slug: &str,
        lookup: Lookup,
    ) -> Result<MatchRecord> {
        let matches = self.load_all().await?;
        player::find_match(&matches, category, slug, lookup).cloned()
    }
}
