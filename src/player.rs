use tracing::{debug, warn};

use crate::error::{MatchdayError, Result};
use crate::model::{MatchRecord, StreamLink};

/// Stream container inferred from a URL suffix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum MimeType {
    #[strum(serialize = "application/x-mpegURL")]
    Hls,
    #[default]
    #[strum(serialize = "video/mp4")]
    Mp4,
    #[strum(serialize = "video/webm")]
    Webm,
    #[strum(serialize = "video/MP2T")]
    MpegTs,
}

impl MimeType {
    /// Infer the MIME type from the path suffix of `url`, ignoring any query
    /// string or fragment. Unknown suffixes fall back to `video/mp4`.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "m3u8" => MimeType::Hls,
            "mp4" => MimeType::Mp4,
            "webm" => MimeType::Webm,
            "ts" => MimeType::MpegTs,
            _ => MimeType::default(),
        }
    }
}

/// The video player the session drives. Playback errors are reported back
/// through [`PlaybackSession::on_error`].
pub trait PlaybackSink {
    fn set_source(&mut self, url: &str, mime: MimeType);
    fn play(&mut self);
}

/// `(category, match)` pair taken from the player page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRoute {
    pub category: String,
    pub slug: String,
}

impl MatchRoute {
    /// Split `/category/match` into its two segments. Any other shape yields
    /// `None`, which sends the user back to the listing.
    pub fn from_path(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(category), Some(slug), None) => Some(Self {
                category: category.to_string(),
                slug: slug.to_string(),
            }),
            _ => None,
        }
    }
}

/// How a lookup treats a slug missing from an existing category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The exact key or nothing.
    #[default]
    Exact,
    /// Fall back to the first match of the category.
    CategoryFallback,
}

/// Find the match stored under `(category, slug)`. Duplicated keys resolve
/// to the first record in playlist order.
pub fn find_match<'a>(
    records: &'a [MatchRecord],
    category: &str,
    slug: &str,
    lookup: Lookup,
) -> Result<&'a MatchRecord> {
    if let Some(record) = records.iter().find(|r| r.has_key(category, slug)) {
        return Ok(record);
    }

    let fallback = match lookup {
        Lookup::Exact => None,
        Lookup::CategoryFallback => records.iter().find(|r| r.in_category(category)),
    };
    match fallback {
        Some(record) => {
            warn!(
                category,
                slug,
                fallback = record.match_slug.as_deref().unwrap_or_default(),
                "match not found, falling back to first match in category"
            );
            Ok(record)
        }
        None => Err(MatchdayError::MatchNotFound {
            category: category.to_owned(),
            slug: slug.to_owned(),
        }),
    }
}

/// Where a playback session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Link at `index` has been handed to the sink.
    Playing { index: usize },
    /// Every remaining link errored.
    Exhausted,
}

/// Plays one match, falling through its links in order on error.
pub struct PlaybackSession<S> {
    sink: S,
    title: String,
    links: Vec<StreamLink>,
    current: usize,
    state: Option<PlaybackState>,
}

impl<S: PlaybackSink> PlaybackSession<S> {
    pub fn new(record: &MatchRecord, sink: S) -> Self {
        let title = format!(
            "{} vs {}",
            record.team1_name.as_deref().unwrap_or_default(),
            record.team2_name.as_deref().unwrap_or_default()
        );
        Self {
            sink,
            title,
            links: record.links.clone(),
            current: 0,
            state: None,
        }
    }

    /// Start with the highest priority link.
    pub fn start(&mut self) -> PlaybackState {
        self.attempt(0)
    }

    /// The current link failed: move on to the next one. Earlier links are
    /// never retried. An error before [`start`](Self::start) starts playback
    /// at the first link instead.
    pub fn on_error(&mut self) -> PlaybackState {
        match self.state {
            None => return self.start(),
            Some(PlaybackState::Exhausted) => return PlaybackState::Exhausted,
            Some(PlaybackState::Playing { .. }) => {}
        }
        warn!(
            index = self.current,
            url = self.links.get(self.current).map(|l| l.url.as_str()),
            "stream link failed"
        );
        self.attempt(self.current + 1)
    }

    /// The user picked link `index`. Later automatic fallback continues from
    /// there. An index past the last link is ignored and yields `None`.
    pub fn select(&mut self, index: usize) -> Option<PlaybackState> {
        if index >= self.links.len() {
            warn!(
                index,
                available = self.links.len(),
                "ignoring selection of unknown link"
            );
            return None;
        }
        Some(self.attempt(index))
    }

    fn attempt(&mut self, index: usize) -> PlaybackState {
        self.current = index;
        let state = match self.links.get(index) {
            Some(link) => {
                let mime = MimeType::from_url(&link.url);
                debug!(index, url = %link.url, %mime, "switching stream source");
                self.sink.set_source(&link.url, mime);
                self.sink.play();
                PlaybackState::Playing { index }
            }
            None => {
                warn!(attempted = self.links.len(), "no stream links left");
                PlaybackState::Exhausted
            }
        };
        self.state = Some(state);
        state
    }

    /// Turn an exhausted session into [`MatchdayError::AllLinksFailed`].
    pub fn ensure_playing(&self) -> Result<&StreamLink> {
        match self.state {
            Some(PlaybackState::Playing { index }) => self
                .links
                .get(index)
                .ok_or(MatchdayError::AllLinksFailed {
                    attempted: self.links.len(),
                }),
            _ => Err(MatchdayError::AllLinksFailed {
                attempted: self.links.len(),
            }),
        }
    }

    pub fn state(&self) -> Option<PlaybackState> {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn links(&self) -> &[StreamLink] {
        &self.links
    }

    /// `{team1} vs {team2}`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
