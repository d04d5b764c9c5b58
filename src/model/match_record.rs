use serde::Serialize;

/// Upper bound on alternate stream links per playlist entry.
pub const MAX_LINKS: usize = 10;

/// A parsed playlist, in source order.
pub type MatchList = Vec<MatchRecord>;

/// One `#EXTINF` entry of the playlist.
///
/// Every display field is optional: a malformed entry still produces a
/// record, with `None` wherever an attribute was missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub category_slug: Option<String>,
    pub match_slug: Option<String>,
    pub sport_icon: Option<String>,
    pub sport_name: Option<String>,
    pub league_name: Option<String>,
    pub team1_name: Option<String>,
    pub team1_logo: Option<String>,
    pub team2_name: Option<String>,
    pub team2_logo: Option<String>,
    /// Raw ISO-8601 kickoff instant as it appeared in the playlist.
    pub match_time: Option<String>,
    /// Alternate streams in playback priority order.
    pub links: Vec<StreamLink>,
}

impl MatchRecord {
    /// Whether this record sits under the given `(category, match)` key.
    pub fn has_key(&self, category: &str, slug: &str) -> bool {
        self.in_category(category) && self.match_slug.as_deref() == Some(slug)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category_slug.as_deref() == Some(category)
    }
}

/// A single playable stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLink {
    pub url: String,
    pub name: String,
}

impl StreamLink {
    /// Placeholder name for a link declared at 1-based attribute `index`.
    pub fn default_name(index: usize) -> String {
        format!("Server {index}")
    }
}
