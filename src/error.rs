use std::time::Duration;

/// All errors that can surface from loading playlists, looking up matches
/// and driving playback.
#[derive(thiserror::Error, Debug)]
pub enum MatchdayError {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The playlist did not arrive within the configured fetch timeout.
    #[error("timed out after {after:?} fetching {url}")]
    Timeout { url: String, after: Duration },

    /// No match exists for the requested key and no fallback applies.
    #[error("match not found: {category}/{slug}")]
    MatchNotFound { category: String, slug: String },

    /// Every stream link of the current match has been tried and errored.
    #[error("all {attempted} stream links failed")]
    AllLinksFailed { attempted: usize },
}

impl MatchdayError {
    /// Whether this error came from fetching the playlist resource.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            MatchdayError::Http { .. }
                | MatchdayError::UnexpectedStatus { .. }
                | MatchdayError::ResponseBody { .. }
                | MatchdayError::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchdayError>;
