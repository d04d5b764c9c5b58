mod client;
mod config;
mod error;
pub mod listing;
mod model;
pub mod player;
mod playlist;
pub mod status;

pub use client::PlaylistClient;
pub use config::ClientConfig;
pub use error::{MatchdayError, Result};
pub use listing::MatchBoard;
pub use model::*;
pub use player::{
    find_match, Lookup, MatchRoute, MimeType, PlaybackSession, PlaybackSink, PlaybackState,
};
pub use playlist::parse;
pub use status::{status, Clock, FixedClock, StatusEngine, SystemClock};
