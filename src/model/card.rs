use serde::Serialize;

use super::MatchPhase;

/// Presentation data for one match in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCard {
    /// Link to the player page, `/{category}/{match}`. `None` when either
    /// slug is missing.
    pub href: Option<String>,
    pub sport_icon: String,
    /// `{sport} | {league}`.
    pub header: String,
    pub team1: CardTeam,
    pub team2: CardTeam,
    /// Kickoff clock time, e.g. `07:30 PM`.
    pub time: String,
    /// Kickoff date as `dd/mm/yyyy`.
    pub date: String,
    pub phase: MatchPhase,
    pub status_text: String,
    pub is_live: bool,
}

/// One side of a match card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTeam {
    pub name: String,
    pub logo: String,
}
