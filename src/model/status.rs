use chrono::TimeDelta;
use serde::Serialize;

/// Where a match sits relative to its scheduled start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchPhase {
    Upcoming,
    Live,
    Finished,
    /// Kickoff time missing or unreadable.
    Unscheduled,
}

/// Derived status of a match at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStatus {
    pub phase: MatchPhase,
    pub is_live: bool,
    /// Human readable status, e.g. `Starts in 2h 5m` or `Live`.
    pub phase_text: String,
    /// Time left until kickoff for upcoming matches, time since kickoff
    /// otherwise. `None` when unscheduled.
    pub remaining_or_elapsed: Option<TimeDelta>,
}
