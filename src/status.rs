//! Match status derived from kickoff time and the current instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::model::{MatchPhase, MatchStatus};

/// How long after kickoff a match is still considered live.
pub const DEFAULT_LIVE_WINDOW: TimeDelta = TimeDelta::seconds(10_800);

const UNSCHEDULED_TEXT: &str = "Time TBC";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse a playlist `match-time` value.
///
/// Accepts RFC 3339 with any offset. A timestamp without a zone is read as
/// UTC, and a bare date as midnight UTC.
pub fn parse_match_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Classifies matches with a live window and countdown style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEngine {
    pub live_window: TimeDelta,
    /// Below this lead time the countdown switches to `HH:MM:SS`.
    pub fine_countdown_horizon: Option<TimeDelta>,
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self {
            live_window: DEFAULT_LIVE_WINDOW,
            fine_countdown_horizon: None,
        }
    }
}

impl StatusEngine {
    /// Derive the status of a match kicking off at `match_time`, as seen at `now`.
    pub fn status(&self, match_time: Option<&str>, now: DateTime<Utc>) -> MatchStatus {
        match match_time.and_then(parse_match_time) {
            Some(kickoff) => self.status_at(kickoff, now),
            None => MatchStatus {
                phase: MatchPhase::Unscheduled,
                is_live: false,
                phase_text: UNSCHEDULED_TEXT.to_string(),
                remaining_or_elapsed: None,
            },
        }
    }

    pub fn status_at(&self, kickoff: DateTime<Utc>, now: DateTime<Utc>) -> MatchStatus {
        let delta = kickoff - now;

        if delta > TimeDelta::zero() {
            return MatchStatus {
                phase: MatchPhase::Upcoming,
                is_live: false,
                phase_text: self.countdown_text(delta),
                remaining_or_elapsed: Some(delta),
            };
        }

        let (phase, phase_text) = if delta > -self.live_window {
            (MatchPhase::Live, "Live")
        } else {
            (MatchPhase::Finished, "Finished")
        };
        MatchStatus {
            phase,
            is_live: phase == MatchPhase::Live,
            phase_text: phase_text.to_string(),
            remaining_or_elapsed: Some(-delta),
        }
    }

    fn countdown_text(&self, remaining: TimeDelta) -> String {
        match self.fine_countdown_horizon {
            Some(horizon) if remaining <= horizon => {
                format!("Starts in {}", format_clock(remaining))
            }
            _ => format!("Starts in {}", format_countdown(remaining)),
        }
    }
}

/// Status with the default three hour live window.
pub fn status(match_time: Option<&str>, now: DateTime<Utc>) -> MatchStatus {
    StatusEngine::default().status(match_time, now)
}

/// `2h 5m`, or `5m` below one hour. Rounds down; negative input reads as zero.
pub fn format_countdown(remaining: TimeDelta) -> String {
    let seconds = remaining.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Zero padded `HH:MM:SS`. Rounds down; negative input reads as zero.
pub fn format_clock(remaining: TimeDelta) -> String {
    let seconds = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    const KICKOFF: &str = "2030-01-01T00:00:00Z";

    #[test]
    fn test_upcoming_countdown() {
        let now = kickoff() - TimeDelta::hours(2) - TimeDelta::minutes(5) - TimeDelta::seconds(30);
        let status = status(Some(KICKOFF), now);
        assert_eq!(status.phase, MatchPhase::Upcoming);
        assert!(!status.is_live);
        assert_eq!(status.phase_text, "Starts in 2h 5m");
        assert_eq!(
            status.remaining_or_elapsed,
            Some(TimeDelta::seconds(2 * 3600 + 5 * 60 + 30))
        );
    }

    #[test]
    fn test_upcoming_under_one_hour() {
        let now = kickoff() - TimeDelta::minutes(42);
        assert_eq!(status(Some(KICKOFF), now).phase_text, "Starts in 42m");
    }

    #[test]
    fn test_just_before_kickoff_rounds_down() {
        let now = kickoff() - TimeDelta::milliseconds(1);
        let status = status(Some(KICKOFF), now);
        assert_eq!(status.phase, MatchPhase::Upcoming);
        assert_eq!(status.phase_text, "Starts in 0m");
    }

    #[test]
    fn test_live_window_boundaries() {
        let at_kickoff = status(Some(KICKOFF), kickoff());
        assert_eq!(at_kickoff.phase, MatchPhase::Live);
        assert!(at_kickoff.is_live);

        let one_hour_in = status(Some(KICKOFF), kickoff() + TimeDelta::hours(1));
        assert!(one_hour_in.is_live);
        assert_eq!(one_hour_in.phase_text, "Live");
        assert_eq!(one_hour_in.remaining_or_elapsed, Some(TimeDelta::hours(1)));

        let last_moment = status(
            Some(KICKOFF),
            kickoff() + TimeDelta::seconds(10_800) - TimeDelta::milliseconds(1),
        );
        assert!(last_moment.is_live);

        let window_end = status(Some(KICKOFF), kickoff() + TimeDelta::seconds(10_800));
        assert_eq!(window_end.phase, MatchPhase::Finished);
        assert!(!window_end.is_live);
    }

    #[test]
    fn test_finished_after_window() {
        let status = status(Some(KICKOFF), kickoff() + TimeDelta::hours(4));
        assert_eq!(status.phase, MatchPhase::Finished);
        assert!(!status.is_live);
        assert_eq!(status.phase_text, "Finished");
    }

    #[test]
    fn test_unscheduled_when_missing_or_invalid() {
        for raw in [None, Some("soon"), Some("")] {
            let status = status(raw, kickoff());
            assert_eq!(status.phase, MatchPhase::Unscheduled);
            assert!(!status.is_live);
            assert_eq!(status.phase_text, "Time TBC");
            assert_eq!(status.remaining_or_elapsed, None);
        }
    }

    #[test]
    fn test_exactly_one_phase_per_offset() {
        for minutes in (-300..=300).step_by(7) {
            let now = kickoff() + TimeDelta::minutes(minutes);
            let delta = (kickoff() - now).num_seconds();
            let status = status(Some(KICKOFF), now);
            assert_eq!(status.is_live, delta <= 0 && delta > -10_800);
            assert_eq!(status.is_live, status.phase == MatchPhase::Live);
            assert_ne!(status.phase, MatchPhase::Unscheduled);
        }
    }

    #[test]
    fn test_status_is_idempotent() {
        let now = kickoff() - TimeDelta::minutes(90);
        assert_eq!(status(Some(KICKOFF), now), status(Some(KICKOFF), now));
    }

    #[test]
    fn test_date_only_kickoff_is_scheduled() {
        let status = status(Some("2030-01-01"), kickoff() + TimeDelta::hours(1));
        assert_eq!(status.phase, MatchPhase::Live);
        assert!(status.is_live);
    }

    #[test]
    fn test_custom_live_window() {
        let engine = StatusEngine {
            live_window: TimeDelta::hours(2),
            ..Default::default()
        };
        let status = engine.status(Some(KICKOFF), kickoff() + TimeDelta::minutes(150));
        assert_eq!(status.phase, MatchPhase::Finished);
    }

    #[test]
    fn test_fine_countdown_inside_horizon() {
        let engine = StatusEngine {
            fine_countdown_horizon: Some(TimeDelta::hours(1)),
            ..Default::default()
        };
        let close = kickoff() - TimeDelta::minutes(5) - TimeDelta::seconds(7);
        assert_eq!(
            engine.status(Some(KICKOFF), close).phase_text,
            "Starts in 00:05:07"
        );

        let far = kickoff() - TimeDelta::hours(3);
        assert_eq!(engine.status(Some(KICKOFF), far).phase_text, "Starts in 3h 0m");
    }

    #[test]
    fn test_parse_match_time_formats() {
        assert_eq!(parse_match_time(KICKOFF), Some(kickoff()));
        assert_eq!(
            parse_match_time("2030-01-01T05:30:00+05:30"),
            Some(kickoff())
        );
        assert_eq!(parse_match_time("2030-01-01T00:00:00"), Some(kickoff()));
        assert_eq!(parse_match_time("2030-01-01T00:00"), Some(kickoff()));
        assert_eq!(parse_match_time("2030-01-01"), Some(kickoff()));
        assert_eq!(parse_match_time("2030-02-30"), None);
        assert_eq!(parse_match_time("01/01/2030"), None);
    }

    #[test]
    fn test_format_helpers_clamp_negative() {
        assert_eq!(format_countdown(TimeDelta::seconds(-30)), "0m");
        assert_eq!(format_clock(TimeDelta::seconds(-30)), "00:00:00");
        assert_eq!(format_clock(TimeDelta::seconds(3 * 3600 + 61)), "03:01:01");
    }

    #[test]
    fn test_clock_implementations() {
        assert_eq!(FixedClock(kickoff()).now(), kickoff());
        assert!(SystemClock.now() > kickoff() - TimeDelta::days(365 * 10));
    }
}
