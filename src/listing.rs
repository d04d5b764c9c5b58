use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use itertools::Itertools;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::client::PlaylistClient;
use crate::error::Result;
use crate::model::{CardTeam, MatchCard, MatchPhase, MatchRecord, StatusTab};
use crate::status::{parse_match_time, Clock, StatusEngine};

const DEFAULT_ICON: &str = "default-icon.png";
const DEFAULT_LOGO: &str = "default-logo.png";
const KICKOFF_TIME_FORMAT: &str = "%I:%M %p";
const KICKOFF_DATE_FORMAT: &str = "%d/%m/%Y";
const MIN_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Keep the records that belong under `tab` at instant `now`.
///
/// The upcoming tab lists everything that is not live, including finished
/// and unscheduled matches.
pub fn filter<'a>(
    engine: &StatusEngine,
    records: &'a [MatchRecord],
    tab: StatusTab,
    now: DateTime<Utc>,
) -> Vec<&'a MatchRecord> {
    records
        .iter()
        .filter(|record| match tab {
            StatusTab::All => true,
            StatusTab::Live => engine.status(record.match_time.as_deref(), now).is_live,
            StatusTab::Upcoming => !engine.status(record.match_time.as_deref(), now).is_live,
        })
        .collect()
}

/// Order records for display: live first, then by kickoff, unknown kickoff
/// last. Equal keys keep their playlist order.
pub fn sort<'a>(
    engine: &StatusEngine,
    records: impl IntoIterator<Item = &'a MatchRecord>,
    now: DateTime<Utc>,
) -> Vec<&'a MatchRecord> {
    records
        .into_iter()
        .map(|record| {
            let kickoff = record.match_time.as_deref().and_then(parse_match_time);
            let is_live = kickoff.is_some_and(|k| engine.status_at(k, now).is_live);
            (record, is_live, kickoff)
        })
        .sorted_by(|(_, a_live, a_kickoff), (_, b_live, b_kickoff)| {
            b_live
                .cmp(a_live)
                .then_with(|| compare_kickoff(a_kickoff, b_kickoff))
        })
        .map(|(record, _, _)| record)
        .collect()
}

fn compare_kickoff(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build the card shown for `record`, with kickoff rendered in `tz`.
pub fn build_card<Tz: TimeZone>(
    engine: &StatusEngine,
    record: &MatchRecord,
    now: DateTime<Utc>,
    tz: &Tz,
) -> MatchCard
where
    Tz::Offset: std::fmt::Display,
{
    let status = engine.status(record.match_time.as_deref(), now);
    let (time, date) = match record.match_time.as_deref().and_then(parse_match_time) {
        Some(kickoff) => {
            let local = kickoff.with_timezone(tz);
            (
                local.format(KICKOFF_TIME_FORMAT).to_string(),
                local.format(KICKOFF_DATE_FORMAT).to_string(),
            )
        }
        None => ("N/A".to_string(), String::new()),
    };

    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let image = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| fallback.to_string())
    };

    MatchCard {
        href: record
            .category_slug
            .as_ref()
            .zip(record.match_slug.as_ref())
            .map(|(category, slug)| format!("/{category}/{slug}")),
        sport_icon: image(&record.sport_icon, DEFAULT_ICON),
        header: format!(
            "{} | {}",
            text(&record.sport_name),
            text(&record.league_name)
        ),
        team1: CardTeam {
            name: text(&record.team1_name),
            logo: image(&record.team1_logo, DEFAULT_LOGO),
        },
        team2: CardTeam {
            name: text(&record.team2_name),
            logo: image(&record.team2_logo, DEFAULT_LOGO),
        },
        time,
        date,
        phase: status.phase,
        status_text: status.phase_text,
        is_live: status.is_live,
    }
}

/// Periodic refresh task. Aborted when dropped.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Listing session: owns the current playlist snapshot, the clock and the
/// refresh ticker.
///
/// A reload swaps the snapshot in one step. Tick callbacks see whichever
/// snapshot is current when they run.
pub struct MatchBoard {
    client: PlaylistClient,
    clock: Arc<dyn Clock>,
    snapshot: watch::Sender<Arc<[MatchRecord]>>,
    ticker: Option<Ticker>,
}

impl MatchBoard {
    pub fn new(client: PlaylistClient, clock: Arc<dyn Clock>) -> Self {
        let (snapshot, _) = watch::channel(Arc::from(Vec::new()));
        Self {
            client,
            clock,
            snapshot,
            ticker: None,
        }
    }

    /// Fetch the playlist and install it as the current snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<usize> {
        match self.client.load_all().await {
            Ok(records) => {
                let count = records.len();
                self.replace(records);
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "playlist reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Install `records` as the current snapshot.
    pub fn replace(&self, records: Vec<MatchRecord>) {
        debug!(count = records.len(), "installing playlist snapshot");
        self.snapshot.send_replace(Arc::from(records));
    }

    pub fn snapshot(&self) -> Arc<[MatchRecord]> {
        self.snapshot.borrow().clone()
    }

    pub fn client(&self) -> &PlaylistClient {
        &self.client
    }

    /// Cards for `tab` at the current instant, sorted for display.
    pub fn view<Tz: TimeZone>(&self, tab: StatusTab, tz: &Tz) -> Vec<MatchCard>
    where
        Tz::Offset: std::fmt::Display,
    {
        let engine = self.client.status_engine();
        let now = self.clock.now();
        let snapshot = self.snapshot();
        let visible = filter(&engine, &snapshot, tab, now);
        sort(&engine, visible, now)
            .into_iter()
            .map(|record| build_card(&engine, record, now, tz))
            .collect()
    }

    /// Number of live matches in the current snapshot.
    pub fn live_count(&self) -> usize {
        let engine = self.client.status_engine();
        let now = self.clock.now();
        self.snapshot()
            .iter()
            .filter(|record| {
                engine.status(record.match_time.as_deref(), now).phase == MatchPhase::Live
            })
            .count()
    }

    /// Call `on_tick` every `period` with the latest snapshot and a fresh
    /// instant. A ticker already running is cancelled first. Periods under
    /// one second are raised to one second.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_ticker<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut(&[MatchRecord], DateTime<Utc>) + Send + 'static,
    {
        self.stop_ticker();

        let period = period.max(MIN_TICK_PERIOD);
        let snapshot = self.snapshot.subscribe();
        let clock = Arc::clone(&self.clock);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let records = snapshot.borrow().clone();
                on_tick(records.as_ref(), clock.now());
            }
        });
        debug!(?period, "started refresh ticker");
        self.ticker = Some(Ticker { handle });
    }

    pub fn stop_ticker(&mut self) {
        if self.ticker.take().is_some() {
            debug!("stopped refresh ticker");
        }
    }

    pub fn ticker(&self) -> Option<&Ticker> {
        self.ticker.as_ref()
    }
}
