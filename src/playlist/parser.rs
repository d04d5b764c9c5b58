use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{MatchList, MatchRecord, StreamLink, MAX_LINKS};

const ENTRY_MARKER: &str = "#EXTINF:";

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_-]+)="([^"]*)""#).expect("valid attribute regex"));

/// Parse playlist text into match records, in source order.
///
/// Only `#EXTINF:` lines produce records; every other line is ignored.
/// Missing or empty attributes become `None` rather than errors.
pub fn parse(content: &str) -> MatchList {
    let matches: MatchList = content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(ENTRY_MARKER))
        .map(|entry| build_record(&tokenize(entry)))
        .collect();
    debug!(count = matches.len(), "parsed playlist");
    matches
}

/// Collect every `key="value"` pair of an entry in one scan. The first
/// occurrence of a repeated key wins.
fn tokenize(entry: &str) -> HashMap<&str, &str> {
    let mut attributes = HashMap::new();
    for caps in ATTRIBUTE.captures_iter(entry) {
        if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
            attributes.entry(key.as_str()).or_insert(value.as_str());
        }
    }
    attributes
}

fn build_record(attributes: &HashMap<&str, &str>) -> MatchRecord {
    let attr = |key: &str| {
        attributes
            .get(key)
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
    };

    let links = (1..=MAX_LINKS)
        .filter_map(|i| {
            let url = attr(&format!("link{i}"))?;
            let name = attr(&format!("link-name{i}")).unwrap_or_else(|| StreamLink::default_name(i));
            Some(StreamLink { url, name })
        })
        .collect();

    MatchRecord {
        category_slug: attr("category-slug"),
        match_slug: attr("match-slug"),
        sport_icon: attr("sport-icon"),
        sport_name: attr("sport-name"),
        league_name: attr("league-name"),
        team1_name: attr("team1-name"),
        team1_logo: attr("team1-logo"),
        team2_name: attr("team2-name"),
        team2_logo: attr("team2-logo"),
        match_time: attr("match-time"),
        links,
    }
}
