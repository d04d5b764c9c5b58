pub(crate) mod parser;

use std::time::Duration;

use tracing::debug;

use crate::error::{MatchdayError, Result};

pub use parser::parse;

/// Fetch a URL and return the response body as text.
///
/// Transport failures, non-success statuses and an expired `timeout` all map
/// to the fetch family of [`MatchdayError`].
pub(crate) async fn get_text(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    debug!(url, "fetching playlist");

    tokio::time::timeout(timeout, fetch(client, url))
        .await
        .map_err(|_| MatchdayError::Timeout {
            url: url.to_owned(),
            after: timeout,
        })?
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await.map_err(|e| MatchdayError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MatchdayError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| MatchdayError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}
