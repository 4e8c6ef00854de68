//! 焦点访谈 episode fetcher.
//!
//! Pulls the newest episode of the column from the CNTV video-listing API,
//! a JSON endpoint shaped `{ data: { list: [ {title, brief, time, ...} ] } }`.
//! Any failure (transport, non-2xx, parse, empty list) is logged and
//! collapses to "no episode" — the driver decides what to do with that.

use crate::config::Config;
use crate::models::Episode;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use url::Url;

/// The CNTV column id for 焦点访谈.
const COLUMN_ID: &str = "TOPC1451558976694518";

/// Browser-like identification header; the listing API rejects bare clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    list: Vec<Episode>,
}

/// Fetch the newest 焦点访谈 episode.
///
/// Issues a single GET with a 15-second timeout and takes only the first
/// item of `data.list`. Returns `None` on any failure; no retry, no
/// partial data.
#[instrument(level = "info", skip_all)]
pub async fn fetch_latest(client: &Client, config: &Config) -> Option<Episode> {
    match try_fetch(client, config).await {
        Ok(Some(episode)) => {
            info!(title = %episode.title, time = %episode.time, "Fetched latest episode");
            Some(episode)
        }
        Ok(None) => {
            warn!("Listing API returned no episodes");
            None
        }
        Err(e) => {
            error!(error = %e, "Episode fetch failed");
            None
        }
    }
}

async fn try_fetch(client: &Client, config: &Config) -> Result<Option<Episode>, Box<dyn Error>> {
    let url = listing_url(&config.listing_url)?;
    let body = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(parse_listing(&body))
}

/// Build the listing URL: newest-first, page 1, five items.
fn listing_url(base: &str) -> Result<Url, Box<dyn Error>> {
    let url = Url::parse_with_params(
        base,
        [
            ("id", COLUMN_ID),
            ("n", "5"),
            ("sort", "desc"),
            ("p", "1"),
            ("mode", "0"),
            ("serviceId", "tvcctv"),
        ],
    )?;
    Ok(url)
}

/// Extract the first episode from a listing response body.
///
/// Missing `data`, missing or empty `list`, and unparsable bodies all
/// yield `None`; missing fields on the first item default to empty strings.
pub fn parse_listing(body: &str) -> Option<Episode> {
    let response = match serde_json::from_str::<ListingResponse>(body) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, body_preview = %truncate_for_log(body, 200), "Listing body is not valid JSON");
            return None;
        }
    };
    response.data?.list.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_takes_first_item() {
        let body = r#"{
            "data": {
                "list": [
                    {"title": "节目A", "brief": "内容A", "time": "2024-01-01", "url": "http://x", "length": "15:00"},
                    {"title": "节目B", "brief": "内容B", "time": "2023-12-31", "url": "http://y", "length": "15:00"}
                ]
            }
        }"#;
        let episode = parse_listing(body).unwrap();
        assert_eq!(episode.title, "节目A");
        assert_eq!(episode.brief, "内容A");
        assert_eq!(episode.time, "2024-01-01");
        assert_eq!(episode.url, "http://x");
    }

    #[test]
    fn test_parse_listing_defaults_missing_fields() {
        let body = r#"{"data": {"list": [{"title": "节目A"}]}}"#;
        let episode = parse_listing(body).unwrap();
        assert_eq!(episode.title, "节目A");
        assert_eq!(episode.brief, "");
        assert_eq!(episode.url, "");
        assert_eq!(episode.length, "");
    }

    #[test]
    fn test_parse_listing_empty_list() {
        assert_eq!(parse_listing(r#"{"data": {"list": []}}"#), None);
    }

    #[test]
    fn test_parse_listing_missing_list() {
        assert_eq!(parse_listing(r#"{"data": {}}"#), None);
    }

    #[test]
    fn test_parse_listing_missing_data() {
        assert_eq!(parse_listing(r#"{"errcode": 1}"#), None);
    }

    #[test]
    fn test_parse_listing_garbage_body() {
        assert_eq!(parse_listing("<html>not json</html>"), None);
    }

    #[test]
    fn test_listing_url_query_params() {
        let url = listing_url(crate::config::LISTING_URL).unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(query.contains(&("id".to_string(), COLUMN_ID.to_string())));
        assert!(query.contains(&("n".to_string(), "5".to_string())));
        assert!(query.contains(&("sort".to_string(), "desc".to_string())));
        assert!(query.contains(&("p".to_string(), "1".to_string())));
    }
}
