//! ServerChan WeChat push delivery.
//!
//! One-shot webhook: form-encoded `{title, desp}` POSTed to the per-account
//! URL. Delivery is reported, never raised — the caller gets `true` exactly
//! when the service answers with JSON `code == 0`.

use crate::config::Config;
use crate::utils::{truncate_chars, truncate_for_log};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// ServerChan's documented title limit.
const TITLE_LIMIT: usize = 100;

/// Push a message to WeChat via ServerChan.
///
/// Without a configured key this logs and reports failure without any
/// network activity. The title is truncated to 100 characters before
/// submission.
#[instrument(level = "info", skip_all, fields(%title))]
pub async fn notify(client: &Client, config: &Config, title: &str, body: &str) -> bool {
    let Some(key) = config.serverchan_key.as_deref() else {
        warn!("No ServerChan key configured; skipping push");
        return false;
    };

    let url = format!("{}/{}.send", config.push_base.trim_end_matches('/'), key);
    let form = [("title", truncate_chars(title, TITLE_LIMIT)), ("desp", body.to_string())];

    let response = match client
        .post(&url)
        .form(&form)
        .timeout(PUSH_TIMEOUT)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Push request failed");
            return false;
        }
    };

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "Failed to read push response");
            return false;
        }
    };

    if is_success(&body) {
        info!("WeChat push delivered");
        true
    } else {
        warn!(response_preview = %truncate_for_log(&body, 200), "Push reported failure");
        false
    }
}

/// `true` iff the webhook response JSON carries a numeric `code` equal to 0.
pub fn is_success(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("code").and_then(serde_json::Value::as_i64))
        == Some(0)
}
