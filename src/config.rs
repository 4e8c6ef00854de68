//! Run configuration.
//!
//! Built once from the parsed CLI at startup and passed by reference into
//! every component, so nothing reads the process environment after launch
//! and every component can be exercised with an injected [`Config`].

use crate::cli::Cli;

/// CNTV video-listing endpoint for the 焦点访谈 column.
pub const LISTING_URL: &str = "https://api.cntv.cn/NewVideo/getVideoListByColumn";
/// DeepSeek OpenAI-compatible chat-completions endpoint.
pub const CHAT_URL: &str = "https://api.deepseek.com/chat/completions";
/// ServerChan webhook base; the access key and `.send` are appended.
pub const PUSH_BASE: &str = "https://sctapi.ftqq.com";

/// Immutable configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// ServerChan access key; `None` disables delivery.
    pub serverchan_key: Option<String>,
    /// DeepSeek API key; `None` routes every rewrite to the fallback template.
    pub deepseek_api_key: Option<String>,
    /// Chat model name sent to the generation API.
    pub model: String,
    /// Video-listing endpoint (overridable for tests).
    pub listing_url: String,
    /// Chat-completions endpoint (overridable for tests).
    pub chat_url: String,
    /// Push-webhook base URL (overridable for tests).
    pub push_base: String,
}

impl Config {
    /// Build the run configuration from parsed CLI arguments.
    ///
    /// Empty-string key values (a common artifact of `KEY=` lines in
    /// scheduler environments) are normalized to absent.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            serverchan_key: normalize(cli.serverchan_key.as_deref()),
            deepseek_api_key: normalize(cli.deepseek_api_key.as_deref()),
            model: cli.model.clone(),
            listing_url: LISTING_URL.to_string(),
            chat_url: CHAT_URL.to_string(),
            push_base: PUSH_BASE.to_string(),
        }
    }

    /// A configuration with no keys; used by tests.
    #[cfg(test)]
    pub fn bare() -> Self {
        Self {
            serverchan_key: None,
            deepseek_api_key: None,
            model: "deepseek-chat".to_string(),
            listing_url: LISTING_URL.to_string(),
            chat_url: CHAT_URL.to_string(),
            push_base: PUSH_BASE.to_string(),
        }
    }
}

fn normalize(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_key_is_treated_as_absent() {
        let cli = Cli::parse_from(["shenlun_daily", "--serverchan-key", ""]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.serverchan_key, None);
    }

    #[test]
    fn test_keys_are_trimmed() {
        let cli = Cli::parse_from(["shenlun_daily", "--deepseek-api-key", " sk-abc "]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.deepseek_api_key.as_deref(), Some("sk-abc"));
    }

    #[test]
    fn test_production_endpoints() {
        let config = Config::bare();
        assert!(config.listing_url.starts_with("https://api.cntv.cn/"));
        assert!(config.chat_url.starts_with("https://api.deepseek.com/"));
        assert!(config.push_base.starts_with("https://sctapi.ftqq.com"));
    }
}
