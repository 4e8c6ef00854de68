//! # Shenlun Daily
//!
//! A scheduled content pipeline that turns the newest 焦点访谈 episode into
//! civil-service-exam study material and delivers it to WeChat:
//!
//! 1. **Fetch**: pull the latest episode's metadata from the CNTV listing API
//! 2. **Rewrite**: generate a structured 申论 article via DeepSeek, with a
//!    deterministic template as fallback
//! 3. **Push**: deliver the assembled message through the ServerChan webhook
//!
//! The binary performs one run and exits; an external scheduler (cron, CI
//! timer) invokes it once per day. Every network failure is absorbed at the
//! component boundary, so all paths terminate normally.
//!
//! ## Usage
//!
//! ```sh
//! SERVERCHAN_KEY=... DEEPSEEK_API_KEY=... shenlun_daily
//! ```

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cctv;
mod cli;
mod config;
mod models;
mod push;
mod shenlun;
mod utils;

use cli::Cli;
use config::Config;
use models::Episode;

/// Push title/body used when no episode could be fetched.
const FETCH_FAILED_TITLE: &str = "获取失败";
const FETCH_FAILED_BODY: &str = "今日未获取到焦点访谈";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("shenlun_daily starting up");

    let args = Cli::parse();
    debug!(?args.model, no_push = args.no_push, "Parsed CLI arguments");

    let config = Config::from_cli(&args);
    if config.deepseek_api_key.is_none() {
        warn!("No DeepSeek key; rewrites will use the fallback template");
    }
    if config.serverchan_key.is_none() {
        warn!("No ServerChan key; push delivery will be skipped");
    }

    let client = reqwest::Client::new();

    // ---- Fetch ----
    let Some(episode) = cctv::fetch_latest(&client, &config).await else {
        // Sole branch in the pipeline: report the miss and stop.
        push::notify(&client, &config, FETCH_FAILED_TITLE, FETCH_FAILED_BODY).await;
        info!("No episode available today; run complete");
        return Ok(());
    };

    // ---- Rewrite ----
    let rewrite = shenlun::rewrite(&client, &config, &episode.title, episode.source_content()).await;
    if let shenlun::Rewrite::Fallback { reason, .. } = &rewrite {
        info!(%reason, "Using fallback article text");
    }

    // ---- Assemble & push ----
    let title = push_title(&Local::now().format("%Y年%m月%d日").to_string());
    let body = compose_message(&episode, rewrite.text());

    let delivered = if args.no_push {
        info!(%title, body = %body, "Push skipped (--no-push)");
        false
    } else {
        push::notify(&client, &config, &title, &body).await
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        episode = %episode.title,
        fallback = rewrite.is_fallback(),
        delivered,
        "Execution complete"
    );

    Ok(())
}

/// Date-stamped push title, e.g. "今日焦点访谈申论 - 2024年01月01日".
fn push_title(date: &str) -> String {
    format!("今日焦点访谈申论 - {date}")
}

/// Final message: the rewritten article framed by the original episode's
/// title, broadcast time, and source link.
fn compose_message(episode: &Episode, article: &str) -> String {
    format!(
        r#"## 今日小红书发布内容

---

{article}

---

### 原节目信息
- **节目**：{title}
- **播出时间**：{time}
- **链接**：{url}
"#,
        title = episode.title,
        time = episode.time,
        url = episode.url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_episode() -> Episode {
        Episode {
            title: "节目A".to_string(),
            brief: "内容A".to_string(),
            time: "2024-01-01".to_string(),
            url: "http://x".to_string(),
            length: "15:00".to_string(),
        }
    }

    #[test]
    fn test_push_title_embeds_date() {
        assert_eq!(
            push_title("2024年01月01日"),
            "今日焦点访谈申论 - 2024年01月01日"
        );
    }

    #[test]
    fn test_compose_message_frames_article() {
        let message = compose_message(&sample_episode(), "【标题】节目A");
        assert!(message.starts_with("## 今日小红书发布内容"));
        assert!(message.contains("【标题】节目A"));
        assert!(message.contains("- **节目**：节目A"));
        assert!(message.contains("- **播出时间**：2024-01-01"));
        assert!(message.contains("- **链接**：http://x"));
    }

    #[test]
    fn test_fetch_failed_message_constants() {
        assert_eq!(FETCH_FAILED_TITLE, "获取失败");
        assert_eq!(FETCH_FAILED_BODY, "今日未获取到焦点访谈");
    }
}
