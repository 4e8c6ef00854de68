//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags or environment
//! variables. Both API keys are optional: without a DeepSeek key the
//! rewrite degrades to the built-in template, without a ServerChan key
//! delivery is skipped.

use clap::Parser;

/// Command-line arguments for the daily shenlun pipeline.
///
/// # Examples
///
/// ```sh
/// # Typical scheduled invocation (keys from the environment)
/// SERVERCHAN_KEY=... DEEPSEEK_API_KEY=... shenlun_daily
///
/// # Inspect the assembled message without pushing it
/// shenlun_daily --no-push
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// ServerChan access key for WeChat push delivery
    #[arg(long, env = "SERVERCHAN_KEY")]
    pub serverchan_key: Option<String>,

    /// DeepSeek API key for the shenlun rewrite
    #[arg(long, env = "DEEPSEEK_API_KEY")]
    pub deepseek_api_key: Option<String>,

    /// Chat model used for the rewrite
    #[arg(long, env = "DEEPSEEK_MODEL", default_value = "deepseek-chat")]
    pub model: String,

    /// Log the assembled message instead of delivering it
    #[arg(long)]
    pub no_push: bool,
}
