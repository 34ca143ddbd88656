use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::{OnceArgs, WatchArgs};

pub const DEFAULT_BASE_URL: &str = "https://norac.co.ke";
pub const DEFAULT_DB_FILE: &str = "norac_projects.db";
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_DELAY_MS_MIN: u64 = 2000;
pub const DEFAULT_DELAY_MS_MAX: u64 = 4000;

/// How often the scheduler wakes up to check whether the next pass is due.
pub const POLL_PERIOD: Duration = Duration::from_secs(60);

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Application context passed into the orchestrator; there is no process-wide
/// state besides what lives in the store.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub base_url: Url,
    pub db_path: PathBuf,
    pub interval: Duration,
    pub poll_period: Duration,
    pub delay_ms_min: u64,
    pub delay_ms_max: u64,
}

impl WatchConfig {
    pub fn from_watch_args(args: &WatchArgs) -> anyhow::Result<Self> {
        Self::build(
            &args.base_url,
            &args.db,
            args.interval_secs,
            args.delay_ms_min,
            args.delay_ms_max,
        )
    }

    pub fn from_once_args(args: &OnceArgs) -> anyhow::Result<Self> {
        Self::build(
            &args.base_url,
            &args.db,
            DEFAULT_INTERVAL_SECS,
            args.delay_ms_min,
            args.delay_ms_max,
        )
    }

    fn build(
        base_url: &str,
        db: &str,
        interval_secs: u64,
        delay_ms_min: u64,
        delay_ms_max: u64,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("parse --base-url")?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!("--base-url must be http/https: {base_url}");
        }
        if delay_ms_min > delay_ms_max {
            anyhow::bail!("--delay-ms-min must not exceed --delay-ms-max ({delay_ms_min} > {delay_ms_max})");
        }

        Ok(Self {
            base_url,
            db_path: PathBuf::from(db),
            interval: Duration::from_secs(interval_secs),
            poll_period: POLL_PERIOD,
            delay_ms_min,
            delay_ms_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_non_http_base_url() {
        let result = WatchConfig::build("ftp://norac.co.ke", "test.db", 3600, 0, 0);
        assert!(result.is_err());
    }

    #[test]
    fn build_rejects_inverted_delay_window() {
        let result = WatchConfig::build(DEFAULT_BASE_URL, "test.db", 3600, 4000, 2000);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_parse() -> anyhow::Result<()> {
        let config = WatchConfig::build(
            DEFAULT_BASE_URL,
            DEFAULT_DB_FILE,
            DEFAULT_INTERVAL_SECS,
            DEFAULT_DELAY_MS_MIN,
            DEFAULT_DELAY_MS_MAX,
        )?;
        assert_eq!(config.base_url.as_str(), "https://norac.co.ke/");
        assert_eq!(config.interval, Duration::from_secs(3600));
        Ok(())
    }
}
