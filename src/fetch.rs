use std::time::Duration;

use anyhow::Context as _;
use rand::{Rng as _, rng};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::config::{USER_AGENTS, WatchConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetch one page body. Sleeps the politeness delay before every request,
/// unconditionally. Failures (transport errors and non-success statuses) are
/// logged here; callers treat them as skip-this-url, never as fatal.
pub async fn fetch(config: &WatchConfig, url: &Url) -> anyhow::Result<String> {
    match try_fetch(config, url).await {
        Ok(body) => Ok(body),
        Err(err) => {
            tracing::error!(%url, error = format!("{err:#}"), "request failed");
            Err(err)
        }
    }
}

async fn try_fetch(config: &WatchConfig, url: &Url) -> anyhow::Result<String> {
    let delay_ms = rng().random_range(config.delay_ms_min..=config.delay_ms_max);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    // One throwaway client per request: no session or cookie continuity.
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("build http client")?;

    let response = client
        .get(url.clone())
        .headers(request_headers())
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;

    let body = response
        .text()
        .await
        .with_context(|| format!("read body: {url}"))?;

    Ok(body)
}

fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    let agent = USER_AGENTS[rng().random_range(0..USER_AGENTS.len())];
    headers.insert(USER_AGENT, HeaderValue::from_static(agent));

    headers
}
