use anyhow::Context as _;
use url::Url;

use crate::config::WatchConfig;
use crate::detail::{self, ProjectRecord};
use crate::fetch;
use crate::listing;
use crate::store::{ProjectStore, UpsertOutcome};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub discovered: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// One full sweep: listing discovery, then sequential per-url fetch, parse
/// and upsert. A failed url is logged and skipped, never retried within the
/// pass; store errors propagate out. Stateless across invocations except
/// through the store.
pub async fn run_pass(config: &WatchConfig, store: &ProjectStore) -> anyhow::Result<PassSummary> {
    tracing::info!("starting scrape pass");
    let mut summary = PassSummary::default();

    let index_url = config
        .base_url
        .join("projects")
        .context("build listing index url")?;
    let listings = match fetch::fetch(config, &index_url).await {
        Ok(html) => listing::extract_listings(&config.base_url, &html),
        Err(_) => Vec::new(),
    };

    if listings.is_empty() {
        tracing::warn!("no listings found");
        return Ok(summary);
    }
    summary.discovered = listings.len();
    tracing::info!(count = listings.len(), "found listings");

    for url in &listings {
        match fetch_detail(config, url).await {
            Ok(record) => match store.upsert(&record)? {
                UpsertOutcome::Inserted => summary.inserted += 1,
                UpsertOutcome::Updated => summary.updated += 1,
                UpsertOutcome::Unchanged => summary.unchanged += 1,
            },
            Err(err) => {
                summary.skipped += 1;
                tracing::warn!(%url, error = format!("{err:#}"), "could not retrieve project");
            }
        }
    }

    tracing::info!(
        discovered = summary.discovered,
        inserted = summary.inserted,
        updated = summary.updated,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        "scrape pass finished"
    );
    Ok(summary)
}

async fn fetch_detail(config: &WatchConfig, url: &Url) -> anyhow::Result<ProjectRecord> {
    let html = fetch::fetch(config, url).await?;
    detail::extract_detail(&html, url)
}
