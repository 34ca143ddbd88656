use std::time::Instant;

use crate::config::WatchConfig;
use crate::pass;
use crate::store::ProjectStore;

/// Run one pass immediately, then repeat on the configured interval forever.
/// The next due time is computed from pass completion, so a pass that
/// overruns the interval simply delays the next trigger; passes never
/// overlap and there is no catch-up.
pub async fn run_forever(config: &WatchConfig, store: &ProjectStore) -> anyhow::Result<()> {
    tracing::info!(
        interval_secs = config.interval.as_secs(),
        "scheduler started"
    );

    loop {
        pass::run_pass(config, store).await?;

        let next_due_at = chrono::Utc::now()
            + chrono::TimeDelta::try_seconds(config.interval.as_secs() as i64)
                .unwrap_or_default();
        tracing::info!(next_pass_at = %next_due_at.to_rfc3339(), "sleeping until next pass");

        let due = Instant::now() + config.interval;
        while Instant::now() < due {
            let remaining = due.saturating_duration_since(Instant::now());
            tokio::time::sleep(remaining.min(config.poll_period)).await;
        }
    }
}
