// Batch writer: one append per (metric, numeric field), failures isolated per datapoint.

use crate::client::{TimeSeriesClient, bounded};
use crate::coerce::coerce_value;
use crate::logger::Logger;
use crate::models::{Datapoint, Metric};
use crate::provisioner::{Provisioned, ensure_series};
use std::fmt;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Per-batch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: u64,
    /// Fields that were not numeric and finite.
    pub skipped: u64,
    pub failed: u64,
    /// Datapoints not appended because the deadline passed before or during provisioning.
    pub dropped: u64,
}

struct DeadlineDropped(u64);

impl fmt::Display for DeadlineDropped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write deadline exceeded; {} datapoints dropped", self.0)
    }
}

/// Datapoints a metric yields, in field order. Non-numeric fields are counted in `skipped`.
pub fn datapoints(metric: &Metric, skipped: &mut u64) -> Vec<Datapoint> {
    let epoch_secs = metric.time().timestamp();
    metric
        .fields()
        .iter()
        .filter_map(|(field, value)| match coerce_value(value) {
            Some(value) => Some(Datapoint {
                series_key: metric.series_key(field),
                epoch_secs,
                value,
            }),
            None => {
                *skipped += 1;
                None
            }
        })
        .collect()
}

/// Write a batch under `deadline`. Never fails; every error is handed to `logger`.
#[instrument(skip_all, fields(metrics = metrics.len()))]
pub async fn write_batch(
    client: &dyn TimeSeriesClient,
    logger: &dyn Logger,
    metrics: &[Metric],
    deadline: Instant,
) -> WriteStats {
    let mut stats = WriteStats::default();

    for metric in metrics {
        for point in datapoints(metric, &mut stats.skipped) {
            if Instant::now() >= deadline {
                stats.dropped += 1;
                continue;
            }
            // Appending to an unprovisioned key would create it without its rule.
            let provisioned = ensure_series(client, metric, &point.series_key, deadline).await;
            if provisioned == Provisioned::Skipped || Instant::now() >= deadline {
                stats.dropped += 1;
                continue;
            }
            match bounded(
                deadline,
                "ts_add",
                client.add(&point.series_key, point.epoch_secs, point.value),
            )
            .await
            {
                Ok(stored) => {
                    stats.written += 1;
                    debug!(series_key = %point.series_key, stored, "sample appended");
                }
                Err(e) => {
                    stats.failed += 1;
                    logger.error(&e);
                }
            }
        }
    }

    if stats.dropped > 0 {
        warn!(dropped = stats.dropped, "batch cut short by deadline");
        logger.error(&DeadlineDropped(stats.dropped));
    }
    debug!(
        written = stats.written,
        skipped = stats.skipped,
        failed = stats.failed,
        dropped = stats.dropped,
        "batch written"
    );
    stats
}
