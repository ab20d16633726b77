// First-touch series provisioning: raw key, `_avg` key, and the AVG rule between them.
// No local cache; the TS.INFO probe is the fast path once a series exists.

use crate::client::{TimeSeriesClient, bounded};
use crate::error::SinkError;
use crate::labels::project_labels;
use crate::models::{AGGREGATE_BUCKET_SECS, Aggregation, CreateOptions, Metric, aggregate_key};
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The probe found the series; nothing was created.
    Existing,
    /// The probe failed and creation was attempted.
    Attempted,
    /// The deadline passed before the probe returned.
    Skipped,
}

/// Ensure `series_key`, its aggregate, and the downsampling rule exist.
///
/// Creation errors are logged and swallowed; the following append surfaces
/// anything persistent. Labels come from `metric` and are only set on creation.
pub async fn ensure_series(
    client: &dyn TimeSeriesClient,
    metric: &Metric,
    series_key: &str,
    deadline: Instant,
) -> Provisioned {
    match bounded(deadline, "ts_info", client.info(series_key)).await {
        Ok(_) => return Provisioned::Existing,
        Err(SinkError::DeadlineExceeded { .. }) => return Provisioned::Skipped,
        Err(e) => debug!(series_key, error = %e, "series probe failed; provisioning"),
    }

    let options = CreateOptions {
        labels: project_labels(metric),
    };
    let avg_key = aggregate_key(series_key);

    log_provisioning(
        "ts_create",
        series_key,
        bounded(
            deadline,
            "ts_create",
            client.create_key_with_options(series_key, &options),
        )
        .await,
    );
    log_provisioning(
        "ts_create",
        &avg_key,
        bounded(
            deadline,
            "ts_create",
            client.create_key_with_options(&avg_key, &options),
        )
        .await,
    );
    log_provisioning(
        "ts_createrule",
        series_key,
        bounded(
            deadline,
            "ts_createrule",
            client.create_rule(series_key, Aggregation::Avg, AGGREGATE_BUCKET_SECS, &avg_key),
        )
        .await,
    );
    Provisioned::Attempted
}

fn log_provisioning(operation: &'static str, key: &str, result: Result<(), SinkError>) {
    match result {
        Ok(()) => debug!(operation, key, "provisioned"),
        Err(SinkError::KeyExists { .. }) => {
            debug!(operation, key, "key already exists; created concurrently")
        }
        Err(e) => warn!(operation, key, error = %e, "provisioning failed"),
    }
}
