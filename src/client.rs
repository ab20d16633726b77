//! Datastore client seam.
//!
//! The sink only needs five operations from a time-series store. Every call made
//! on behalf of a write goes through [`bounded`] so the batch deadline covers
//! each round-trip, not just the loop around them.

use crate::error::{Result, SinkError};
use crate::models::{Aggregation, CreateOptions, SeriesInfo};
use std::future::Future;
use tokio::time::Instant;

/// Time-series datastore operations used by the sink.
#[async_trait::async_trait]
pub trait TimeSeriesClient: Send + Sync {
    /// Describe an existing series. Errors when the key does not exist.
    async fn info(&self, key: &str) -> Result<SeriesInfo>;

    /// Create a series. Returns [`SinkError::KeyExists`] when it is already there.
    async fn create_key_with_options(&self, key: &str, options: &CreateOptions) -> Result<()>;

    /// Install a downsampling rule from `source_key` into `dest_key`.
    async fn create_rule(
        &self,
        source_key: &str,
        aggregation: Aggregation,
        bucket_secs: u64,
        dest_key: &str,
    ) -> Result<()>;

    /// Append one sample. Returns the timestamp the store recorded.
    async fn add(&self, key: &str, epoch_secs: i64, value: f64) -> Result<i64>;

    /// Release the connection pool.
    async fn close(&self) -> Result<()>;
}

/// Run one datastore call under the batch deadline.
pub async fn bounded<T, F>(deadline: Instant, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(SinkError::DeadlineExceeded { operation }),
    }
}
