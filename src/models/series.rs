// Datastore-side shapes: datapoints, series options, aggregation rules.

use std::collections::HashMap;

/// Suffix of the companion series that receives downsampled averages.
pub const AGGREGATE_SUFFIX: &str = "_avg";

/// Bucket width of the installed downsampling rule.
pub const AGGREGATE_BUCKET_SECS: u64 = 60;

/// Aggregate key paired with a raw series key.
pub fn aggregate_key(series_key: &str) -> String {
    format!("{series_key}{AGGREGATE_SUFFIX}")
}

/// One sample to append: (series key, epoch seconds, value).
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub series_key: String,
    pub epoch_secs: i64,
    pub value: f64,
}

/// Options for creating a series. Only labels are set by the sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    pub labels: HashMap<String, String>,
}

/// Server-side aggregation function for the downsampling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Avg,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Avg => "avg",
        }
    }
}

/// Series descriptor from `TS.INFO`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesInfo {
    pub labels: HashMap<String, String>,
}
