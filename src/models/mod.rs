// Domain models: host metrics in, datastore shapes out

mod metric;
mod series;

pub use metric::{FieldValue, Metric, Tag};
pub use series::{
    AGGREGATE_BUCKET_SECS, AGGREGATE_SUFFIX, Aggregation, CreateOptions, Datapoint, SeriesInfo,
    aggregate_key,
};
