// Tag list -> label map for series creation.

use crate::models::Metric;
use std::collections::HashMap;

/// Projects a metric's tags into a fresh label map. Duplicate keys: last wins.
pub fn project_labels(metric: &Metric) -> HashMap<String, String> {
    metric
        .tag_list()
        .iter()
        .map(|t| (t.key.clone(), t.value.clone()))
        .collect()
}
