// Shared test helpers: a recording in-memory datastore and a recording logger.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::sync::Mutex;
use std::time::Duration;
use tsdb_sink::client::TimeSeriesClient;
use tsdb_sink::error::{Result, SinkError};
use tsdb_sink::logger::Logger;
use tsdb_sink::models::{Aggregation, CreateOptions, Metric, SeriesInfo};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Info(String),
    CreateKey(String, HashMap<String, String>),
    CreateRule {
        source: String,
        aggregation: Aggregation,
        bucket_secs: u64,
        dest: String,
    },
    Add(String, i64, f64),
    Close,
}

/// In-memory datastore. Keys created through it are found by later `info` calls.
#[derive(Default)]
pub struct MockClient {
    pub calls: Mutex<Vec<Call>>,
    pub keys: Mutex<HashSet<String>>,
    pub fail_add_for: HashSet<String>,
    pub delay: Duration,
    /// Extra latency on `info` only.
    pub info_delay: Duration,
    pub close_error: Option<String>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(self, keys: &[&str]) -> Self {
        self.keys
            .lock()
            .unwrap()
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn failing_add(mut self, key: &str) -> Self {
        self.fail_add_for.insert(key.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_info_delay(mut self, delay: Duration) -> Self {
        self.info_delay = delay;
        self
    }

    pub fn with_close_error(mut self, msg: &str) -> Self {
        self.close_error = Some(msg.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<(String, i64, f64)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add(k, t, v) => Some((k, t, v)),
                _ => None,
            })
            .collect()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys.lock().unwrap().contains(key)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn record(&self, call: Call) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl TimeSeriesClient for MockClient {
    async fn info(&self, key: &str) -> Result<SeriesInfo> {
        if !self.info_delay.is_zero() {
            tokio::time::sleep(self.info_delay).await;
        }
        self.record(Call::Info(key.to_string())).await;
        if self.keys.lock().unwrap().contains(key) {
            Ok(SeriesInfo::default())
        } else {
            Err(SinkError::Datastore("TSDB: the key does not exist".into()))
        }
    }

    async fn create_key_with_options(&self, key: &str, options: &CreateOptions) -> Result<()> {
        self.record(Call::CreateKey(key.to_string(), options.labels.clone()))
            .await;
        if self.keys.lock().unwrap().insert(key.to_string()) {
            Ok(())
        } else {
            Err(SinkError::KeyExists {
                key: key.to_string(),
            })
        }
    }

    async fn create_rule(
        &self,
        source_key: &str,
        aggregation: Aggregation,
        bucket_secs: u64,
        dest_key: &str,
    ) -> Result<()> {
        self.record(Call::CreateRule {
            source: source_key.to_string(),
            aggregation,
            bucket_secs,
            dest: dest_key.to_string(),
        })
        .await;
        Ok(())
    }

    async fn add(&self, key: &str, epoch_secs: i64, value: f64) -> Result<i64> {
        self.record(Call::Add(key.to_string(), epoch_secs, value))
            .await;
        if self.fail_add_for.contains(key) {
            Err(SinkError::Connection("connection refused".into()))
        } else {
            Ok(epoch_secs)
        }
    }

    async fn close(&self) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Close);
        match &self.close_error {
            Some(msg) => Err(SinkError::Connection(msg.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub errors: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn error(&self, err: &dyn Display) {
        self.errors.lock().unwrap().push(err.to_string());
    }
}

pub const T0: i64 = 1_700_000_000;

pub fn metric(name: &str) -> Metric {
    Metric::new(name, Utc.timestamp_opt(T0, 0).unwrap())
}

pub fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
