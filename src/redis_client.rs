// RedisTimeSeries client over the redis crate's auto-reconnecting connection manager.
// Keys are prefixed here, at the library level; callers pass bare series keys.

use crate::client::TimeSeriesClient;
use crate::error::{Result, SinkError};
use crate::models::{Aggregation, CreateOptions, SeriesInfo};
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

pub struct RedisTsClient {
    prefix: String,
    conn: RwLock<Option<ConnectionManager>>,
}

impl RedisTsClient {
    /// Open a pooled connection to `host` (`host:port`). Fails when the host is unreachable.
    pub async fn connect(host: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(format!("redis://{host}/"))?;
        let conn = client.get_connection_manager().await?;
        debug!(host, prefix, "connected to datastore");
        Ok(Self {
            prefix: prefix.to_string(),
            conn: RwLock::new(Some(conn)),
        })
    }

    async fn conn(&self) -> Result<ConnectionManager> {
        self.conn.read().await.clone().ok_or(SinkError::NotConnected)
    }
}

#[async_trait::async_trait]
impl TimeSeriesClient for RedisTsClient {
    async fn info(&self, key: &str) -> Result<SeriesInfo> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, redis::Value> =
            info_cmd(&self.prefix, key).query_async(&mut conn).await?;
        Ok(parse_info(&raw))
    }

    async fn create_key_with_options(&self, key: &str, options: &CreateOptions) -> Result<()> {
        let mut conn = self.conn().await?;
        let result: redis::RedisResult<()> = create_cmd(&self.prefix, key, options)
            .query_async(&mut conn)
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(e) if is_key_exists(&e) => Err(SinkError::KeyExists {
                key: prefixed(&self.prefix, key),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_rule(
        &self,
        source_key: &str,
        aggregation: Aggregation,
        bucket_secs: u64,
        dest_key: &str,
    ) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: () = create_rule_cmd(&self.prefix, source_key, aggregation, bucket_secs, dest_key)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn add(&self, key: &str, epoch_secs: i64, value: f64) -> Result<i64> {
        let mut conn = self.conn().await?;
        let stored: i64 = add_cmd(&self.prefix, key, epoch_secs, value)
            .query_async(&mut conn)
            .await?;
        Ok(stored)
    }

    async fn close(&self) -> Result<()> {
        // Dropping the last manager handle closes the multiplexed connection.
        match self.conn.write().await.take() {
            Some(_) => Ok(()),
            None => Err(SinkError::NotConnected),
        }
    }
}

fn prefixed(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

fn info_cmd(prefix: &str, key: &str) -> redis::Cmd {
    let mut cmd = redis::cmd("TS.INFO");
    cmd.arg(prefixed(prefix, key));
    cmd
}

/// `TS.CREATE key [LABELS k v ...]`, labels in sorted key order.
fn create_cmd(prefix: &str, key: &str, options: &CreateOptions) -> redis::Cmd {
    let mut cmd = redis::cmd("TS.CREATE");
    cmd.arg(prefixed(prefix, key));
    if !options.labels.is_empty() {
        let mut labels: Vec<_> = options.labels.iter().collect();
        labels.sort();
        cmd.arg("LABELS");
        for (k, v) in labels {
            cmd.arg(k).arg(v);
        }
    }
    cmd
}

/// `TS.CREATERULE src dest AGGREGATION <fn> <bucket>`. Samples are stamped in
/// epoch seconds, so the bucket is expressed in the same unit.
fn create_rule_cmd(
    prefix: &str,
    source_key: &str,
    aggregation: Aggregation,
    bucket_secs: u64,
    dest_key: &str,
) -> redis::Cmd {
    let mut cmd = redis::cmd("TS.CREATERULE");
    cmd.arg(prefixed(prefix, source_key))
        .arg(prefixed(prefix, dest_key))
        .arg("AGGREGATION")
        .arg(aggregation.as_str())
        .arg(bucket_secs);
    cmd
}

fn add_cmd(prefix: &str, key: &str, epoch_secs: i64, value: f64) -> redis::Cmd {
    let mut cmd = redis::cmd("TS.ADD");
    cmd.arg(prefixed(prefix, key)).arg(epoch_secs).arg(value);
    cmd
}

fn is_key_exists(e: &redis::RedisError) -> bool {
    e.to_string().contains("already exists")
}

fn parse_info(raw: &HashMap<String, redis::Value>) -> SeriesInfo {
    let labels = raw
        .get("labels")
        .and_then(|v| redis::from_redis_value::<Vec<Vec<String>>>(v).ok())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|pair| match pair.as_slice() {
            [k, v] => Some((k.clone(), v.clone())),
            _ => None,
        })
        .collect();
    SeriesInfo { labels }
}
