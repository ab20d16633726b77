//! Host-facing output plugin: lifecycle contract and the Redis time-series adapter.

use crate::client::TimeSeriesClient;
use crate::config::{RedisOutputConfig, SAMPLE_CONFIG};
use crate::error::{Result, SinkError};
use crate::logger::{Logger, TracingLogger};
use crate::models::Metric;
use crate::redis_client::RedisTsClient;
use crate::writer::write_batch;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Bound on a whole `write` call, covering every datastore round-trip in it.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Metric serializer handed over by the host. Accepted for parity; writes do not use it.
pub trait Serializer: Send + Sync {
    fn serialize(&self, metric: &Metric) -> Result<Vec<u8>>;
}

/// Lifecycle the host drives: configure, connect, write (serially), close.
#[async_trait::async_trait]
pub trait Output: Send + Sync {
    fn description(&self) -> &'static str;

    fn sample_config(&self) -> &'static str;

    /// Apply this output's TOML block. Validation happens at connect.
    fn configure(&mut self, block: &str) -> Result<()>;

    fn set_serializer(&mut self, _serializer: Box<dyn Serializer>) {}

    async fn connect(&mut self) -> Result<()>;

    async fn write(&self, metrics: &[Metric]) -> Result<()>;

    async fn close(&mut self) -> Result<()>;
}

pub struct RedisOutput {
    config: RedisOutputConfig,
    client: Option<Arc<dyn TimeSeriesClient>>,
    logger: Arc<dyn Logger>,
    serializer: Option<Box<dyn Serializer>>,
}

impl Default for RedisOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RedisOutput {
    /// Empty adapter, as produced by the registry factory.
    pub fn new() -> Self {
        Self {
            config: RedisOutputConfig::default(),
            client: None,
            logger: Arc::new(TracingLogger),
            serializer: None,
        }
    }

    pub fn with_config(mut self, config: RedisOutputConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Use an existing client instead of dialing `host` at connect.
    pub fn with_client(mut self, client: Arc<dyn TimeSeriesClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(&self) -> &RedisOutputConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    pub fn serializer(&self) -> Option<&dyn Serializer> {
        self.serializer.as_deref()
    }
}

#[async_trait::async_trait]
impl Output for RedisOutput {
    fn description(&self) -> &'static str {
        "Redis Output plugin"
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    fn configure(&mut self, block: &str) -> Result<()> {
        self.config = toml::from_str(block)?;
        Ok(())
    }

    fn set_serializer(&mut self, serializer: Box<dyn Serializer>) {
        self.serializer = Some(serializer);
    }

    async fn connect(&mut self) -> Result<()> {
        self.config.validate()?;
        for w in self.config.warnings() {
            warn!(host = %self.config.host, "{}", w);
        }
        if self.client.is_none() {
            let client = RedisTsClient::connect(&self.config.host, &self.config.prefix).await?;
            self.client = Some(Arc::new(client));
        }
        info!(host = %self.config.host, prefix = %self.config.prefix, "redis output connected");
        Ok(())
    }

    async fn write(&self, metrics: &[Metric]) -> Result<()> {
        let client = self.client.as_deref().ok_or(SinkError::NotConnected)?;
        let deadline = Instant::now() + WRITE_TIMEOUT;
        write_batch(client, self.logger.as_ref(), metrics, deadline).await;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        match self.client.take() {
            Some(client) => client.close().await,
            None => Ok(()),
        }
    }
}
