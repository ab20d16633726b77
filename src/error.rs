//! Error types for the sink.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SinkError>;

#[derive(Error, Debug)]
pub enum SinkError {
    /// Missing or malformed `host`/`prefix`/`password`.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("connection error: {0}")]
    Connection(String),

    /// `TS.CREATE` on a key that is already there. Benign during provisioning races.
    #[error("key already exists: {key}")]
    KeyExists { key: String },

    #[error("datastore error: {0}")]
    Datastore(String),

    #[error("write deadline exceeded during {operation}")]
    DeadlineExceeded { operation: &'static str },

    #[error("output not connected")]
    NotConnected,
}

impl From<redis::RedisError> for SinkError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
            SinkError::Connection(e.to_string())
        } else {
            SinkError::Datastore(e.to_string())
        }
    }
}

impl From<toml::de::Error> for SinkError {
    fn from(e: toml::de::Error) -> Self {
        SinkError::Configuration(e.to_string())
    }
}
