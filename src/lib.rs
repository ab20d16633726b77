// Telemetry output sink for RedisTimeSeries. Library for the host and for tests.

pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod labels;
pub mod logger;
pub mod models;
pub mod output;
pub mod provisioner;
pub mod redis_client;
pub mod registry;
pub mod writer;

pub use error::{Result, SinkError};
pub use output::{Output, RedisOutput};
pub use registry::{OutputRegistry, register};
