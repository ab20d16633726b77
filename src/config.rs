// Output configuration: parsed from the host's TOML block, validated before connect.

use crate::error::{Result, SinkError};
use serde::Deserialize;
use std::path::Path;

/// Sample block returned to the host for plugin introspection. Parses as a valid config.
pub const SAMPLE_CONFIG: &str = r#"
## Prefix applied by the client to every series key
prefix = ""
## Password (not forwarded to the server yet; setting it only logs a warning)
password = ""
## Datastore endpoint as host:port
host = "localhost:6379"
"#;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RedisOutputConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub host: String,
}

impl RedisOutputConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            SinkError::Configuration(format!("read {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> Result<Self> {
        let config: RedisOutputConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(SinkError::Configuration("host must be non-empty".into()));
        }
        let Some((name, port)) = self.host.rsplit_once(':') else {
            return Err(SinkError::Configuration(format!(
                "host must be host:port, got {:?}",
                self.host
            )));
        };
        if name.is_empty() {
            return Err(SinkError::Configuration(format!(
                "host is missing a hostname, got {:?}",
                self.host
            )));
        }
        match port.parse::<u16>() {
            Ok(p) if p > 0 => {}
            _ => {
                return Err(SinkError::Configuration(format!(
                    "host port must be between 1 and 65535, got {:?}",
                    port
                )));
            }
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(SinkError::Configuration(format!(
                "prefix must not contain whitespace, got {:?}",
                self.prefix
            )));
        }
        Ok(())
    }

    /// Non-fatal findings to surface at connect time.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.password.is_empty() {
            out.push(
                "password is set but not forwarded to the datastore; connection is unauthenticated"
                    .to_string(),
            );
        }
        out
    }
}
