// Feed JSON-lines metrics from stdin through the redis output.
//
//   cargo run --example write_metrics -- redis.toml < metrics.jsonl
//
// One metric per line, e.g.
//   {"name":"cpu","tags":[{"key":"host","value":"a"}],"fields":{"usage":0.5},"time":"2023-11-14T22:13:20Z"}

use anyhow::{Context, Result};
use std::io::BufRead;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tsdb_sink::models::Metric;
use tsdb_sink::{Output, OutputRegistry, register};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(ChronoUtc::rfc_3339())
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: write_metrics <config.toml> < metrics.jsonl")?;
    let toml = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;

    let mut registry = OutputRegistry::new();
    register(&mut registry);
    let mut output = registry
        .create("redis")
        .context("redis output not registered")?;
    output.configure(&toml)?;
    output.connect().await?;

    let mut batch = Vec::new();
    for (n, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let metric: Metric =
            serde_json::from_str(&line).with_context(|| format!("line {}", n + 1))?;
        batch.push(metric);
    }
    tracing::info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        metrics = batch.len(),
        "writing batch"
    );

    output.write(&batch).await?;
    output.close().await?;
    Ok(())
}
