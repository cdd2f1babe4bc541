//! Function runner entry point: cart snapshot on stdin, operations on stdout.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use cart_transform::{run_json, StructuredLogger};
use options_observability::{LogFormat, LogLevel, RequestId};

fn main() -> Result<()> {
    let level = std::env::var("OPTIONS_LOG_LEVEL")
        .ok()
        .and_then(|v| v.parse::<LogLevel>().ok())
        .unwrap_or(LogLevel::Warn);
    let logger = StructuredLogger::new(RequestId::generate())
        .with_component("cart-transform")
        .with_min_level(level)
        .with_format(LogFormat::Json);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read transform input from stdin")?;

    let output = run_json(&input, &logger)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write transform output")?;
    stdout.flush().context("Failed to flush transform output")?;
    Ok(())
}
