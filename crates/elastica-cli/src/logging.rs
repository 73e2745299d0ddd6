//! Subscriber setup for the command line tool.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

fn open_log_file(path: &str) -> Result<File, CliError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CliError::Io {
            path: path.into(),
            source,
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> CliError {
    CliError::Logging(err.to_string())
}

/// Build the event filter from `level`, falling back to `ELASTICA_TRACE`.
///
/// Defaults to `off` when neither is set.
pub fn build_filter(level: Option<String>) -> Result<EnvFilter, CliError> {
    let level_value = level
        .or_else(|| env::var("ELASTICA_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    if level_value.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(&level_value)
            .map_err(|err| CliError::InvalidArgument(format!("Invalid log filter: {err}")))
    }
}

/// Install a stderr subscriber, plus a file layer when `ELASTICA_LOG_FILE` is set.
///
/// `ELASTICA_LOG_FORMAT` selects `pretty` (default) or `json`. Returns `false`
/// if a subscriber was already installed.
pub fn init_logging(level: Option<String>) -> Result<bool, CliError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = build_filter(level)?;
    let format = env::var("ELASTICA_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("ELASTICA_LOG_FILE").ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(CliError::InvalidArgument(
            "Invalid ELASTICA_LOG_FORMAT (expected 'json' or 'pretty')".to_string(),
        ));
    }

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    }

    Ok(true)
}
