use anyhow::Result;
use cinesearch_config::LoggingConfig;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for the given flags; `None` means defer to `RUST_LOG`, then the configured level
fn verbosity_directive(verbose_level: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose_level {
        0 => None,
        // -v: debug, without the connection pool chatter
        1 => Some("debug,hyper::proto::h1=warn,hyper::client::pool=warn"),
        _ => Some("trace"),
    }
}

fn build_filter(verbose_level: u8, quiet: bool, configured_level: &str) -> EnvFilter {
    match verbosity_directive(verbose_level, quiet) {
        Some("error") => EnvFilter::new("error"),
        Some(directive) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level)),
    }
}

/// `RUST_LOG_JSON=true|false` wins over the configured value; with neither set,
/// JSON is used when stdout is not a terminal
fn json_enabled(env_value: Option<&str>, configured: Option<bool>, stdout_is_terminal: bool) -> bool {
    match (env_value, configured) {
        (Some(value), _) => value == "true",
        (None, Some(json)) => json,
        (None, None) => !stdout_is_terminal,
    }
}

pub fn init_logging_with_file(
    verbose_level: u8,
    quiet: bool,
    config: &LoggingConfig,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let filter = build_filter(verbose_level, quiet, &config.level);
    let env_json = std::env::var("RUST_LOG_JSON").ok();
    let json = json_enabled(env_json.as_deref(), config.json, io::stdout().is_terminal());
    let registry = Registry::default().with(filter);

    match log_file.or_else(|| config.file.clone()) {
        Some(log_path) => {
            let log_dir = log_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
            std::fs::create_dir_all(log_dir)?;

            let log_filename = log_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

            // cinesearch.log rotates to cinesearch.2026-01-17 and so on
            let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(file_appender))
                    .init();
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(file_appender),
                    )
                    .init();
            }
        }
        None => {
            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            } else {
                registry
                    .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(3, true), Some("error"));
        assert_eq!(verbosity_directive(0, false), None);
        assert!(verbosity_directive(1, false).unwrap().starts_with("debug"));
        assert_eq!(verbosity_directive(2, false), Some("trace"));
    }

    #[test]
    fn test_json_enabled() {
        assert!(json_enabled(Some("true"), Some(false), true));
        assert!(!json_enabled(Some("false"), None, false));
        assert!(!json_enabled(None, Some(false), false));
        assert!(json_enabled(None, Some(true), true));
        // Unset follows the terminal of this run
        assert!(!json_enabled(None, None, true));
        assert!(json_enabled(None, None, false));
    }
}
