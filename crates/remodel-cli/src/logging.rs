//! Logging setup for the Remodel CLI
//!
//! Installs a `tracing` subscriber whose level and format come from, in
//! increasing precedence: the config file, the `-v`/`-q` flags, and the
//! `RUST_LOG` / `REMODEL_LOG_FORMAT` environment variables. Records emitted
//! by `remodel-core` through the `log` facade reach the same subscriber.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line records
    Compact,
    /// Full records with all details
    Full,
    /// JSON structured records
    Json,
}

impl LogFormat {
    fn parse(format: &str) -> Option<Self> {
        match format.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Effective logging settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// Level filter directive
    pub level: String,
    pub format: LogFormat,
    /// Include file and line numbers
    pub source_location: bool,
}

impl LogSettings {
    /// Resolve settings from the config file and command-line verbosity
    pub fn resolve(config: &LoggingConfig, verbosity: u8, quiet: bool) -> Self {
        let format = LogFormat::parse(&config.format).unwrap_or_else(|| {
            eprintln!("Invalid log format '{}', using compact", config.format);
            LogFormat::Compact
        });

        let mut settings = Self {
            level: config.level.clone(),
            format,
            source_location: false,
        };

        match verbosity {
            0 => {}
            1 => settings.level = "info".to_string(),
            2 => {
                settings.level = "debug".to_string();
                settings.source_location = true;
            }
            _ => {
                settings.level = "trace".to_string();
                settings.format = LogFormat::Full;
                settings.source_location = true;
            }
        }

        if quiet {
            settings.level = "error".to_string();
        }

        settings
    }
}

/// Initialize the global logging system
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    // RUST_LOG takes precedence over everything else
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let ansi = settings.format != LogFormat::Json && std::io::stderr().is_terminal();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(ansi)
        .with_file(settings.source_location)
        .with_line_number(settings.source_location);

    // try_init also bridges `log` records into tracing
    let installed = match settings.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Full => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(settings = ?settings, "Logging system initialized");
    Ok(())
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;

    /// Logs the duration of an operation when dropped
    pub struct Timer {
        start: Instant,
        operation: &'static str,
    }

    impl Timer {
        pub fn new(operation: &'static str) -> Self {
            Self {
                start: Instant::now(),
                operation,
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            tracing::debug!(
                operation = self.operation,
                duration_ms = self.start.elapsed().as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_verbosity() {
        let config = LoggingConfig::default();

        let settings = LogSettings::resolve(&config, 0, false);
        assert_eq!(settings.level, "warn");
        assert!(!settings.source_location);

        let settings = LogSettings::resolve(&config, 2, false);
        assert_eq!(settings.level, "debug");
        assert!(settings.source_location);

        let settings = LogSettings::resolve(&config, 3, false);
        assert_eq!(settings.level, "trace");
        assert_eq!(settings.format, LogFormat::Full);
    }

    #[test]
    fn test_config_level_and_format_apply() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "JSON".to_string(),
        };
        let settings = LogSettings::resolve(&config, 0, false);
        assert_eq!(settings.level, "info");
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn test_quiet_only_logs_errors() {
        let settings = LogSettings::resolve(&LoggingConfig::default(), 0, true);
        assert_eq!(settings.level, "error");
    }
}
