//! Logger initialization for the command line tool.
//!
//! The library itself only emits records through the `log` facade. This
//! module installs `env_logger` as backend.

use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax, e.g., `"debug"` or
/// `"paintmix::reflectance=trace"`. Without a filter, `RUST_LOG` applies,
/// falling back on `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Create a configuration for the given verbosity, i.e., the number of
    /// `-v` flags on the command line.
    pub fn with_verbosity(verbosity: u8) -> Self {
        let filter = match verbosity {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        };

        Self {
            filter: filter.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initialize the global logger.
///
/// Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style).init();
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod test {
    use super::LoggingConfig;

    #[test]
    fn test_verbosity() {
        assert_eq!(LoggingConfig::with_verbosity(0).filter, None);
        assert_eq!(LoggingConfig::with_verbosity(1).filter.as_deref(), Some("debug"));
        assert_eq!(LoggingConfig::with_verbosity(4).filter.as_deref(), Some("trace"));
    }
}
