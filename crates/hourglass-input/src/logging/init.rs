use std::io::Write;
use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. "debug",
/// "hourglass_input=trace"). When it is `None`, `RUST_LOG` is consulted and
/// `default_level` applies if that is unset too.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// Prefix each line with a timestamp. Scripted runs turn this off so
    /// their output is stable.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    pub fn env_filter(mut self, v: impl Into<String>) -> Self { self.env_filter = Some(v.into()); self }
    pub fn default_level(mut self, v: LevelFilter) -> Self { self.default_level = v; self }
    pub fn write_style(mut self, v: env_logger::WriteStyle) -> Self { self.write_style = v; self }
    pub fn timestamps(mut self, v: bool) -> Self { self.timestamps = v; self }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger.
///
/// Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => { builder.parse_filters(&filter); }
            None => { builder.filter_level(config.default_level); }
        }

        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format(|buf, record| {
                writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
            });
        }

        // Another logger may already be installed (tests, host application).
        if builder.try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");
    });
}
