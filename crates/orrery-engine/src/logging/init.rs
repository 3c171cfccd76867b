use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g. "info" or
/// "orrery_engine=debug,wgpu=warn". When unset, `RUST_LOG` wins, then a
/// built-in default that keeps wgpu quiet.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are no-ops.
///
/// Call early in `main`, before the runtime starts producing events.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let explicit = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());
        match explicit {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info level; keep everything but our own
                // crates at warn.
                builder.filter_level(log::LevelFilter::Warn);
                builder.filter_module("orrery_engine", log::LevelFilter::Info);
                builder.filter_module("orrery_demos", log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style).init();

        log::debug!("logging initialized");
    });
}
