use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "strobe_engine=debug,strobe_ui=info").
///
/// `write_style` controls ANSI coloring behavior.
///
/// `log_file` redirects output away from the terminal, which the interactive
/// UI owns while it runs.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub log_file: Option<PathBuf>,
    pub default_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: None,
            default_level: log::LevelFilter::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        let mut file_error = None;
        match &config.log_file {
            Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                    builder.write_style(env_logger::WriteStyle::Never);
                }
                Err(e) => {
                    builder.write_style(config.write_style);
                    file_error = Some(format!("{}: {e}", path.display()));
                }
            },
            None => {
                builder.write_style(config.write_style);
            }
        }

        if builder.try_init().is_err() {
            // Another logger was installed by the host; keep using it.
            return;
        }

        if let Some(err) = file_error {
            log::warn!("could not open log file {err}; logging to stderr");
        }
        log::debug!("logging initialized");
    });
}
