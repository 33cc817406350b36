// Logging setup for the magpie toolkit.
//
// Built on the `tracing` ecosystem. The toolkit itself only emits events
// (actor lifecycle, fan-out diagnostics); embedding applications decide how
// those events are rendered by installing a subscriber, either their own or
// one of the presets below.
//
// ```rust
// use magpie::logging;
//
// // Default settings: INFO level, human-readable console output.
// logging::init_default();
//
// // Or customized:
// let config = logging::LogConfig {
//     level: tracing::Level::DEBUG,
//     json_format: true,
//     ..Default::default()
// };
// logging::init(config);
// ```

use std::sync::Once;

use tracing::{Level, Subscriber};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configuration for the toolkit's logging presets.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to display.
    pub level: Level,
    /// Whether to emit JSON instead of human-readable lines.
    pub json_format: bool,
    /// Whether to include file and line information.
    pub show_file_line: bool,
    /// Whether to include thread names and ids.
    pub show_thread_info: bool,
    /// Target filter expressions (format: "target=level,target2=level2,...").
    pub target_filters: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            show_file_line: true,
            show_thread_info: true,
            target_filters: None,
        }
    }
}

// Initialization guard so only the first init takes effect
static INIT: Once = Once::new();

/// Installs the global tracing subscriber with the given configuration.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let mut env_filter = EnvFilter::from_default_env().add_directive(config.level.into());

        if let Some(filters) = config.target_filters {
            for filter in filters.split(',') {
                if let Ok(directive) = filter.parse() {
                    env_filter = env_filter.add_directive(directive);
                }
            }
        }

        let registry = tracing_subscriber::registry().with(env_filter);

        let subscriber: Box<dyn Subscriber + Send + Sync> = if config.json_format {
            Box::new(registry.with(fmt::layer().json().flatten_event(true)))
        } else {
            let fmt_layer = fmt::layer()
                .with_ansi(atty::is(atty::Stream::Stdout))
                .with_file(config.show_file_line)
                .with_line_number(config.show_file_line)
                .with_thread_names(config.show_thread_info)
                .with_thread_ids(config.show_thread_info);
            Box::new(registry.with(fmt_layer))
        };

        set_global_subscriber(subscriber);
    });
}

fn set_global_subscriber<S>(subscriber: S)
where
    S: Subscriber + Send + Sync + 'static,
{
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error setting global tracing subscriber: {}", err);
    }
}

/// Reasonable defaults: INFO level, human-readable console output.
pub fn init_default() {
    init(LogConfig::default());
}

/// Development settings: DEBUG level overall, TRACE for the actor and
/// fan-out modules, file/line and thread info on.
pub fn init_development() {
    let config = LogConfig {
        level: Level::DEBUG,
        json_format: false,
        show_file_line: true,
        show_thread_info: true,
        target_filters: Some("magpie=debug,magpie::actor=trace,magpie::multicast=trace".to_string()),
    };
    init(config);
}

/// Test settings: warnings and errors only, no thread noise, so test output
/// stays readable.
pub fn init_test() {
    let config = LogConfig {
        level: Level::WARN,
        json_format: false,
        show_file_line: true,
        show_thread_info: false,
        target_filters: None,
    };
    init(config);
}

// Re-export the common level macros for convenience
pub use tracing::{debug, error, info, trace, warn};
