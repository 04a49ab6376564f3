//! Tracing subscriber setup for the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(config: &LoggingConfig, extra: &str) -> String {
    let mut filter = format!("gismondi={}", config.level);
    if !extra.is_empty() {
        filter.push(',');
        filter.push_str(extra);
    }
    filter
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `extra` adds directives for other crates (e.g. `tower_http=debug`).
///
/// Output goes to stderr so command output on stdout stays clean.
pub fn init(config: &LoggingConfig, extra: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config, extra)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let config = LoggingConfig::default();
        assert_eq!(default_filter(&config, ""), "gismondi=info");
        assert_eq!(
            default_filter(&config, "tower_http=debug"),
            "gismondi=info,tower_http=debug"
        );
    }
}
