//! Shared logging initialization for the `cb` binary.

use std::sync::OnceLock;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "CB_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(raw: Option<&str>) -> tracing::Level {
    match raw.unwrap_or("info").trim().to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Initialize process-level tracing output from `CB_LOG`.
///
/// Output goes to stderr so that command output on stdout stays parseable.
/// Safe to call multiple times; only the first call installs the subscriber.
pub fn init() {
    if INIT.get().is_some() {
        return;
    }
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    let _ = INIT.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_defaults_to_info() {
        assert_eq!(parse_level(None), tracing::Level::INFO);
        assert_eq!(parse_level(Some("bogus")), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level(Some("DEBUG")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some(" warn ")), tracing::Level::WARN);
        assert_eq!(parse_level(Some("Error")), tracing::Level::ERROR);
        assert_eq!(parse_level(Some("trace")), tracing::Level::TRACE);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
    }
}
