use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One compact line per event, for terminals.
    Compact,
    /// One JSON object per event with fields at the top level, for hosted
    /// log collectors.
    Json,
}

impl LogFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Default directives when `RUST_LOG` is unset. Verbose mode also shows
/// per-request spans from tower-http and every CMS fetch.
pub fn default_directives(format: LogFormat, verbose: bool) -> &'static str {
    match (format, verbose) {
        (_, true) => "outdoor_reno_site=debug,tower_http=debug,info",
        (LogFormat::Json, false) => "outdoor_reno_site=info,tower_http=info,warn",
        (LogFormat::Compact, false) => "outdoor_reno_site=info,warn",
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(format, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_flag() {
        assert_eq!(LogFormat::from_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(false), LogFormat::Compact);
    }

    #[test]
    fn test_default_directives() {
        assert!(default_directives(LogFormat::Compact, true).contains("tower_http=debug"));
        assert!(!default_directives(LogFormat::Compact, false).contains("tower_http"));
        assert!(default_directives(LogFormat::Json, false).starts_with("outdoor_reno_site=info"));
    }
}
