#![forbid(unsafe_code)]

//! Diagnostics go to stderr so stdout stays clean for bars and JSON.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SORTSYNTH_LOG";

/// Filter directive for a verbosity count, or `None` to defer to [`LOG_ENV`].
#[must_use]
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Build the filter: `-v` wins, then `SORTSYNTH_LOG`, then `warn`.
#[must_use]
pub fn filter_for(verbose: u8, env: Option<&str>) -> EnvFilter {
    let directive = verbosity_directive(verbose).or(env).unwrap_or("warn");
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: u8) {
    let env = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, env.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("info"));
        assert_eq!(verbosity_directive(2), Some("debug"));
        assert_eq!(verbosity_directive(9), Some("trace"));
    }

    #[test]
    fn filter_precedence() {
        assert_eq!(filter_for(0, None).to_string(), "warn");
        assert_eq!(
            filter_for(0, Some("sortsynth.playback=debug")).to_string(),
            "sortsynth.playback=debug"
        );
        assert_eq!(filter_for(2, Some("error")).to_string(), "debug");
    }

    #[test]
    fn malformed_env_falls_back_to_warn() {
        assert_eq!(filter_for(0, Some("sortsynth=loudest")).to_string(), "warn");
    }
}
