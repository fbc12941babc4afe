//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable read when no `-v` flag is given.
pub const LOG_ENV: &str = "FIELDCHECK_LOG";

/// Filter directive for a `-v` count.
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `-v` flags win over `FIELDCHECK_LOG`; with neither, only warnings are
/// shown. Calling this twice is harmless.
pub fn init(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new(level_for_verbosity(verbose))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_init_twice() {
        init(0);
        init(2);
    }
}
