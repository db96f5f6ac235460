//! Tracing setup
//!
//! Logs go to stderr so that command output on stdout stays machine
//! readable. The filter comes from `RUST_LOG`, defaulting to
//! `musicat=info,tower_http=info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "musicat=info,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_owned()))
}

/// Install the global subscriber; returns false if one was already set
pub fn init_tracing(json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init_tracing(false);
        assert!(!init_tracing(true));
    }
}
