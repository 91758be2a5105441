//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    // A second init (tests, embedding apps) is not an error
    let _ = env_logger::try_init();
}

/// Initialize logging with `level` as the default filter
///
/// `RUST_LOG` still wins when it is set.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init();
        init();
        init_with_level("debug");
        info!("logging initialised twice");
    }
}
