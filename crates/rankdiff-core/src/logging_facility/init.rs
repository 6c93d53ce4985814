//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_DIRECTIVE: &str = "rankdiff=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output
    Development,
    /// JSON structured output, one object per line
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Map a config/CLI format name onto a profile
    ///
    /// `"json"` selects [`Profile::Production`]; anything else is human-readable.
    pub fn from_format(format: &str) -> Self {
        if format.eq_ignore_ascii_case("json") {
            Profile::Production
        } else {
            Profile::Development
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored.
///
/// # Profiles
///
/// - **Development**: human-readable logs on stderr
/// - **Production**: JSON structured logs on stderr
/// - **Test**: bare registry, capture is set up via `init_test_capture()`
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
