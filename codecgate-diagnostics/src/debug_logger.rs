//! Structured debug logging system

use codecgate_core::{CodecGateError, CodecGateResult};
use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor the caller supplies one
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Directive enabling debug output for the codecgate crates only
pub const DEBUG_DIRECTIVE: &str = "info,codecgate=debug,codecgate_media=debug";

/// Debug logger for structured logging
#[derive(Debug, Clone)]
pub struct DebugLogger {
    directive: String,
}

impl DebugLogger {
    /// Create new debug logger with the default directive
    pub fn new() -> Self {
        Self {
            directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }

    /// Logger that enables codecgate debug output when `debug_logging` is set
    pub fn for_debug_logging(debug_logging: bool) -> Self {
        let directive = if debug_logging {
            DEBUG_DIRECTIVE
        } else {
            DEFAULT_DIRECTIVE
        };
        Self::new().with_directive(directive)
    }

    /// Replace the fallback directive
    pub fn with_directive(mut self, directive: &str) -> Self {
        self.directive = directive.to_string();
        self
    }

    /// Fallback directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Build the filter: `RUST_LOG` wins, otherwise the fallback directive
    pub fn build_filter(&self) -> CodecGateResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.directive).map_err(|e| CodecGateError::Logging {
            reason: format!("Invalid log directive '{}': {}", self.directive, e),
        })
    }

    /// Install a global fmt subscriber
    ///
    /// Fails if a global subscriber is already installed.
    pub fn init(&self) -> CodecGateResult<()> {
        tracing_subscriber::fmt()
            .with_env_filter(self.build_filter()?)
            .with_target(true)
            .try_init()
            .map_err(|e| CodecGateError::Logging {
                reason: format!("Failed to install subscriber: {}", e),
            })
    }

    /// Initialize logging system with a fallback directive
    pub fn init_logging(directive: &str) -> CodecGateResult<()> {
        Self::new().with_directive(directive).init()
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_selection() {
        assert_eq!(DebugLogger::new().directive(), DEFAULT_DIRECTIVE);
        assert_eq!(
            DebugLogger::for_debug_logging(true).directive(),
            DEBUG_DIRECTIVE
        );
        assert_eq!(
            DebugLogger::for_debug_logging(false).directive(),
            DEFAULT_DIRECTIVE
        );
    }

    #[test]
    fn test_build_filter() {
        let logger = DebugLogger::new().with_directive("warn,codecgate_media=trace");
        assert!(logger.build_filter().is_ok());
    }

    #[test]
    fn test_second_init_is_an_error() {
        // Whichever call installs the subscriber, the next one must fail
        let _ = DebugLogger::init_logging("debug");
        let error = DebugLogger::init_logging("debug").unwrap_err();
        assert_eq!(error.error_code(), "LOGGING_ERROR");
    }
}
