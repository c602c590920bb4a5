#![forbid(unsafe_code)]

//! Diagnostics for layout resolution.
//!
//! Layout code emits three things: `debug!` events for decisions such as a
//! hidden side button, `trace!` events for rejected compression levels, and a
//! `debug_span!` around each computed layout. With the `tracing` feature these
//! are the `tracing` macros. Without it they expand to nothing, and the span
//! is a zero-sized stand-in whose `enter()` guard does nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards a debug event.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards a trace event.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`DisabledSpan`](crate::logging::DisabledSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::DisabledSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    pub fn enter(&self) -> DisabledGuard {
        DisabledGuard
    }
}

/// Returned by [`DisabledSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct DisabledGuard;

/// Environment variable holding the filter directive for [`init_json_logging`].
#[cfg(feature = "tracing-json")]
pub const ENV_LOG_FILTER: &str = "ADAPTBAR_LOG";

/// Install a global JSON subscriber filtered by `ADAPTBAR_LOG` (default `info`).
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter =
        EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}
