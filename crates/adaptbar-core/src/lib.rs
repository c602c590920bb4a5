#![forbid(unsafe_code)]

//! Core: shared width units and the tracing facade for the adaptbar crates.

pub mod logging;
pub mod units;

pub use units::Px;

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
