#![forbid(unsafe_code)]

//! Adaptive toolbar layout engine, public facade.
//!
//! Re-exports the layout types from the internal crates and offers a small
//! prelude plus an error type for the one fallible surface: configuration.

use std::fmt;

// --- Units -----------------------------------------------------------------

pub use adaptbar_core::Px;
pub use adaptbar_core::units;

// --- Layout re-exports -----------------------------------------------------

pub use adaptbar_layout::overflow_menu::DEFAULT_ACTION_TITLE;
pub use adaptbar_layout::{
    CacheStats, CompressionLevel, ConfigError, ConfigParse, ItemDescriptor, ItemDisplayMode,
    ItemPriority, LayoutApplication, LayoutConfiguration, LayoutCoordinator, LayoutResult,
    OverflowEntry, OverflowMenu, SideButtonDescriptor, SideButtonDisplayMode, SideButtonPriority,
    SpaceTier, SpaceTierThresholds, ToolbarLayoutEngine, UltraMinimalLayout, UltraMinimalResolver,
};

#[cfg(feature = "tracing-json")]
pub use adaptbar_core::logging::init_json_logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for adaptbar hosts.
#[derive(Debug)]
pub enum Error {
    /// The configuration failed validation or could not be parsed.
    Config(Vec<ConfigError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid layout configuration")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for adaptbar APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build an engine from `ADAPTBAR_*` environment overrides.
///
/// Fails if any variable is unparsable or the resulting configuration does
/// not validate.
pub fn engine_from_env() -> Result<ToolbarLayoutEngine> {
    engine_from_env_with(|key| std::env::var(key).ok())
}

/// [`engine_from_env`] with an arbitrary lookup.
pub fn engine_from_env_with<F>(get: F) -> Result<ToolbarLayoutEngine>
where
    F: FnMut(&str) -> Option<String>,
{
    let ConfigParse { config, errors } = LayoutConfiguration::from_env_with(get);
    if !errors.is_empty() {
        return Err(Error::Config(errors));
    }
    Ok(ToolbarLayoutEngine::new(config.validated()?))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CompressionLevel, Error, ItemDescriptor, ItemDisplayMode, ItemPriority, LayoutApplication,
        LayoutConfiguration, LayoutCoordinator, LayoutResult, OverflowMenu, Px, Result,
        SideButtonDescriptor, SideButtonDisplayMode, SideButtonPriority, SpaceTier,
        ToolbarLayoutEngine,
    };
}
