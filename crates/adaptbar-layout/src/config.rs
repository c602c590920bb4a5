//! Layout configuration: thresholds, spacings, sizes, and bounds.
//!
//! [`LayoutConfiguration`] is a plain value. The coordinator takes it as-is
//! (no validation, matching the permissive host contract); hosts that want a
//! checked value go through [`LayoutConfiguration::validated`].
//!
//! # Environment overrides
//!
//! [`LayoutConfiguration::from_env`] starts from the defaults and applies:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ADAPTBAR_TIER_SPACIOUS` | `thresholds.spacious` |
//! | `ADAPTBAR_TIER_REGULAR` | `thresholds.regular` |
//! | `ADAPTBAR_TIER_COMPACT` | `thresholds.compact` |
//! | `ADAPTBAR_TIER_TIGHT` | `thresholds.tight` |
//! | `ADAPTBAR_ENABLE_OVERFLOW` | `enable_overflow` |
//! | `ADAPTBAR_TOOLBAR_PADDING` | `toolbar_padding` |
//! | `ADAPTBAR_ITEM_MIN_WIDTH` | `item_min_width` |
//! | `ADAPTBAR_ITEM_FULL_WIDTH` | `item_full_width` |
//! | `ADAPTBAR_ACCESSORY_MIN_WIDTH` | `accessory_min_width` |
//! | `ADAPTBAR_ACCESSORY_MAX_WIDTH` | `accessory_max_width` |
//!
//! Unparsable values keep the default and are reported in
//! [`ConfigParse::errors`].

use std::env;
use std::fmt;

use crate::{Px, SpaceTierThresholds};

const ENV_TIER_SPACIOUS: &str = "ADAPTBAR_TIER_SPACIOUS";
const ENV_TIER_REGULAR: &str = "ADAPTBAR_TIER_REGULAR";
const ENV_TIER_COMPACT: &str = "ADAPTBAR_TIER_COMPACT";
const ENV_TIER_TIGHT: &str = "ADAPTBAR_TIER_TIGHT";
const ENV_ENABLE_OVERFLOW: &str = "ADAPTBAR_ENABLE_OVERFLOW";
const ENV_TOOLBAR_PADDING: &str = "ADAPTBAR_TOOLBAR_PADDING";
const ENV_ITEM_MIN_WIDTH: &str = "ADAPTBAR_ITEM_MIN_WIDTH";
const ENV_ITEM_FULL_WIDTH: &str = "ADAPTBAR_ITEM_FULL_WIDTH";
const ENV_ACCESSORY_MIN_WIDTH: &str = "ADAPTBAR_ACCESSORY_MIN_WIDTH";
const ENV_ACCESSORY_MAX_WIDTH: &str = "ADAPTBAR_ACCESSORY_MAX_WIDTH";

/// Extra width a compact title adds over an icon when no explicit width is given.
pub const COMPACT_TITLE_EXTRA: Px = 8.0;

/// All tunables of the layout engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfiguration {
    /// Tier thresholds.
    pub thresholds: SpaceTierThresholds,

    /// Item spacing at `Full` (and in the `Spacious` tier).
    pub item_spacing_full: Px,
    /// Item spacing at `Comfortable` (and in the `Regular` tier).
    pub item_spacing_comfortable: Px,
    /// Item spacing at `Compact` (and in the `Compact` tier).
    pub item_spacing_compact: Px,
    /// Item spacing when icon-only or narrower.
    pub item_spacing_minimal: Px,

    /// Side button size in roomy tiers.
    pub side_button_size_full: Px,
    /// Side button size in the `Tight` tier.
    pub side_button_size_compact: Px,
    /// Side button size for an essential button in the `Minimal` tier.
    pub side_button_size_minimal: Px,
    /// Toolbar-to-button gap in `Spacious`/`Regular`.
    pub side_button_spacing_full: Px,
    /// Toolbar-to-button gap in `Compact`.
    pub side_button_spacing_compact: Px,
    /// Toolbar-to-button gap in `Tight`.
    pub side_button_spacing_tight: Px,
    /// Toolbar-to-button gap in `Minimal`.
    pub side_button_spacing_minimal: Px,

    /// Outer padding on each side of the toolbar row.
    pub toolbar_padding: Px,
    /// Icon-only item width; also the overflow indicator's width.
    pub item_min_width: Px,
    /// Item width with a full title.
    pub item_full_width: Px,
    /// Padding inside the toolbar capsule, added once to its width.
    pub toolbar_internal_padding: Px,

    /// Accessory width cap.
    pub accessory_max_width: Px,
    /// Accessory width floor.
    pub accessory_min_width: Px,

    /// Whether items may be moved into an overflow menu.
    pub enable_overflow: bool,

    /// Item width in ultra-minimal mode.
    pub ultra_minimal_item_width: Px,
    /// Toolbar padding in ultra-minimal mode.
    pub ultra_minimal_toolbar_padding: Px,
    /// Side button size in ultra-minimal mode.
    pub ultra_minimal_side_button_size: Px,
    /// Side button gap in ultra-minimal mode.
    pub ultra_minimal_side_button_spacing: Px,
}

impl LayoutConfiguration {
    /// Default configuration.
    pub const DEFAULT: Self = Self {
        thresholds: SpaceTierThresholds::DEFAULT,
        item_spacing_full: 16.0,
        item_spacing_comfortable: 12.0,
        item_spacing_compact: 8.0,
        item_spacing_minimal: 4.0,
        side_button_size_full: 52.0,
        side_button_size_compact: 44.0,
        side_button_size_minimal: 40.0,
        side_button_spacing_full: 16.0,
        side_button_spacing_compact: 16.0,
        side_button_spacing_tight: 16.0,
        side_button_spacing_minimal: 8.0,
        toolbar_padding: 16.0,
        item_min_width: 44.0,
        item_full_width: 64.0,
        toolbar_internal_padding: 24.0,
        accessory_max_width: 400.0,
        accessory_min_width: 200.0,
        enable_overflow: true,
        ultra_minimal_item_width: 44.0,
        ultra_minimal_toolbar_padding: 24.0,
        ultra_minimal_side_button_size: 44.0,
        ultra_minimal_side_button_spacing: 8.0,
    };

    /// Preset for small screens; keeps 44pt touch targets.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            side_button_size_full: 44.0,
            side_button_spacing_full: 12.0,
            side_button_spacing_compact: 12.0,
            side_button_spacing_tight: 12.0,
            toolbar_padding: 12.0,
            item_full_width: 48.0,
            ultra_minimal_toolbar_padding: 16.0,
            ultra_minimal_side_button_spacing: 6.0,
            ..Self::DEFAULT
        }
    }

    /// Preset for tablets and desktops.
    #[must_use]
    pub fn spacious() -> Self {
        Self {
            side_button_size_full: 56.0,
            side_button_spacing_full: 24.0,
            side_button_spacing_compact: 24.0,
            side_button_spacing_tight: 16.0,
            toolbar_padding: 24.0,
            item_full_width: 64.0,
            ultra_minimal_item_width: 48.0,
            ultra_minimal_side_button_size: 48.0,
            ultra_minimal_side_button_spacing: 12.0,
            ..Self::DEFAULT
        }
    }

    /// Width of an item with a compact title when it has no explicit width.
    #[inline]
    #[must_use]
    pub fn default_compact_width(&self) -> Px {
        self.item_min_width + COMPACT_TITLE_EXTRA
    }

    /// Check every constraint and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        let t = &self.thresholds;
        for (field, value) in [
            ("thresholds.spacious", t.spacious),
            ("thresholds.regular", t.regular),
            ("thresholds.compact", t.compact),
            ("thresholds.tight", t.tight),
        ] {
            validate_positive(field, value, &mut errors);
        }
        if !t.is_strictly_descending() && errors.is_empty() {
            errors.push(ConfigError::new(
                "thresholds",
                format!(
                    "{}/{}/{}/{}",
                    t.spacious, t.regular, t.compact, t.tight
                ),
                "expected spacious > regular > compact > tight",
            ));
        }

        for (field, value) in [
            ("item_spacing_full", self.item_spacing_full),
            ("item_spacing_comfortable", self.item_spacing_comfortable),
            ("item_spacing_compact", self.item_spacing_compact),
            ("item_spacing_minimal", self.item_spacing_minimal),
            ("side_button_spacing_full", self.side_button_spacing_full),
            ("side_button_spacing_compact", self.side_button_spacing_compact),
            ("side_button_spacing_tight", self.side_button_spacing_tight),
            ("side_button_spacing_minimal", self.side_button_spacing_minimal),
            ("toolbar_padding", self.toolbar_padding),
            ("toolbar_internal_padding", self.toolbar_internal_padding),
            ("ultra_minimal_toolbar_padding", self.ultra_minimal_toolbar_padding),
            (
                "ultra_minimal_side_button_spacing",
                self.ultra_minimal_side_button_spacing,
            ),
        ] {
            validate_non_negative(field, value, &mut errors);
        }

        for (field, value) in [
            ("side_button_size_full", self.side_button_size_full),
            ("side_button_size_compact", self.side_button_size_compact),
            ("side_button_size_minimal", self.side_button_size_minimal),
            ("item_min_width", self.item_min_width),
            ("item_full_width", self.item_full_width),
            ("accessory_min_width", self.accessory_min_width),
            ("accessory_max_width", self.accessory_max_width),
            ("ultra_minimal_item_width", self.ultra_minimal_item_width),
            (
                "ultra_minimal_side_button_size",
                self.ultra_minimal_side_button_size,
            ),
        ] {
            validate_positive(field, value, &mut errors);
        }

        if self.accessory_min_width > self.accessory_max_width {
            errors.push(ConfigError::new(
                "accessory_min_width",
                self.accessory_min_width.to_string(),
                format!("exceeds accessory_max_width ({})", self.accessory_max_width),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validating constructor: returns `self` only if [`validate`](Self::validate) passes.
    pub fn validated(self) -> Result<Self, Vec<ConfigError>> {
        self.validate().map(|()| self)
    }

    /// Parse overrides from environment variables.
    #[must_use]
    pub fn from_env() -> LayoutConfiguration {
        Self::from_env_with_diagnostics().config
    }

    /// Parse overrides from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse overrides through an arbitrary lookup (used by tests and hosts
    /// that keep settings outside the process environment).
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = LayoutConfiguration::default();
        let mut errors = Vec::new();

        {
            let mut px_override = |key: &str, field: &'static str, slot: &mut Px| {
                if let Some(value) = get(key) {
                    match parse_px(&value) {
                        Some(parsed) => *slot = parsed,
                        None => errors.push(ConfigError::new(
                            field,
                            value,
                            "expected finite number",
                        )),
                    }
                }
            };

            px_override(
                ENV_TIER_SPACIOUS,
                "thresholds.spacious",
                &mut config.thresholds.spacious,
            );
            px_override(
                ENV_TIER_REGULAR,
                "thresholds.regular",
                &mut config.thresholds.regular,
            );
            px_override(
                ENV_TIER_COMPACT,
                "thresholds.compact",
                &mut config.thresholds.compact,
            );
            px_override(
                ENV_TIER_TIGHT,
                "thresholds.tight",
                &mut config.thresholds.tight,
            );
            px_override(
                ENV_TOOLBAR_PADDING,
                "toolbar_padding",
                &mut config.toolbar_padding,
            );
            px_override(
                ENV_ITEM_MIN_WIDTH,
                "item_min_width",
                &mut config.item_min_width,
            );
            px_override(
                ENV_ITEM_FULL_WIDTH,
                "item_full_width",
                &mut config.item_full_width,
            );
            px_override(
                ENV_ACCESSORY_MIN_WIDTH,
                "accessory_min_width",
                &mut config.accessory_min_width,
            );
            px_override(
                ENV_ACCESSORY_MAX_WIDTH,
                "accessory_max_width",
                &mut config.accessory_max_width,
            );
        }

        if let Some(value) = get(ENV_ENABLE_OVERFLOW) {
            match parse_bool(&value) {
                Some(parsed) => config.enable_overflow = parsed,
                None => errors.push(ConfigError::new(
                    "enable_overflow",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        ConfigParse { config, errors }
    }
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    /// Defaults with every parsable override applied.
    pub config: LayoutConfiguration,
    /// One entry per unparsable override. Empty when every override parsed.
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Configuration field name, e.g. `item_min_width` or `thresholds`.
    pub field: &'static str,
    /// Offending raw or formatted value.
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

fn validate_positive(field: &'static str, value: Px, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(
            field,
            value.to_string(),
            "must be a finite number > 0",
        ));
    }
}

fn validate_non_negative(field: &'static str, value: Px, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(
            field,
            value.to_string(),
            "must be a finite number >= 0",
        ));
    }
}

fn parse_px(value: &str) -> Option<Px> {
    value.trim().parse::<Px>().ok().filter(|v| v.is_finite())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn presets_validate() {
        assert!(LayoutConfiguration::DEFAULT.validate().is_ok());
        assert!(LayoutConfiguration::compact().validate().is_ok());
        assert!(LayoutConfiguration::spacious().validate().is_ok());
    }

    #[test]
    fn default_compact_width_adds_title_room() {
        assert_eq!(LayoutConfiguration::DEFAULT.default_compact_width(), 52.0);
    }

    #[test]
    fn non_descending_thresholds_rejected() {
        let config = LayoutConfiguration {
            thresholds: SpaceTierThresholds::new(400.0, 420.0, 360.0, 280.0),
            ..LayoutConfiguration::DEFAULT
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "thresholds");
    }

    #[test]
    fn negative_sizes_rejected() {
        let config = LayoutConfiguration {
            item_spacing_compact: -2.0,
            item_min_width: 0.0,
            toolbar_padding: f64::NAN,
            ..LayoutConfiguration::DEFAULT
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"item_spacing_compact"));
        assert!(fields.contains(&"item_min_width"));
        assert!(fields.contains(&"toolbar_padding"));
    }

    #[test]
    fn inverted_accessory_bounds_rejected() {
        let config = LayoutConfiguration {
            accessory_min_width: 500.0,
            ..LayoutConfiguration::DEFAULT
        };
        let err = config.validated().unwrap_err();
        assert_eq!(err[0].field, "accessory_min_width");
        assert!(err[0].to_string().contains("accessory_max_width"));
    }

    #[test]
    fn env_overrides_apply() {
        let parse = LayoutConfiguration::from_env_with(env_from(&[
            ("ADAPTBAR_TIER_SPACIOUS", "600"),
            ("ADAPTBAR_ENABLE_OVERFLOW", "false"),
            ("ADAPTBAR_ITEM_MIN_WIDTH", " 40.5 "),
        ]));
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        assert_eq!(parse.config.thresholds.spacious, 600.0);
        assert!(!parse.config.enable_overflow);
        assert_eq!(parse.config.item_min_width, 40.5);
        assert_eq!(parse.config.thresholds.regular, 420.0);
    }

    #[test]
    fn env_bad_values_keep_defaults() {
        let parse = LayoutConfiguration::from_env_with(env_from(&[
            ("ADAPTBAR_TIER_TIGHT", "narrow"),
            ("ADAPTBAR_ACCESSORY_MAX_WIDTH", "inf"),
            ("ADAPTBAR_ENABLE_OVERFLOW", "maybe"),
        ]));
        assert_eq!(parse.errors.len(), 3);
        assert_eq!(parse.config, LayoutConfiguration::DEFAULT);
        assert_eq!(parse.errors[0].field, "thresholds.tight");
        assert_eq!(parse.errors[2].field, "enable_overflow");
    }

    #[test]
    fn env_empty_is_default() {
        let parse = LayoutConfiguration::from_env_with(|_| None);
        assert!(parse.errors.is_empty());
        assert_eq!(parse.config, LayoutConfiguration::default());
    }
}
