#![forbid(unsafe_code)]

//! Adaptive toolbar layout resolution.
//!
//! Given a container width, an ordered list of toolbar items, an optional side
//! button and an optional accessory panel, this crate decides how much of the
//! toolbar fits and in which visual mode:
//!
//! - [`SpaceTier`] - discrete width buckets driving spacings and sizes
//! - [`sizing`] - side-button display mode per tier and priority
//! - [`fit`] - multi-level item fitting with ordered fallback
//! - [`cache`] - quantized result cache with TTL and capacity eviction
//! - [`LayoutCoordinator`] - the orchestrating entry point
//! - [`UltraMinimalResolver`] - single-item bypass path
//! - [`OverflowMenu`] - what the overflow indicator should offer
//!
//! # Example
//!
//! ```
//! use adaptbar_layout::{ItemDescriptor, ItemPriority, LayoutCoordinator, CompressionLevel};
//!
//! let mut coordinator = LayoutCoordinator::default();
//! let items = ItemDescriptor::from_priorities(&[ItemPriority::Essential; 3]);
//!
//! let result = coordinator.calculate_layout(1000.0, &items, None, false);
//! assert_eq!(result.compression_level, CompressionLevel::Full);
//! assert_eq!(result.visible_indices, vec![0, 1, 2]);
//! ```
//!
//! Layout resolution never fails: when space runs out the result degrades
//! (shorter titles, icons, overflow) and, as a last resort, essential items are
//! shown even if they exceed the available width.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod fit;
pub mod overflow_menu;
pub mod result;
pub mod sizing;
pub mod ultra_minimal;

pub use adaptbar_core::Px;
pub use cache::{CacheStats, LayoutCache, LayoutCacheKey};
pub use config::{ConfigError, ConfigParse, LayoutConfiguration};
pub use coordinator::LayoutCoordinator;
pub use engine::ToolbarLayoutEngine;
pub use fit::{FitOutcome, ItemFitter, OverflowIndicator};
pub use overflow_menu::{OverflowEntry, OverflowMenu};
pub use result::{LayoutApplication, LayoutResult};
pub use sizing::SideButtonSizer;
pub use ultra_minimal::{UltraMinimalLayout, UltraMinimalResolver};

/// Width tiers, ordered from narrowest to widest.
///
/// | Tier       | Default Min Width | Typical Use                      |
/// |------------|-------------------|----------------------------------|
/// | `Minimal`  | < 280             | Extreme constraint               |
/// | `Tight`    | 280–359           | Small phones, narrow split views |
/// | `Compact`  | 360–419           | Standard phones                  |
/// | `Regular`  | 420–519           | Half-width tablet split views    |
/// | `Spacious` | 520+              | Full-width tablets, desktops     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpaceTier {
    /// Narrowest tier.
    Minimal,
    /// Small containers.
    Tight,
    /// Standard phone width.
    Compact,
    /// Medium containers.
    Regular,
    /// Widest tier.
    Spacious,
}

impl SpaceTier {
    /// All tiers in ascending order.
    pub const ALL: [SpaceTier; 5] = [
        SpaceTier::Minimal,
        SpaceTier::Tight,
        SpaceTier::Compact,
        SpaceTier::Regular,
        SpaceTier::Spacious,
    ];

    /// Short label for display and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SpaceTier::Minimal => "minimal",
            SpaceTier::Tight => "tight",
            SpaceTier::Compact => "compact",
            SpaceTier::Regular => "regular",
            SpaceTier::Spacious => "spacious",
        }
    }
}

impl std::fmt::Display for SpaceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier thresholds.
///
/// Each field is the minimum width for that tier; `Minimal` implicitly starts
/// at negative infinity. Thresholds are expected to be strictly descending
/// from `spacious` to `tight`. Classification does not check this; see
/// [`LayoutConfiguration::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceTierThresholds {
    /// Minimum width for `Spacious`.
    pub spacious: Px,
    /// Minimum width for `Regular`.
    pub regular: Px,
    /// Minimum width for `Compact`.
    pub compact: Px,
    /// Minimum width for `Tight`.
    pub tight: Px,
}

impl SpaceTierThresholds {
    /// Default thresholds: 520 / 420 / 360 / 280.
    pub const DEFAULT: Self = Self {
        spacious: 520.0,
        regular: 420.0,
        compact: 360.0,
        tight: 280.0,
    };

    /// Create thresholds from explicit values, widest first.
    #[must_use]
    pub const fn new(spacious: Px, regular: Px, compact: Px, tight: Px) -> Self {
        Self {
            spacious,
            regular,
            compact,
            tight,
        }
    }

    /// Classify a width: the highest tier whose threshold it meets.
    #[inline]
    #[must_use]
    pub fn tier(&self, width: Px) -> SpaceTier {
        if width >= self.spacious {
            SpaceTier::Spacious
        } else if width >= self.regular {
            SpaceTier::Regular
        } else if width >= self.compact {
            SpaceTier::Compact
        } else if width >= self.tight {
            SpaceTier::Tight
        } else {
            SpaceTier::Minimal
        }
    }

    /// Lower bound of a tier (`Minimal` reports 0).
    #[must_use]
    pub const fn threshold(&self, tier: SpaceTier) -> Px {
        match tier {
            SpaceTier::Minimal => 0.0,
            SpaceTier::Tight => self.tight,
            SpaceTier::Compact => self.compact,
            SpaceTier::Regular => self.regular,
            SpaceTier::Spacious => self.spacious,
        }
    }

    /// True when `spacious > regular > compact > tight > 0`.
    #[must_use]
    pub fn is_strictly_descending(&self) -> bool {
        self.spacious > self.regular
            && self.regular > self.compact
            && self.compact > self.tight
            && self.tight > 0.0
    }
}

impl Default for SpaceTierThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fitting strategies, from least to most aggressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompressionLevel {
    /// Full titles, full spacing.
    #[default]
    Full,
    /// Full titles, standard spacing.
    Comfortable,
    /// Short titles where allowed, compact spacing.
    Compact,
    /// Icons only.
    IconOnly,
    /// Icons only with items pushed to overflow.
    Overflow,
}

impl CompressionLevel {
    /// All levels in the order they are tried.
    pub const ALL: [CompressionLevel; 5] = [
        CompressionLevel::Full,
        CompressionLevel::Comfortable,
        CompressionLevel::Compact,
        CompressionLevel::IconOnly,
        CompressionLevel::Overflow,
    ];

    /// Short label for display and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CompressionLevel::Full => "full",
            CompressionLevel::Comfortable => "comfortable",
            CompressionLevel::Compact => "compact",
            CompressionLevel::IconOnly => "icon_only",
            CompressionLevel::Overflow => "overflow",
        }
    }

    /// Display mode this level prescribes for an item.
    #[must_use]
    pub const fn item_mode(self, can_hide_title: bool) -> ItemDisplayMode {
        match self {
            CompressionLevel::Full | CompressionLevel::Comfortable => ItemDisplayMode::Full,
            CompressionLevel::Compact => {
                if can_hide_title {
                    ItemDisplayMode::CompactTitle
                } else {
                    ItemDisplayMode::Full
                }
            }
            CompressionLevel::IconOnly | CompressionLevel::Overflow => ItemDisplayMode::IconOnly,
        }
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Item importance. Lower ranks are evicted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemPriority {
    /// Never hidden by a successful fit.
    Essential,
    /// Shown preferentially.
    #[default]
    Primary,
    /// First to move into overflow.
    Secondary,
    /// Always in overflow while overflow is enabled.
    Overflow,
}

/// Side button importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SideButtonPriority {
    /// Stays visible even in the minimal tier.
    Essential,
    /// Merges into the toolbar in the minimal tier.
    #[default]
    Primary,
    /// Hidden in the minimal tier.
    Secondary,
}

/// How a single toolbar item is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemDisplayMode {
    /// Icon and title.
    Full,
    /// Icon and short title.
    CompactTitle,
    /// Icon only.
    IconOnly,
    /// Not drawn inline (lives in overflow).
    Hidden,
}

impl ItemDisplayMode {
    /// True for every mode except `Hidden`.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, ItemDisplayMode::Hidden)
    }
}

/// How the side button is drawn, with its size and gap to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SideButtonDisplayMode {
    /// Full-size button.
    Full {
        /// Button diameter.
        size: Px,
        /// Gap between toolbar and button.
        spacing: Px,
    },
    /// Reduced button.
    Compact {
        /// Button diameter.
        size: Px,
        /// Gap between toolbar and button.
        spacing: Px,
    },
    /// Folded into the toolbar; takes no separate space.
    Integrated,
    /// Hidden for lack of space; its action moves to the overflow menu.
    Hidden,
    /// No side button configured.
    None,
}

impl SideButtonDisplayMode {
    /// Horizontal space the button claims next to the toolbar.
    #[inline]
    #[must_use]
    pub fn footprint(&self) -> Px {
        match *self {
            SideButtonDisplayMode::Full { size, spacing }
            | SideButtonDisplayMode::Compact { size, spacing } => size + spacing,
            SideButtonDisplayMode::Integrated
            | SideButtonDisplayMode::Hidden
            | SideButtonDisplayMode::None => 0.0,
        }
    }

    /// True when the button is drawn as its own control.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(
            self,
            SideButtonDisplayMode::Full { .. } | SideButtonDisplayMode::Compact { .. }
        )
    }

    /// Short label for display and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            SideButtonDisplayMode::Full { .. } => "full",
            SideButtonDisplayMode::Compact { .. } => "compact",
            SideButtonDisplayMode::Integrated => "integrated",
            SideButtonDisplayMode::Hidden => "hidden",
            SideButtonDisplayMode::None => "none",
        }
    }
}

/// Layout-relevant description of one toolbar item.
///
/// `index` is the item's identity in results; hosts normally use the item's
/// position in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDescriptor {
    /// Identity of the item in results.
    pub index: usize,
    /// Eviction rank.
    pub priority: ItemPriority,
    /// Whether the title may shrink to its compact form.
    pub can_hide_title: bool,
    /// Explicit width with full title (falls back to the configuration).
    pub full_width: Option<Px>,
    /// Explicit width with compact title (falls back to the configuration).
    pub compact_width: Option<Px>,
}

impl ItemDescriptor {
    /// A primary item that may shrink its title, using configured widths.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            priority: ItemPriority::Primary,
            can_hide_title: true,
            full_width: None,
            compact_width: None,
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn priority(mut self, priority: ItemPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set whether the title may shrink.
    #[must_use]
    pub const fn can_hide_title(mut self, can_hide_title: bool) -> Self {
        self.can_hide_title = can_hide_title;
        self
    }

    /// Override the full-title width.
    #[must_use]
    pub const fn full_width(mut self, width: Px) -> Self {
        self.full_width = Some(width);
        self
    }

    /// Override the compact-title width.
    #[must_use]
    pub const fn compact_width(mut self, width: Px) -> Self {
        self.compact_width = Some(width);
        self
    }

    /// Descriptors indexed by position, one per priority.
    #[must_use]
    pub fn from_priorities(priorities: &[ItemPriority]) -> Vec<Self> {
        priorities
            .iter()
            .enumerate()
            .map(|(index, &priority)| Self::new(index).priority(priority))
            .collect()
    }
}

/// Layout-relevant description of the side button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideButtonDescriptor {
    /// Visibility rank in the minimal tier.
    pub priority: SideButtonPriority,
    /// Label used when the button's action moves to the overflow menu.
    pub overflow_title: Option<String>,
}

impl SideButtonDescriptor {
    /// A side button with the given priority and no overflow label.
    #[must_use]
    pub const fn new(priority: SideButtonPriority) -> Self {
        Self {
            priority,
            overflow_title: None,
        }
    }

    /// Set the overflow-menu label.
    #[must_use]
    pub fn overflow_title(mut self, title: impl Into<String>) -> Self {
        self.overflow_title = Some(title.into());
        self
    }
}
