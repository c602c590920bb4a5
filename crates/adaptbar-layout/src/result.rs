//! Layout outputs handed to the rendering layer.

use std::collections::BTreeMap;

use crate::{CompressionLevel, ItemDisplayMode, Px, SideButtonDisplayMode, SpaceTier};

/// Full layout decision from [`LayoutCoordinator`](crate::LayoutCoordinator).
///
/// Invariant: `visible_indices` and `overflow_indices` partition the item
/// indices that were passed in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    /// Tier of the container width.
    pub space_tier: SpaceTier,
    /// Most detailed level that fit, or `Overflow` for the fallback.
    pub compression_level: CompressionLevel,
    /// Gap between adjacent visible items.
    pub item_spacing: Px,
    /// Mode for every input item, keyed by item index.
    pub item_display_modes: BTreeMap<usize, ItemDisplayMode>,
    /// Items on the toolbar, in input order.
    pub visible_indices: Vec<usize>,
    /// Items moved to the overflow menu, in input order.
    pub overflow_indices: Vec<usize>,
    /// Side button sizing after reconciliation.
    pub side_button_mode: SideButtonDisplayMode,
    /// Visible content, overflow indicator and internal padding.
    pub toolbar_width: Px,
    /// Accessory width, clamped to the configured bounds.
    pub accessory_width: Px,
}

impl LayoutResult {
    /// Whether the overflow indicator is shown: items overflowed, or the side
    /// button was hidden and its action lives in the menu.
    #[must_use]
    pub fn needs_overflow_button(&self) -> bool {
        !self.overflow_indices.is_empty() || self.side_button_mode == SideButtonDisplayMode::Hidden
    }

    /// Display mode of an item, `Hidden` for unknown indices.
    #[must_use]
    pub fn display_mode(&self, index: usize) -> ItemDisplayMode {
        self.item_display_modes
            .get(&index)
            .copied()
            .unwrap_or(ItemDisplayMode::Hidden)
    }

    /// Renderer-facing parameters.
    #[must_use]
    pub fn to_application(&self) -> LayoutApplication {
        LayoutApplication {
            item_display_modes: self.item_display_modes.clone(),
            visible_indices: self.visible_indices.clone(),
            item_spacing: self.item_spacing,
            show_overflow_button: self.needs_overflow_button(),
            toolbar_width: self.toolbar_width,
            side_button_mode: self.side_button_mode,
            accessory_width: Some(self.accessory_width),
            compression_level: self.compression_level,
        }
    }
}

/// What the rendering layer applies, whichever path produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutApplication {
    /// Mode for every input item, keyed by item index.
    pub item_display_modes: BTreeMap<usize, ItemDisplayMode>,
    /// Items to show, in input order.
    pub visible_indices: Vec<usize>,
    /// Gap between adjacent visible items.
    pub item_spacing: Px,
    /// Whether to show the overflow indicator.
    pub show_overflow_button: bool,
    /// Width to give the toolbar container.
    pub toolbar_width: Px,
    /// How to draw the side button, if any.
    pub side_button_mode: SideButtonDisplayMode,
    /// `None` leaves the accessory width untouched.
    pub accessory_width: Option<Px>,
    /// Drives the selection indicator height.
    pub compression_level: CompressionLevel,
}
