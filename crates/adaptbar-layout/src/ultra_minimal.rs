//! Ultra-minimal mode: one icon, everything else in overflow.
//!
//! Bypasses tier classification, fitting and caching. The toolbar width is a
//! configured constant independent of the container.

use std::collections::BTreeMap;

use crate::config::LayoutConfiguration;
use crate::result::LayoutApplication;
use crate::{
    CompressionLevel, ItemDescriptor, ItemDisplayMode, ItemPriority, Px, SideButtonDescriptor,
    SideButtonDisplayMode,
};

/// Ultra-minimal layout decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UltraMinimalLayout {
    /// The one item left on the toolbar.
    pub visible_index: usize,
    /// `IconOnly` for the visible item, `Hidden` for the rest.
    pub item_display_modes: BTreeMap<usize, ItemDisplayMode>,
    /// Always `[visible_index]`.
    pub visible_indices: Vec<usize>,
    /// Every other item, in input order.
    pub overflow_indices: Vec<usize>,
    /// `ultra_minimal_item_width + ultra_minimal_toolbar_padding`.
    pub toolbar_width: Px,
    /// Compact when a side button is present, else `None`.
    pub side_button_mode: SideButtonDisplayMode,
}

impl UltraMinimalLayout {
    /// Renderer-facing parameters. Leaves the accessory untouched and keeps the
    /// compact selection indicator.
    #[must_use]
    pub fn to_application(&self) -> LayoutApplication {
        LayoutApplication {
            item_display_modes: self.item_display_modes.clone(),
            visible_indices: self.visible_indices.clone(),
            item_spacing: 0.0,
            show_overflow_button: false,
            toolbar_width: self.toolbar_width,
            side_button_mode: self.side_button_mode,
            accessory_width: None,
            compression_level: CompressionLevel::IconOnly,
        }
    }
}

/// Computes [`UltraMinimalLayout`]s from a configuration.
#[derive(Debug, Clone, Copy)]
pub struct UltraMinimalResolver<'a> {
    config: &'a LayoutConfiguration,
}

impl<'a> UltraMinimalResolver<'a> {
    /// Borrow `config` for the ultra-minimal sizes.
    #[must_use]
    pub const fn new(config: &'a LayoutConfiguration) -> Self {
        Self { config }
    }

    /// Resolve the single-item layout.
    ///
    /// Returns `None` for a non-positive (or `NaN`) container width or an empty
    /// item list.
    #[must_use]
    pub fn resolve(
        &self,
        container_width: Px,
        items: &[ItemDescriptor],
        selected_index: Option<usize>,
        side_button: Option<&SideButtonDescriptor>,
    ) -> Option<UltraMinimalLayout> {
        if container_width.is_nan() || container_width <= 0.0 {
            return None;
        }
        let chosen = Self::choose(items, selected_index)?;

        let mut item_display_modes = BTreeMap::new();
        let mut overflow_indices = Vec::with_capacity(items.len().saturating_sub(1));
        for item in items {
            if item.index == chosen {
                item_display_modes.insert(item.index, ItemDisplayMode::IconOnly);
            } else {
                item_display_modes.insert(item.index, ItemDisplayMode::Hidden);
                overflow_indices.push(item.index);
            }
        }

        let side_button_mode = match side_button {
            Some(_) => SideButtonDisplayMode::Compact {
                size: self.config.ultra_minimal_side_button_size,
                spacing: self.config.ultra_minimal_side_button_spacing,
            },
            None => SideButtonDisplayMode::None,
        };

        adaptbar_core::trace!(visible = chosen, overflow = overflow_indices.len(), "ultra-minimal layout");

        Some(UltraMinimalLayout {
            visible_index: chosen,
            item_display_modes,
            visible_indices: vec![chosen],
            overflow_indices,
            toolbar_width: self.config.ultra_minimal_item_width
                + self.config.ultra_minimal_toolbar_padding,
            side_button_mode,
        })
    }

    /// Selected item if present, else the first essential one, else the first item.
    fn choose(items: &[ItemDescriptor], selected_index: Option<usize>) -> Option<usize> {
        let first = items.first()?;
        if let Some(selected) = selected_index.filter(|&s| items.iter().any(|item| item.index == s)) {
            return Some(selected);
        }
        Some(
            items
                .iter()
                .find(|item| item.priority == ItemPriority::Essential)
                .unwrap_or(first)
                .index,
        )
    }
}
