//! Multi-level item fitting.
//!
//! Compression levels are tried from least to most aggressive. The first
//! level that keeps every essential item visible (and leaves room for the
//! overflow indicator when something overflows) wins.
//!
//! # Per-level rule
//!
//! 1. `spacing = min(level spacing, tier spacing)`.
//! 2. Overflow-priority items go straight to overflow (overflow enabled).
//! 3. Remaining items are placed in order while they fit. A non-essential item
//!    that does not fit goes to overflow; an essential one fails the level.
//! 4. If anything overflowed (or the indicator is [`OverflowIndicator::Reserved`]),
//!    trailing visible items are evicted until the indicator fits. Evicting an
//!    essential item fails the level.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Every level fails | Essential items shown icon-only without a width check |
//! | `available <= 0` | Every level fails unless there are no placeable items |
//! | Overflow disabled | Any item that does not fit fails the level |

use std::collections::BTreeMap;

use crate::config::LayoutConfiguration;
use crate::{CompressionLevel, ItemDescriptor, ItemDisplayMode, ItemPriority, Px, SpaceTier};

/// Whether the overflow indicator must fit even when nothing overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowIndicator {
    /// Reserve room only when an item actually overflows.
    #[default]
    OnDemand,
    /// Always reserve room (the menu carries something besides items).
    Reserved,
}

/// Result of fitting items into a width.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Level that succeeded (`Overflow` for the fallback).
    pub level: CompressionLevel,
    /// Display mode per item index.
    pub modes: BTreeMap<usize, ItemDisplayMode>,
    /// Visible item indices in toolbar order.
    pub visible: Vec<usize>,
    /// Overflowed item indices in menu order.
    pub overflow: Vec<usize>,
    /// Gap between visible items.
    pub spacing: Px,
    /// True when no level fit and essential items were forced in.
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy)]
struct Placed {
    index: usize,
    width: Px,
    priority: ItemPriority,
}

/// Fits toolbar items into an available width.
#[derive(Debug, Clone, Copy)]
pub struct ItemFitter<'a> {
    config: &'a LayoutConfiguration,
}

impl<'a> ItemFitter<'a> {
    /// Create a fitter reading widths and spacings from `config`.
    #[must_use]
    pub const fn new(config: &'a LayoutConfiguration) -> Self {
        Self { config }
    }

    /// Spacing a compression level asks for.
    #[must_use]
    pub fn level_spacing(&self, level: CompressionLevel) -> Px {
        match level {
            CompressionLevel::Full => self.config.item_spacing_full,
            CompressionLevel::Comfortable => self.config.item_spacing_comfortable,
            CompressionLevel::Compact => self.config.item_spacing_compact,
            CompressionLevel::IconOnly | CompressionLevel::Overflow => {
                self.config.item_spacing_minimal
            }
        }
    }

    /// Spacing a tier allows.
    #[must_use]
    pub fn tier_spacing(&self, tier: SpaceTier) -> Px {
        match tier {
            SpaceTier::Spacious => self.config.item_spacing_full,
            SpaceTier::Regular => self.config.item_spacing_comfortable,
            SpaceTier::Compact => self.config.item_spacing_compact,
            SpaceTier::Tight | SpaceTier::Minimal => self.config.item_spacing_minimal,
        }
    }

    /// Effective spacing: the tighter of level and tier.
    #[inline]
    #[must_use]
    pub fn spacing(&self, level: CompressionLevel, tier: SpaceTier) -> Px {
        self.level_spacing(level).min(self.tier_spacing(tier))
    }

    /// Width of `item` drawn in `mode`.
    #[must_use]
    pub fn item_width(&self, item: &ItemDescriptor, mode: ItemDisplayMode) -> Px {
        match mode {
            ItemDisplayMode::Full => item.full_width.unwrap_or(self.config.item_full_width),
            ItemDisplayMode::CompactTitle => item
                .compact_width
                .unwrap_or_else(|| self.config.default_compact_width()),
            ItemDisplayMode::IconOnly => self.config.item_min_width,
            ItemDisplayMode::Hidden => 0.0,
        }
    }

    /// Width of the visible items of `outcome`, including gaps between them.
    #[must_use]
    pub fn content_width(&self, items: &[ItemDescriptor], outcome: &FitOutcome) -> Px {
        let mut width = 0.0;
        let mut count = 0usize;
        for item in items {
            let mode = outcome
                .modes
                .get(&item.index)
                .copied()
                .unwrap_or(ItemDisplayMode::Hidden);
            if mode.is_visible() {
                width += self.item_width(item, mode);
                count += 1;
            }
        }
        if count > 1 {
            width += outcome.spacing * (count - 1) as Px;
        }
        width
    }

    /// Fit `items` into `available`, falling back to essential icons if no level fits.
    #[must_use]
    pub fn fit(
        &self,
        available: Px,
        items: &[ItemDescriptor],
        tier: SpaceTier,
        indicator: OverflowIndicator,
    ) -> FitOutcome {
        for level in CompressionLevel::ALL {
            if let Some(outcome) = self.try_level(available, items, tier, level, indicator) {
                return outcome;
            }
            adaptbar_core::trace!(
                level = level.label(),
                available,
                "compression level rejected"
            );
        }
        adaptbar_core::debug!(
            available,
            items = items.len(),
            "no compression level fits; forcing essential items"
        );
        self.minimal_fallback(items)
    }

    /// Attempt a single compression level.
    #[must_use]
    pub fn try_level(
        &self,
        available: Px,
        items: &[ItemDescriptor],
        tier: SpaceTier,
        level: CompressionLevel,
        indicator: OverflowIndicator,
    ) -> Option<FitOutcome> {
        let overflow_enabled = self.config.enable_overflow;
        let spacing = self.spacing(level, tier);

        let mut modes = BTreeMap::new();
        let mut visible: Vec<Placed> = Vec::with_capacity(items.len());
        let mut overflow: Vec<usize> = Vec::new();
        let mut total: Px = 0.0;

        for item in items {
            if item.priority == ItemPriority::Overflow && overflow_enabled {
                modes.insert(item.index, ItemDisplayMode::Hidden);
                overflow.push(item.index);
                continue;
            }

            let mode = level.item_mode(item.can_hide_title);
            let width = self.item_width(item, mode);
            let gap = if visible.is_empty() { 0.0 } else { spacing };

            if total + width + gap <= available {
                modes.insert(item.index, mode);
                visible.push(Placed {
                    index: item.index,
                    width,
                    priority: item.priority,
                });
                total += width + gap;
            } else if overflow_enabled && item.priority > ItemPriority::Essential {
                modes.insert(item.index, ItemDisplayMode::Hidden);
                overflow.push(item.index);
            } else {
                return None;
            }
        }

        let needs_indicator = !overflow.is_empty()
            || (indicator == OverflowIndicator::Reserved && overflow_enabled);
        if needs_indicator {
            let indicator_width = self.config.item_min_width;
            while total + spacing + indicator_width > available {
                let Some(last) = visible.pop() else {
                    break;
                };
                if last.priority == ItemPriority::Essential {
                    return None;
                }
                total -= last.width + if visible.is_empty() { 0.0 } else { spacing };
                overflow.insert(0, last.index);
                modes.insert(last.index, ItemDisplayMode::Hidden);
            }
        }

        Some(FitOutcome {
            level,
            modes,
            visible: visible.iter().map(|p| p.index).collect(),
            overflow,
            spacing,
            fallback: false,
        })
    }

    /// Essential items as icons, everything else in overflow. No width check.
    #[must_use]
    pub fn minimal_fallback(&self, items: &[ItemDescriptor]) -> FitOutcome {
        let mut modes = BTreeMap::new();
        let mut visible = Vec::new();
        let mut overflow = Vec::new();

        for item in items {
            if item.priority == ItemPriority::Essential {
                modes.insert(item.index, ItemDisplayMode::IconOnly);
                visible.push(item.index);
            } else {
                modes.insert(item.index, ItemDisplayMode::Hidden);
                overflow.push(item.index);
            }
        }

        FitOutcome {
            level: CompressionLevel::Overflow,
            modes,
            visible,
            overflow,
            spacing: self.config.item_spacing_minimal,
            fallback: true,
        }
    }
}
