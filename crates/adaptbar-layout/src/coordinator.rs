//! Layout coordinator: the orchestrating entry point.
//!
//! One call resolves a full [`LayoutResult`] for a container width:
//!
//! 1. Consult the [`LayoutCache`].
//! 2. Classify the width into a [`SpaceTier`] and size the side button.
//! 3. Fit items into what is left after padding and the side button.
//! 4. If the toolbar and side button still collide, shrink the toolbar when
//!    enough room remains, otherwise hide the side button (its action moves
//!    to the overflow menu) and refit with the indicator reserved.
//! 5. Derive the accessory width and store the result.
//!
//! The coordinator owns its cache and counters; every operation touching them
//! takes `&mut self`.

use adaptbar_core::units::{clamp_floor_wins, non_negative, sanitize};
use web_time::Instant;

use crate::cache::{CacheStats, LayoutCache, LayoutCacheKey};
use crate::config::LayoutConfiguration;
use crate::fit::{FitOutcome, ItemFitter, OverflowIndicator};
use crate::result::LayoutResult;
use crate::sizing::SideButtonSizer;
use crate::{ItemDescriptor, Px, SideButtonDescriptor, SideButtonDisplayMode, SpaceTier};

/// Default width change below which [`LayoutCoordinator::should_recalculate`]
/// keeps the previous layout.
pub const RECALCULATE_THRESHOLD: Px = 10.0;

/// Resolves toolbar layouts and memoizes them.
#[derive(Debug)]
pub struct LayoutCoordinator {
    config: LayoutConfiguration,
    cache: LayoutCache,
    last_width: Px,
    last_result: Option<LayoutResult>,
}

impl LayoutCoordinator {
    /// Create a coordinator with a default-sized cache.
    #[must_use]
    pub fn new(config: LayoutConfiguration) -> Self {
        Self::with_cache(config, LayoutCache::default())
    }

    /// Create a coordinator with a caller-supplied cache.
    #[must_use]
    pub fn with_cache(config: LayoutConfiguration, cache: LayoutCache) -> Self {
        Self {
            config,
            cache,
            last_width: 0.0,
            last_result: None,
        }
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn configuration(&self) -> &LayoutConfiguration {
        &self.config
    }

    /// Replace the configuration. Cached results are dropped.
    pub fn set_configuration(&mut self, config: LayoutConfiguration) {
        self.config = config;
        self.invalidate_cache();
    }

    /// Drop cached results and the remembered last layout. Counters are kept.
    pub fn invalidate_cache(&mut self) {
        adaptbar_core::debug!(entries = self.cache.len(), "layout cache invalidated");
        self.cache.invalidate_all();
        self.last_result = None;
        self.last_width = 0.0;
    }

    /// Cache hit/miss statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Most recent result, from either a hit or a fresh computation.
    #[must_use]
    pub fn last_result(&self) -> Option<&LayoutResult> {
        self.last_result.as_ref()
    }

    /// Resolve a layout using the wall clock for cache aging.
    pub fn calculate_layout(
        &mut self,
        container_width: Px,
        items: &[ItemDescriptor],
        side_button: Option<&SideButtonDescriptor>,
        has_accessory: bool,
    ) -> LayoutResult {
        self.calculate_layout_at(container_width, items, side_button, has_accessory, Instant::now())
    }

    /// Resolve a layout, aging cache entries against `now`.
    pub fn calculate_layout_at(
        &mut self,
        container_width: Px,
        items: &[ItemDescriptor],
        side_button: Option<&SideButtonDescriptor>,
        has_accessory: bool,
        now: Instant,
    ) -> LayoutResult {
        let container_width = sanitize(container_width);
        let key = LayoutCacheKey::new(container_width, items, side_button, has_accessory);

        if let Some(hit) = self.cache.get(&key, container_width, now) {
            adaptbar_core::trace!(
                width = container_width,
                bucket = key.quantized_width(),
                "layout cache hit"
            );
            self.remember(container_width, &hit);
            return hit;
        }

        let span = adaptbar_core::debug_span!(
            "toolbar_layout",
            width = container_width,
            items = items.len(),
            side_button = side_button.is_some(),
            accessory = has_accessory
        );
        let _guard = span.enter();

        let result = self.compute(container_width, items, side_button);

        adaptbar_core::debug!(
            tier = result.space_tier.label(),
            level = result.compression_level.label(),
            visible = result.visible_indices.len(),
            overflow = result.overflow_indices.len(),
            side_button = result.side_button_mode.label(),
            toolbar_width = result.toolbar_width,
            "layout computed"
        );

        let evicted = self.cache.insert(key, result.clone(), container_width, now);
        if evicted > 0 {
            adaptbar_core::debug!(evicted, "layout cache entries dropped");
        }
        self.remember(container_width, &result);
        result
    }

    fn remember(&mut self, width: Px, result: &LayoutResult) {
        self.last_width = width;
        self.last_result = Some(result.clone());
    }

    fn compute(
        &self,
        container_width: Px,
        items: &[ItemDescriptor],
        side_button: Option<&SideButtonDescriptor>,
    ) -> LayoutResult {
        let config = &self.config;
        let fitter = ItemFitter::new(config);
        let tier = config.thresholds.tier(container_width);
        let (mut side_mode, footprint) = SideButtonSizer::new(config).size_for(tier, side_button);

        let inner_width = container_width - 2.0 * config.toolbar_padding;
        let mut outcome = fitter.fit(
            non_negative(inner_width - footprint),
            items,
            tier,
            OverflowIndicator::OnDemand,
        );
        let mut toolbar_width = self.toolbar_width(&fitter, items, &outcome, side_mode);

        if footprint > 0.0 && toolbar_width + footprint > inner_width {
            let shrunk = inner_width - footprint;
            if shrunk >= 2.0 * config.item_min_width {
                adaptbar_core::debug!(from = toolbar_width, to = shrunk, "toolbar shrunk to fit side button");
                toolbar_width = shrunk;
            } else {
                adaptbar_core::debug!(
                    tier = tier.label(),
                    "side button hidden; action moves to overflow"
                );
                side_mode = SideButtonDisplayMode::Hidden;
                outcome = fitter.fit(
                    non_negative(inner_width),
                    items,
                    tier,
                    OverflowIndicator::Reserved,
                );
                toolbar_width = self.toolbar_width(&fitter, items, &outcome, side_mode);
            }
        }

        LayoutResult {
            space_tier: tier,
            compression_level: outcome.level,
            item_spacing: outcome.spacing,
            item_display_modes: outcome.modes,
            visible_indices: outcome.visible,
            overflow_indices: outcome.overflow,
            side_button_mode: side_mode,
            toolbar_width,
            accessory_width: self.accessory_width(tier, toolbar_width),
        }
    }

    /// Visible content, the overflow indicator when shown, and internal padding.
    fn toolbar_width(
        &self,
        fitter: &ItemFitter<'_>,
        items: &[ItemDescriptor],
        outcome: &FitOutcome,
        side_mode: SideButtonDisplayMode,
    ) -> Px {
        let mut width = fitter.content_width(items, outcome);
        let shows_indicator = self.config.enable_overflow
            && (!outcome.overflow.is_empty() || side_mode == SideButtonDisplayMode::Hidden);
        if shows_indicator {
            width += self.config.item_min_width + outcome.spacing;
        }
        width + self.config.toolbar_internal_padding
    }

    fn accessory_width(&self, tier: SpaceTier, toolbar_width: Px) -> Px {
        let max = self.config.accessory_max_width;
        let min = self.config.accessory_min_width;
        let preferred = match tier {
            SpaceTier::Spacious | SpaceTier::Regular | SpaceTier::Compact => toolbar_width.min(max),
            SpaceTier::Tight => toolbar_width.max(min),
            SpaceTier::Minimal => min,
        };
        clamp_floor_wins(preferred, min, max)
    }

    /// Whether a resize to `new_width` warrants a new layout, using the
    /// default threshold.
    #[must_use]
    pub fn should_recalculate(&self, new_width: Px) -> bool {
        self.should_recalculate_with_threshold(new_width, RECALCULATE_THRESHOLD)
    }

    /// True when nothing was laid out yet, the width moved by more than
    /// `threshold`, or the new width lands in a different tier.
    #[must_use]
    pub fn should_recalculate_with_threshold(&self, new_width: Px, threshold: Px) -> bool {
        let Some(last) = &self.last_result else {
            return true;
        };
        let new_width = sanitize(new_width);
        if (new_width - self.last_width).abs() > threshold {
            return true;
        }
        self.config.thresholds.tier(new_width) != last.space_tier
    }
}

impl Default for LayoutCoordinator {
    fn default() -> Self {
        Self::new(LayoutConfiguration::default())
    }
}
