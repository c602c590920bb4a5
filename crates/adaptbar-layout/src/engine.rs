//! Host-facing entry point switching between the regular and ultra-minimal paths.

use web_time::Instant;

use crate::coordinator::LayoutCoordinator;
use crate::result::LayoutApplication;
use crate::ultra_minimal::UltraMinimalResolver;
use crate::{ItemDescriptor, LayoutConfiguration, Px, SideButtonDescriptor};

/// Owns a [`LayoutCoordinator`] and the ultra-minimal toggle.
///
/// While ultra-minimal mode is on it takes precedence: the coordinator and its
/// cache are not consulted.
#[derive(Debug, Default)]
pub struct ToolbarLayoutEngine {
    coordinator: LayoutCoordinator,
    ultra_minimal: bool,
}

impl ToolbarLayoutEngine {
    /// Create an engine in regular mode.
    #[must_use]
    pub fn new(config: LayoutConfiguration) -> Self {
        Self {
            coordinator: LayoutCoordinator::new(config),
            ultra_minimal: false,
        }
    }

    /// Whether ultra-minimal mode is on.
    #[inline]
    #[must_use]
    pub fn is_ultra_minimal(&self) -> bool {
        self.ultra_minimal
    }

    /// Switch ultra-minimal mode. Returns `true` when the mode actually changed.
    pub fn set_ultra_minimal(&mut self, enabled: bool) -> bool {
        if self.ultra_minimal == enabled {
            return false;
        }
        self.ultra_minimal = enabled;
        adaptbar_core::debug!(enabled, "ultra-minimal mode changed");
        true
    }

    /// Flip ultra-minimal mode, returning the new state.
    pub fn toggle_ultra_minimal(&mut self) -> bool {
        self.set_ultra_minimal(!self.ultra_minimal);
        self.ultra_minimal
    }

    /// The regular-path coordinator, for stats and configuration.
    #[must_use]
    pub fn coordinator(&self) -> &LayoutCoordinator {
        &self.coordinator
    }

    /// Mutable coordinator access, e.g. to change configuration.
    pub fn coordinator_mut(&mut self) -> &mut LayoutCoordinator {
        &mut self.coordinator
    }

    /// Resolve renderer parameters using the wall clock.
    ///
    /// `None` only comes from the ultra-minimal path (no items, or no width).
    pub fn resolve(
        &mut self,
        container_width: Px,
        items: &[ItemDescriptor],
        selected_index: Option<usize>,
        side_button: Option<&SideButtonDescriptor>,
        has_accessory: bool,
    ) -> Option<LayoutApplication> {
        self.resolve_at(
            container_width,
            items,
            selected_index,
            side_button,
            has_accessory,
            Instant::now(),
        )
    }

    /// Resolve renderer parameters, aging cache entries against `now`.
    pub fn resolve_at(
        &mut self,
        container_width: Px,
        items: &[ItemDescriptor],
        selected_index: Option<usize>,
        side_button: Option<&SideButtonDescriptor>,
        has_accessory: bool,
        now: Instant,
    ) -> Option<LayoutApplication> {
        if self.ultra_minimal {
            return UltraMinimalResolver::new(self.coordinator.configuration())
                .resolve(container_width, items, selected_index, side_button)
                .map(|layout| layout.to_application());
        }
        Some(
            self.coordinator
                .calculate_layout_at(container_width, items, side_button, has_accessory, now)
                .to_application(),
        )
    }
}
