//! Side-button sizing policy.

use crate::config::LayoutConfiguration;
use crate::{Px, SideButtonDescriptor, SideButtonDisplayMode, SideButtonPriority, SpaceTier};

/// Maps a tier and an optional side button to a display mode and footprint.
#[derive(Debug, Clone, Copy)]
pub struct SideButtonSizer<'a> {
    config: &'a LayoutConfiguration,
}

impl<'a> SideButtonSizer<'a> {
    /// Create a sizer reading sizes from `config`.
    #[must_use]
    pub const fn new(config: &'a LayoutConfiguration) -> Self {
        Self { config }
    }

    /// Display mode for the side button in `tier`.
    ///
    /// Roomy tiers get a full button, `Tight` a compact one. In `Minimal` the
    /// button's priority decides: essential buttons stay (smallest size),
    /// primary ones fold into the toolbar, secondary ones are hidden.
    #[must_use]
    pub fn mode_for(
        &self,
        tier: SpaceTier,
        side_button: Option<&SideButtonDescriptor>,
    ) -> SideButtonDisplayMode {
        let Some(side_button) = side_button else {
            return SideButtonDisplayMode::None;
        };
        let c = self.config;

        match tier {
            SpaceTier::Spacious | SpaceTier::Regular => SideButtonDisplayMode::Full {
                size: c.side_button_size_full,
                spacing: c.side_button_spacing_full,
            },
            SpaceTier::Compact => SideButtonDisplayMode::Full {
                size: c.side_button_size_full,
                spacing: c.side_button_spacing_compact,
            },
            SpaceTier::Tight => SideButtonDisplayMode::Compact {
                size: c.side_button_size_compact,
                spacing: c.side_button_spacing_tight,
            },
            SpaceTier::Minimal => match side_button.priority {
                SideButtonPriority::Essential => SideButtonDisplayMode::Compact {
                    size: c.side_button_size_minimal,
                    spacing: c.side_button_spacing_minimal,
                },
                SideButtonPriority::Primary => SideButtonDisplayMode::Integrated,
                SideButtonPriority::Secondary => SideButtonDisplayMode::Hidden,
            },
        }
    }

    /// Display mode together with the horizontal space it claims.
    #[must_use]
    pub fn size_for(
        &self,
        tier: SpaceTier,
        side_button: Option<&SideButtonDescriptor>,
    ) -> (SideButtonDisplayMode, Px) {
        let mode = self.mode_for(tier, side_button);
        (mode, mode.footprint())
    }
}
