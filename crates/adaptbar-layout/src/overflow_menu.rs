//! Contents of the overflow menu for a resolved layout.

use crate::result::LayoutResult;
use crate::{SideButtonDescriptor, SideButtonDisplayMode};

/// Title used for a hidden side button that has no overflow label.
pub const DEFAULT_ACTION_TITLE: &str = "Action";

/// One row of the overflow menu.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowEntry {
    /// A toolbar item that did not fit.
    Item { index: usize },
    /// The side button's action, shown because the button was hidden.
    SideButton { title: String },
}

/// Ordered overflow menu: overflowed items first, then the side button action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowMenu {
    /// Rows in display order.
    pub entries: Vec<OverflowEntry>,
}

impl OverflowMenu {
    /// Build the menu for `result`.
    ///
    /// `default_action_title` labels a hidden side button without an
    /// `overflow_title`; pass [`DEFAULT_ACTION_TITLE`] for the stock label.
    #[must_use]
    pub fn from_result(
        result: &LayoutResult,
        side_button: Option<&SideButtonDescriptor>,
        default_action_title: &str,
    ) -> Self {
        let mut entries: Vec<OverflowEntry> = result
            .overflow_indices
            .iter()
            .map(|&index| OverflowEntry::Item { index })
            .collect();

        if let Some(button) = hidden_side_button(result, side_button) {
            let title = button
                .overflow_title
                .clone()
                .unwrap_or_else(|| default_action_title.to_owned());
            entries.push(OverflowEntry::SideButton { title });
        }

        Self { entries }
    }

    /// Whether a menu for `result` would have any rows.
    #[must_use]
    pub fn has_content(result: &LayoutResult, side_button: Option<&SideButtonDescriptor>) -> bool {
        !result.overflow_indices.is_empty() || hidden_side_button(result, side_button).is_some()
    }

    /// Whether the menu has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Overflowed item indices, in menu order.
    pub fn item_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            OverflowEntry::Item { index } => Some(*index),
            OverflowEntry::SideButton { .. } => None,
        })
    }
}

fn hidden_side_button<'a>(
    result: &LayoutResult,
    side_button: Option<&'a SideButtonDescriptor>,
) -> Option<&'a SideButtonDescriptor> {
    side_button.filter(|_| result.side_button_mode == SideButtonDisplayMode::Hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompressionLevel, SideButtonPriority, SpaceTier};
    use std::collections::BTreeMap;

    fn result(overflow: Vec<usize>, side: SideButtonDisplayMode) -> LayoutResult {
        LayoutResult {
            space_tier: SpaceTier::Minimal,
            compression_level: CompressionLevel::IconOnly,
            item_spacing: 4.0,
            item_display_modes: BTreeMap::new(),
            visible_indices: vec![0],
            overflow_indices: overflow,
            side_button_mode: side,
            toolbar_width: 100.0,
            accessory_width: 200.0,
        }
    }

    #[test]
    fn items_then_side_button() {
        let button = SideButtonDescriptor::new(SideButtonPriority::Secondary).overflow_title("Compose");
        let menu = OverflowMenu::from_result(
            &result(vec![3, 1], SideButtonDisplayMode::Hidden),
            Some(&button),
            DEFAULT_ACTION_TITLE,
        );
        assert_eq!(
            menu.entries,
            vec![
                OverflowEntry::Item { index: 3 },
                OverflowEntry::Item { index: 1 },
                OverflowEntry::SideButton {
                    title: "Compose".into()
                },
            ]
        );
        assert_eq!(menu.item_indices().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn untitled_side_button_uses_default() {
        let button = SideButtonDescriptor::new(SideButtonPriority::Secondary);
        let menu = OverflowMenu::from_result(
            &result(vec![], SideButtonDisplayMode::Hidden),
            Some(&button),
            DEFAULT_ACTION_TITLE,
        );
        assert_eq!(
            menu.entries,
            vec![OverflowEntry::SideButton {
                title: "Action".into()
            }]
        );
    }

    #[test]
    fn visible_or_missing_side_button_is_not_listed() {
        let button = SideButtonDescriptor::new(SideButtonPriority::Primary);
        let r = result(vec![2], SideButtonDisplayMode::Integrated);
        let menu = OverflowMenu::from_result(&r, Some(&button), DEFAULT_ACTION_TITLE);
        assert_eq!(menu.entries, vec![OverflowEntry::Item { index: 2 }]);

        let hidden = result(vec![], SideButtonDisplayMode::Hidden);
        assert!(OverflowMenu::from_result(&hidden, None, DEFAULT_ACTION_TITLE).is_empty());
        assert!(!OverflowMenu::has_content(&hidden, None));
    }

    #[test]
    fn has_content_matches_from_result() {
        let button = SideButtonDescriptor::new(SideButtonPriority::Essential);
        let cases = [
            (result(vec![], SideButtonDisplayMode::None), None),
            (result(vec![1], SideButtonDisplayMode::None), None),
            (result(vec![], SideButtonDisplayMode::Hidden), Some(&button)),
            (result(vec![], SideButtonDisplayMode::Integrated), Some(&button)),
        ];
        for (r, b) in cases {
            assert_eq!(
                OverflowMenu::has_content(&r, b),
                !OverflowMenu::from_result(&r, b, DEFAULT_ACTION_TITLE).is_empty()
            );
        }
    }
}
