//! End-to-end layout scenarios through the public API.

use adaptbar_layout::overflow_menu::DEFAULT_ACTION_TITLE;
use adaptbar_layout::{
    CompressionLevel, ItemDescriptor, ItemDisplayMode, ItemPriority, LayoutConfiguration,
    LayoutCoordinator, OverflowEntry, OverflowMenu, SideButtonDescriptor, SideButtonDisplayMode,
    SideButtonPriority, SpaceTier, ToolbarLayoutEngine,
};
use web_time::Instant;

use ItemPriority::{Essential, Overflow, Primary, Secondary};

fn mixed_items() -> Vec<ItemDescriptor> {
    ItemDescriptor::from_priorities(&[
        Essential, Essential, Primary, Primary, Primary, Primary, Secondary, Secondary,
    ])
}

#[test]
fn all_essential_items_fit_a_wide_container() {
    let mut coordinator = LayoutCoordinator::default();
    let items = ItemDescriptor::from_priorities(&[Essential; 3]);

    let result = coordinator.calculate_layout(1000.0, &items, None, false);

    assert_eq!(result.compression_level, CompressionLevel::Full);
    assert_eq!(result.visible_indices, vec![0, 1, 2]);
    for index in 0..3 {
        assert_eq!(result.display_mode(index), ItemDisplayMode::Full);
    }
}

#[test]
fn tight_container_keeps_essentials_and_compacts_side_button() {
    let mut coordinator = LayoutCoordinator::default();
    let button = SideButtonDescriptor::new(SideButtonPriority::Essential);

    let result = coordinator.calculate_layout(300.0, &mixed_items(), Some(&button), false);

    assert_eq!(result.space_tier, SpaceTier::Tight);
    assert!(matches!(
        result.side_button_mode,
        SideButtonDisplayMode::Compact { .. }
    ));
    assert!(result.visible_indices.contains(&0));
    assert!(result.visible_indices.contains(&1));
    assert!(!result.overflow_indices.is_empty());
    assert!(result.needs_overflow_button());
}

#[test]
fn lone_essential_is_forced_in_when_nothing_fits() {
    let mut coordinator = LayoutCoordinator::default();
    let items = ItemDescriptor::from_priorities(&[Essential]);
    let button = SideButtonDescriptor::new(SideButtonPriority::Essential);

    // Icon (44) plus side button footprint (48) exceeds the container.
    let result = coordinator.calculate_layout(80.0, &items, Some(&button), false);

    assert_eq!(result.compression_level, CompressionLevel::Overflow);
    assert_eq!(result.visible_indices, vec![0]);
    assert_eq!(result.display_mode(0), ItemDisplayMode::IconOnly);
    assert!(result.toolbar_width > 80.0 - 32.0);
}

#[test]
fn configuration_change_forces_a_miss() {
    let mut coordinator = LayoutCoordinator::default();
    let items = mixed_items();
    let now = Instant::now();

    coordinator.calculate_layout_at(700.0, &items, None, false, now);
    let mut config = coordinator.configuration().clone();
    config.item_spacing_full = 10.0;
    coordinator.set_configuration(config);
    coordinator.calculate_layout_at(700.0, &items, None, false, now);

    let stats = coordinator.cache_stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 2);
}

#[test]
fn degradation_walks_through_levels_as_width_shrinks() {
    let mut coordinator = LayoutCoordinator::default();
    let items = ItemDescriptor::from_priorities(&[Essential; 4]);
    let mut seen = Vec::new();
    let mut width = 700.0;
    while width > 0.0 {
        let level = coordinator.calculate_layout(width, &items, None, false).compression_level;
        if seen.last() != Some(&level) {
            seen.push(level);
        }
        width -= 5.0;
    }
    assert_eq!(seen.first(), Some(&CompressionLevel::Full));
    assert_eq!(seen.last(), Some(&CompressionLevel::Overflow));
    assert!(seen.contains(&CompressionLevel::IconOnly));
}

#[test]
fn hidden_side_button_lands_in_overflow_menu() {
    let mut coordinator = LayoutCoordinator::default();
    let items = ItemDescriptor::from_priorities(&[Primary, Overflow]);
    let button = SideButtonDescriptor::new(SideButtonPriority::Secondary).overflow_title("New");

    let result = coordinator.calculate_layout(200.0, &items, Some(&button), false);
    assert_eq!(result.side_button_mode, SideButtonDisplayMode::Hidden);

    let menu = OverflowMenu::from_result(&result, Some(&button), DEFAULT_ACTION_TITLE);
    assert_eq!(
        menu.entries.last(),
        Some(&OverflowEntry::SideButton {
            title: "New".to_owned()
        })
    );
    assert!(menu.item_indices().any(|index| index == 1));
    assert!(OverflowMenu::has_content(&result, Some(&button)));
}

#[test]
fn primary_side_button_integrates_in_minimal_tier() {
    let mut coordinator = LayoutCoordinator::default();
    let items = ItemDescriptor::from_priorities(&[Essential, Primary]);
    let button = SideButtonDescriptor::new(SideButtonPriority::Primary);

    let result = coordinator.calculate_layout(250.0, &items, Some(&button), false);

    assert_eq!(result.space_tier, SpaceTier::Minimal);
    assert_eq!(result.side_button_mode, SideButtonDisplayMode::Integrated);
    assert!(OverflowMenu::from_result(&result, Some(&button), DEFAULT_ACTION_TITLE)
        .entries
        .iter()
        .all(|entry| matches!(entry, OverflowEntry::Item { .. })));
}

#[test]
fn explicit_widths_drive_fitting() {
    let mut coordinator = LayoutCoordinator::default();
    let items = vec![
        ItemDescriptor::new(0).priority(Essential).full_width(120.0),
        ItemDescriptor::new(1).priority(Primary).full_width(120.0),
        ItemDescriptor::new(2).priority(Primary).full_width(120.0),
    ];
    // Spacious: 600 - 32 = 568 fits 3 * 120 + 2 * 16 = 392.
    let result = coordinator.calculate_layout(600.0, &items, None, false);
    assert_eq!(result.visible_indices, vec![0, 1, 2]);
    assert_eq!(result.toolbar_width, 392.0 + 24.0);
}

#[test]
fn overflow_disabled_never_hides_items_by_priority() {
    let config = LayoutConfiguration {
        enable_overflow: false,
        ..LayoutConfiguration::DEFAULT
    };
    let mut coordinator = LayoutCoordinator::new(config);
    let items = ItemDescriptor::from_priorities(&[Essential, Overflow]);

    let result = coordinator.calculate_layout(800.0, &items, None, false);

    assert_eq!(result.visible_indices, vec![0, 1]);
    assert!(result.overflow_indices.is_empty());
    assert!(!result.needs_overflow_button());
}

#[test]
fn engine_switches_between_paths() {
    let mut engine = ToolbarLayoutEngine::new(LayoutConfiguration::compact());
    let items = mixed_items();

    let regular = engine
        .resolve(800.0, &items, Some(3), None, true)
        .expect("regular path always resolves");
    assert!(regular.visible_indices.len() > 1);
    assert!(regular.accessory_width.is_some());

    assert!(engine.set_ultra_minimal(true));
    let ultra = engine
        .resolve(800.0, &items, Some(3), None, true)
        .expect("items present");
    assert_eq!(ultra.visible_indices, vec![3]);
    assert_eq!(ultra.accessory_width, None);
    assert!(!ultra.show_overflow_button);
    assert_eq!(engine.coordinator().cache_stats().misses, 1);
}

#[test]
fn validated_presets_drive_the_coordinator() {
    for config in [
        LayoutConfiguration::DEFAULT,
        LayoutConfiguration::compact(),
        LayoutConfiguration::spacious(),
    ] {
        let config = config.validated().expect("presets are valid");
        let mut coordinator = LayoutCoordinator::new(config);
        let result = coordinator.calculate_layout(390.0, &mixed_items(), None, true);
        assert_eq!(result.space_tier, SpaceTier::Compact);
        assert!(result.visible_indices.contains(&0));
    }
}
