//! Property-based tests for the drag-and-drop coordinator
//!
//! Drives the coordinator with arbitrary event sequences and checks that
//! hover state and drag cycles stay consistent.

use std::collections::HashSet;

use proptest::prelude::*;
use tiledock_core::drag_drop::ElementArena;
use tiledock_core::{DataTransfer, DragDropCoordinator, DragNotification};

/// Strategy for a set of distinct component handles
fn arb_handles() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::hash_set(any::<u16>(), 1..12).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Marking a component twice yields the same id; distinct components
    /// never share one.
    #[test]
    fn prop_draggable_ids_are_stable_and_unique(handles in arb_handles()) {
        let mut coordinator = DragDropCoordinator::new();
        let first: Vec<_> = handles
            .iter()
            .map(|handle| coordinator.mark_draggable(handle).draggable_id)
            .collect();
        let second: Vec<_> = handles
            .iter()
            .map(|handle| coordinator.mark_draggable(handle).draggable_id)
            .collect();

        prop_assert_eq!(&first, &second);
        let unique: HashSet<_> = first.iter().collect();
        prop_assert_eq!(unique.len(), handles.len());
    }

    /// Hovered zones accumulate during a drag and are all cleared by the
    /// drop, which resolves the dragged component.
    #[test]
    fn prop_drop_resolves_source_and_clears_hover(
        zones in arb_handles(),
        hovers in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
        drop_on in any::<prop::sample::Index>(),
    ) {
        let mut coordinator = DragDropCoordinator::new();
        let zone_ids: Vec<_> = zones
            .iter()
            .map(|zone| coordinator.mark_dropzone(&u32::from(*zone)).dropzone_id)
            .collect();
        let source = coordinator.mark_draggable(&u32::MAX).draggable_id;
        let mut transfer = DataTransfer::new();
        prop_assert_eq!(
            coordinator.drag_start(&source, &mut transfer).unwrap(),
            Some(DragNotification::BeginDrag)
        );

        let mut hovered = HashSet::new();
        for hover in &hovers {
            let zone = hover.get(&zone_ids);
            prop_assert!(coordinator.drag_over(zone));
            hovered.insert(zone.clone());
        }
        prop_assert_eq!(coordinator.drag_over_handles().len(), hovered.len());

        let target = drop_on.index(zones.len());
        let resolved = coordinator.drop(&zone_ids[target], &transfer).unwrap().unwrap();
        prop_assert_eq!(resolved.source, u32::MAX);
        prop_assert_eq!(resolved.target, u32::from(zones[target]));
        prop_assert!(!coordinator.is_dragging());

        coordinator.drag_end(&source);
        prop_assert!(coordinator.drag_over_handles().is_empty());
    }

    /// Leaving a dropzone for one of its own descendants keeps the hover;
    /// leaving for an unrelated element clears it.
    #[test]
    fn prop_leave_into_descendant_keeps_hover(depth in 1usize..8) {
        let mut coordinator = DragDropCoordinator::new();
        let zone = coordinator.mark_dropzone(&"body").dropzone_id;
        let source = coordinator.mark_draggable(&"tab").draggable_id;

        let mut arena = ElementArena::new();
        let root = arena.add(None);
        let zone_element = arena.add_dropzone(Some(root), zone.clone());
        let mut deepest = zone_element;
        for _ in 0..depth {
            deepest = arena.add(Some(deepest));
        }
        let outside = arena.add(Some(root));

        coordinator.drag_start(&source, &mut DataTransfer::new()).unwrap();
        coordinator.drag_enter(&zone);

        prop_assert!(!coordinator.drag_leave(&zone, &arena, Some(deepest)));
        prop_assert!(coordinator.is_drag_over(&zone));
        prop_assert_eq!(coordinator.hovered_dropzone(&arena, Some(deepest)), Some(&"body"));

        prop_assert!(coordinator.drag_leave(&zone, &arena, Some(outside)));
        prop_assert!(!coordinator.is_drag_over(&zone));
    }

    /// Suppression swallows exactly one drag start.
    #[test]
    fn prop_prevent_next_drag_is_one_shot(attempts in 1usize..6) {
        let mut coordinator = DragDropCoordinator::new();
        let source = coordinator.mark_draggable(&"tab").draggable_id;
        coordinator.prevent_next_drag();

        let mut started = 0;
        for _ in 0..attempts {
            if coordinator.drag_start(&source, &mut DataTransfer::new()).unwrap().is_some() {
                started += 1;
            }
            coordinator.drag_end(&source);
        }
        prop_assert_eq!(started, attempts - 1);
    }
}
