//! Property-based tests for the border resize state machine

use proptest::prelude::*;
use tiledock_core::resize::ResizeNoopReason;
use tiledock_core::{
    BorderResizeMachine, ItemId, Point, ResizeEffect, ResizeState, ResizeTarget, SplitDirection,
};

use super::arb_direction;

fn arb_moves() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-800.0..800.0f64, -800.0..800.0f64), 1..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whatever the pointer does, the two siblings always share the extent
    /// they had at pointer-down, and the commit carries the last update.
    #[test]
    fn prop_resize_conserves_total_extent(
        direction in arb_direction(),
        start_a in 10.0..1000.0f64,
        start_b in 10.0..1000.0f64,
        moves in arb_moves(),
    ) {
        let mut machine = BorderResizeMachine::new();
        let target = ResizeTarget::new(ItemId::from("split"), 0, direction);
        machine.pointer_down(target.clone(), Point::new(0.0, 0.0), (start_a, start_b));

        let mut last = (start_a, start_b);
        for (x, y) in moves {
            let transition = machine.pointer_move(Point::new(x, y));
            let ResizeEffect::Updated { weights, .. } = &transition.effect else {
                panic!("expected an update, got {:?}", transition.effect);
            };
            let weights = *weights;
            let delta = match direction {
                SplitDirection::Row => x,
                SplitDirection::Column => y,
            };
            prop_assert!((weights.0 + weights.1 - (start_a + start_b)).abs() < 1e-6);
            prop_assert!((weights.0 - (start_a + delta)).abs() < 1e-6);
            prop_assert_eq!(machine.pending_weights(&target.group, 0), Some(weights));
            last = weights;
        }

        let committed = machine.pointer_up();
        prop_assert_eq!(committed.effect, ResizeEffect::Committed { target, weights: last });
        prop_assert_eq!(machine.state(), &ResizeState::Idle);
        prop_assert_eq!(machine.cursor(), None);
    }

    /// Transition ids increase by one per event, no-ops included.
    #[test]
    fn prop_transition_ids_are_monotonic(events in prop::collection::vec(0u8..4, 1..30)) {
        let mut machine = BorderResizeMachine::new();
        let target = ResizeTarget::new(ItemId::from("split"), 1, SplitDirection::Column);
        let mut previous = 0;
        for event in events {
            let transition = match event {
                0 => machine.pointer_down(target.clone(), Point::new(5.0, 5.0), (100.0, 100.0)),
                1 => machine.pointer_move(Point::new(5.0, 40.0)),
                2 => machine.pointer_up(),
                _ => match machine.cancel() {
                    Some(transition) => transition,
                    None => continue,
                },
            };
            prop_assert_eq!(transition.transition_id, previous + 1);
            prop_assert_eq!(transition.to.clone(), machine.state().clone());
            previous = transition.transition_id;
        }
    }

    /// Moves and ups without a gesture are no-ops that keep the machine idle.
    #[test]
    fn prop_idle_events_are_noops(moves in arb_moves()) {
        let mut machine = BorderResizeMachine::new();
        for (x, y) in moves {
            let transition = machine.pointer_move(Point::new(x, y));
            prop_assert_eq!(
                transition.effect,
                ResizeEffect::Noop { reason: ResizeNoopReason::IdleWithoutActiveResize }
            );
        }
        prop_assert_eq!(
            machine.pointer_up().effect,
            ResizeEffect::Noop { reason: ResizeNoopReason::IdleWithoutActiveResize }
        );
        prop_assert!(!machine.is_active());
    }
}
