//! Property-based tests for pointer-to-drop-region classification

use proptest::prelude::*;
use tiledock_core::geometry::drop_region_with_band;
use tiledock_core::{DROP_REGION_LENGTH_PX, DropRegion, Point, Rect, SplitDirection, drop_region};

/// Strategy for rectangles comfortably larger than two bands
fn arb_large_rect() -> impl Strategy<Value = Rect> {
    (-500.0..500.0f64, -500.0..500.0f64, 250.0..2000.0f64, 250.0..2000.0f64)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The middle of a region larger than two bands is always `Cover`.
    #[test]
    fn prop_center_is_cover(bounds in arb_large_rect()) {
        let center = Point::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0);
        prop_assert_eq!(drop_region(&bounds, center), DropRegion::Cover);
    }

    /// Anything in the top band is `Top`, corners included.
    #[test]
    fn prop_top_band_wins_over_sides(
        bounds in arb_large_rect(),
        dx in 0.0..1.0f64,
        dy in 0.0..0.99f64,
    ) {
        let pointer = Point::new(
            bounds.x + dx * bounds.width,
            bounds.y + dy * DROP_REGION_LENGTH_PX,
        );
        prop_assert_eq!(drop_region(&bounds, pointer), DropRegion::Top);
    }

    /// Between the top and bottom bands, the left band resolves to `Left`
    /// and the right band to `Right`.
    #[test]
    fn prop_side_bands(
        bounds in arb_large_rect(),
        inset in 0.0..0.99f64,
        dy in 0.0..1.0f64,
    ) {
        let band = DROP_REGION_LENGTH_PX;
        let y = bounds.y + band + 1.0 + dy * (bounds.height - 2.0 * band - 2.0);
        let left = Point::new(bounds.x + inset * band, y);
        let right = Point::new(bounds.x + bounds.width - inset * band, y);
        prop_assert_eq!(drop_region(&bounds, left), DropRegion::Left);
        prop_assert_eq!(drop_region(&bounds, right), DropRegion::Right);
    }

    /// A wider band only ever turns `Cover` into an edge, never the reverse.
    #[test]
    fn prop_wider_band_never_adds_cover(
        bounds in arb_large_rect(),
        fx in 0.0..1.0f64,
        fy in 0.0..1.0f64,
        extra in 0.0..100.0f64,
    ) {
        let pointer = Point::new(bounds.x + fx * bounds.width, bounds.y + fy * bounds.height);
        let narrow = drop_region_with_band(&bounds, pointer, DROP_REGION_LENGTH_PX);
        let wide = drop_region_with_band(&bounds, pointer, DROP_REGION_LENGTH_PX + extra);
        if narrow != DropRegion::Cover {
            prop_assert_ne!(wide, DropRegion::Cover);
        }
    }

    /// Edge regions split along the axis they sit on.
    #[test]
    fn prop_edge_regions_split_on_their_axis(
        bounds in arb_large_rect(),
        fx in 0.0..1.0f64,
        fy in 0.0..1.0f64,
    ) {
        let pointer = Point::new(bounds.x + fx * bounds.width, bounds.y + fy * bounds.height);
        let region = drop_region(&bounds, pointer);
        let expected = match region {
            DropRegion::Left | DropRegion::Right => Some(SplitDirection::Row),
            DropRegion::Top | DropRegion::Bottom => Some(SplitDirection::Column),
            DropRegion::Cover => None,
        };
        prop_assert_eq!(region.split_direction(), expected);
        prop_assert_eq!(region.to_string().parse::<DropRegion>().ok(), Some(region));
    }
}
