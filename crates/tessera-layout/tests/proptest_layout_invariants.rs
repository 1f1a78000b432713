//! Property-based invariant tests for layout splitting.
//!
//! 1. Segments and spacers tile the inner area exactly, in order.
//! 2. Splitting is deterministic with or without a cache.
//! 3. All-`Length` lists that fit come back unchanged (packed flex modes).
//! 4. `Fill` weights split the area proportionally within rounding.
//! 5. Segments keep the orthogonal extent of the inner area.

use proptest::prelude::*;
use tessera_layout::{Constraint, Direction, Flex, Layout, LayoutCache, Margin, Rect};

// ── Helpers ─────────────────────────────────────────────────────────────

fn constraint_strategy() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        (0u16..=120).prop_map(Constraint::Min),
        (0u16..=120).prop_map(Constraint::Max),
        (0u16..=120).prop_map(Constraint::Length),
        (0u16..=100).prop_map(Constraint::Percentage),
        (0u32..=5, 0u32..=5).prop_map(|(n, d)| Constraint::Ratio(n, d)),
        (0u16..=5).prop_map(Constraint::Fill),
    ]
}

fn flex_strategy() -> impl Strategy<Value = Flex> {
    prop_oneof![
        Just(Flex::Legacy),
        Just(Flex::Start),
        Just(Flex::Center),
        Just(Flex::End),
        Just(Flex::SpaceAround),
        Just(Flex::SpaceBetween),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Horizontal), Just(Direction::Vertical)]
}

fn layout_strategy() -> impl Strategy<Value = Layout> {
    (
        direction_strategy(),
        prop::collection::vec(constraint_strategy(), 0..=6),
        flex_strategy(),
        0u16..=5,
        0u16..=3,
    )
        .prop_map(|(direction, constraints, flex, spacing, margin)| {
            Layout::new(direction, constraints)
                .flex(flex)
                .spacing(spacing)
                .margin(margin)
        })
}

fn area_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=50, 0u16..=50, 0u16..=200, 0u16..=200).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn axis(rect: &Rect, direction: Direction) -> (u16, u16) {
    match direction {
        Direction::Horizontal => (rect.x, rect.width),
        Direction::Vertical => (rect.y, rect.height),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Tiling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_and_spacers_tile(
        direction in direction_strategy(),
        constraints in prop::collection::vec(constraint_strategy(), 0..=6),
        flex in flex_strategy(),
        spacing in 0u16..=5,
        area in area_strategy(),
    ) {
        let layout = Layout::new(direction, constraints.clone()).flex(flex).spacing(spacing);
        let mut cache = LayoutCache::new(0);
        let (segments, spacers) = layout.split_with_cache(area, &mut cache);
        prop_assert_eq!(segments.len(), constraints.len());
        prop_assert_eq!(spacers.len(), constraints.len() + 1);

        let (start, length) = axis(&area, direction);
        let mut cursor = start;
        let mut interleaved = vec![spacers[0]];
        for (segment, spacer) in segments.iter().zip(&spacers[1..]) {
            interleaved.push(*segment);
            interleaved.push(*spacer);
        }
        for rect in &interleaved {
            let (offset, size) = axis(rect, direction);
            prop_assert_eq!(offset, cursor, "gap or overlap in {:?}", interleaved);
            cursor = offset + size;
        }
        prop_assert_eq!(cursor, start + length);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cache_never_changes_results(layout in layout_strategy(), area in area_strategy()) {
        let mut disabled = LayoutCache::new(0);
        let mut enabled = LayoutCache::new(8);

        let cold = layout.split_with_cache(area, &mut disabled);
        let miss = layout.split_with_cache(area, &mut enabled);
        let hit = layout.split_with_cache(area, &mut enabled);

        prop_assert_eq!(&cold, &miss);
        prop_assert_eq!(&miss, &hit);
        prop_assert_eq!(enabled.stats().hits, 1);
        prop_assert_eq!(layout.split_with_spacers(area), cold);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Lengths that fit are honoured
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fitting_lengths_are_exact(
        lengths in prop::collection::vec(0u16..=40, 1..=6),
        slack in 0u16..=50,
        spacing in 0u16..=3,
        flex in prop_oneof![Just(Flex::Start), Just(Flex::Center), Just(Flex::End)],
    ) {
        let gaps = spacing * (lengths.len() as u16 - 1);
        let total = lengths.iter().sum::<u16>() + gaps + slack;
        let layout = Layout::horizontal(Constraint::from_lengths(lengths.clone()))
            .flex(flex)
            .spacing(spacing);
        let widths: Vec<u16> = layout
            .split(Rect::new(0, 0, total, 1))
            .iter()
            .map(|r| r.width)
            .collect();
        prop_assert_eq!(widths, lengths);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Fill proportionality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fill_weights_are_proportional(size in 0u16..=600) {
        let layout = Layout::horizontal(Constraint::from_fills([1, 2, 3]));
        let rects = layout.split(Rect::new(0, 0, size, 1));
        let expected = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 2.0];
        for (rect, share) in rects.iter().zip(expected) {
            let ideal = f64::from(size) * share;
            prop_assert!(
                (f64::from(rect.width) - ideal).abs() <= 1.0,
                "width {} too far from {} (size {})",
                rect.width, ideal, size
            );
        }
        prop_assert_eq!(rects.iter().map(|r| r.width).sum::<u16>(), size);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Orthogonal extent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_span_inner_cross_axis(
        direction in direction_strategy(),
        constraints in prop::collection::vec(constraint_strategy(), 1..=6),
        flex in flex_strategy(),
        margin in 0u16..=3,
        area in area_strategy(),
    ) {
        let layout = Layout::new(direction, constraints).flex(flex).margin(margin);
        let inner = area.inner(Margin::uniform(margin));
        for rect in layout.split(area).iter() {
            match direction {
                Direction::Horizontal => {
                    prop_assert_eq!((rect.y, rect.height), (inner.y, inner.height));
                }
                Direction::Vertical => {
                    prop_assert_eq!((rect.x, rect.width), (inner.x, inner.width));
                }
            }
        }
    }
}
