//! Property-based invariant tests for buffer writes and diffs.
//!
//! 1. Wide-glyph bookkeeping survives arbitrary overlapping writes.
//! 2. A buffer never differs from itself.
//! 3. Applying a diff to the old buffer reproduces the new one.
//! 4. Diffs never yield skip cells or unchanged cells.
//! 5. Merge covers both areas and keeps every cell of the overlay.

use proptest::prelude::*;
use tessera_render::{Buffer, Cell, Color, Rect, Style};

// ── Helpers ─────────────────────────────────────────────────────────────

const GLYPHS: &[&str] = &["a", "b", "日", "本", "👍", "e\u{301}", " ", "\t", "\u{200B}"];

#[derive(Debug, Clone)]
enum Op {
    Set { x: u16, y: u16, glyph: usize },
    Write { x: u16, y: u16, text: Vec<usize>, max_width: usize },
    Style { area: Rect, color: u8 },
    Fill { area: Rect, glyph: usize },
}

fn rect_strategy(width: u16, height: u16) -> impl Strategy<Value = Rect> {
    (0..=width, 0..=height, 0..=width, 0..=height).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn op_strategy(width: u16, height: u16) -> impl Strategy<Value = Op> {
    let glyph = 0..GLYPHS.len();
    prop_oneof![
        (0..width + 2, 0..height + 1, glyph.clone())
            .prop_map(|(x, y, glyph)| Op::Set { x, y, glyph }),
        (
            0..width + 2,
            0..height + 1,
            prop::collection::vec(glyph.clone(), 0..8),
            0usize..12,
        )
            .prop_map(|(x, y, text, max_width)| Op::Write { x, y, text, max_width }),
        (rect_strategy(width, height), any::<u8>()).prop_map(|(area, color)| Op::Style { area, color }),
        (rect_strategy(width, height), glyph).prop_map(|(area, glyph)| Op::Fill { area, glyph }),
    ]
}

fn apply(buffer: &mut Buffer, op: &Op) {
    match op {
        Op::Set { x, y, glyph } => {
            buffer.set(*x, *y, Cell::new(GLYPHS[*glyph]));
        }
        Op::Write { x, y, text, max_width } => {
            let text: String = text.iter().map(|&i| GLYPHS[i]).collect();
            buffer.set_stringn(*x, *y, text, *max_width, Style::new());
        }
        Op::Style { area, color } => {
            buffer.set_style(*area, Style::new().bg(Color::Indexed(*color)));
        }
        Op::Fill { area, glyph } => {
            buffer.fill(*area, &Cell::new(GLYPHS[*glyph]));
        }
    }
}

fn buffer_strategy(width: u16, height: u16) -> impl Strategy<Value = Buffer> {
    prop::collection::vec(op_strategy(width, height), 0..24).prop_map(move |ops| {
        let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
        for op in &ops {
            apply(&mut buffer, op);
        }
        buffer
    })
}

/// Every skip cell is owned by the glyph to its left, and every wide glyph
/// is followed by exactly `width - 1` skip cells.
fn assert_well_formed(buffer: &Buffer) -> Result<(), TestCaseError> {
    let area = *buffer.area();
    for y in area.top()..area.bottom() {
        let mut x = area.left();
        while x < area.right() {
            let Some(cell) = buffer.get(x, y) else {
                return Err(TestCaseError::fail(format!("missing cell at ({x}, {y})")));
            };
            prop_assert!(!cell.skip, "orphan skip cell at ({}, {}) in {:?}", x, y, buffer);
            let width = cell.width().max(1) as u16;
            prop_assert!(x + width <= area.right(), "glyph at ({}, {}) overflows", x, y);
            for tail in x + 1..x + width {
                prop_assert!(
                    buffer.get(tail, y).is_some_and(|cell| cell.skip),
                    "missing skip cell at ({}, {}) in {:?}",
                    tail,
                    y,
                    buffer
                );
            }
            x += width;
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Wide-glyph bookkeeping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn writes_keep_buffer_well_formed(buffer in buffer_strategy(9, 3)) {
        assert_well_formed(&buffer)?;
        prop_assert_eq!(buffer.len(), 27);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Diff
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn self_diff_is_empty(buffer in buffer_strategy(8, 3)) {
        prop_assert_eq!(buffer.diff(&buffer).count(), 0);
    }

    #[test]
    fn applying_diff_reproduces_next(
        previous in buffer_strategy(8, 3),
        next in buffer_strategy(8, 3),
    ) {
        let mut patched = previous.clone();
        for (x, y, cell) in previous.diff(&next) {
            if let Some(target) = patched.get_mut(x, y) {
                *target = cell.clone();
            }
        }
        prop_assert_eq!(patched, next);
    }

    #[test]
    fn diff_yields_only_real_changes(
        previous in buffer_strategy(8, 3),
        next in buffer_strategy(8, 3),
    ) {
        for (x, y, cell) in previous.diff(&next) {
            prop_assert!(!cell.skip);
            prop_assert_eq!(Some(cell), next.get(x, y));
            prop_assert_ne!(Some(cell), previous.get(x, y));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Merge
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_covers_union_and_keeps_overlay(
        (ax, ay, aw, ah) in (0u16..6, 0u16..6, 0u16..6, 0u16..6),
        (bx, by, bw, bh) in (0u16..6, 0u16..6, 1u16..6, 1u16..6),
    ) {
        let a_area = Rect::new(ax, ay, aw, ah);
        let b_area = Rect::new(bx, by, bw, bh);
        let mut merged = Buffer::filled(a_area, Cell::from_char('a'));
        let overlay = Buffer::filled(b_area, Cell::from_char('b'));
        merged.merge(&overlay);

        let union = a_area.union(&b_area);
        prop_assert_eq!(*merged.area(), union);
        prop_assert_eq!(merged.len(), union.area() as usize);
        for position in union.positions() {
            let symbol = merged.get(position.x, position.y).map(Cell::symbol);
            let expected = if b_area.contains(position) {
                "b"
            } else if a_area.contains(position) {
                "a"
            } else {
                " "
            };
            prop_assert_eq!(symbol, Some(expected));
        }
    }
}
