#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Everything here lives in the 16-bit terminal coordinate space. Arithmetic
//! that could leave `[0, u16::MAX]` saturates instead of wrapping or
//! panicking, because layouts routinely approach the boundary values.

use std::fmt;

/// A cell position in terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Position {
    /// The top-left corner of the canvas.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (u16, u16) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

impl From<Rect> for Position {
    fn from(rect: Rect) -> Self {
        rect.as_position()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for Size {
    fn from(rect: Rect) -> Self {
        rect.as_size()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Symmetric insets applied on both sides of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    /// Inset applied to the left and to the right.
    pub horizontal: u16,
    /// Inset applied to the top and to the bottom.
    pub vertical: u16,
}

impl Margin {
    /// No inset.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a margin with explicit horizontal and vertical insets.
    pub const fn new(horizontal: u16, vertical: u16) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Create a margin with the same inset on every side.
    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value)
    }

    /// Create a margin with horizontal insets only.
    pub const fn horizontal(value: u16) -> Self {
        Self::new(value, 0)
    }

    /// Create a margin with vertical insets only.
    pub const fn vertical(value: u16) -> Self {
        Self::new(0, value)
    }
}

impl From<u16> for Margin {
    fn from(value: u16) -> Self {
        Self::uniform(value)
    }
}

impl From<(u16, u16)> for Margin {
    fn from((horizontal, vertical): (u16, u16)) -> Self {
        Self::new(horizontal, vertical)
    }
}

/// A signed translation applied with [`Rect::offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Horizontal displacement (positive moves right).
    pub x: i32,
    /// Vertical displacement (positive moves down).
    pub y: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new offset.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle for layout bounds, buffer areas, and hit testing.
///
/// Uses terminal coordinates (0-indexed, origin at top-left). The right and
/// bottom edges are exclusive.
///
/// The fields are public; a rect built from a struct literal may have edges
/// past `u16::MAX`. Every method saturates on such values instead of
/// overflowing. Deserialization goes through [`Rect::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RectFields"))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

/// Unchecked wire form of [`Rect`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RectFields {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

#[cfg(feature = "serde")]
impl From<RectFields> for Rect {
    fn from(fields: RectFields) -> Self {
        Rect::new(fields.x, fields.y, fields.width, fields.height)
    }
}

impl Rect {
    /// The zero-area rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a new rectangle.
    ///
    /// Width and height are clamped so that the right and bottom edges stay
    /// within `u16::MAX`.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width: min_u16(width, u16::MAX - x),
            height: min_u16(height, u16::MAX - y),
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> u16 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left corner.
    #[inline]
    pub const fn as_position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Dimensions without the position.
    #[inline]
    pub const fn as_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a position is inside the rectangle (half-open on every edge).
    #[inline]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.x
            && position.x < self.right()
            && position.y >= self.y
            && position.y < self.bottom()
    }

    /// Shrink the rectangle by `margin` on both sides of each axis.
    ///
    /// Returns [`Rect::ZERO`] when the doubled margin does not fit.
    pub const fn inner(&self, margin: Margin) -> Rect {
        let doubled_horizontal = margin.horizontal.saturating_mul(2);
        let doubled_vertical = margin.vertical.saturating_mul(2);

        if self.width < doubled_horizontal || self.height < doubled_vertical {
            return Rect::ZERO;
        }

        Rect {
            x: self.x.saturating_add(margin.horizontal),
            y: self.y.saturating_add(margin.vertical),
            width: self.width - doubled_horizontal,
            height: self.height - doubled_vertical,
        }
    }

    /// Translate the rectangle, keeping it fully inside the 16-bit canvas.
    ///
    /// The size is preserved; the position saturates at the canvas edges.
    pub fn offset(&self, offset: Offset) -> Rect {
        let max_x = i32::from(u16::MAX - self.width);
        let max_y = i32::from(u16::MAX - self.height);
        let x = i32::from(self.x).saturating_add(offset.x).clamp(0, max_x);
        let y = i32::from(self.y).saturating_add(offset.y).clamp(0, max_y);

        Rect {
            x: x as u16,
            y: y as u16,
            width: self.width,
            height: self.height,
        }
    }

    /// The smallest rectangle that contains both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns [`Rect::ZERO`] if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Check whether the two rectangles share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }

    /// Move this rectangle so it fits inside `other`.
    ///
    /// The size is kept when possible; a rectangle larger than `other` is
    /// shrunk to `other`'s dimensions.
    pub fn clamp(&self, other: &Rect) -> Rect {
        let width = self.width.min(other.width);
        let height = self.height.min(other.height);
        let max_x = other.right().saturating_sub(width).max(other.x);
        let max_y = other.bottom().saturating_sub(height).max(other.y);
        let x = self.x.clamp(other.x, max_x);
        let y = self.y.clamp(other.y, max_y);
        Rect::new(x, y, width, height)
    }

    /// Iterate over the rows of this rectangle as one-cell-high rectangles.
    pub const fn rows(&self) -> Rows {
        Rows::new(*self)
    }

    /// Iterate over the columns of this rectangle as one-cell-wide rectangles.
    pub const fn columns(&self) -> Columns {
        Columns::new(*self)
    }

    /// Iterate over every position of this rectangle in row-major order.
    pub const fn positions(&self) -> Positions {
        Positions::new(*self)
    }
}

impl From<(Position, Size)> for Rect {
    fn from((position, size): (Position, Size)) -> Self {
        Rect::new(position.x, position.y, size.width, size.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[inline]
const fn min_u16(a: u16, b: u16) -> u16 {
    if a < b { a } else { b }
}

/// Lazy iterator over the rows of a [`Rect`].
#[derive(Debug, Clone)]
pub struct Rows {
    rect: Rect,
    front: u16,
    back: u16,
}

impl Rows {
    const fn new(rect: Rect) -> Self {
        Self {
            rect,
            front: rect.y,
            back: rect.bottom(),
        }
    }
}

impl Iterator for Rows {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.front >= self.back {
            return None;
        }
        let row = Rect::new(self.rect.x, self.front, self.rect.width, 1);
        self.front += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front) as usize;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Rows {
    fn next_back(&mut self) -> Option<Rect> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Rect::new(self.rect.x, self.back, self.rect.width, 1))
    }
}

impl ExactSizeIterator for Rows {}

/// Lazy iterator over the columns of a [`Rect`].
#[derive(Debug, Clone)]
pub struct Columns {
    rect: Rect,
    front: u16,
    back: u16,
}

impl Columns {
    const fn new(rect: Rect) -> Self {
        Self {
            rect,
            front: rect.x,
            back: rect.right(),
        }
    }
}

impl Iterator for Columns {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.front >= self.back {
            return None;
        }
        let column = Rect::new(self.front, self.rect.y, 1, self.rect.height);
        self.front += 1;
        Some(column)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front) as usize;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Columns {
    fn next_back(&mut self) -> Option<Rect> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Rect::new(self.back, self.rect.y, 1, self.rect.height))
    }
}

impl ExactSizeIterator for Columns {}

/// Lazy row-major iterator over the positions of a [`Rect`].
#[derive(Debug, Clone)]
pub struct Positions {
    rect: Rect,
    front: u32,
    back: u32,
}

impl Positions {
    const fn new(rect: Rect) -> Self {
        Self {
            rect,
            front: 0,
            back: rect.area(),
        }
    }

    fn position_at(&self, index: u32) -> Position {
        let width = u32::from(self.rect.width);
        Position::new(
            self.rect.x.saturating_add((index % width) as u16),
            self.rect.y.saturating_add((index / width) as u16),
        )
    }
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.front >= self.back {
            return None;
        }
        let position = self.position_at(self.front);
        self.front += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back - self.front) as usize;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Positions {
    fn next_back(&mut self) -> Option<Position> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.position_at(self.back))
    }
}

impl ExactSizeIterator for Positions {}

#[cfg(test)]
mod tests {
    use super::{Margin, Offset, Position, Rect, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(Position::new(2, 3)));
        assert!(rect.contains(Position::new(5, 7)));
        assert!(!rect.contains(Position::new(6, 3)));
        assert!(!rect.contains(Position::new(2, 8)));
    }

    #[test]
    fn rect_contains_empty_rect() {
        let r = Rect::new(5, 5, 0, 0);
        // Empty rect contains nothing, not even its own origin
        assert!(!r.contains(Position::new(5, 5)));
    }

    #[test]
    fn rect_new_clamps_to_canvas() {
        let r = Rect::new(u16::MAX - 5, u16::MAX - 3, 100, 100);
        assert_eq!(r.width, 5);
        assert_eq!(r.height, 3);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), u16::MAX);
    }

    #[test]
    fn rect_left_top_right_bottom() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.top(), 20);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn rect_area_and_is_empty() {
        assert_eq!(Rect::new(0, 0, 10, 20).area(), 200);
        assert_eq!(Rect::new(0, 0, u16::MAX, u16::MAX).area(), 65535 * 65535);
        assert!(Rect::new(5, 5, 0, 10).is_empty());
        assert!(Rect::new(5, 5, 10, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn rect_inner_reduces_each_axis_twice() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.inner(Margin::new(2, 1)), Rect::new(2, 1, 6, 8));
    }

    #[test]
    fn rect_inner_zero_margin_is_identity() {
        let r = Rect::new(5, 10, 20, 30);
        assert_eq!(r.inner(Margin::ZERO), r);
    }

    #[test]
    fn rect_inner_oversized_margin_is_zero() {
        let r = Rect::new(3, 3, 10, 10);
        assert_eq!(r.inner(Margin::uniform(6)), Rect::ZERO);
        assert_eq!(r.inner(Margin::new(0, 6)), Rect::ZERO);
        // Exactly consuming the width leaves an empty, positioned rect.
        assert_eq!(r.inner(Margin::horizontal(5)), Rect::new(8, 3, 0, 10));
    }

    #[test]
    fn rect_offset_moves_and_preserves_size() {
        let r = Rect::new(10, 10, 5, 5);
        assert_eq!(r.offset(Offset::new(3, -4)), Rect::new(13, 6, 5, 5));
    }

    #[test]
    fn rect_offset_saturates_at_canvas_edges() {
        let r = Rect::new(10, 10, 5, 5);
        assert_eq!(r.offset(Offset::new(-100, -100)), Rect::new(0, 0, 5, 5));
        assert_eq!(
            r.offset(Offset::new(i32::MAX, i32::MAX)),
            Rect::new(u16::MAX - 5, u16::MAX - 5, 5, 5)
        );
    }

    #[test]
    fn rect_union_disjoint() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(10, 10, 3, 3);
        assert_eq!(a.union(&b), Rect::new(0, 0, 13, 13));
    }

    #[test]
    fn rect_union_contained() {
        let outer = Rect::new(0, 0, 10, 10);
        let inner = Rect::new(2, 2, 3, 3);
        assert_eq!(outer.union(&inner), outer);
        assert_eq!(inner.union(&outer), outer);
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 4, 4);
        assert_eq!(a.intersection(&b), Rect::new(2, 2, 2, 2));
        assert!(a.intersects(&b));
    }

    #[test]
    fn rect_intersection_no_overlap_is_zero() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(3, 3, 2, 2);
        assert_eq!(a.intersection(&b), Rect::ZERO);
        assert_eq!(a.intersection_opt(&b), None);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn rect_intersection_adjacent_no_overlap() {
        // Rects share an edge but don't overlap (right edge is exclusive)
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(5, 0, 5, 5);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn rect_clamp_moves_inside() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(
            Rect::new(18, 8, 5, 5).clamp(&area),
            Rect::new(15, 5, 5, 5)
        );
        assert_eq!(Rect::new(2, 2, 5, 5).clamp(&area), Rect::new(2, 2, 5, 5));
    }

    #[test]
    fn rect_clamp_shrinks_when_larger() {
        let area = Rect::new(5, 5, 4, 4);
        assert_eq!(Rect::new(0, 0, 10, 2).clamp(&area), Rect::new(5, 5, 4, 2));
    }

    #[test]
    fn rect_rows_and_columns() {
        let r = Rect::new(1, 2, 3, 2);
        let rows: Vec<_> = r.rows().collect();
        assert_eq!(rows, vec![Rect::new(1, 2, 3, 1), Rect::new(1, 3, 3, 1)]);

        let columns: Vec<_> = r.columns().rev().collect();
        assert_eq!(
            columns,
            vec![
                Rect::new(3, 2, 1, 2),
                Rect::new(2, 2, 1, 2),
                Rect::new(1, 2, 1, 2),
            ]
        );
        assert_eq!(r.rows().len(), 2);
    }

    #[test]
    fn rect_positions_row_major() {
        let r = Rect::new(4, 7, 2, 2);
        let positions: Vec<_> = r.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(4, 7),
                Position::new(5, 7),
                Position::new(4, 8),
                Position::new(5, 8),
            ]
        );
        assert_eq!(r.positions().next_back(), Some(Position::new(5, 8)));
        assert_eq!(Rect::new(0, 0, 0, 9).positions().count(), 0);
    }

    #[test]
    fn conversions_and_display() {
        let r = Rect::from((Position::new(1, 2), Size::new(3, 4)));
        assert_eq!(r, Rect::new(1, 2, 3, 4));
        assert_eq!(Position::from(r), Position::new(1, 2));
        assert_eq!(Size::from(r), Size::new(3, 4));
        assert_eq!(r.to_string(), "3x4+1+2");
        assert_eq!(Size::new(80, 24).to_string(), "80x24");
        assert_eq!(Position::new(1, 2).to_string(), "(1, 2)");
        assert_eq!(Margin::from(2), Margin::uniform(2));
        assert_eq!(Margin::from((1, 3)), Margin::new(1, 3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rect_serde_shape() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rect_deserialize_clamps_edges() {
        let rect: Rect =
            serde_json::from_str(r#"{"x":65000,"y":65535,"width":1000,"height":7}"#).unwrap();
        assert_eq!(rect, Rect::new(65000, 65535, 1000, 7));
        assert_eq!(rect.width, 535);
        assert_eq!(rect.height, 0);
    }

    #[test]
    fn unchecked_rect_saturates() {
        let wide = Rect {
            x: 65000,
            y: 0,
            width: 1000,
            height: 1,
        };
        let clamped = Rect::new(0, 0, 1000, 1).clamp(&wide);
        assert_eq!(clamped.x, 65000);
        assert_eq!(wide.positions().last(), Some(Position::new(u16::MAX, 0)));
        assert_eq!(wide.positions().count(), 1000);
        assert_eq!(wide.right(), u16::MAX);
    }
}
