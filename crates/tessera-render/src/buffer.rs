#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The [`Buffer`] is a rectangular grid of [`Cell`]s backing a [`Rect`] of
//! the screen. Widgets draw into it; the runtime diffs consecutive buffers to
//! find what the terminal needs to redraw.
//!
//! # Layout
//!
//! Cells are stored in row-major order relative to the area origin:
//! `index = (y - area.y) * area.width + (x - area.x)`. All coordinates taken
//! and returned by the buffer are absolute screen coordinates.
//!
//! # Invariants
//!
//! 1. `content.len() == area.area()`; `resize` and `merge` re-establish it
//!    before returning.
//! 2. After any write through [`Buffer::set`], [`Buffer::set_string`] or
//!    [`Buffer::fill`], every skip cell belongs to a wide glyph to its left,
//!    and every wide glyph is followed by exactly `width - 1` skip cells.
//!    Writes through [`Buffer::get_mut`] bypass this bookkeeping.

use std::fmt;

use tessera_core::geometry::{Position, Rect};
use unicode_segmentation::UnicodeSegmentation;

use crate::cell::Cell;
use crate::style::Style;
use crate::{grapheme_width, is_control_cluster};

/// A rectangular grid of terminal cells.
///
/// # Example
///
/// ```
/// use tessera_render::{Buffer, Cell, Rect, Style};
///
/// let mut buffer = Buffer::empty(Rect::new(0, 0, 8, 2));
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set_string(1, 0, "i 日本", Style::new());
///
/// assert_eq!(buffer, Buffer::with_lines(["Hi 日本 ", "        "]));
/// assert!(buffer.get(4, 0).is_some_and(|cell| cell.skip));
/// ```
#[derive(Clone, Default)]
pub struct Buffer {
    area: Rect,
    content: Vec<Cell>,
}

impl Buffer {
    /// A buffer covering `area` filled with blank cells.
    pub fn empty(area: Rect) -> Self {
        Self::filled(area, Cell::EMPTY)
    }

    /// A buffer covering `area` with every cell set to `cell`.
    ///
    /// The cell is copied as-is; filling with a wide glyph does not create
    /// skip cells. Use [`Buffer::fill`] for that.
    pub fn filled(area: Rect, cell: Cell) -> Self {
        Self {
            area,
            content: vec![cell; area.area() as usize],
        }
    }

    /// A buffer at the origin whose rows are `lines`.
    ///
    /// Meant for test fixtures. Wide glyphs get their skip cells as if each
    /// line had been written with [`Buffer::set_string`].
    ///
    /// # Panics
    ///
    /// Panics if the lines do not all have the same display width.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let width = lines
            .first()
            .map_or(0, |line| crate::display_width(line.as_ref()));
        for (row, line) in lines.iter().enumerate() {
            let line_width = crate::display_width(line.as_ref());
            assert!(
                line_width == width,
                "inconsistent fixture: line {row} is {line_width} columns wide, expected {width}"
            );
        }

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let mut buffer = Self::empty(Rect::new(0, 0, width, height));
        for (y, line) in (0..height).zip(&lines) {
            buffer.set_string(0, y, line, Style::new());
        }
        buffer
    }

    /// The screen area this buffer covers.
    #[inline]
    pub const fn area(&self) -> &Rect {
        &self.area
    }

    /// All cells in row-major order.
    #[inline]
    pub fn content(&self) -> &[Cell] {
        &self.content
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    fn checked_index(&self, x: u16, y: u16) -> Option<usize> {
        if self.area.contains(Position::new(x, y)) {
            let row = usize::from(y - self.area.y);
            let column = usize::from(x - self.area.x);
            Some(row * usize::from(self.area.width) + column)
        } else {
            None
        }
    }

    /// Linear index of the absolute position `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the buffer area.
    pub fn index_of(&self, x: u16, y: u16) -> usize {
        self.checked_index(x, y).unwrap_or_else(|| {
            panic!(
                "index_of({x}, {y}) is outside the buffer area {}",
                self.area
            )
        })
    }

    /// Absolute position of the cell at linear index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Buffer::len`].
    pub fn pos_of(&self, index: usize) -> (u16, u16) {
        assert!(
            index < self.content.len(),
            "pos_of({index}) is outside a buffer of {} cells",
            self.content.len()
        );
        let width = usize::from(self.area.width);
        // Both quotients fit in u16 because index < width * height.
        let x = self.area.x.saturating_add((index % width) as u16);
        let y = self.area.y.saturating_add((index / width) as u16);
        (x, y)
    }

    /// The cell at `(x, y)`, or `None` outside the area.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.checked_index(x, y).map(|i| &self.content[i])
    }

    /// Mutable access to the cell at `(x, y)`.
    ///
    /// Changes made through the reference skip wide-glyph bookkeeping.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.checked_index(x, y).map(|i| &mut self.content[i])
    }

    /// Clear the wide glyph that currently covers `(x, y)`, if any.
    ///
    /// Writing over a leading cell turns its trailing cells into blanks.
    /// Writing over a skip cell blanks the owning leading cell and all of its
    /// trailing cells.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(idx) = self.checked_index(x, y) else {
            return;
        };

        if self.content[idx].skip {
            let mut head_x = x;
            while head_x > self.area.x {
                head_x -= 1;
                let head = &self.content[self.index_of(head_x, y)];
                if head.skip {
                    continue;
                }
                let width = head.width();
                if usize::from(head_x) + width > usize::from(x) {
                    self.blank_glyph(head_x, y, width);
                }
                return;
            }
        } else {
            let width = self.content[idx].width();
            self.blank_trailing(x, y, width);
        }
    }

    /// Blank a leading cell at `(x, y)` and the skip cells it owns.
    fn blank_glyph(&mut self, x: u16, y: u16, width: usize) {
        let idx = self.index_of(x, y);
        self.content[idx] = Cell::EMPTY;
        self.blank_trailing(x, y, width);
    }

    /// Blank the skip cells following a glyph of `width` at `(x, y)`.
    fn blank_trailing(&mut self, x: u16, y: u16, width: usize) {
        for i in 1..width {
            let Some(tail_x) = x.checked_add(i as u16) else {
                break;
            };
            match self.checked_index(tail_x, y) {
                Some(tail) if self.content[tail].skip => self.content[tail] = Cell::EMPTY,
                _ => break,
            }
        }
    }

    /// Write `cell` at `(x, y)`, keeping wide-glyph bookkeeping consistent.
    ///
    /// Positions outside the area are ignored. A glyph wider than one column
    /// is written only if all of its columns fit in the row; its trailing
    /// columns become blank skip cells. Returns whether anything was written.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(idx) = self.checked_index(x, y) else {
            return false;
        };
        let width = cell.width().max(1);

        if width > 1 && usize::from(x) + width > usize::from(self.area.right()) {
            return false;
        }

        for i in 0..width {
            self.cleanup_overlap(x + i as u16, y);
        }

        for i in 1..width {
            self.content[idx + i] = cell.trailing();
        }
        self.content[idx] = cell;
        true
    }

    /// Write `string` starting at `(x, y)` with `style` patched over the
    /// existing cell styles.
    ///
    /// See [`Buffer::set_stringn`].
    pub fn set_string<S, T>(&mut self, x: u16, y: u16, string: T, style: S) -> (u16, u16)
    where
        T: AsRef<str>,
        S: Into<Style>,
    {
        self.set_stringn(x, y, string, usize::MAX, style)
    }

    /// Write at most `max_width` columns of `string` starting at `(x, y)`.
    ///
    /// Control and zero-width grapheme clusters are dropped. Writing stops
    /// at the right edge of the area or when the next cluster would exceed
    /// `max_width`; a wide cluster that does not fit is not written at all.
    /// Returns the position after the last written cell.
    pub fn set_stringn<S, T>(
        &mut self,
        x: u16,
        y: u16,
        string: T,
        max_width: usize,
        style: S,
    ) -> (u16, u16)
    where
        T: AsRef<str>,
        S: Into<Style>,
    {
        let style = style.into();
        if self.checked_index(x, y).is_none() {
            return (x, y);
        }

        let limit = usize::from(self.area.right()).min(usize::from(x).saturating_add(max_width));
        let mut cursor = usize::from(x);

        for grapheme in string.as_ref().graphemes(true) {
            if is_control_cluster(grapheme) {
                continue;
            }
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if cursor + width > limit {
                break;
            }

            // cursor < right() <= u16::MAX here.
            let cx = cursor as u16;
            let mut cell = self.content[self.index_of(cx, y)].clone();
            cell.set_symbol(grapheme).set_style(style).set_skip(false);
            self.set(cx, y, cell);
            cursor += width;
        }

        (cursor as u16, y)
    }

    /// Patch `style` onto every cell in `area ∩ self.area`. Symbols are kept.
    pub fn set_style<S: Into<Style>>(&mut self, area: Rect, style: S) {
        let style = style.into();
        let area = self.area.intersection(&area);
        for position in area.positions() {
            let idx = self.index_of(position.x, position.y);
            self.content[idx].set_style(style);
        }
    }

    /// Write `cell` across `area ∩ self.area`.
    ///
    /// Wide cells are tiled at their width; leftover columns at the end of a
    /// row are left untouched.
    pub fn fill(&mut self, area: Rect, cell: &Cell) {
        let area = self.area.intersection(&area);
        let step = cell.width().max(1);
        for row in area.rows() {
            for x in (row.left()..row.right()).step_by(step) {
                if usize::from(x) + step > usize::from(row.right()) {
                    break;
                }
                self.set(x, row.y, cell.clone());
            }
        }
    }

    /// Blank every cell.
    pub fn reset(&mut self) {
        self.content.fill(Cell::EMPTY);
    }

    /// Cover `area` with blank cells, discarding the current contents.
    pub fn resize(&mut self, area: Rect) {
        let len = area.area() as usize;
        self.content.clear();
        self.content.resize(len, Cell::EMPTY);
        self.area = area;
    }

    /// Grow to the union of both areas and overlay `other` onto `self`.
    ///
    /// Existing cells keep their absolute positions. Cells of `other` are
    /// copied verbatim, including their skip flags.
    pub fn merge(&mut self, other: &Buffer) {
        let area = self.area.union(&other.area);
        let old_width = usize::from(self.area.width);
        let old_len = self.content.len();
        let new_width = usize::from(area.width);
        let offset_x = usize::from(self.area.x - area.x);
        let offset_y = usize::from(self.area.y - area.y);

        self.content.resize(area.area() as usize, Cell::EMPTY);

        // Every cell moves to an index at or after its old one, so walking
        // back to front never overwrites a cell that has not moved yet.
        for i in (0..old_len).rev() {
            let row = i / old_width + offset_y;
            let column = i % old_width + offset_x;
            let target = row * new_width + column;
            if target != i {
                self.content[target] = std::mem::take(&mut self.content[i]);
            }
        }
        self.area = area;

        for (i, cell) in other.content.iter().enumerate() {
            let (x, y) = other.pos_of(i);
            let idx = self.index_of(x, y);
            self.content[idx] = cell.clone();
        }
    }

    /// Cells of `next` that differ from `self`, as `(x, y, cell)`.
    ///
    /// Both cell arrays are walked in lock-step. A position is yielded when
    /// the cell in `next` is not a skip cell and differs by value (ignoring
    /// `skip`) from the cell in `self`. Both buffers are expected to cover
    /// the same area; well-formedness of either is not re-checked.
    ///
    /// ```
    /// use tessera_render::{Buffer, Rect, Style};
    ///
    /// let previous = Buffer::empty(Rect::new(0, 0, 4, 1));
    /// let mut next = previous.clone();
    /// next.set_string(0, 0, "日", Style::new());
    ///
    /// let changes: Vec<_> = previous.diff(&next).map(|(x, y, _)| (x, y)).collect();
    /// assert_eq!(changes, [(0, 0)]);
    /// ```
    pub fn diff<'a>(&'a self, next: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> + 'a {
        debug_assert_eq!(self.area, next.area, "diffed buffers must cover the same area");
        self.content
            .iter()
            .zip(&next.content)
            .enumerate()
            .filter(|(_, (previous, current))| !current.skip && previous != current)
            .map(|(i, (_, current))| {
                let (x, y) = next.pos_of(i);
                (x, y, current)
            })
    }
}

impl PartialEq for Buffer {
    /// Areas must match; positions where either cell is a skip cell are
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        self.area == other.area
            && self
                .content
                .iter()
                .zip(&other.content)
                .all(|(a, b)| a.skip || b.skip || a == b)
    }
}

impl Eq for Buffer {}

impl fmt::Debug for Buffer {
    /// Renders the symbols row by row, leaving out skip cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.area.width).max(1);
        let lines: Vec<String> = self
            .content
            .chunks(width)
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.skip)
                    .map(Cell::symbol)
                    .collect()
            })
            .collect();
        f.debug_struct("Buffer")
            .field("area", &format_args!("{}", self.area))
            .field("content", &lines)
            .finish()
    }
}
