#![forbid(unsafe_code)]

//! Diff computation between buffers.
//!
//! [`Buffer::diff`] is the lazy form: it borrows both buffers and yields
//! `(x, y, &Cell)` for every changed cell. [`BufferDiff`] materializes the
//! positions so they can outlive the borrow, and coalesces them into
//! [`ChangeRun`]s: a backend positions the cursor once per run instead of
//! once per cell.
//!
//! # Usage
//!
//! ```
//! use tessera_render::{Buffer, BufferDiff, Cell, Rect};
//!
//! let old = Buffer::empty(Rect::new(0, 0, 80, 24));
//! let mut new = old.clone();
//!
//! new.set(5, 5, Cell::from_char('X'));
//! new.set(6, 5, Cell::from_char('Y'));
//!
//! let diff = BufferDiff::compute(&old, &new);
//! assert_eq!(diff.len(), 2);
//!
//! // Adjacent cells form one run
//! let runs = diff.runs();
//! assert_eq!(runs.len(), 1);
//! ```

use crate::buffer::Buffer;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row.
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

impl ChangeRun {
    #[inline]
    pub const fn new(y: u16, x0: u16, x1: u16) -> Self {
        debug_assert!(x0 <= x1);
        Self { y, x0, x1 }
    }

    /// Number of cells in this run.
    #[inline]
    pub const fn len(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    /// Always false for runs built by [`BufferDiff::runs`].
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x1 < self.x0
    }
}

/// Changed positions between two buffers, in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the positions yielded by [`Buffer::diff`].
    ///
    /// Both buffers are expected to cover the same area.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        let span = tessera_core::debug_span!(
            "diff_compute",
            width = new.area().width,
            height = new.area().height
        );
        let _guard = span.enter();

        let changes: Vec<(u16, u16)> = old.diff(new).map(|(x, y, _)| (x, y)).collect();

        tessera_core::trace!(changes = changes.len(), "diff computed");
        Self { changes }
    }

    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed `(x, y)` positions.
    #[inline]
    pub fn changes(&self) -> &[(u16, u16)] {
        &self.changes
    }

    /// Coalesce consecutive columns on the same row into runs.
    ///
    /// A wide glyph's skip cells are not changes, so a run stops before
    /// them even when the next glyph also changed.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs: Vec<ChangeRun> = Vec::new();

        // Changes are already sorted by (y, x) from the row-major walk.
        for &(x, y) in &self.changes {
            match runs.last_mut() {
                Some(run) if run.y == y && x.checked_sub(run.x1) == Some(1) => run.x1 = x,
                _ => runs.push(ChangeRun::new(y, x, x)),
            }
        }

        tessera_core::trace!(run_count = runs.len(), "runs coalesced");
        runs
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.changes.iter().copied()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
