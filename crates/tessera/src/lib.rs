#![forbid(unsafe_code)]

//! Tessera public facade crate.
//!
//! Re-exports the layout solver and the render kernel behind one import and
//! offers a small prelude for day-to-day use.
//!
//! ```
//! use tessera::prelude::*;
//!
//! let area = Rect::new(0, 0, 20, 1);
//! let [label, value] = Layout::horizontal([Constraint::Length(6), Constraint::Fill(1)]).areas(area);
//!
//! let mut buf = Buffer::empty(area);
//! "name:".render(label, &mut buf);
//! "tessera".render(value, &mut buf);
//!
//! let changes = Buffer::empty(area).diff(&buf).count();
//! assert_eq!(changes, 12);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tessera_core::geometry::{Margin, Offset, Position, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use tessera_layout::solver::AddConstraintError;
pub use tessera_layout::{
    Constraint, DEFAULT_CACHE_CAPACITY, Direction, Flex, Layout, LayoutCache, LayoutCacheStats,
    LayoutError, clear_layout_cache, layout_cache_stats, swap_layout_cache,
};

// --- Render re-exports -----------------------------------------------------

pub use tessera_render::{
    Buffer, BufferDiff, Cell, ChangeRun, Color, Modifier, Style, Widget, display_width,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tessera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Splitting a layout failed.
    Layout(LayoutError),
    /// A constraint system handed straight to the solver was rejected.
    Solver(AddConstraintError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Solver(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Solver(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<AddConstraintError> for Error {
    fn from(err: AddConstraintError) -> Self {
        Self::Solver(err)
    }
}

/// Standard result type for Tessera APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Buffer, Cell, Color, Constraint, Direction, Error, Flex, Layout, Margin, Modifier,
        Position, Rect, Result, Size, Style, Widget,
    };

    pub use crate::{core, layout, render};
}

pub use tessera_core as core;
pub use tessera_layout as layout;
pub use tessera_render as render;
