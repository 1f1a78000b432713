#![forbid(unsafe_code)]

//! Core: geometry primitives and the logging shims used across Tessera.

pub mod geometry;
pub mod logging;

pub use geometry::{Columns, Margin, Offset, Position, Positions, Rect, Rows, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
