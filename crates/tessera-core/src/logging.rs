#![forbid(unsafe_code)]

//! Logging shims shared by the Tessera crates.
//!
//! With the `tracing` feature the macros below are the real `tracing` macros.
//! Without it they expand to nothing (or to [`NoopSpan`]), so call sites in
//! the layout solver and the buffer differ compile the same either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, trace_span, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Evaluates to a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Evaluates to a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    /// Run `f` "inside" the span.
    pub fn in_scope<F: FnOnce() -> T, T>(&self, f: F) -> T {
        f()
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
