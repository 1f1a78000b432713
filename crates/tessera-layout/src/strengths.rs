//! Strengths used by the layout solver, strongest first.
//!
//! The ordering between constraint kinds lives here and nowhere else:
//! `Min > Max > Length > Percentage > Ratio > Fill`.

use crate::solver::strength::{MEDIUM, REQUIRED, STRONG, WEAK};

/// Interior spacers match the configured spacing; equal-spacer rules.
pub const SPACER_SIZE_EQ: f64 = REQUIRED / 10.0;

/// `Min(v)`: size ≥ v.
pub const MIN_SIZE_GE: f64 = STRONG * 100.0;

/// `Max(v)`: size ≤ v.
pub const MAX_SIZE_LE: f64 = STRONG * 50.0;

/// `Length(v)`: size == v.
pub const LENGTH_SIZE_EQ: f64 = STRONG * 10.0;

/// `Percentage(p)`: size == area × p / 100.
pub const PERCENTAGE_SIZE_EQ: f64 = STRONG;

/// `Ratio(n, d)`: size == area × n / d.
pub const RATIO_SIZE_EQ: f64 = STRONG / 10.0;

/// Legacy `Min(v)`: pull the size down to v.
pub const MIN_SIZE_EQ: f64 = MEDIUM * 10.0;

/// `Max(v)`: pull the size up to v.
pub const MAX_SIZE_EQ: f64 = MEDIUM * 10.0;

/// `Fill` (and non-legacy `Min`) growth toward the full area.
pub const FILL_GROW: f64 = MEDIUM;

/// Outer spacer growth and fill proportionality.
pub const GROW: f64 = 100.0;

/// Spacer growth for `SpaceAround` / `SpaceBetween`.
pub const SPACE_GROW: f64 = WEAK * 10.0;

/// Equal-neighbour tie breaking.
pub const ALL_SEGMENT_GROW: f64 = WEAK;

/// "This spacer is empty": just below required so it can still yield to
/// the required bounds.
pub const SPACER_EMPTY_EQ: f64 = REQUIRED - 1.0;
