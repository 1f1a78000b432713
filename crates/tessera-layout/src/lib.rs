#![forbid(unsafe_code)]

//! Constraint-based layout.
//!
//! A [`Layout`] splits a [`Rect`] along one axis into one segment per
//! [`Constraint`], plus the spacers between and around them. Sizes are found
//! by a Cassowary [`solver`] with a fixed priority between constraint kinds,
//! and results are memoized in a [`LayoutCache`].
//!
//! ```
//! use tessera_layout::{Constraint, Layout, Rect};
//!
//! let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
//!     .areas(Rect::new(0, 0, 80, 24));
//! assert_eq!(header, Rect::new(0, 0, 80, 1));
//! assert_eq!(body, Rect::new(0, 1, 80, 23));
//! ```

pub mod cache;
mod constraint;
pub mod solver;
mod split;
pub mod strengths;

use std::fmt;

pub use cache::{
    DEFAULT_CACHE_CAPACITY, LayoutCache, LayoutCacheStats, Segments, Spacers, clear_layout_cache,
    layout_cache_stats, swap_layout_cache,
};
pub use constraint::Constraint;
pub use split::FLOAT_PRECISION_MULTIPLIER;
pub use tessera_core::geometry::{Margin, Position, Rect, Size};

use solver::AddConstraintError;

/// The direction to layout items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// How leftover space is distributed among spacers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flex {
    /// Interior spacers are exactly `spacing`, outer spacers are empty, and
    /// the segments absorb any leftover. `Min` does not grow.
    Legacy,
    /// Pack segments at the start; the trailing spacer takes the leftover.
    #[default]
    Start,
    /// Center segments; the outer spacers share the leftover equally.
    Center,
    /// Pack segments at the end; the leading spacer takes the leftover.
    End,
    /// All spacers (outer included) are equal and at least `spacing`.
    SpaceAround,
    /// Interior spacers are equal and at least `spacing`; outer spacers are empty.
    SpaceBetween,
}

/// Errors from splitting a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// A fixed-size destructuring asked for a different number of rects
    /// than the layout produces.
    CountMismatch {
        /// Requested count.
        expected: usize,
        /// Produced count.
        actual: usize,
    },
    /// The constraint solver rejected the system.
    Solver(AddConstraintError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { expected, actual } => write!(
                f,
                "layout produced {actual} rects but {expected} were requested"
            ),
            Self::Solver(e) => write!(f, "layout solver failed: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            Self::CountMismatch { .. } => None,
        }
    }
}

impl From<AddConstraintError> for LayoutError {
    fn from(err: AddConstraintError) -> Self {
        Self::Solver(err)
    }
}

/// A one-dimensional split of an area.
///
/// Layouts are plain values: equality and hashing are structural, which is
/// what the [`LayoutCache`] keys on. Building one per frame is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    direction: Direction,
    constraints: Vec<Constraint>,
    margin: Margin,
    flex: Flex,
    spacing: u16,
}

impl Layout {
    /// Create a layout with the given direction and constraints.
    pub fn new<I>(direction: Direction, constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        Self {
            direction,
            constraints: constraints.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Create a new vertical layout.
    pub fn vertical<I>(constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        Self::new(Direction::Vertical, constraints)
    }

    /// Create a new horizontal layout.
    pub fn horizontal<I>(constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        Self::new(Direction::Horizontal, constraints)
    }

    /// Reinitialize this thread's default layout cache with `capacity`
    /// entries. Zero disables caching.
    pub fn init_cache(capacity: usize) {
        cache::init_cache(capacity);
    }

    /// Set the layout direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the constraints.
    #[must_use]
    pub fn constraints<I>(mut self, constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the margin applied before splitting.
    #[must_use]
    pub fn margin(mut self, margin: impl Into<Margin>) -> Self {
        self.margin = margin.into();
        self
    }

    /// Set only the horizontal margin.
    #[must_use]
    pub fn horizontal_margin(mut self, horizontal: u16) -> Self {
        self.margin.horizontal = horizontal;
        self
    }

    /// Set only the vertical margin.
    #[must_use]
    pub fn vertical_margin(mut self, vertical: u16) -> Self {
        self.margin.vertical = vertical;
        self
    }

    /// Set the flex policy.
    #[must_use]
    pub fn flex(mut self, flex: Flex) -> Self {
        self.flex = flex;
        self
    }

    /// Set the spacing between segments.
    #[must_use]
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Number of constraints (and thus segments from [`split`](Self::split)).
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Split `area` into one rect per constraint.
    ///
    /// Uses this thread's default cache.
    ///
    /// # Panics
    ///
    /// If the solver rejects the constraint system, which indicates a bug.
    pub fn split(&self, area: Rect) -> Segments {
        self.split_with_spacers(area).0
    }

    /// Split `area` into segments and the `n + 1` spacers around them.
    ///
    /// # Panics
    ///
    /// See [`split`](Self::split).
    pub fn split_with_spacers(&self, area: Rect) -> (Segments, Spacers) {
        self.try_split_with_spacers(area)
            .unwrap_or_else(|err| panic!("failed to split {area}: {err}"))
    }

    /// Fallible form of [`split_with_spacers`](Self::split_with_spacers).
    pub fn try_split_with_spacers(&self, area: Rect) -> Result<(Segments, Spacers), LayoutError> {
        cache::with_thread_cache(|cache| self.try_split_with_cache(area, cache))
    }

    /// Split using an explicit cache instead of the thread default.
    ///
    /// # Panics
    ///
    /// See [`split`](Self::split).
    pub fn split_with_cache(&self, area: Rect, cache: &mut LayoutCache) -> (Segments, Spacers) {
        self.try_split_with_cache(area, cache)
            .unwrap_or_else(|err| panic!("failed to split {area}: {err}"))
    }

    /// Fallible form of [`split_with_cache`](Self::split_with_cache).
    pub fn try_split_with_cache(
        &self,
        area: Rect,
        cache: &mut LayoutCache,
    ) -> Result<(Segments, Spacers), LayoutError> {
        cache
            .get_or_try_insert_with(area, self, || split::solve(self, area))
            .map_err(|err| {
                tessera_core::warn!(%area, error = %err, "layout solve failed");
                LayoutError::from(err)
            })
    }

    /// Split into exactly `N` segments.
    ///
    /// # Panics
    ///
    /// If the layout does not have exactly `N` constraints.
    pub fn areas<const N: usize>(&self, area: Rect) -> [Rect; N] {
        self.try_areas(area).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Split into exactly `N` segments, or report the mismatch.
    pub fn try_areas<const N: usize>(&self, area: Rect) -> Result<[Rect; N], LayoutError> {
        let (segments, _) = self.try_split_with_spacers(area)?;
        to_array(&segments)
    }

    /// The `N` spacers of a split.
    ///
    /// # Panics
    ///
    /// If the layout does not produce exactly `N` spacers (one more than
    /// its constraint count).
    pub fn spacers<const N: usize>(&self, area: Rect) -> [Rect; N] {
        self.try_spacers(area).unwrap_or_else(|err| panic!("{err}"))
    }

    /// The `N` spacers of a split, or report the mismatch.
    pub fn try_spacers<const N: usize>(&self, area: Rect) -> Result<[Rect; N], LayoutError> {
        let (_, spacers) = self.try_split_with_spacers(area)?;
        to_array(&spacers)
    }
}

fn to_array<const N: usize>(rects: &[Rect]) -> Result<[Rect; N], LayoutError> {
    <[Rect; N]>::try_from(rects).map_err(|_| LayoutError::CountMismatch {
        expected: N,
        actual: rects.len(),
    })
}
