#![forbid(unsafe_code)]

//! Translating a [`Layout`] into solver constraints and back into rects.
//!
//! The split axis is modelled as `2n + 2` boundary variables. Consecutive
//! pairs alternate between spacers and segments:
//!
//! ```text
//! v0   v1        v2   v3        v4   ...   v2n+1
//! |spc0|  seg0   |spc1|  seg1   |spc2| ... |
//! ```
//!
//! Coordinates are scaled by [`FLOAT_PRECISION_MULTIPLIER`] before solving and
//! boundaries (not sizes) are rounded afterwards, so segments and spacers
//! always tile the inner area exactly.

use std::iter;
use std::rc::Rc;

use tessera_core::geometry::Rect;

use crate::cache::{Segments, Spacers};
use crate::solver::strength::REQUIRED;
use crate::solver::{AddConstraintError, Expression, LinearConstraint, Relation, Solver, Variable};
use crate::strengths::{
    ALL_SEGMENT_GROW, FILL_GROW, GROW, LENGTH_SIZE_EQ, MAX_SIZE_EQ, MAX_SIZE_LE, MIN_SIZE_EQ,
    MIN_SIZE_GE, PERCENTAGE_SIZE_EQ, RATIO_SIZE_EQ, SPACE_GROW, SPACER_EMPTY_EQ, SPACER_SIZE_EQ,
};
use crate::{Constraint, Direction, Flex, Layout};

/// Scale applied to cell coordinates before solving.
pub const FLOAT_PRECISION_MULTIPLIER: f64 = 100.0;

/// Smallest weight a `Fill(0)` segment is given.
const MIN_FILL_WEIGHT: f64 = 1e-6;

/// An interval `[start, end]` on the split axis.
#[derive(Debug, Clone, Copy)]
struct Element {
    start: Variable,
    end: Variable,
}

impl Element {
    fn new(start: Variable, end: Variable) -> Self {
        Self { start, end }
    }

    fn size(&self) -> Expression {
        self.end - self.start
    }

    fn has_size(&self, size: impl Into<Expression>, strength: f64) -> LinearConstraint {
        self.size().equal_to(size, strength)
    }

    fn has_cells(&self, cells: u16, strength: f64) -> LinearConstraint {
        self.has_size(scaled(cells), strength)
    }

    fn has_min_cells(&self, cells: u16, strength: f64) -> LinearConstraint {
        self.size().at_least(scaled(cells), strength)
    }

    fn has_max_cells(&self, cells: u16, strength: f64) -> LinearConstraint {
        self.size().at_most(scaled(cells), strength)
    }

    fn is_empty(&self) -> LinearConstraint {
        self.has_size(0.0, SPACER_EMPTY_EQ)
    }
}

fn scaled(cells: u16) -> f64 {
    f64::from(cells) * FLOAT_PRECISION_MULTIPLIER
}

/// Solve `layout` over `area` without consulting any cache.
pub(crate) fn solve(layout: &Layout, area: Rect) -> Result<(Segments, Spacers), AddConstraintError> {
    let span = tessera_core::debug_span!(
        "layout_solve",
        constraints = layout.constraints.len(),
        flex = ?layout.flex,
        %area
    );
    let _guard = span.enter();

    let inner = area.inner(layout.margin);
    let (start, end) = match layout.direction {
        Direction::Horizontal => (inner.left(), inner.right()),
        Direction::Vertical => (inner.top(), inner.bottom()),
    };
    let area_start = scaled(start);
    let area_end = scaled(end);
    let area_size = area_end - area_start;

    let variables: Vec<Variable> = iter::repeat_with(Variable::new)
        .take(layout.constraints.len() * 2 + 2)
        .collect();
    let spacers: Vec<Element> = variables
        .chunks_exact(2)
        .map(|pair| Element::new(pair[0], pair[1]))
        .collect();
    let segments: Vec<Element> = variables[1..]
        .chunks_exact(2)
        .map(|pair| Element::new(pair[0], pair[1]))
        .collect();

    let mut solver = Solver::new();
    configure_boundaries(&mut solver, &variables, area_start, area_end)?;
    configure_flex(&mut solver, area_size, &spacers, layout.flex, layout.spacing)?;
    configure_segments(&mut solver, area_size, &segments, &layout.constraints, layout.flex)?;
    configure_fill(&mut solver, &segments, &layout.constraints, layout.flex)?;

    if layout.flex != Flex::Legacy {
        for pair in segments.windows(2) {
            solver.add_constraint(pair[0].has_size(pair[1].size(), ALL_SEGMENT_GROW))?;
        }
    }

    let segment_rects = to_rects(&solver, &segments, inner, layout.direction);
    let spacer_rects = to_rects(&solver, &spacers, inner, layout.direction);
    tessera_core::trace!(segments = ?segment_rects, "layout solved");
    Ok((segment_rects, spacer_rects))
}

/// Every boundary lies inside the area, in order, pinned at both ends.
fn configure_boundaries(
    solver: &mut Solver,
    variables: &[Variable],
    area_start: f64,
    area_end: f64,
) -> Result<(), AddConstraintError> {
    for &variable in variables {
        solver.add_constraint(variable.at_least(area_start, REQUIRED))?;
        solver.add_constraint(variable.at_most(area_end, REQUIRED))?;
    }
    for pair in variables.windows(2) {
        solver.add_constraint(pair[0].at_most(pair[1], REQUIRED))?;
    }
    if let (Some(&first), Some(&last)) = (variables.first(), variables.last()) {
        solver.add_constraint(first.equal_to(area_start, REQUIRED))?;
        solver.add_constraint(last.equal_to(area_end, REQUIRED))?;
    }
    Ok(())
}

fn configure_flex(
    solver: &mut Solver,
    area_size: f64,
    spacers: &[Element],
    flex: Flex,
    spacing: u16,
) -> Result<(), AddConstraintError> {
    let (Some(first), Some(last)) = (spacers.first(), spacers.last()) else {
        return Ok(());
    };
    let interior: &[Element] = if spacers.len() > 2 {
        &spacers[1..spacers.len() - 1]
    } else {
        &[]
    };

    match flex {
        Flex::Legacy => {
            for spacer in interior {
                solver.add_constraint(spacer.has_cells(spacing, SPACER_SIZE_EQ))?;
            }
            solver.add_constraint(first.is_empty())?;
            solver.add_constraint(last.is_empty())?;
        }
        Flex::Start => {
            for spacer in interior {
                solver.add_constraint(spacer.has_cells(spacing, SPACER_SIZE_EQ))?;
            }
            solver.add_constraint(first.is_empty())?;
            solver.add_constraint(last.has_size(area_size, GROW))?;
        }
        Flex::Center => {
            for spacer in interior {
                solver.add_constraint(spacer.has_cells(spacing, SPACER_SIZE_EQ))?;
            }
            solver.add_constraint(first.has_size(area_size, GROW))?;
            solver.add_constraint(last.has_size(area_size, GROW))?;
            solver.add_constraint(first.has_size(last.size(), SPACER_SIZE_EQ))?;
        }
        Flex::End => {
            for spacer in interior {
                solver.add_constraint(spacer.has_cells(spacing, SPACER_SIZE_EQ))?;
            }
            solver.add_constraint(last.is_empty())?;
            solver.add_constraint(first.has_size(area_size, GROW))?;
        }
        Flex::SpaceAround => {
            configure_equal_spacers(solver, area_size, spacers, spacing)?;
        }
        Flex::SpaceBetween => {
            configure_equal_spacers(solver, area_size, interior, spacing)?;
            solver.add_constraint(first.is_empty())?;
            solver.add_constraint(last.is_empty())?;
        }
    }
    Ok(())
}

/// Spacers share leftover space equally, never dropping below `spacing`.
fn configure_equal_spacers(
    solver: &mut Solver,
    area_size: f64,
    spacers: &[Element],
    spacing: u16,
) -> Result<(), AddConstraintError> {
    for (i, left) in spacers.iter().enumerate() {
        for right in &spacers[i + 1..] {
            solver.add_constraint(left.has_size(right.size(), SPACER_SIZE_EQ))?;
        }
    }
    for spacer in spacers {
        solver.add_constraint(spacer.has_min_cells(spacing, SPACER_SIZE_EQ))?;
        solver.add_constraint(spacer.has_size(area_size, SPACE_GROW))?;
    }
    Ok(())
}

fn configure_segments(
    solver: &mut Solver,
    area_size: f64,
    segments: &[Element],
    constraints: &[Constraint],
    flex: Flex,
) -> Result<(), AddConstraintError> {
    for (&constraint, segment) in constraints.iter().zip(segments) {
        match constraint {
            Constraint::Max(max) => {
                solver.add_constraint(segment.has_max_cells(max, MAX_SIZE_LE))?;
                solver.add_constraint(segment.has_cells(max, MAX_SIZE_EQ))?;
            }
            Constraint::Min(min) => {
                solver.add_constraint(segment.has_min_cells(min, MIN_SIZE_GE))?;
                if flex == Flex::Legacy {
                    solver.add_constraint(segment.has_cells(min, MIN_SIZE_EQ))?;
                } else {
                    solver.add_constraint(segment.has_size(area_size, FILL_GROW))?;
                }
            }
            Constraint::Length(length) => {
                solver.add_constraint(segment.has_cells(length, LENGTH_SIZE_EQ))?;
            }
            Constraint::Percentage(percentage) => {
                let size = area_size * f64::from(percentage) / 100.0;
                solver.add_constraint(segment.has_size(size, PERCENTAGE_SIZE_EQ))?;
            }
            Constraint::Ratio(numerator, denominator) => {
                let size = area_size * f64::from(numerator) / f64::from(denominator.max(1));
                solver.add_constraint(segment.has_size(size, RATIO_SIZE_EQ))?;
            }
            Constraint::Fill(_) => {
                solver.add_constraint(segment.has_size(area_size, FILL_GROW))?;
            }
        }
    }
    Ok(())
}

/// Weight of a segment in proportional growth, if it takes part.
fn fill_weight(constraint: Constraint, flex: Flex) -> Option<f64> {
    match constraint {
        Constraint::Fill(weight) => Some(f64::from(weight).max(MIN_FILL_WEIGHT)),
        Constraint::Min(_) if flex != Flex::Legacy => Some(1.0),
        _ => None,
    }
}

/// `size_a / weight_a == size_b / weight_b` for every pair of growing segments.
fn configure_fill(
    solver: &mut Solver,
    segments: &[Element],
    constraints: &[Constraint],
    flex: Flex,
) -> Result<(), AddConstraintError> {
    let growing: Vec<(f64, &Element)> = constraints
        .iter()
        .zip(segments)
        .filter_map(|(&constraint, segment)| fill_weight(constraint, flex).map(|w| (w, segment)))
        .collect();

    for (i, &(left_weight, left)) in growing.iter().enumerate() {
        for &(right_weight, right) in &growing[i + 1..] {
            let lhs = left.size() * right_weight;
            let rhs = right.size() * left_weight;
            solver.add_constraint(lhs.equal_to(rhs, GROW))?;
        }
    }
    Ok(())
}

fn to_rects(solver: &Solver, elements: &[Element], inner: Rect, direction: Direction) -> Rc<[Rect]> {
    elements
        .iter()
        .map(|element| {
            let start = boundary(solver.value(element.start));
            let end = boundary(solver.value(element.end));
            let size = end.saturating_sub(start);
            match direction {
                Direction::Horizontal => Rect::new(start, inner.y, size, inner.height),
                Direction::Vertical => Rect::new(inner.x, start, inner.width, size),
            }
        })
        .collect()
}

/// Unscale a solved boundary to the nearest cell. `as` saturates at the u16 range.
fn boundary(value: f64) -> u16 {
    (value / FLOAT_PRECISION_MULTIPLIER).round() as u16
}
