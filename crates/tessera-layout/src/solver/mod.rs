#![forbid(unsafe_code)]

//! A small Cassowary constraint solver.
//!
//! Constraints are linear relations over [`Variable`]s with a strength.
//! Required constraints must hold; weaker ones are satisfied as well as
//! possible, stronger first. The solver keeps a simplex tableau and
//! re-optimises incrementally after every [`Solver::add_constraint`].
//!
//! ```
//! use tessera_layout::solver::{Relation, Solver, Variable, strength};
//!
//! let left = Variable::new();
//! let right = Variable::new();
//! let mut solver = Solver::new();
//! solver.add_constraint(left.equal_to(0.0, strength::REQUIRED)).unwrap();
//! solver.add_constraint((right - left).at_least(10.0, strength::REQUIRED)).unwrap();
//! solver.add_constraint(right.equal_to(4.0, strength::WEAK)).unwrap();
//! assert_eq!(solver.value(right), 10.0);
//! ```
//!
//! Only additions are supported; the layout engine builds a fresh solver
//! per split.

mod expr;
mod row;
pub mod strength;

pub use expr::{Expression, LinearConstraint, Relation, RelationalOperator, Term, Variable};

use std::fmt;

use rustc_hash::FxHashMap;

use row::{Row, Symbol, SymbolKind, near_zero};

/// Why a constraint could not be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddConstraintError {
    /// A required constraint conflicts with the ones already added.
    Unsatisfiable,
    /// The objective has no lower bound.
    Unbounded,
}

impl fmt::Display for AddConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsatisfiable => write!(f, "required constraint is unsatisfiable"),
            Self::Unbounded => write!(f, "objective function is unbounded"),
        }
    }
}

impl std::error::Error for AddConstraintError {}

/// Symbols introduced for one constraint.
#[derive(Debug, Clone, Copy)]
struct Tag {
    marker: Symbol,
    other: Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Objective {
    Main,
    Artificial,
}

/// Incremental Cassowary solver.
///
/// After an error the tableau may be left partially updated; drop the solver.
#[derive(Debug, Default)]
pub struct Solver {
    var_symbols: FxHashMap<Variable, Symbol>,
    rows: FxHashMap<Symbol, Row>,
    objective: Row,
    artificial: Option<Row>,
    id_tick: usize,
}

impl Solver {
    /// Create an empty solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every constraint in `constraints`, stopping at the first failure.
    pub fn add_constraints(
        &mut self,
        constraints: impl IntoIterator<Item = LinearConstraint>,
    ) -> Result<(), AddConstraintError> {
        constraints
            .into_iter()
            .try_for_each(|constraint| self.add_constraint(constraint))
    }

    /// Add a constraint and re-optimise.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> Result<(), AddConstraintError> {
        let (mut row, tag) = self.create_row(&constraint);
        let mut subject = choose_subject(&row, tag);

        // A row made only of dummies is a required equality: it either
        // holds already or never will.
        if subject.is_invalid() && row.cells.keys().all(|s| s.is_dummy()) {
            if !near_zero(row.constant) {
                return Err(AddConstraintError::Unsatisfiable);
            }
            subject = tag.marker;
        }

        if subject.is_invalid() {
            if !self.add_with_artificial_variable(&row)? {
                return Err(AddConstraintError::Unsatisfiable);
            }
        } else {
            row.solve_for_symbol(subject);
            self.substitute(subject, &row);
            self.rows.insert(subject, row);
        }

        self.optimise(Objective::Main)
    }

    /// Current value of `variable`. Unknown variables read as zero.
    pub fn value(&self, variable: Variable) -> f64 {
        self.var_symbols
            .get(&variable)
            .and_then(|symbol| self.rows.get(symbol))
            .map_or(0.0, |row| row.constant)
    }

    fn new_symbol(&mut self, kind: SymbolKind) -> Symbol {
        self.id_tick += 1;
        Symbol::new(self.id_tick, kind)
    }

    fn var_symbol(&mut self, variable: Variable) -> Symbol {
        if let Some(&symbol) = self.var_symbols.get(&variable) {
            return symbol;
        }
        let symbol = self.new_symbol(SymbolKind::External);
        self.var_symbols.insert(variable, symbol);
        symbol
    }

    /// Translate a constraint into a tableau row over the current basis.
    fn create_row(&mut self, constraint: &LinearConstraint) -> (Row, Tag) {
        let expression = constraint.expression();
        let strength = constraint.strength();
        let mut row = Row::new(expression.constant);

        for term in &expression.terms {
            if near_zero(term.coefficient) {
                continue;
            }
            let symbol = self.var_symbol(term.variable);
            match self.rows.get(&symbol) {
                Some(basic) => row.insert_row(basic, term.coefficient),
                None => row.insert_symbol(symbol, term.coefficient),
            }
        }

        let required = strength >= strength::REQUIRED;
        let tag = match constraint.operator() {
            RelationalOperator::LessOrEqual | RelationalOperator::GreaterOrEqual => {
                let coefficient = if constraint.operator() == RelationalOperator::LessOrEqual {
                    1.0
                } else {
                    -1.0
                };
                let slack = self.new_symbol(SymbolKind::Slack);
                row.insert_symbol(slack, coefficient);
                if required {
                    Tag {
                        marker: slack,
                        other: Symbol::INVALID,
                    }
                } else {
                    let error = self.new_symbol(SymbolKind::Error);
                    row.insert_symbol(error, -coefficient);
                    self.objective.insert_symbol(error, strength);
                    Tag {
                        marker: slack,
                        other: error,
                    }
                }
            }
            RelationalOperator::Equal => {
                if required {
                    let dummy = self.new_symbol(SymbolKind::Dummy);
                    row.insert_symbol(dummy, 1.0);
                    Tag {
                        marker: dummy,
                        other: Symbol::INVALID,
                    }
                } else {
                    let plus = self.new_symbol(SymbolKind::Error);
                    let minus = self.new_symbol(SymbolKind::Error);
                    row.insert_symbol(plus, -1.0);
                    row.insert_symbol(minus, 1.0);
                    self.objective.insert_symbol(plus, strength);
                    self.objective.insert_symbol(minus, strength);
                    Tag {
                        marker: plus,
                        other: minus,
                    }
                }
            }
        };

        if row.constant < 0.0 {
            row.reverse_sign();
        }
        (row, tag)
    }

    /// Phase-one simplex: find a feasible basis for `row` using a temporary
    /// artificial variable. Returns whether the row could be satisfied.
    fn add_with_artificial_variable(&mut self, row: &Row) -> Result<bool, AddConstraintError> {
        let artificial = self.new_symbol(SymbolKind::Slack);
        self.rows.insert(artificial, row.clone());
        self.artificial = Some(row.clone());

        self.optimise(Objective::Artificial)?;
        let success = self
            .artificial
            .take()
            .is_some_and(|objective| near_zero(objective.constant));

        if let Some(mut basic) = self.rows.remove(&artificial) {
            if basic.cells.is_empty() {
                return Ok(success);
            }
            let Some(entering) = basic.cells.keys().copied().filter(|s| s.is_pivotable()).min()
            else {
                return Ok(false);
            };
            basic.solve_for_symbols(artificial, entering);
            self.substitute(entering, &basic);
            self.rows.insert(entering, basic);
        }

        for row in self.rows.values_mut() {
            row.remove(artificial);
        }
        self.objective.remove(artificial);
        Ok(success)
    }

    /// Replace `symbol` everywhere with `row`.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for basic in self.rows.values_mut() {
            basic.substitute(symbol, row);
        }
        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    /// Primal simplex on the selected objective until no improving pivot remains.
    fn optimise(&mut self, which: Objective) -> Result<(), AddConstraintError> {
        loop {
            let objective = match which {
                Objective::Main => &self.objective,
                Objective::Artificial => match self.artificial.as_ref() {
                    Some(row) => row,
                    None => return Ok(()),
                },
            };

            let Some(entering) = entering_symbol(objective) else {
                return Ok(());
            };
            let leaving = self
                .leaving_symbol(entering)
                .ok_or(AddConstraintError::Unbounded)?;
            let Some(mut row) = self.rows.remove(&leaving) else {
                return Err(AddConstraintError::Unbounded);
            };
            row.solve_for_symbols(leaving, entering);
            self.substitute(entering, &row);
            self.rows.insert(entering, row);
        }
    }

    /// Minimum-ratio test over the restricted rows.
    fn leaving_symbol(&self, entering: Symbol) -> Option<Symbol> {
        let mut best: Option<(f64, Symbol)> = None;
        for (&symbol, row) in &self.rows {
            if !symbol.is_restricted() {
                continue;
            }
            let coefficient = row.coefficient_for(entering);
            if coefficient >= 0.0 {
                continue;
            }
            let ratio = -row.constant / coefficient;
            let better = match best {
                None => true,
                Some((best_ratio, best_symbol)) => {
                    ratio < best_ratio || (ratio == best_ratio && symbol < best_symbol)
                }
            };
            if better {
                best = Some((ratio, symbol));
            }
        }
        best.map(|(_, symbol)| symbol)
    }
}

/// Pick the symbol a new row is solved for: an external variable if there is
/// one, else a fresh slack/error symbol with a negative coefficient.
fn choose_subject(row: &Row, tag: Tag) -> Symbol {
    if let Some(external) = row.cells.keys().copied().filter(|s| s.is_external()).min() {
        return external;
    }
    for candidate in [tag.marker, tag.other] {
        if candidate.is_pivotable() && row.coefficient_for(candidate) < 0.0 {
            return candidate;
        }
    }
    Symbol::INVALID
}

/// Lowest-id non-dummy symbol with a negative objective coefficient.
fn entering_symbol(objective: &Row) -> Option<Symbol> {
    objective
        .cells
        .iter()
        .filter(|(symbol, coefficient)| !symbol.is_dummy() && **coefficient < 0.0)
        .map(|(&symbol, _)| symbol)
        .min()
}
