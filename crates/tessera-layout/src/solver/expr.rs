//! Variables, linear expressions and the constraints built from them.

use std::ops::{Add, Mul, Neg, Sub};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::strength;

static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// An unknown whose value the [`Solver`](super::Solver) determines.
///
/// Identity is by id: two calls to [`Variable::new`] never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(usize);

impl Variable {
    /// Allocate a fresh variable.
    pub fn new() -> Self {
        Self(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

/// `coefficient * variable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub variable: Variable,
    pub coefficient: f64,
}

impl Term {
    pub const fn new(variable: Variable, coefficient: f64) -> Self {
        Self {
            variable,
            coefficient,
        }
    }
}

/// A sum of terms plus a constant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    pub terms: Vec<Term>,
    pub constant: f64,
}

impl Expression {
    pub fn new(terms: Vec<Term>, constant: f64) -> Self {
        Self { terms, constant }
    }

    pub fn from_constant(constant: f64) -> Self {
        Self::new(Vec::new(), constant)
    }

    fn scale(mut self, factor: f64) -> Self {
        for term in &mut self.terms {
            term.coefficient *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Self::new(vec![Term::new(variable, 1.0)], 0.0)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self::new(vec![term], 0.0)
    }
}

/// How the two sides of a [`LinearConstraint`] relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

/// `expression <op> 0` with a strength.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    expression: Expression,
    operator: RelationalOperator,
    strength: f64,
}

impl LinearConstraint {
    /// Build a constraint. The strength is clipped to `[0, REQUIRED]`.
    pub fn new(expression: Expression, operator: RelationalOperator, strength: f64) -> Self {
        Self {
            expression,
            operator,
            strength: strength::clip(strength),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn operator(&self) -> RelationalOperator {
        self.operator
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

/// Builders for `lhs <op> rhs` constraints.
///
/// Implemented for everything convertible to an [`Expression`], so
/// variables, terms, constants and expressions can all start a relation.
pub trait Relation: Into<Expression> + Sized {
    fn equal_to(self, rhs: impl Into<Expression>, strength: f64) -> LinearConstraint {
        relate(self, rhs, RelationalOperator::Equal, strength)
    }

    fn at_most(self, rhs: impl Into<Expression>, strength: f64) -> LinearConstraint {
        relate(self, rhs, RelationalOperator::LessOrEqual, strength)
    }

    fn at_least(self, rhs: impl Into<Expression>, strength: f64) -> LinearConstraint {
        relate(self, rhs, RelationalOperator::GreaterOrEqual, strength)
    }
}

impl<T: Into<Expression>> Relation for T {}

fn relate(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
    operator: RelationalOperator,
    strength: f64,
) -> LinearConstraint {
    LinearConstraint::new(lhs.into() - rhs.into(), operator, strength)
}

// ── Operators ───────────────────────────────────────────────────────────

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        self.scale(-1.0)
    }
}

impl Add for Expression {
    type Output = Expression;

    fn add(mut self, rhs: Expression) -> Expression {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        self + (-rhs)
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Expression {
        self.scale(rhs)
    }
}

impl Add<f64> for Expression {
    type Output = Expression;

    fn add(mut self, rhs: f64) -> Expression {
        self.constant += rhs;
        self
    }
}

impl Sub<f64> for Expression {
    type Output = Expression;

    fn sub(mut self, rhs: f64) -> Expression {
        self.constant -= rhs;
        self
    }
}

impl Add<Variable> for Expression {
    type Output = Expression;

    fn add(self, rhs: Variable) -> Expression {
        self + Expression::from(rhs)
    }
}

impl Sub<Variable> for Expression {
    type Output = Expression;

    fn sub(self, rhs: Variable) -> Expression {
        self - Expression::from(rhs)
    }
}

impl Add<Term> for Expression {
    type Output = Expression;

    fn add(mut self, rhs: Term) -> Expression {
        self.terms.push(rhs);
        self
    }
}

impl Add for Variable {
    type Output = Expression;

    fn add(self, rhs: Variable) -> Expression {
        Expression::from(self) + Expression::from(rhs)
    }
}

impl Sub for Variable {
    type Output = Expression;

    fn sub(self, rhs: Variable) -> Expression {
        Expression::from(self) - Expression::from(rhs)
    }
}

impl Add<f64> for Variable {
    type Output = Expression;

    fn add(self, rhs: f64) -> Expression {
        Expression::from(self) + rhs
    }
}

impl Sub<f64> for Variable {
    type Output = Expression;

    fn sub(self, rhs: f64) -> Expression {
        Expression::from(self) - rhs
    }
}

impl Mul<f64> for Variable {
    type Output = Term;

    fn mul(self, rhs: f64) -> Term {
        Term::new(self, rhs)
    }
}

impl Mul<Variable> for f64 {
    type Output = Term;

    fn mul(self, rhs: Variable) -> Term {
        Term::new(rhs, self)
    }
}

impl Add for Term {
    type Output = Expression;

    fn add(self, rhs: Term) -> Expression {
        Expression::new(vec![self, rhs], 0.0)
    }
}

impl Sub for Term {
    type Output = Expression;

    fn sub(self, rhs: Term) -> Expression {
        Expression::from(self) - Expression::from(rhs)
    }
}
