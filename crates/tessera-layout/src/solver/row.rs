//! Tableau rows and the symbols they are written in.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

const EPSILON: f64 = 1.0e-8;

#[inline]
pub(crate) fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum SymbolKind {
    Invalid,
    External,
    Slack,
    Error,
    Dummy,
}

/// A tableau column. Ordered by id so pivot choices are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Symbol {
    id: usize,
    kind: SymbolKind,
}

impl Symbol {
    pub(crate) const INVALID: Symbol = Symbol {
        id: 0,
        kind: SymbolKind::Invalid,
    };

    pub(crate) const fn new(id: usize, kind: SymbolKind) -> Self {
        Self { id, kind }
    }

    pub(crate) fn is_invalid(self) -> bool {
        self.kind == SymbolKind::Invalid
    }

    pub(crate) fn is_external(self) -> bool {
        self.kind == SymbolKind::External
    }

    pub(crate) fn is_dummy(self) -> bool {
        self.kind == SymbolKind::Dummy
    }

    /// Slack and error symbols may enter the basis.
    pub(crate) fn is_pivotable(self) -> bool {
        matches!(self.kind, SymbolKind::Slack | SymbolKind::Error)
    }

    /// Restricted symbols must stay non-negative.
    pub(crate) fn is_restricted(self) -> bool {
        !self.is_external()
    }
}

/// `basic = constant + Σ coefficient * symbol`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Row {
    pub(crate) cells: FxHashMap<Symbol, f64>,
    pub(crate) constant: f64,
}

impl Row {
    pub(crate) fn new(constant: f64) -> Self {
        Self {
            cells: FxHashMap::default(),
            constant,
        }
    }

    pub(crate) fn coefficient_for(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Add `coefficient * symbol`, dropping the cell if it cancels out.
    pub(crate) fn insert_symbol(&mut self, symbol: Symbol, coefficient: f64) {
        match self.cells.entry(symbol) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coefficient;
                if near_zero(*entry.get()) {
                    entry.remove();
                }
            }
            Entry::Vacant(entry) => {
                if !near_zero(coefficient) {
                    entry.insert(coefficient);
                }
            }
        }
    }

    /// Add `coefficient * other` to this row.
    pub(crate) fn insert_row(&mut self, other: &Row, coefficient: f64) {
        self.constant += other.constant * coefficient;
        for (&symbol, &value) in &other.cells {
            self.insert_symbol(symbol, value * coefficient);
        }
    }

    pub(crate) fn remove(&mut self, symbol: Symbol) {
        self.cells.remove(&symbol);
    }

    pub(crate) fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for value in self.cells.values_mut() {
            *value = -*value;
        }
    }

    /// Rewrite `0 = self` as `symbol = ...`.
    ///
    /// `symbol` must be present in the row.
    pub(crate) fn solve_for_symbol(&mut self, symbol: Symbol) {
        let Some(coefficient) = self.cells.remove(&symbol) else {
            debug_assert!(false, "solve_for_symbol on absent {symbol:?}");
            return;
        };
        let scale = -1.0 / coefficient;
        self.constant *= scale;
        for value in self.cells.values_mut() {
            *value *= scale;
        }
    }

    /// Rewrite `lhs = self` as `rhs = ...`.
    pub(crate) fn solve_for_symbols(&mut self, lhs: Symbol, rhs: Symbol) {
        self.insert_symbol(lhs, -1.0);
        self.solve_for_symbol(rhs);
    }

    /// Replace `symbol` with the expression held in `row`.
    pub(crate) fn substitute(&mut self, symbol: Symbol, row: &Row) {
        if let Some(coefficient) = self.cells.remove(&symbol) {
            self.insert_row(row, coefficient);
        }
    }
}
