//! Constraint expressions: an expression between a lower and an upper bound.

use crate::expr::core::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
    Range,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
            ComparisonSense::Range => "range",
        }
    }
}

/// `lower <= expr <= upper`, with infinite bounds standing in for "absent".
#[derive(Debug, Clone)]
pub struct ConstraintExpr {
    expr: Expr,
    lower: f64,
    upper: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sense: ComparisonSense, rhs: f64) -> Self {
        let (lower, upper) = match sense {
            ComparisonSense::LessEqual => (f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => (rhs, f64::INFINITY),
            ComparisonSense::Equal | ComparisonSense::Range => (rhs, rhs),
        };
        Self { expr, lower, upper }
    }

    pub fn ranged(expr: Expr, lower: f64, upper: f64) -> Self {
        Self { expr, lower, upper }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Relational form implied by which bounds are finite.
    pub fn sense(&self) -> ComparisonSense {
        match (self.lower.is_finite(), self.upper.is_finite()) {
            (true, true) if self.lower == self.upper => ComparisonSense::Equal,
            (true, true) => ComparisonSense::Range,
            (true, false) => ComparisonSense::GreaterEqual,
            _ => ComparisonSense::LessEqual,
        }
    }

    pub fn into_parts(self) -> (Expr, f64, f64) {
        (self.expr, self.lower, self.upper)
    }
}
