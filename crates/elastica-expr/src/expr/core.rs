//! Core expression type: terms by degree + constant.
//!
//! Constraint bodies and objectives are polynomials of degree at most three.
//! Terms are stored in separate Vecs per degree:
//! - linear:    (VarId, f64)
//! - quadratic: (VarId, VarId, f64)
//! - cubic:     (VarId, VarId, VarId, f64)
//!
//! Backends that only understand linear rows check [`Expr::is_linear`] and
//! reject anything else.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::expr::error::EvaluationError;
use crate::ids::VariableId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    linear: Vec<(VariableId, f64)>,
    quadratic: Vec<(VariableId, VariableId, f64)>,
    cubic: Vec<(VariableId, VariableId, VariableId, f64)>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Expression from linear terms and constant.
    pub fn new(linear: Vec<(VariableId, f64)>, constant: f64) -> Self {
        Self {
            constant,
            linear,
            ..Default::default()
        }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    /// Single linear term: coeff * var.
    pub fn term(var_id: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            linear: vec![(var_id, coeff)],
            ..Default::default()
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var_id: VariableId) -> Self {
        Self::term(var_id, 1.0)
    }

    /// From raw linear terms, no constant.
    pub fn from_linear(linear: Vec<(VariableId, f64)>) -> Self {
        Self {
            linear,
            ..Default::default()
        }
    }

    /// Bilinear term: coeff * a * b.
    pub fn product(a: VariableId, b: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            quadratic: vec![(a, b, coeff)],
            ..Default::default()
        }
    }

    /// Trilinear term: coeff * a * b * c.
    pub fn triple_product(a: VariableId, b: VariableId, c: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            cubic: vec![(a, b, c, coeff)],
            ..Default::default()
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.linear
    }

    pub fn quadratic_terms(&self) -> &[(VariableId, VariableId, f64)] {
        &self.quadratic
    }

    pub fn cubic_terms(&self) -> &[(VariableId, VariableId, VariableId, f64)] {
        &self.cubic
    }

    /// Consume and return linear terms.
    pub fn into_linear_terms(self) -> Vec<(VariableId, f64)> {
        self.linear
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if !self.cubic.is_empty() {
            3
        } else if !self.quadratic.is_empty() {
            2
        } else {
            usize::from(!self.linear.is_empty())
        }
    }

    /// True when no quadratic or cubic terms are present.
    pub fn is_linear(&self) -> bool {
        self.degree() <= 1
    }

    /// Every variable referenced by the expression, in id order.
    pub fn variables(&self) -> BTreeSet<VariableId> {
        let mut vars: BTreeSet<VariableId> = self.linear.iter().map(|(v, _)| *v).collect();
        for (a, b, _) in &self.quadratic {
            vars.insert(*a);
            vars.insert(*b);
        }
        for (a, b, c, _) in &self.cubic {
            vars.insert(*a);
            vars.insert(*b);
            vars.insert(*c);
        }
        vars
    }

    // ── Operations (degree-agnostic) ────────────────────────

    /// Scale all terms and constant by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            linear: self
                .linear
                .iter()
                .map(|(v, c)| (*v, *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
            quadratic: self
                .quadratic
                .iter()
                .map(|(a, b, c)| (*a, *b, *c * by))
                .filter(|(_, _, c)| *c != 0.0)
                .collect(),
            cubic: self
                .cubic
                .iter()
                .map(|(a, b, c, d)| (*a, *b, *c, *d * by))
                .filter(|(_, _, _, d)| *d != 0.0)
                .collect(),
        }
    }

    /// Add another expression (merges all degree terms + constants).
    pub fn add(&self, other: &Expr) -> Self {
        let mut linear = Vec::with_capacity(self.linear.len() + other.linear.len());
        linear.extend_from_slice(&self.linear);
        linear.extend_from_slice(&other.linear);

        let mut quadratic = Vec::with_capacity(self.quadratic.len() + other.quadratic.len());
        quadratic.extend_from_slice(&self.quadratic);
        quadratic.extend_from_slice(&other.quadratic);

        let mut cubic = Vec::with_capacity(self.cubic.len() + other.cubic.len());
        cubic.extend_from_slice(&self.cubic);
        cubic.extend_from_slice(&other.cubic);

        Self {
            constant: self.constant + other.constant,
            linear,
            quadratic,
            cubic,
        }
    }

    /// Append a single linear term in place.
    pub fn push_term(&mut self, var_id: VariableId, coeff: f64) {
        if coeff != 0.0 {
            self.linear.push((var_id, coeff));
        }
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        Self {
            constant: 0.0,
            ..self.clone()
        }
    }

    /// Merged linear terms with duplicates combined.
    pub fn normalized_terms(&self) -> Vec<(VariableId, f64)> {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in &self.linear {
            if *coeff == 0.0 {
                continue;
            }
            *merged.entry(*var_id).or_insert(0.0) += *coeff;
        }
        merged.into_iter().filter(|(_, c)| *c != 0.0).collect()
    }

    /// Evaluate the expression at the point given by `value_of`.
    ///
    /// A variable without a value, or a non-finite result, is an
    /// evaluation failure.
    pub fn evaluate<F>(&self, value_of: F) -> Result<f64, EvaluationError>
    where
        F: Fn(VariableId) -> Option<f64>,
    {
        let get = |id: VariableId| value_of(id).ok_or(EvaluationError::MissingValue(id));

        let mut total = self.constant;
        for (v, c) in &self.linear {
            total += c * get(*v)?;
        }
        for (a, b, c) in &self.quadratic {
            total += c * get(*a)? * get(*b)?;
        }
        for (a, b, c, d) in &self.cubic {
            total += d * get(*a)? * get(*b)? * get(*c)?;
        }

        if total.is_finite() {
            Ok(total)
        } else {
            Err(EvaluationError::NonFinite { value: total })
        }
    }

    // ── Comparison methods (produce ConstraintExpr) ─────────

    pub fn compare_scalar(&self, rhs: f64, sense: ComparisonSense) -> ConstraintExpr {
        ConstraintExpr::new(self.without_constant(), sense, rhs - self.constant)
    }

    pub fn compare_expr(&self, other: &Expr, sense: ComparisonSense) -> ConstraintExpr {
        let combined = self.add(&other.scale(-1.0));
        ConstraintExpr::new(combined.without_constant(), sense, -combined.constant)
    }

    /// `lower <= self <= upper`.
    pub fn between(&self, lower: f64, upper: f64) -> ConstraintExpr {
        ConstraintExpr::ranged(
            self.without_constant(),
            lower - self.constant,
            upper - self.constant,
        )
    }

    pub fn le_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::Equal)
    }

    pub fn le_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::Equal)
    }
}

// ── Operator overloads ──────────────────────────────────────

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs)
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs.scale(-1.0))
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}
