use elastica_expr::Expr;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Bounds for a variable or constraint. Infinite values mean "no bound".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// No bound on either side.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    pub fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    pub fn exactly(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn has_lower(&self) -> bool {
        self.lower.is_finite()
    }

    pub fn has_upper(&self) -> bool {
        self.upper.is_finite()
    }

    pub fn is_free(&self) -> bool {
        !self.has_lower() && !self.has_upper()
    }

    pub fn is_equality(&self) -> bool {
        self.has_lower() && self.lower == self.upper
    }

    /// Tightest bounds implied by both `self` and `other`.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        Bounds::new(self.lower.max(other.lower), self.upper.min(other.upper))
    }

    pub(crate) fn is_nan(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::free()
    }
}

/// Domain restriction of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    #[default]
    Reals,
    NonNegativeReals,
    NonPositiveReals,
    UnitInterval,
    Integers,
    NonNegativeIntegers,
    Binary,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Reals => "reals",
            Domain::NonNegativeReals => "non_negative_reals",
            Domain::NonPositiveReals => "non_positive_reals",
            Domain::UnitInterval => "unit_interval",
            Domain::Integers => "integers",
            Domain::NonNegativeIntegers => "non_negative_integers",
            Domain::Binary => "binary",
        }
    }

    /// Bounds implied by the domain alone.
    pub fn bounds(self) -> Bounds {
        match self {
            Domain::Reals | Domain::Integers => Bounds::free(),
            Domain::NonNegativeReals | Domain::NonNegativeIntegers => Bounds::at_least(0.0),
            Domain::NonPositiveReals => Bounds::at_most(0.0),
            Domain::UnitInterval | Domain::Binary => Bounds::new(0.0, 1.0),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Domain::Integers | Domain::NonNegativeIntegers | Domain::Binary
        )
    }
}

/// A decision variable: value, explicit bounds, domain and fixed flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub value: Option<f64>,
    pub bounds: Bounds,
    pub domain: Domain,
    pub fixed: bool,
}

impl Variable {
    /// Create a continuous real variable with the given bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            value: None,
            bounds,
            domain: Domain::Reals,
            fixed: false,
        }
    }

    /// Create an unbounded variable restricted to `domain`.
    pub fn in_domain(domain: Domain) -> Self {
        Self {
            domain,
            ..Self::continuous(Bounds::free())
        }
    }

    /// Create a variable pinned at `value`.
    pub fn fixed_at(value: f64) -> Self {
        Self {
            value: Some(value),
            fixed: true,
            ..Self::continuous(Bounds::free())
        }
    }

    /// Set the starting value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Explicit bounds intersected with the domain's bounds.
    pub fn effective_bounds(&self) -> Bounds {
        self.bounds.intersect(&self.domain.bounds())
    }

    pub fn is_integer(&self) -> bool {
        self.domain.is_integer()
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::continuous(Bounds::free())
    }
}

/// A constraint `lower <= body <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub body: Expr,
    pub bounds: Bounds,
    pub active: bool,
}

impl Constraint {
    pub fn new(body: Expr, bounds: Bounds) -> Self {
        Self {
            body,
            bounds,
            active: true,
        }
    }

    pub fn is_equality(&self) -> bool {
        self.bounds.is_equality()
    }
}

/// An objective function with a sense.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Sense,
    pub expr: Expr,
    pub active: bool,
}

impl Objective {
    pub fn new(sense: Sense, expr: Expr) -> Self {
        Self {
            sense,
            expr,
            active: true,
        }
    }
}
