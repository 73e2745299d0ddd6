use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};

/// Which side of a variable's bounds a synthesized constraint stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl BoundSide {
    pub fn as_str(self) -> &'static str {
        match self {
            BoundSide::Lower => "lower",
            BoundSide::Upper => "upper",
        }
    }

    /// Prefix used when naming the synthesized constraint.
    pub(crate) fn name_prefix(self) -> &'static str {
        match self {
            BoundSide::Lower => "lb_for_",
            BoundSide::Upper => "ub_for_",
        }
    }
}

/// Variable bound a synthesized constraint was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundOrigin {
    pub variable: VariableId,
    pub side: BoundSide,
}

/// Result of converting variable bounds into constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundConstraints {
    /// Block holding the synthesized constraints; `None` when nothing was converted.
    pub block: Option<String>,
    pub constraints: Vec<ConstraintId>,
}

impl BoundConstraints {
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Slack pair attached to one elasticized constraint.
///
/// `plus` exists when the constraint has a finite lower bound, `minus` when it
/// has a finite upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlackHandle {
    pub constraint_id: ConstraintId,
    pub plus: Option<VariableId>,
    pub minus: Option<VariableId>,
}

impl SlackHandle {
    /// Slack variables of the pair, plus first.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.plus.into_iter().chain(self.minus)
    }
}

/// Summary of an elasticization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticBlock {
    pub block: String,
    pub objective: ObjectiveId,
    pub handles: Vec<SlackHandle>,
}

impl ElasticBlock {
    /// Every slack variable, in constraint order.
    pub fn slack_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.handles.iter().flat_map(|handle| handle.variables())
    }

    pub fn handle_for(&self, constraint_id: ConstraintId) -> Option<&SlackHandle> {
        self.handles
            .iter()
            .find(|handle| handle.constraint_id == constraint_id)
    }
}
