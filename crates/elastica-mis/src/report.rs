//! Human-readable and structured results of a diagnosis run.

use std::fmt;

use serde::Serialize;

use elastica_core::{BoundSide, ConstraintId, Model};

use crate::DiagnosisError;
use crate::crossref::VariableMap;
use crate::relax::{RelaxationRound, RelaxationScope};

/// A constraint or variable bound of the caller's model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportItem {
    Constraint { name: String },
    LowerBound { variable: String },
    UpperBound { variable: String },
}

impl ReportItem {
    /// Name of the constraint or bounded variable.
    pub fn name(&self) -> &str {
        match self {
            ReportItem::Constraint { name } => name,
            ReportItem::LowerBound { variable } | ReportItem::UpperBound { variable } => variable,
        }
    }

    pub fn constraint(name: impl Into<String>) -> Self {
        ReportItem::Constraint { name: name.into() }
    }

    pub fn lower_bound(variable: impl Into<String>) -> Self {
        ReportItem::LowerBound {
            variable: variable.into(),
        }
    }

    pub fn upper_bound(variable: impl Into<String>) -> Self {
        ReportItem::UpperBound {
            variable: variable.into(),
        }
    }
}

impl fmt::Display for ReportItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportItem::Constraint { name } => write!(f, "constraint: {}", name),
            ReportItem::LowerBound { variable } => write!(f, "lower bound of variable {}", variable),
            ReportItem::UpperBound { variable } => write!(f, "upper bound of variable {}", variable),
        }
    }
}

/// One relaxed item and the amount it had to be relaxed by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelaxedItem {
    pub item: ReportItem,
    pub amount: f64,
}

/// Items relaxed together to reach one feasible point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelaxedSet {
    pub scope: RelaxationScope,
    pub items: Vec<RelaxedItem>,
}

/// Final verdict of a diagnosis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing had to be relaxed; the solution was loaded into the model.
    Feasible,
    /// No solve produced a usable relaxation.
    Unstable,
    /// The recorded violations are satisfiable on their own.
    MisUndetermined,
    Mis {
        members: Vec<ReportItem>,
        guards: Vec<ReportItem>,
    },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Feasible => "feasible",
            Outcome::Unstable => "unstable",
            Outcome::MisUndetermined => "mis_undetermined",
            Outcome::Mis { .. } => "mis",
        }
    }
}

/// Report returned by [`crate::compute_infeasibility_explanation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfeasibilityReport {
    pub model_name: String,
    pub relaxed_sets: Vec<RelaxedSet>,
    pub outcome: Outcome,
}

impl InfeasibilityReport {
    pub fn is_feasible(&self) -> bool {
        self.outcome == Outcome::Feasible
    }

    /// MIS members, if one was computed.
    pub fn mis(&self) -> Option<&[ReportItem]> {
        match &self.outcome {
            Outcome::Mis { members, .. } => Some(members),
            _ => None,
        }
    }

    /// Stability guards, if an MIS was computed.
    pub fn guards(&self) -> Option<&[ReportItem]> {
        match &self.outcome {
            Outcome::Mis { guards, .. } => Some(guards),
            _ => None,
        }
    }
}

impl fmt::Display for InfeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, set) in self.relaxed_sets.iter().enumerate() {
            let lead = if index == 0 {
                format!("Model {} may be infeasible. A", self.model_name)
            } else {
                "Another".to_string()
            };
            writeln!(
                f,
                "{} feasible solution was found with only the following {} relaxed:",
                lead,
                set.scope.describe()
            )?;
            for relaxed in &set.items {
                writeln!(f, "\t{} by {}", relaxed.item, relaxed.amount)?;
            }
        }

        match &self.outcome {
            Outcome::Feasible => {
                writeln!(
                    f,
                    "Model {} may be feasible: no constraint or variable bound had to be relaxed.",
                    self.model_name
                )?;
                writeln!(
                    f,
                    "Feasible solution found and loaded into model {}.",
                    self.model_name
                )
            }
            Outcome::Unstable => writeln!(
                f,
                "Could not find a feasible solution with violated constraints or bounds. \
                 This model is likely unstable."
            ),
            Outcome::MisUndetermined => {
                writeln!(f, "Could not determine Minimal Intractable System")
            }
            Outcome::Mis { members, guards } => {
                writeln!(f, "Computed Minimal Intractable System (MIS)!")?;
                writeln!(f, "Constraints / bounds in MIS:")?;
                for item in members {
                    writeln!(f, "\t{}", item)?;
                }
                writeln!(f, "Constraints / bounds in guards for stability:")?;
                for item in guards {
                    writeln!(f, "\t{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Translates clone-side constraints into items of the caller's model.
pub(crate) struct ItemResolver<'a> {
    pub(crate) original: &'a Model,
    pub(crate) clone: &'a Model,
    pub(crate) variables: &'a VariableMap,
}

impl ItemResolver<'_> {
    pub(crate) fn resolve(&self, constraint: ConstraintId) -> Result<ReportItem, DiagnosisError> {
        if let Some(origin) = self.clone.bound_origin(constraint) {
            let original = self.variables.original_of(origin.variable).ok_or_else(|| {
                DiagnosisError::Structural(format!(
                    "bound constraint {} refers to unmapped variable {}",
                    constraint, origin.variable
                ))
            })?;
            let name = self.original.get_variable_name(original).ok_or_else(|| {
                DiagnosisError::Structural(format!("variable {} has no name", original))
            })?;
            return Ok(match origin.side {
                BoundSide::Lower => ReportItem::lower_bound(name),
                BoundSide::Upper => ReportItem::upper_bound(name),
            });
        }

        let name = self.clone.get_constraint_name(constraint).ok_or_else(|| {
            DiagnosisError::Structural(format!("constraint {} has no name", constraint))
        })?;
        if self.original.get_constraint_by_name(name).is_none() {
            return Err(DiagnosisError::Structural(format!(
                "constraint '{}' does not exist in model {}",
                name,
                self.original.name()
            )));
        }
        Ok(ReportItem::constraint(name))
    }

    pub(crate) fn resolve_all(
        &self,
        constraints: &[ConstraintId],
    ) -> Result<Vec<ReportItem>, DiagnosisError> {
        constraints.iter().map(|id| self.resolve(*id)).collect()
    }

    pub(crate) fn relaxed_set(&self, round: &RelaxationRound) -> Result<RelaxedSet, DiagnosisError> {
        let items = round
            .violations
            .iter()
            .map(|violation| {
                Ok(RelaxedItem {
                    item: self.resolve(violation.constraint)?,
                    amount: violation.amount,
                })
            })
            .collect::<Result<Vec<_>, DiagnosisError>>()?;
        Ok(RelaxedSet {
            scope: round.scope,
            items,
        })
    }
}
