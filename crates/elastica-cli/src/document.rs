//! JSON model documents.
//!
//! ```json
//! {
//!   "name": "tank",
//!   "variables": [{ "name": "level", "lower": 5.0, "upper": 2.0, "value": 3.0 }],
//!   "constraints": [
//!     { "name": "cap", "terms": [{ "variable": "level", "coefficient": 1.0 }], "upper": 4.0 }
//!   ],
//!   "objective": { "sense": "minimize", "terms": [{ "variable": "level", "coefficient": 1.0 }] }
//! }
//! ```
//!
//! Missing bounds are infinite.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use elastica_core::{Bounds, Domain, Expr, Model, Sense, Variable, VariableId};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainSpec {
    #[default]
    Reals,
    NonNegativeReals,
    NonPositiveReals,
    UnitInterval,
    Integers,
    NonNegativeIntegers,
    Binary,
}

impl From<DomainSpec> for Domain {
    fn from(spec: DomainSpec) -> Self {
        match spec {
            DomainSpec::Reals => Domain::Reals,
            DomainSpec::NonNegativeReals => Domain::NonNegativeReals,
            DomainSpec::NonPositiveReals => Domain::NonPositiveReals,
            DomainSpec::UnitInterval => Domain::UnitInterval,
            DomainSpec::Integers => Domain::Integers,
            DomainSpec::NonNegativeIntegers => Domain::NonNegativeIntegers,
            DomainSpec::Binary => Domain::Binary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseSpec {
    #[default]
    Minimize,
    Maximize,
}

impl From<SenseSpec> for Sense {
    fn from(spec: SenseSpec) -> Self {
        match spec {
            SenseSpec::Minimize => Sense::Minimize,
            SenseSpec::Maximize => Sense::Maximize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub domain: DomainSpec,
    #[serde(default)]
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    pub variable: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub name: String,
    pub terms: Vec<TermSpec>,
    #[serde(default)]
    pub constant: f64,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    #[serde(default)]
    pub sense: SenseSpec,
    pub terms: Vec<TermSpec>,
    #[serde(default)]
    pub constant: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    #[serde(default)]
    pub objective: Option<ObjectiveSpec>,
}

fn bounds_of(lower: Option<f64>, upper: Option<f64>) -> Bounds {
    Bounds::new(
        lower.unwrap_or(f64::NEG_INFINITY),
        upper.unwrap_or(f64::INFINITY),
    )
}

impl ModelDocument {
    pub fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the [`Model`] this document describes.
    pub fn into_model(self) -> Result<Model, CliError> {
        let mut model = Model::named(self.name);
        let mut ids: BTreeMap<String, VariableId> = BTreeMap::new();

        for spec in self.variables {
            let variable = Variable {
                value: spec.value,
                bounds: bounds_of(spec.lower, spec.upper),
                domain: spec.domain.into(),
                fixed: spec.fixed,
            };
            let id = model.add_variable(spec.name.clone(), variable)?;
            ids.insert(spec.name, id);
        }

        for spec in self.constraints {
            let body = linear_expr(&ids, &spec.name, &spec.terms, spec.constant)?;
            model.add_bounded_constraint(spec.name, body, bounds_of(spec.lower, spec.upper))?;
        }

        if let Some(spec) = self.objective {
            let expr = linear_expr(&ids, "objective", &spec.terms, spec.constant)?;
            model.add_objective("objective", spec.sense.into(), expr)?;
        }

        tracing::debug!(
            component = "cli",
            operation = "load_document",
            status = "success",
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            "Built model from document"
        );
        Ok(model)
    }
}

fn linear_expr(
    ids: &BTreeMap<String, VariableId>,
    owner: &str,
    terms: &[TermSpec],
    constant: f64,
) -> Result<Expr, CliError> {
    let linear = terms
        .iter()
        .map(|term| {
            ids.get(&term.variable)
                .map(|id| (*id, term.coefficient))
                .ok_or_else(|| CliError::UnknownVariable {
                    owner: owner.to_string(),
                    variable: term.variable.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::new(linear, constant))
}
