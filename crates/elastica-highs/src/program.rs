//! Linear program extracted from the active part of a model.

use std::collections::BTreeMap;

use elastica_core::{ConstraintId, Model, Sense, VariableId};
use elastica_solver::SolverError;

/// One HiGHS column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub variable: VariableId,
    pub lower: f64,
    pub upper: f64,
    pub cost: f64,
    pub is_integer: bool,
}

/// One HiGHS row with entries keyed by column index.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    pub constraint: ConstraintId,
    pub lower: f64,
    pub upper: f64,
    pub columns: Vec<usize>,
    pub coefficients: Vec<f64>,
}

/// Sparse linear program: every variable is a column, every active
/// constraint a row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub sense: Sense,
    pub objective_offset: f64,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowSpec>,
}

impl LinearProgram {
    /// Extract the program from `model`.
    ///
    /// Fixed variables become columns with equal bounds at their value.
    ///
    /// # Errors
    ///
    /// - `Unsupported` for a nonlinear active constraint or objective.
    /// - `EvaluationFailure` for a fixed variable without a finite value, or
    ///   for an active constraint over fixed variables only whose body does
    ///   not evaluate to a finite number.
    pub fn from_model(model: &Model) -> Result<Self, SolverError> {
        let mut column_of: BTreeMap<VariableId, usize> = BTreeMap::new();
        let mut columns = Vec::with_capacity(model.num_variables());

        for (id, var) in model.variables() {
            let (lower, upper) = if var.fixed {
                match var.value {
                    Some(value) if value.is_finite() => (value, value),
                    other => {
                        return Err(SolverError::EvaluationFailure {
                            constraint: None,
                            message: format!(
                                "fixed variable {} has no finite value ({:?})",
                                display_variable(model, id),
                                other
                            ),
                        });
                    }
                }
            } else {
                let bounds = var.effective_bounds();
                (bounds.lower, bounds.upper)
            };
            column_of.insert(id, columns.len());
            columns.push(ColumnSpec {
                variable: id,
                lower,
                upper,
                cost: 0.0,
                is_integer: var.is_integer(),
            });
        }

        let (sense, objective_offset) = match model.active_objective()? {
            Some((objective_id, objective)) => {
                if !objective.expr.is_linear() {
                    return Err(SolverError::Unsupported(format!(
                        "objective {} has degree {}",
                        model.get_objective_name(objective_id).unwrap_or("<unnamed>"),
                        objective.expr.degree()
                    )));
                }
                for (var, coeff) in objective.expr.normalized_terms() {
                    let col = column_index(&column_of, var)?;
                    columns[col].cost += coeff;
                }
                (objective.sense, objective.expr.constant())
            }
            None => (Sense::Minimize, 0.0),
        };

        let mut rows = Vec::new();
        for (constraint_id, constraint) in model.active_constraints() {
            if !constraint.body.is_linear() {
                return Err(SolverError::Unsupported(format!(
                    "constraint {} has degree {}",
                    display_constraint(model, constraint_id),
                    constraint.body.degree()
                )));
            }
            if all_fixed(model, constraint.body.variables()) {
                constraint
                    .body
                    .evaluate(model.value_lookup())
                    .map_err(|err| SolverError::EvaluationFailure {
                        constraint: Some(display_constraint(model, constraint_id)),
                        message: err.to_string(),
                    })?;
            }
            let offset = constraint.body.constant();
            let terms = constraint.body.normalized_terms();
            let mut row_columns = Vec::with_capacity(terms.len());
            let mut coefficients = Vec::with_capacity(terms.len());
            for (var, coeff) in terms {
                row_columns.push(column_index(&column_of, var)?);
                coefficients.push(coeff);
            }
            rows.push(RowSpec {
                constraint: constraint_id,
                lower: constraint.bounds.lower - offset,
                upper: constraint.bounds.upper - offset,
                columns: row_columns,
                coefficients,
            });
        }

        Ok(LinearProgram {
            sense,
            objective_offset,
            columns,
            rows,
        })
    }

    /// Row entries regrouped per column, for column-wise assembly.
    pub fn column_entries(&self) -> Vec<(Vec<usize>, Vec<f64>)> {
        let mut entries = vec![(Vec::new(), Vec::new()); self.columns.len()];
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col, coeff) in row.columns.iter().zip(&row.coefficients) {
                if let Some((rows, coeffs)) = entries.get_mut(*col) {
                    rows.push(row_idx);
                    coeffs.push(*coeff);
                }
            }
        }
        entries
    }

    /// A column or row whose lower bound exceeds its upper bound.
    pub fn has_inverted_bounds(&self) -> bool {
        self.columns.iter().any(|col| col.lower > col.upper)
            || self.rows.iter().any(|row| row.lower > row.upper)
    }

    pub fn num_nonzeros(&self) -> usize {
        self.rows.iter().map(|row| row.columns.len()).sum()
    }
}

fn column_index(
    column_of: &BTreeMap<VariableId, usize>,
    var: VariableId,
) -> Result<usize, SolverError> {
    column_of.get(&var).copied().ok_or_else(|| {
        SolverError::InternalError(format!("variable {} has no column", var))
    })
}

fn display_variable(model: &Model, id: VariableId) -> String {
    model
        .get_variable_name(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

fn all_fixed(model: &Model, variables: impl IntoIterator<Item = VariableId>) -> bool {
    variables
        .into_iter()
        .all(|id| model.get_variable(id).is_ok_and(|var| var.fixed))
}

fn display_constraint(model: &Model, id: ConstraintId) -> String {
    model
        .get_constraint_name(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use elastica_core::{Bounds, Domain, Expr, Variable};

    fn sample() -> (Model, VariableId, VariableId) {
        let mut model = Model::new();
        let x = model
            .add_variable("x", Variable::continuous(Bounds::new(0.0, 4.0)))
            .unwrap();
        let y = model
            .add_variable("y", Variable::in_domain(Domain::Binary))
            .unwrap();
        model
            .add_constraint(
                "c",
                (Expr::var(x) + Expr::term(y, 2.0) + Expr::from_constant(1.0)).le_scalar(5.0),
            )
            .unwrap();
        model
            .add_objective(
                "obj",
                Sense::Maximize,
                Expr::var(x) + Expr::from_constant(3.0),
            )
            .unwrap();
        (model, x, y)
    }

    #[test]
    fn test_extracts_columns_rows_and_objective() {
        let (model, x, y) = sample();
        let lp = LinearProgram::from_model(&model).unwrap();

        assert_eq!(lp.sense, Sense::Maximize);
        assert_eq!(lp.objective_offset, 3.0);
        assert_eq!(lp.columns.len(), 2);
        assert_eq!(lp.columns[0].variable, x);
        assert_eq!(lp.columns[0].cost, 1.0);
        assert_eq!((lp.columns[1].lower, lp.columns[1].upper), (0.0, 1.0));
        assert!(lp.columns[1].is_integer);
        assert_eq!(lp.columns[1].variable, y);

        assert_eq!(lp.rows.len(), 1);
        assert_eq!(lp.rows[0].upper, 4.0);
        assert_eq!(lp.rows[0].columns, vec![0, 1]);
        assert_eq!(lp.rows[0].coefficients, vec![1.0, 2.0]);
        assert_eq!(lp.num_nonzeros(), 2);
    }

    #[test]
    fn test_column_entries_transpose_rows() {
        let (model, _, _) = sample();
        let lp = LinearProgram::from_model(&model).unwrap();
        let entries = lp.column_entries();
        assert_eq!(entries[0], (vec![0], vec![1.0]));
        assert_eq!(entries[1], (vec![0], vec![2.0]));
    }

    #[test]
    fn test_fixed_variable_pins_column() {
        let (mut model, x, _) = sample();
        model.fix_variable(x, 2.5).unwrap();
        let lp = LinearProgram::from_model(&model).unwrap();
        assert_eq!((lp.columns[0].lower, lp.columns[0].upper), (2.5, 2.5));
    }

    #[test]
    fn test_fixed_variable_without_value_fails_evaluation() {
        let (mut model, x, _) = sample();
        model.fix_variable(x, f64::NAN).unwrap();
        let err = LinearProgram::from_model(&model).unwrap_err();
        assert!(err.is_evaluation_failure());
    }

    #[test]
    fn test_overflowing_fixed_body_names_the_constraint() {
        let mut model = Model::new();
        let x = model.add_variable("x", Variable::fixed_at(1e200)).unwrap();
        let y = model.add_variable("y", Variable::default()).unwrap();
        model
            .add_constraint("blowup", Expr::term(x, 1e200).le_scalar(1.0))
            .unwrap();
        model
            .add_constraint("free", (Expr::var(x) + Expr::var(y)).le_scalar(1.0))
            .unwrap();

        match LinearProgram::from_model(&model).unwrap_err() {
            SolverError::EvaluationFailure {
                constraint,
                message,
            } => {
                assert_eq!(constraint.as_deref(), Some("blowup"));
                assert!(message.contains("EXPR_NON_FINITE"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_finite_fixed_body_extracts_normally() {
        let mut model = Model::new();
        let x = model.add_variable("x", Variable::fixed_at(3.0)).unwrap();
        model
            .add_constraint("pinned", Expr::term(x, 2.0).ge_scalar(1.0))
            .unwrap();
        let lp = LinearProgram::from_model(&model).unwrap();
        assert_eq!(lp.rows.len(), 1);
        assert_eq!((lp.columns[0].lower, lp.columns[0].upper), (3.0, 3.0));
    }

    #[test]
    fn test_inactive_constraints_are_skipped() {
        let (mut model, _, _) = sample();
        let c = model.get_constraint_by_name("c").unwrap();
        model.deactivate_constraint(c).unwrap();
        let lp = LinearProgram::from_model(&model).unwrap();
        assert!(lp.rows.is_empty());
    }

    #[test]
    fn test_nonlinear_constraint_is_unsupported() {
        let (mut model, x, y) = sample();
        model
            .add_constraint("bilinear", Expr::product(x, y, 1.0).le_scalar(1.0))
            .unwrap();
        let err = LinearProgram::from_model(&model).unwrap_err();
        assert_eq!(err.code(), "SOLVER_UNSUPPORTED");
        assert!(err.to_string().contains("bilinear"));
    }

    #[test]
    fn test_inverted_bounds_detected() {
        let mut model = Model::new();
        model
            .add_variable("x", Variable::continuous(Bounds::new(5.0, 2.0)))
            .unwrap();
        let lp = LinearProgram::from_model(&model).unwrap();
        assert!(lp.has_inverted_bounds());
    }
}
