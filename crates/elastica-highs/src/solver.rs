//! HiGHS implementation of [`Solve`].

use crate::ffi::{HighsModel, HighsModelError, HighsOption, Layout, ObjectiveSense};
use crate::program::LinearProgram;
use crate::status::{highs_has_solution, highs_to_solver_status};
use elastica_core::{Model, Sense};
use elastica_solver::{Serialization, Solution, Solve, SolverConfig, SolverError, SolverStatus};
use elastica_tools::memory::rss_bytes;
use std::time::Instant;
use tracing::{debug, warn};

fn highs_model_error_to_solver_error(err: HighsModelError) -> SolverError {
    SolverError::InternalError(err.to_string())
}

/// Linear and mixed-integer-linear backend built on HiGHS.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver {
    solves: u64,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of solves run by this instance.
    pub fn solve_count(&self) -> u64 {
        self.solves
    }
}

impl Solve for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        self.solves += 1;
        solve_model(model, config)
    }
}

fn layout_for(serialization: Serialization) -> Layout {
    match serialization {
        Serialization::Standard => Layout::RowWise,
        Serialization::Legacy => Layout::ColumnWise,
    }
}

fn apply_solver_config(highs_model: &mut HighsModel, config: &SolverConfig) {
    highs_model.set_log_to_console(config.tee());

    if let Some(limit) = config.time_limit {
        highs_model.set_option("time_limit", HighsOption::Float(limit));
    }
    if let Some(level) = config.verbosity {
        highs_model.set_verbosity(level);
    }
    if let Some(presolve) = config.presolve {
        let presolve_str = if presolve { "on" } else { "off" };
        highs_model.set_option("presolve", HighsOption::Str(presolve_str.to_string()));
    }
    if let Some(option) = config.threads.and_then(thread_option) {
        highs_model.set_option("threads", option);
    }
    if let Some(tolerance) = config.tolerance {
        highs_model.set_option(
            "primal_feasibility_tolerance",
            HighsOption::Float(tolerance),
        );
        highs_model.set_option("dual_feasibility_tolerance", HighsOption::Float(tolerance));
    }
}

fn thread_option(threads: u32) -> Option<HighsOption> {
    match i32::try_from(threads) {
        Ok(count) => Some(HighsOption::Int(count)),
        Err(_) => {
            warn!(
                component = "solver",
                operation = "configure",
                status = "skipped",
                threads,
                "Thread count exceeds what HiGHS accepts; keeping its default"
            );
            None
        }
    }
}

fn assemble(lp: &LinearProgram, layout: Layout) -> Result<HighsModel, SolverError> {
    let mut highs_model = HighsModel::with_layout(layout);
    highs_model.set_objective_sense(match lp.sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });

    match layout {
        Layout::RowWise => {
            for col in &lp.columns {
                highs_model.add_col(col.lower, col.upper, col.cost, col.is_integer);
            }
            for row in &lp.rows {
                highs_model
                    .add_row(row.lower, row.upper, &row.columns, &row.coefficients)
                    .map_err(highs_model_error_to_solver_error)?;
            }
        }
        Layout::ColumnWise => {
            for row in &lp.rows {
                highs_model
                    .add_row(row.lower, row.upper, &[], &[])
                    .map_err(highs_model_error_to_solver_error)?;
            }
            for (col, (rows, coefficients)) in lp.columns.iter().zip(lp.column_entries()) {
                highs_model
                    .add_col_with_entries(
                        col.lower,
                        col.upper,
                        col.cost,
                        col.is_integer,
                        &rows,
                        &coefficients,
                    )
                    .map_err(highs_model_error_to_solver_error)?;
            }
        }
    }
    Ok(highs_model)
}

/// Status for programs HiGHS is not asked to solve.
///
/// Without columns every row evaluates to zero; inverted bounds can never be
/// satisfied.
fn trivial_status(lp: &LinearProgram) -> Option<SolverStatus> {
    if lp.has_inverted_bounds() {
        return Some(SolverStatus::Infeasible);
    }
    if lp.columns.is_empty() {
        let satisfied = lp.rows.iter().all(|row| row.lower <= 0.0 && 0.0 <= row.upper);
        return Some(if satisfied {
            SolverStatus::Optimal
        } else {
            SolverStatus::Infeasible
        });
    }
    None
}

fn solve_model(model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
    let solver_version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
    let rss_before = rss_bytes("solve_start");
    let solve_started = Instant::now();

    let lp = LinearProgram::from_model(model)?;
    debug!(
        component = "solver",
        operation = "solve",
        status = "started",
        solver = "highs",
        solver_version = %solver_version,
        serialization = config.serialization.as_str(),
        columns = lp.columns.len(),
        rows = lp.rows.len(),
        nnz = lp.num_nonzeros(),
        rss_bytes = ?rss_before,
        "Starting solve process"
    );

    if let Some(status) = trivial_status(&lp) {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver_status = %status,
            "Resolved without calling HiGHS"
        );
        let mut solution = Solution::with_status(status);
        if status.is_optimal() {
            solution.objective_value = lp.objective_offset;
        }
        return Ok(solution);
    }

    let mut highs_model = assemble(&lp, layout_for(config.serialization))?;
    apply_solver_config(&mut highs_model, config);

    let highs_status = highs_model
        .solve()
        .map_err(highs_model_error_to_solver_error)?;
    let status = highs_to_solver_status(highs_status);
    let duration_ms = solve_started.elapsed().as_secs_f64() * 1000.0;
    let rss_after = rss_bytes("solve_end");
    let rss_delta = match (rss_before, rss_after) {
        (Some(before), Some(after)) => Some(after as i64 - before as i64),
        _ => None,
    };
    let simplex_iterations = highs_model.simplex_iteration_count();

    if status.is_optimal() {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            solver_status = %status,
            simplex_iterations,
            duration_ms,
            rss_bytes = ?rss_after,
            rss_delta_bytes = ?rss_delta,
            "HiGHS solve completed"
        );
    } else {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "highs",
            solver_status = %status,
            simplex_iterations,
            duration_ms,
            rss_bytes = ?rss_after,
            rss_delta_bytes = ?rss_delta,
            "Solver did not find optimal solution"
        );
    }

    let mut solution = Solution::with_status(status);
    solution.solve_time_seconds = solve_started.elapsed().as_secs_f64();
    solution
        .metadata
        .insert("simplex_iterations".to_string(), simplex_iterations as f64);

    if highs_has_solution(highs_status) {
        let values = highs_model
            .column_values()
            .map_err(highs_model_error_to_solver_error)?;
        solution.values = lp
            .columns
            .iter()
            .zip(values)
            .map(|(col, value)| (col.variable, value))
            .collect();
        solution.objective_value = highs_model
            .objective_value()
            .map_err(highs_model_error_to_solver_error)?
            + lp.objective_offset;
    }

    Ok(solution)
}
