//! Safe wrapper around the HiGHS library.
//!
//! This module contains the only unsafe code in the workspace, used to read
//! solve statistics the `highs` crate does not expose.
#![allow(unsafe_code)]

use highs::{Col, ColProblem, HighsModelStatus, Row, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::{CStr, CString};
use std::fmt;
use tracing::{debug, trace, warn};

/// Objective sense for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// How the problem is handed to HiGHS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Columns first, then rows referencing them.
    RowWise,
    /// Rows first, then columns carrying their row entries.
    ColumnWise,
}

/// Model status reported by HiGHS after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    UnboundedOrInfeasible,
    /// Solver reached time limit (may have feasible solution)
    ReachedTimeLimit,
    /// Solver reached iteration limit (may have feasible solution)
    ReachedIterationLimit,
    Unknown,
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsModelError {
    ColumnCoefficientLengthMismatch {
        columns: usize,
        coefficients: usize,
    },
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    RowIndexOutOfBounds {
        row_index: usize,
        num_rows: usize,
    },
    /// Operation is not available for the model's layout.
    LayoutMismatch {
        operation: &'static str,
        layout: Layout,
    },
    SolveRequired {
        operation: &'static str,
    },
    /// HiGHS rejected the problem or the run.
    SolveFailed {
        stage: &'static str,
        status: String,
    },
}

impl HighsModelError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsModelError::ColumnCoefficientLengthMismatch { .. } => "HIGHS_LENGTH_MISMATCH",
            HighsModelError::ColumnIndexOutOfBounds { .. } => "HIGHS_COLUMN_OUT_OF_BOUNDS",
            HighsModelError::RowIndexOutOfBounds { .. } => "HIGHS_ROW_OUT_OF_BOUNDS",
            HighsModelError::LayoutMismatch { .. } => "HIGHS_LAYOUT_MISMATCH",
            HighsModelError::SolveRequired { .. } => "HIGHS_SOLVE_REQUIRED",
            HighsModelError::SolveFailed { .. } => "HIGHS_SOLVE_FAILED",
        }
    }
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::ColumnCoefficientLengthMismatch {
                columns,
                coefficients,
            } => write!(
                f,
                "[{}] indices length ({}) must match coefficients length ({})",
                self.code(),
                columns,
                coefficients
            ),
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "[{}] column index {} out of bounds (num_columns = {})",
                self.code(),
                column_index,
                num_columns
            ),
            HighsModelError::RowIndexOutOfBounds {
                row_index,
                num_rows,
            } => write!(
                f,
                "[{}] row index {} out of bounds (num_rows = {})",
                self.code(),
                row_index,
                num_rows
            ),
            HighsModelError::LayoutMismatch { operation, layout } => write!(
                f,
                "[{}] {} is not available for {:?} models",
                self.code(),
                operation,
                layout
            ),
            HighsModelError::SolveRequired { operation } => {
                write!(f, "[{}] solve must be called before {}", self.code(), operation)
            }
            HighsModelError::SolveFailed { stage, status } => {
                write!(f, "[{}] HiGHS failed during {}: {}", self.code(), stage, status)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

enum Assembly {
    RowWise {
        problem: RowProblem,
        columns: Vec<Col>,
    },
    ColumnWise {
        problem: ColProblem,
        rows: Vec<Row>,
        num_columns: usize,
    },
}

impl Assembly {
    fn empty(layout: Layout) -> Self {
        match layout {
            Layout::RowWise => Assembly::RowWise {
                problem: RowProblem::default(),
                columns: Vec::new(),
            },
            Layout::ColumnWise => Assembly::ColumnWise {
                problem: ColProblem::default(),
                rows: Vec::new(),
                num_columns: 0,
            },
        }
    }

    fn layout(&self) -> Layout {
        match self {
            Assembly::RowWise { .. } => Layout::RowWise,
            Assembly::ColumnWise { .. } => Layout::ColumnWise,
        }
    }

    fn num_columns(&self) -> usize {
        match self {
            Assembly::RowWise { columns, .. } => columns.len(),
            Assembly::ColumnWise { num_columns, .. } => *num_columns,
        }
    }

    fn num_rows(&self) -> usize {
        match self {
            Assembly::RowWise { problem, .. } => problem.num_rows(),
            Assembly::ColumnWise { rows, .. } => rows.len(),
        }
    }
}

/// Safe wrapper around a HiGHS problem and its latest solve.
pub struct HighsModel {
    assembly: Assembly,
    objective_sense: ObjectiveSense,
    solved: Option<SolvedModel>,
    log_to_console: bool,
    options: Vec<(String, HighsOption)>,
    verbosity: Option<u32>,
}

impl HighsModel {
    /// Create a new row-wise HiGHS model.
    pub fn new() -> Self {
        Self::with_layout(Layout::RowWise)
    }

    pub fn with_layout(layout: Layout) -> Self {
        debug!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            ?layout,
            "Creating new HiGHS model"
        );
        HighsModel {
            assembly: Assembly::empty(layout),
            objective_sense: ObjectiveSense::Minimize,
            solved: None,
            log_to_console: false,
            options: Vec::new(),
            verbosity: None,
        }
    }

    pub fn layout(&self) -> Layout {
        self.assembly.layout()
    }

    /// Add a column without matrix entries; returns its index.
    ///
    /// Row-wise models attach entries later through [`HighsModel::add_row`].
    pub fn add_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
        is_integer: bool,
    ) -> usize {
        trace!(
            lower_bound,
            upper_bound,
            objective_coefficient,
            is_integer,
            component = "solver",
            operation = "add_column",
            status = "success",
            "Adding column"
        );
        self.solved = None;
        match &mut self.assembly {
            Assembly::RowWise { problem, columns } => {
                let col = if is_integer {
                    problem.add_integer_column(objective_coefficient, lower_bound..=upper_bound)
                } else {
                    problem.add_column(objective_coefficient, lower_bound..=upper_bound)
                };
                columns.push(col);
                columns.len() - 1
            }
            Assembly::ColumnWise {
                problem,
                num_columns,
                ..
            } => {
                let no_entries: [(Row, f64); 0] = [];
                if is_integer {
                    problem.add_integer_column(
                        objective_coefficient,
                        lower_bound..=upper_bound,
                        no_entries,
                    );
                } else {
                    problem.add_column(objective_coefficient, lower_bound..=upper_bound, no_entries);
                }
                *num_columns += 1;
                *num_columns - 1
            }
        }
    }

    /// Add a column carrying its row entries (column-wise models only).
    pub fn add_col_with_entries(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
        is_integer: bool,
        rows: &[usize],
        coefficients: &[f64],
    ) -> Result<usize, HighsModelError> {
        check_lengths("add_col_with_entries", rows.len(), coefficients.len())?;
        let Assembly::ColumnWise {
            problem,
            rows: known_rows,
            num_columns,
        } = &mut self.assembly
        else {
            return Err(HighsModelError::LayoutMismatch {
                operation: "add_col_with_entries",
                layout: Layout::RowWise,
            });
        };

        let num_rows = known_rows.len();
        let mut factors = Vec::with_capacity(rows.len());
        for (row_idx, coeff) in rows.iter().copied().zip(coefficients.iter().copied()) {
            let row = *known_rows
                .get(row_idx)
                .ok_or(HighsModelError::RowIndexOutOfBounds {
                    row_index: row_idx,
                    num_rows,
                })?;
            factors.push((row, coeff));
        }

        trace!(
            lower_bound,
            upper_bound,
            objective_coefficient,
            is_integer,
            entries = factors.len(),
            component = "solver",
            operation = "add_column",
            status = "success",
            "Adding column with entries"
        );
        self.solved = None;
        if is_integer {
            problem.add_integer_column(objective_coefficient, lower_bound..=upper_bound, factors);
        } else {
            problem.add_column(objective_coefficient, lower_bound..=upper_bound, factors);
        }
        *num_columns += 1;
        Ok(*num_columns - 1)
    }

    /// Add a row; returns its index.
    ///
    /// Column-wise models only accept rows without entries; the entries
    /// arrive with the columns.
    pub fn add_row(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        columns: &[usize],
        coefficients: &[f64],
    ) -> Result<usize, HighsModelError> {
        check_lengths("add_row", columns.len(), coefficients.len())?;
        trace!(
            lower_bound,
            upper_bound,
            component = "solver",
            operation = "add_row",
            status = "success",
            "Adding row"
        );
        self.solved = None;
        match &mut self.assembly {
            Assembly::RowWise {
                problem,
                columns: known_columns,
            } => {
                let num_columns = known_columns.len();
                let mut factors = Vec::with_capacity(columns.len());
                for (col_idx, coeff) in columns.iter().copied().zip(coefficients.iter().copied())
                {
                    let col = *known_columns.get(col_idx).ok_or_else(|| {
                        warn!(
                            component = "solver",
                            operation = "add_row",
                            status = "error",
                            col_idx,
                            num_columns,
                            "Column index out of bounds for constraint"
                        );
                        HighsModelError::ColumnIndexOutOfBounds {
                            column_index: col_idx,
                            num_columns,
                        }
                    })?;
                    factors.push((col, coeff));
                }
                problem.add_row(lower_bound..=upper_bound, factors);
                Ok(problem.num_rows().saturating_sub(1))
            }
            Assembly::ColumnWise { problem, rows, .. } => {
                if !columns.is_empty() {
                    return Err(HighsModelError::LayoutMismatch {
                        operation: "add_row with entries",
                        layout: Layout::ColumnWise,
                    });
                }
                rows.push(problem.add_row(lower_bound..=upper_bound));
                Ok(rows.len() - 1)
            }
        }
    }

    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective_sense = sense;
    }

    /// Enable or disable logging to console for the next solve
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    /// Set a HiGHS option for the next solve.
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.verbosity = Some(level);
    }

    /// Solve the assembled problem.
    ///
    /// The problem is consumed; a new solve needs a freshly assembled model.
    /// Errors when HiGHS refuses the problem (for example an oversized matrix
    /// coefficient) or aborts the run.
    pub fn solve(&mut self) -> Result<HighsStatus, HighsModelError> {
        let layout = self.assembly.layout();
        debug!(
            num_cols = self.assembly.num_columns(),
            num_rows = self.assembly.num_rows(),
            ?layout,
            ?self.objective_sense,
            component = "solver",
            operation = "solve",
            status = "success",
            "Solving model"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        let passed = match std::mem::replace(&mut self.assembly, Assembly::empty(layout)) {
            Assembly::RowWise { problem, .. } => problem.try_optimise(sense),
            Assembly::ColumnWise { problem, .. } => problem.try_optimise(sense),
        };
        let mut model = passed.map_err(|status| HighsModelError::SolveFailed {
            stage: "model pass",
            status: format!("{status:?}"),
        })?;
        if self.verbosity.unwrap_or(0) == 0 && !self.log_to_console {
            model.make_quiet();
        }
        if let Some(level) = self.verbosity {
            model.set_option("output_flag", level > 0);
        }
        for (option, value) in self.options.drain(..) {
            match value {
                HighsOption::Bool(val) => model.set_option(option.as_str(), val),
                HighsOption::Int(val) => model.set_option(option.as_str(), val),
                HighsOption::Float(val) => model.set_option(option.as_str(), val),
                HighsOption::Str(val) => model.set_option(option.as_str(), val.as_str()),
            }
        }
        if self.log_to_console {
            model.set_option("log_to_console", true);
            model.set_option("output_flag", true);
        }

        self.verbosity = None;
        let solved = model.try_solve().map_err(|status| HighsModelError::SolveFailed {
            stage: "run",
            status: format!("{status:?}"),
        })?;
        let status = map_status(solved.status());
        trace!(
            component = "solver",
            operation = "solve",
            status = "success",
            ?status,
            "Solution status received"
        );
        self.solved = Some(solved);
        Ok(status)
    }

    pub fn columns(&self) -> usize {
        self.assembly.num_columns()
    }

    pub fn rows(&self) -> usize {
        self.assembly.num_rows()
    }

    /// Objective value of the latest solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "objective_value",
        })?;
        Ok(solved.objective_value())
    }

    /// Primal column values of the latest solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn column_values(&self) -> Result<Vec<f64>, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "column_values",
        })?;
        Ok(solved.get_solution().columns().to_vec())
    }

    /// Simplex iteration count of the latest solve.
    pub fn simplex_iteration_count(&self) -> u64 {
        self.get_int_info("simplex_iteration_count").unwrap_or(0)
    }

    fn get_int_info(&self, name: &str) -> Option<u64> {
        let solved = self.solved.as_ref()?;
        let c_name = CString::new(name).ok()?;
        let mut value: highs_sys::HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK && value >= 0 {
            Some(value as u64)
        } else {
            None
        }
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("layout", &self.assembly.layout())
            .field("num_columns", &self.assembly.num_columns())
            .field("num_rows", &self.assembly.num_rows())
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}

fn check_lengths(
    operation: &'static str,
    indices: usize,
    coefficients: usize,
) -> Result<(), HighsModelError> {
    if indices != coefficients {
        warn!(
            component = "solver",
            operation,
            status = "error",
            indices,
            coefficients,
            "Index/coefficient length mismatch"
        );
        return Err(HighsModelError::ColumnCoefficientLengthMismatch {
            columns: indices,
            coefficients,
        });
    }
    Ok(())
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        _ => HighsStatus::Unknown,
    }
}
