//! Errors surfaced by the command line tool.

use std::path::PathBuf;

use elastica_core::ModelError;
use elastica_mis::DiagnosisError;
use elastica_solver::SolverError;

#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: std::io::Error },
    /// The model document is not valid JSON for the expected schema.
    Document(serde_json::Error),
    /// A term references a variable the document does not declare.
    UnknownVariable { owner: String, variable: String },
    /// A flag or environment variable has an unusable value.
    InvalidArgument(String),
    /// Logging could not be initialized.
    Logging(String),
    Model(ModelError),
    Solver(SolverError),
    Diagnosis(DiagnosisError),
}

impl CliError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "CLI_IO",
            CliError::Document(_) => "CLI_DOCUMENT_INVALID",
            CliError::UnknownVariable { .. } => "CLI_DOCUMENT_UNKNOWN_VARIABLE",
            CliError::InvalidArgument(_) => "CLI_INVALID_ARGUMENT",
            CliError::Logging(_) => "CLI_LOGGING",
            CliError::Model(_) => "CLI_MODEL",
            CliError::Solver(_) => "CLI_SOLVER",
            CliError::Diagnosis(_) => "CLI_DIAGNOSIS",
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { path, source } => write!(
                f,
                "[{}] Failed to access {}: {}",
                self.code(),
                path.display(),
                source
            ),
            CliError::Document(err) => write!(f, "[{}] Invalid model document: {}", self.code(), err),
            CliError::UnknownVariable { owner, variable } => write!(
                f,
                "[{}] '{}' references undeclared variable '{}'",
                self.code(),
                owner,
                variable
            ),
            CliError::InvalidArgument(msg) => write!(f, "[{}] {}", self.code(), msg),
            CliError::Logging(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
            CliError::Model(err) => write!(f, "[{}] {}", self.code(), err),
            CliError::Solver(err) => write!(f, "[{}] {}", self.code(), err),
            CliError::Diagnosis(err) => write!(f, "[{}] {}", self.code(), err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Document(err) => Some(err),
            CliError::Model(err) => Some(err),
            CliError::Solver(err) => Some(err),
            CliError::Diagnosis(err) => Some(err),
            CliError::UnknownVariable { .. }
            | CliError::InvalidArgument(_)
            | CliError::Logging(_) => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Document(err)
    }
}

impl From<ModelError> for CliError {
    fn from(err: ModelError) -> Self {
        CliError::Model(err)
    }
}

impl From<SolverError> for CliError {
    fn from(err: SolverError) -> Self {
        CliError::Solver(err)
    }
}

impl From<DiagnosisError> for CliError {
    fn from(err: DiagnosisError) -> Self {
        CliError::Diagnosis(err)
    }
}
