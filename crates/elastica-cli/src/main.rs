use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use elastica_highs::{default_registry, highs_version};
use elastica_mis::{
    DEFAULT_TOLERANCE, DiagnosisOptions, InfeasibilityReport, compute_infeasibility_explanation,
};
use elastica_solver::SolverConfig;

mod document;
mod error;
mod logging;

use document::ModelDocument;
use error::CliError;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Explain why an optimization model is infeasible"
)]
struct Cli {
    /// Log filter (for example `debug` or `elastica_mis=trace`); overrides ELASTICA_TRACE
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a Minimal Intractable System for a JSON model document
    Diagnose(DiagnoseArgs),
    /// Show the available solver backends
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct DiagnoseArgs {
    /// JSON model document
    model: PathBuf,

    /// Solver backend (defaults to the registry default)
    #[arg(long)]
    solver: Option<String>,

    /// Slack values at or below this count as satisfied
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Echo solver output for every intermediate solve
    #[arg(long)]
    tee: bool,

    /// Time limit per solve, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct SolverInfo {
    default: Option<String>,
    solvers: Vec<String>,
    highs_version: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level)?;
    match cli.command {
        Command::Diagnose(args) => diagnose_command(args),
        Command::Info(args) => info_command(args),
    }
}

fn diagnose_command(args: DiagnoseArgs) -> Result<(), CliError> {
    let format = args.format;
    let report = diagnose(&args)?;
    match format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn diagnose(args: &DiagnoseArgs) -> Result<InfeasibilityReport, CliError> {
    let options = diagnosis_options(args)?;
    let mut model = ModelDocument::from_path(&args.model)?.into_model()?;
    let mut solver = default_registry().create(args.solver.as_deref())?;

    tracing::info!(
        component = "cli",
        operation = "diagnose",
        status = "start",
        model = model.name(),
        solver = solver.name(),
        tolerance = options.tolerance,
        "Starting infeasibility diagnosis"
    );
    Ok(compute_infeasibility_explanation(
        &mut model,
        solver.as_mut(),
        &options,
    )?)
}

fn diagnosis_options(args: &DiagnoseArgs) -> Result<DiagnosisOptions, CliError> {
    if !(args.tolerance.is_finite() && args.tolerance >= 0.0) {
        return Err(CliError::InvalidArgument(
            "tolerance must be a finite, non-negative number".to_string(),
        ));
    }

    let mut config = SolverConfig::new();
    if let Some(limit) = args.time_limit {
        if !(limit.is_finite() && limit > 0.0) {
            return Err(CliError::InvalidArgument(
                "time-limit must be greater than zero".to_string(),
            ));
        }
        config = config.with_time_limit(limit);
    }

    Ok(DiagnosisOptions::new()
        .with_tolerance(args.tolerance)
        .with_tee(args.tee)
        .with_solver_config(config))
}

fn solver_info() -> SolverInfo {
    let registry = default_registry();
    SolverInfo {
        default: registry.default_name().map(str::to_string),
        solvers: registry.names().map(str::to_string).collect(),
        highs_version: highs_version(),
    }
}

fn info_command(args: InfoArgs) -> Result<(), CliError> {
    let info = solver_info();
    match args.format {
        OutputFormat::Text => {
            for name in &info.solvers {
                let marker = if info.default.as_deref() == Some(name) {
                    " (default)"
                } else {
                    ""
                };
                println!("{name}{marker}");
            }
            if let Some(version) = &info.highs_version {
                println!("HiGHS {version}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }
    Ok(())
}
