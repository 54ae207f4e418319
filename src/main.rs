use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use project_risk_analyzer::{
    config::Settings,
    handlers::{analyze_request, assess_batch, ApiResponse},
    models::RecommendationOrder,
    services::{AssessmentService, RiskScorer},
    utils::init_logging,
    AppError,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "project-risk-analyzer", version, about = "Weighted project risk scoring")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "RISK_ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Order of factor recommendations: canonical or input
    #[arg(long, global = true)]
    order: Option<RecommendationOrder>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single `{"risk_factors": {...}}` request
    Analyze {
        /// Request file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Store a JSON array of assessment requests and summarize them
    Assess {
        /// Request file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the factor weight table
    Weights,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("{}", err);
            return fail(&err, Settings::default().output.pretty);
        }
    };
    if let Some(order) = cli.order {
        settings.analysis.recommendation_order = order;
    }

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("{}", e);
    }

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Command failed: {}", err);
            fail(&err, settings.output.pretty)
        }
    }
}

/// Print the error envelope and pick the exit code: 2 for rejected input,
/// 1 for everything else.
fn fail(err: &AppError, pretty: bool) -> ExitCode {
    if let Err(e) = print_json(&ApiResponse::from(err), pretty) {
        eprintln!("{}", e);
    }
    if err.is_validation() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), AppError> {
    let scorer = RiskScorer::with_order(settings.analysis.recommendation_order);
    let pretty = settings.output.pretty;

    match command {
        Command::Analyze { input } => {
            let body = read_request(input.as_deref())?;
            let analysis = analyze_request(&scorer, &body)?;
            info!("Risk score {} ({})", analysis.risk_score, analysis.risk_level);
            print_json(&ApiResponse::success(analysis), pretty)
        }
        Command::Assess { input } => {
            let body = read_request(input.as_deref())?;
            let mut service = AssessmentService::new(scorer);
            let report = assess_batch(&mut service, &body)?;
            print_json(&ApiResponse::success(report), pretty)
        }
        Command::Weights => print_json(&ApiResponse::success(scorer.weights()), pretty),
    }
}

fn read_request(input: Option<&Path>) -> Result<Value, AppError> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&raw)
        .map_err(|e| AppError::ValidationError(format!("Invalid JSON request: {}", e)))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
