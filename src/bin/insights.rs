//! Insights CLI - Command-line interface for Synheart Insights
//!
//! Commands:
//! - generate: Turn one request into a report (batch mode)
//! - run: Process NDJSON requests from stdin (streaming mode)
//! - thresholds: Print the default threshold policy
//! - schema: Print request shapes per category

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use synheart_insights::pipeline::{InsightEngine, InsightRequest};
use synheart_insights::types::{InsightReport, ReportCategory};
use synheart_insights::{InsightError, Severity, Thresholds, INSIGHTS_VERSION};

/// Insights - Deterministic insight engine for wellness aggregates
#[derive(Parser)]
#[command(name = "insights")]
#[command(author = "Synheart AI Inc")]
#[command(version = INSIGHTS_VERSION)]
#[command(about = "Turn wellness aggregates into classified insights", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from one request (batch mode)
    Generate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Load thresholds from file
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Process NDJSON requests from stdin (streaming mode)
    Run {
        /// Load thresholds from file
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the default thresholds as JSON
    Thresholds,

    /// Print request shapes per category
    Schema {
        /// Only print this category
        #[arg(long)]
        category: Option<CategoryArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per insight, prefixed with its severity
    Text,
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Trend,
    Distribution,
    Classification,
    GroupActivity,
    Recommendations,
    Alerts,
    Ranking,
}

impl From<CategoryArg> for ReportCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Trend => ReportCategory::Trend,
            CategoryArg::Distribution => ReportCategory::Distribution,
            CategoryArg::Classification => ReportCategory::Classification,
            CategoryArg::GroupActivity => ReportCategory::GroupActivity,
            CategoryArg::Recommendations => ReportCategory::Recommendations,
            CategoryArg::Alerts => ReportCategory::Alerts,
            CategoryArg::Ranking => ReportCategory::Ranking,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), InsightsCliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            thresholds,
            format,
        } => cmd_generate(&input, &output, thresholds.as_deref(), format),

        Commands::Run { thresholds, format } => cmd_run(thresholds.as_deref(), format),

        Commands::Thresholds => {
            println!("{}", Thresholds::default().to_json()?);
            Ok(())
        }

        Commands::Schema { category } => {
            cmd_schema(category.map(ReportCategory::from));
            Ok(())
        }
    }
}

fn build_engine(thresholds: Option<&Path>) -> Result<InsightEngine, InsightsCliError> {
    let mut engine = InsightEngine::new();

    if let Some(path) = thresholds {
        let json = fs::read_to_string(path)?;
        engine.load_thresholds(&json)?;
        info!(path = %path.display(), "loaded thresholds");
    }

    Ok(engine)
}

fn cmd_generate(
    input: &Path,
    output: &Path,
    thresholds: Option<&Path>,
    format: OutputFormat,
) -> Result<(), InsightsCliError> {
    let engine = build_engine(thresholds)?;

    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if input_data.trim().is_empty() {
        return Err(InsightsCliError::NoRequest);
    }

    let request = InsightRequest::from_json(&input_data)?;
    let report = engine.report(&request);
    let output_data = format_report(&report, format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(thresholds: Option<&Path>, format: OutputFormat) -> Result<(), InsightsCliError> {
    let engine = build_engine(thresholds)?;

    if atty::is(atty::Stream::Stdin) {
        warn!("stdin is a terminal; expecting one JSON request per line");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut processed = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let request = InsightRequest::from_json(trimmed)?;
        let report = engine.report(&request);

        // Each report must stay on one line in streaming mode
        let rendered = match format {
            OutputFormat::JsonPretty => format_report(&report, OutputFormat::Json)?,
            other => format_report(&report, other)?,
        };
        write!(stdout, "{}", rendered)?;
        stdout.flush()?;
        processed += 1;
    }

    debug!(processed, "stream finished");
    Ok(())
}

fn cmd_schema(category: Option<ReportCategory>) {
    let categories: Vec<ReportCategory> = match category {
        Some(category) => vec![category],
        None => ReportCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category.as_str());
        println!("  {}", request_example(category));
        println!();
    }

    println!("Emotions: ansiedad, estres, felicidad, tristeza, miedo, enojo, neutral, sorpresa");
    println!("Levels:   normal, medium (medio), high (alto), very_high (muy_alto)");
}

fn request_example(category: ReportCategory) -> serde_json::Value {
    match category {
        ReportCategory::Trend => serde_json::json!({
            "category": "trend",
            "emotions": ["ansiedad", "estres"],
            "points": [{ "label": "2024-01-15", "ansiedad": 35.0, "estres": 20.0 }]
        }),
        ReportCategory::Distribution => serde_json::json!({
            "category": "distribution",
            "entries": [{ "emotion": "felicidad", "count": 60 }]
        }),
        ReportCategory::Classification => serde_json::json!({
            "category": "classification",
            "entries": [{ "level": "alto", "count": 20 }]
        }),
        ReportCategory::GroupActivity => serde_json::json!({
            "category": "group_activity",
            "groups": [{
                "groupName": "Mindfulness",
                "completedActivities": 8,
                "totalActivities": 10,
                "activeMembers": 6
            }]
        }),
        ReportCategory::Recommendations => serde_json::json!({
            "category": "recommendations",
            "entries": [{ "type": "breathing", "generated": 10, "useful": 7 }]
        }),
        ReportCategory::Alerts => serde_json::json!({
            "category": "alerts",
            "now": "2024-01-15T12:00:00Z",
            "alerts": [{ "type": "crisis", "timestamp": "2024-01-15T10:00:00Z" }]
        }),
        ReportCategory::Ranking => serde_json::json!({
            "category": "ranking",
            "metric": "stress",
            "limit": 10,
            "users": [{ "userId": "u1", "metricValue": 72.5, "totalAnalyses": 4 }]
        }),
    }
}

fn format_report(report: &InsightReport, format: OutputFormat) -> Result<String, InsightsCliError> {
    match format {
        OutputFormat::Text => {
            let mut lines: Vec<String> = Vec::new();
            for insight in &report.insights {
                let tag = match insight.severity {
                    Severity::Normal => "[INFO] ",
                    Severity::Ok => "[OK]   ",
                    Severity::Alert => "[ALERT]",
                };
                lines.push(format!("{} {}", tag, insight.text));
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(report)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum InsightsCliError {
    Io(io::Error),
    Insight(InsightError),
    Json(serde_json::Error),
    NoRequest,
}

impl From<io::Error> for InsightsCliError {
    fn from(e: io::Error) -> Self {
        InsightsCliError::Io(e)
    }
}

impl From<InsightError> for InsightsCliError {
    fn from(e: InsightError) -> Self {
        InsightsCliError::Insight(e)
    }
}

impl From<serde_json::Error> for InsightsCliError {
    fn from(e: serde_json::Error) -> Self {
        InsightsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<InsightsCliError> for CliError {
    fn from(e: InsightsCliError) -> Self {
        match e {
            InsightsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            InsightsCliError::Insight(InsightError::InvalidThresholds(msg)) => CliError {
                code: "INVALID_THRESHOLDS".to_string(),
                message: msg,
                hint: Some("Run 'insights thresholds' for the expected fields".to_string()),
            },
            InsightsCliError::Insight(e) => CliError {
                code: "INVALID_INPUT".to_string(),
                message: e.to_string(),
                hint: Some("Run 'insights schema' for request shapes".to_string()),
            },
            InsightsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            InsightsCliError::NoRequest => CliError {
                code: "NO_REQUEST".to_string(),
                message: "No request found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}
