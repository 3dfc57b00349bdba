//! CISC command line.
//!
//! Scores the causal direction of discrete variable pairs read from JSON:
//! - `score`: both directional scores for every pair
//! - `evaluate`: accuracy and decision-rate curve against known directions
//! - `complexity`: stochastic complexity breakdown of one sequence
//! - `regret`: the multinomial regret term on its own
//! - `config`: show or validate the resolved configuration

use std::path::{Path, PathBuf};

use cisc_common::{Error, OutputFormat};
use cisc_config::{resolve_config, ResolvedConfig, CONFIG_SCHEMA_VERSION};
use cisc_core::exit_codes::ExitCode;
use cisc_core::input::{load_pairs, load_sequence};
use cisc_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use cisc_core::{score_pairs, summarize, BatchOptions, BatchSummary, PairOutcome, PairResult};
use cisc_math::{
    complexity_breakdown_with_precision, exact_regret, log2_clamped, ComplexityError,
    LogFactorialCache, RecurrenceState,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

/// Causal inference on discrete data by stochastic complexity
#[derive(Parser)]
#[command(name = "cisc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to cisc.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score both causal directions for every pair in a file
    Score(InputArgs),

    /// Measure accuracy against the known direction of each pair
    Evaluate(EvaluateArgs),

    /// Stochastic complexity of a single sequence
    Complexity(ComplexityArgs),

    /// Multinomial regret for a domain size and sample size
    Regret(RegretArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON pair file, or '-' for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Decision-rate points (overrides the config)
    #[arg(long)]
    steps: Option<usize>,
}

#[derive(Args, Debug)]
struct ComplexityArgs {
    /// JSON array of symbols, or '-' for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Use the exact regret instead of the recurrence
    #[arg(long)]
    exact: bool,
}

#[derive(Args, Debug)]
struct RegretArgs {
    /// Domain size L
    #[arg(long, short = 'L')]
    categories: usize,

    /// Sample size n
    #[arg(long, short = 'n')]
    samples: usize,

    /// Sum every composition exactly (small n only)
    #[arg(long)]
    exact: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the resolved configuration
    Show,

    /// Validate a config file (defaults to the resolved one)
    Validate {
        /// File to validate
        path: Option<PathBuf>,
    },
}

/// A failed command: the error to report and the process exit code.
struct Failure {
    error: Error,
    exit: ExitCode,
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        let exit = ExitCode::from_error(&error);
        Failure { error, exit }
    }
}

impl From<ComplexityError> for Failure {
    fn from(error: ComplexityError) -> Self {
        Error::from(error).into()
    }
}

type CommandResult = std::result::Result<ExitCode, Failure>;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Score(args) => run_score(global, args),
        Commands::Evaluate(args) => run_evaluate(global, args),
        Commands::Complexity(args) => run_complexity(global, args),
        Commands::Regret(args) => run_regret(global, args),
        Commands::Config(args) => run_config(global, args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(failure) => {
            output_error(global, &failure.error);
            failure.exit
        }
    };
    debug!(exit = %exit_code, "done");
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(global: &GlobalOpts) -> std::result::Result<ResolvedConfig, Failure> {
    let resolved = resolve_config(global.config.as_deref()).map_err(|e| Failure {
        error: e.into(),
        exit: ExitCode::ConfigError,
    })?;
    info!(
        source = %resolved.source,
        path = ?resolved.path,
        "configuration resolved"
    );
    Ok(resolved)
}

fn output_error(global: &GlobalOpts, error: &Error) {
    let report = error.report();
    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => match serde_json::to_string(&report) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{report}"),
        },
        OutputFormat::Md | OutputFormat::Summary => eprintln!("{report}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> std::result::Result<(), Failure> {
    let text = serde_json::to_string_pretty(value).map_err(Error::from)?;
    println!("{text}");
    Ok(())
}

fn print_json_line<T: Serialize>(value: &T) -> std::result::Result<(), Failure> {
    let text = serde_json::to_string(value).map_err(Error::from)?;
    println!("{text}");
    Ok(())
}

fn batch_exit(outcomes: &[PairOutcome]) -> ExitCode {
    if outcomes.iter().all(PairOutcome::is_scored) {
        ExitCode::Clean
    } else {
        ExitCode::PartialFail
    }
}

fn input_label(path: &Path) -> String {
    if path == Path::new("-") {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

// ============================================================================
// score
// ============================================================================

#[derive(Serialize)]
struct ScoreResponse<'a> {
    schema_version: &'static str,
    input: String,
    precision_digits: u32,
    pairs: &'a [PairOutcome],
}

fn run_score(global: &GlobalOpts, args: &InputArgs) -> CommandResult {
    let resolved = load_config(global)?;
    let pairs = load_pairs(&args.input)?;
    let options = BatchOptions::from_config(&resolved.config);
    info!(pairs = pairs.len(), input = %input_label(&args.input), "scoring pairs");

    let outcomes = score_pairs(&pairs, &options);

    match global.format {
        OutputFormat::Json => print_json(&ScoreResponse {
            schema_version: CONFIG_SCHEMA_VERSION,
            input: input_label(&args.input),
            precision_digits: options.scorer.precision_digits(),
            pairs: &outcomes,
        })?,
        OutputFormat::Jsonl => {
            for outcome in &outcomes {
                print_json_line(outcome)?;
            }
        }
        OutputFormat::Md => {
            println!("| pair | X → Y (bits) | Y → X (bits) | direction | confidence |");
            println!("|------|-------------:|-------------:|-----------|-----------:|");
            for outcome in &outcomes {
                match &outcome.result {
                    PairResult::Scored {
                        scores,
                        direction,
                        confidence,
                    } => println!(
                        "| {} | {:.4} | {:.4} | {} | {:.4} |",
                        outcome.name, scores.x_to_y, scores.y_to_x, direction, confidence
                    ),
                    PairResult::Failed { error } => {
                        println!("| {} | - | - | error {} | - |", outcome.name, error.code)
                    }
                }
            }
        }
        OutputFormat::Summary => {
            for outcome in &outcomes {
                match &outcome.result {
                    PairResult::Scored {
                        scores, direction, ..
                    } => println!(
                        "{}: {} ({:.4} vs {:.4} bits)",
                        outcome.name, direction, scores.x_to_y, scores.y_to_x
                    ),
                    PairResult::Failed { error } => {
                        println!("{}: error {} ({})", outcome.name, error.code, error.message)
                    }
                }
            }
        }
    }

    Ok(batch_exit(&outcomes))
}

// ============================================================================
// evaluate
// ============================================================================

fn run_evaluate(global: &GlobalOpts, args: &EvaluateArgs) -> CommandResult {
    let resolved = load_config(global)?;
    let steps = args
        .steps
        .unwrap_or(resolved.config.evaluation.decision_rate_steps);
    if steps == 0 {
        return Err(Failure {
            error: Error::InvalidInput("--steps must be at least 1".into()),
            exit: ExitCode::ArgsError,
        });
    }

    let pairs = load_pairs(&args.input.input)?;
    if pairs.iter().all(|p| p.truth.is_none()) {
        return Err(Error::InvalidInput(
            "no pair carries a known direction; add \"truth\": \"x_to_y\" or \"y_to_x\"".into(),
        )
        .into());
    }

    let outcomes = score_pairs(&pairs, &BatchOptions::from_config(&resolved.config));
    let summary = summarize(&outcomes, steps);
    info!(
        labeled = summary.labeled,
        accuracy = summary.accuracy,
        "evaluation complete"
    );

    output_summary(global, &summary)?;
    Ok(batch_exit(&outcomes))
}

fn output_summary(global: &GlobalOpts, summary: &BatchSummary) -> std::result::Result<(), Failure> {
    match global.format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Jsonl => {
            for point in &summary.curve {
                print_json_line(point)?;
            }
        }
        OutputFormat::Md => {
            println!("# CISC evaluation");
            println!();
            println!(
                "Pairs: {} ({} scored, {} failed)",
                summary.pairs, summary.scored, summary.failed
            );
            println!(
                "Labeled: {} (correct {}, wrong {}, undecided {})",
                summary.labeled,
                summary.tally.correct,
                summary.tally.wrong,
                summary.tally.undecided
            );
            println!("Accuracy: {:.4}", summary.accuracy);
            println!("Accuracy over decided: {:.4}", summary.decided_accuracy);
            println!();
            println!("| decision rate | pairs | accuracy |");
            println!("|--------------:|------:|---------:|");
            for point in &summary.curve {
                println!("| {:.2} | {} | {:.4} |", point.rate, point.decisions, point.accuracy);
            }
        }
        OutputFormat::Summary => {
            println!(
                "evaluate: {} labeled, accuracy {:.4}, decided {:.4}, {} undecided, {} failed",
                summary.labeled,
                summary.accuracy,
                summary.decided_accuracy,
                summary.tally.undecided,
                summary.failed
            );
        }
    }
    Ok(())
}

// ============================================================================
// complexity
// ============================================================================

fn run_complexity(global: &GlobalOpts, args: &ComplexityArgs) -> CommandResult {
    let resolved = load_config(global)?;
    let sequence = load_sequence(&args.input)?;
    let digits = resolved.config.precision_digits;

    let mut breakdown = complexity_breakdown_with_precision(&sequence, digits)?;
    if args.exact {
        let mut cache = LogFactorialCache::with_capacity(sequence.len());
        let regret = exact_regret(breakdown.categories, breakdown.samples, &mut cache)?;
        breakdown.regret = Some(regret);
        breakdown.regret_bits = log2_clamped(regret);
        breakdown.total_bits = breakdown.deficiency_bits + breakdown.regret_bits;
    }

    match global.format {
        OutputFormat::Json => print_json(&breakdown)?,
        OutputFormat::Jsonl => print_json_line(&breakdown)?,
        OutputFormat::Md => {
            println!("| samples | categories | deficiency (bits) | regret (bits) | total (bits) |");
            println!("|--------:|-----------:|------------------:|--------------:|-------------:|");
            println!(
                "| {} | {} | {:.4} | {:.4} | {:.4} |",
                breakdown.samples,
                breakdown.categories,
                breakdown.deficiency_bits,
                breakdown.regret_bits,
                breakdown.total_bits
            );
        }
        OutputFormat::Summary => println!(
            "SC = {:.4} bits (n={}, L={})",
            breakdown.total_bits, breakdown.samples, breakdown.categories
        ),
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// regret
// ============================================================================

#[derive(Serialize)]
struct RegretResponse {
    categories: usize,
    samples: usize,
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision_digits: Option<u32>,
    /// Absent when `C(L, n)` exceeds the `f64` range.
    #[serde(skip_serializing_if = "Option::is_none")]
    regret: Option<f64>,
    regret_bits: f64,
}

fn run_regret(global: &GlobalOpts, args: &RegretArgs) -> CommandResult {
    let resolved = load_config(global)?;
    let digits = resolved.config.precision_digits;

    let response = if args.exact {
        let mut cache = LogFactorialCache::new();
        let regret = exact_regret(args.categories, args.samples, &mut cache)?;
        RegretResponse {
            categories: args.categories,
            samples: args.samples,
            method: "exact",
            precision_digits: None,
            regret: Some(regret),
            regret_bits: log2_clamped(regret),
        }
    } else {
        let state = RecurrenceState::solve(args.categories, args.samples, digits)?;
        RegretResponse {
            categories: args.categories,
            samples: args.samples,
            method: "recurrence",
            precision_digits: Some(digits),
            regret: state.value(),
            regret_bits: state.log2(),
        }
    };

    match global.format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Jsonl => print_json_line(&response)?,
        OutputFormat::Md | OutputFormat::Summary => match response.regret {
            Some(regret) => println!(
                "C({}, {}) = {} ({:.6} bits, {})",
                response.categories,
                response.samples,
                regret,
                response.regret_bits,
                response.method
            ),
            None => println!(
                "log2 C({}, {}) = {:.6} bits ({})",
                response.categories, response.samples, response.regret_bits, response.method
            ),
        },
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// config
// ============================================================================

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> CommandResult {
    match &args.command {
        ConfigCommands::Show => run_config_show(global),
        ConfigCommands::Validate { path } => run_config_validate(global, path.as_deref()),
    }
}

fn run_config_show(global: &GlobalOpts) -> CommandResult {
    let resolved = load_config(global)?;
    let path = resolved.path.as_ref().map(|p| p.display().to_string());

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let response = serde_json::json!({
                "source": resolved.source.to_string(),
                "path": path,
                "config": &resolved.config,
            });
            if global.format == OutputFormat::Json {
                print_json(&response)?;
            } else {
                print_json_line(&response)?;
            }
        }
        OutputFormat::Md => {
            let text = resolved
                .config
                .to_toml_string()
                .map_err(|e| Failure {
                    error: e.into(),
                    exit: ExitCode::InternalError,
                })?;
            println!("# cisc config show");
            println!();
            println!(
                "Source: {} ({})",
                resolved.source,
                path.as_deref().unwrap_or("no file")
            );
            println!();
            println!("```toml");
            print!("{text}");
            println!("```");
        }
        OutputFormat::Summary => println!(
            "config: {} precision_digits={} parallel={} min_pairs={}",
            path.as_deref().unwrap_or("built-in defaults"),
            resolved.config.precision_digits,
            resolved.config.parallel.enabled,
            resolved.config.parallel.min_pairs
        ),
    }
    Ok(ExitCode::Clean)
}

fn run_config_validate(global: &GlobalOpts, path: Option<&Path>) -> CommandResult {
    let resolved = match path {
        Some(p) => resolve_config(Some(p)),
        None => resolve_config(global.config.as_deref()),
    }
    .map_err(|e| Failure {
        error: e.into(),
        exit: ExitCode::ConfigError,
    })?;
    let shown = resolved
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => print_json_line(&serde_json::json!({
            "status": "valid",
            "path": shown,
            "schema_version": &resolved.config.schema_version,
        }))?,
        OutputFormat::Md => {
            println!("# Configuration Validation");
            println!();
            println!("Status: ✓ Valid");
            println!("Path: {shown}");
        }
        OutputFormat::Summary => println!("config validate: OK ({shown})"),
    }
    Ok(ExitCode::Clean)
}
