use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use airval::assessment::{
    compute_score, project_valuation, validate_inputs, DimensionScores, ValuationParameters,
    Weights,
};
use airval::config::Profile;
use airval::output;
use airval::report::{self, ReportContext};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Dimension score and weight overrides shared by the non-interactive
/// subcommands. Anything left unset falls back to the config file, then to
/// the built-in defaults.
#[derive(Args, Debug, Clone, Copy, Default)]
struct ScoreArgs {
    /// Visible AI capabilities score (0-100)
    #[arg(long)]
    visible: Option<f64>,

    /// Documented AI impact score (0-100)
    #[arg(long)]
    documented: Option<f64>,

    /// Sustainable AI capabilities score (0-100)
    #[arg(long)]
    sustainable: Option<f64>,

    /// Weight for the Visible dimension (0-1)
    #[arg(long)]
    w_visible: Option<f64>,

    /// Weight for the Documented dimension (0-1)
    #[arg(long)]
    w_documented: Option<f64>,

    /// Weight for the Sustainable dimension (0-1)
    #[arg(long)]
    w_sustainable: Option<f64>,
}

impl ScoreArgs {
    fn apply(&self, scores: &mut DimensionScores, weights: &mut Weights) {
        if let Some(v) = self.visible {
            scores.visible = v;
        }
        if let Some(v) = self.documented {
            scores.documented = v;
        }
        if let Some(v) = self.sustainable {
            scores.sustainable = v;
        }
        if let Some(v) = self.w_visible {
            weights.visible = v;
        }
        if let Some(v) = self.w_documented {
            weights.documented = v;
        }
        if let Some(v) = self.w_sustainable {
            weights.sustainable = v;
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
struct ValuationArgs {
    /// Baseline sector EBITDA multiple (0-20)
    #[arg(long)]
    baseline: Option<f64>,

    /// AI premium coefficient (0-5)
    #[arg(long)]
    coefficient: Option<f64>,
}

impl ValuationArgs {
    fn apply(&self, params: &mut ValuationParameters) {
        if let Some(v) = self.baseline {
            params.baseline_multiple = v;
        }
        if let Some(v) = self.coefficient {
            params.premium_coefficient = v;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the composite Exit-AI-R readiness score
    Score {
        #[command(flatten)]
        inputs: ScoreArgs,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,

        /// JSON output
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
    },
    /// Project the valuation multiple from a readiness score
    Project {
        /// Composite score to project from (computed from inputs when omitted)
        #[arg(long)]
        score: Option<f64>,

        #[command(flatten)]
        inputs: ScoreArgs,

        #[command(flatten)]
        valuation: ValuationArgs,

        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Run the full pipeline and render the narrative report
    Report {
        #[command(flatten)]
        inputs: ScoreArgs,

        #[command(flatten)]
        valuation: ValuationArgs,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a starter config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "airval")]
#[command(about = "Exit-readiness AI scoring and valuation calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/airval/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Init writes a config; don't require one to exist first
    if let Some(Commands::Init) = cli.command {
        let path = cli.config.map(PathBuf::from);
        if let Err(e) = airval::config::run_init_wizard(path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_IO);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match airval::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let profile: Profile = config.profile.clone().unwrap_or_default().resolve();
    let scores = config.scores.clone().unwrap_or_default().resolve();
    let weights = config.weights.clone().unwrap_or_default().resolve();
    let params = config.valuation.clone().unwrap_or_default().resolve();

    // Validate config-supplied values at startup
    if let Err(errors) = validate_inputs(&scores, &weights, &params) {
        eprintln!("Config value errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Defaults: scores {:.0}/{:.0}/{:.0}, weights {:.2}/{:.2}/{:.2}, baseline {:.1}x, coefficient {:.1}",
            scores.visible,
            scores.documented,
            scores.sustainable,
            weights.visible,
            weights.documented,
            weights.sustainable,
            params.baseline_multiple,
            params.premium_coefficient,
        );
    }

    match cli.command {
        None => {
            let app = airval::tui::App::new(profile, scores, weights, params, cli.verbose);
            if let Err(e) = airval::tui::run_tui(app).await {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Some(Commands::Score { inputs, tsv, json }) => {
            let (scores, weights) = resolve_score_inputs(scores, weights, &params, &inputs);
            let result = compute_score(&scores, &weights);

            if tsv {
                println!("{}", output::format_score_tsv(&result));
            } else if json {
                print_json(&result);
            } else {
                let use_colors = output::should_use_colors();
                println!("{}", output::format_dimension_chart(&scores, use_colors));
                println!();
                println!("{}", output::format_score_summary(&result, use_colors));
            }
        }
        Some(Commands::Project {
            score,
            inputs,
            valuation,
            json,
        }) => {
            let (scores, weights) = resolve_score_inputs(scores, weights, &params, &inputs);
            let mut params = params;
            valuation.apply(&mut params);
            if let Err(errors) = validate_inputs(&scores, &weights, &params) {
                exit_input_errors(&errors);
            }

            // --score bypasses the calculator; otherwise compute from the
            // resolved inputs and surface any weight notice on stderr.
            let score_value = match score {
                Some(s) => s,
                None => {
                    let result = compute_score(&scores, &weights);
                    if let Some(ref notice) = result.notice {
                        eprintln!("{}", output::format_notice(notice, false));
                    }
                    result.score
                }
            };

            let result = project_valuation(score_value, &params);
            if json {
                print_json(&serde_json::json!({
                    "score": score_value,
                    "baseline": result.baseline,
                    "projected": result.projected,
                    "uplift": result.uplift(),
                }));
            } else {
                let use_colors = output::should_use_colors();
                println!("{}", output::format_valuation_summary(&result, use_colors));
                println!();
                println!("{}", output::format_valuation_chart(&result, use_colors));
            }
        }
        Some(Commands::Report {
            inputs,
            valuation,
            output: output_path,
        }) => {
            let (scores, weights) = resolve_score_inputs(scores, weights, &params, &inputs);
            let mut params = params;
            valuation.apply(&mut params);
            if let Err(errors) = validate_inputs(&scores, &weights, &params) {
                exit_input_errors(&errors);
            }

            let score = compute_score(&scores, &weights);
            if let Some(ref notice) = score.notice {
                // Keep stdout clean for the report itself
                eprintln!("{}", output::format_notice(notice, false));
            }
            let projection = project_valuation(score.score, &params);
            let ctx = ReportContext {
                profile,
                scores,
                score,
                params,
                valuation: projection,
            };
            let narrative = report::generate_narrative(&ctx);

            match output_path {
                Some(path) => {
                    if let Err(e) = report::save_report(&path, &narrative) {
                        eprintln!("Failed to write report: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", narrative),
            }
        }
        Some(Commands::Init) => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Apply flag overrides to the config-resolved inputs, then validate the
/// combined set. Exits with the input error code on violations.
fn resolve_score_inputs(
    mut scores: DimensionScores,
    mut weights: Weights,
    params: &ValuationParameters,
    args: &ScoreArgs,
) -> (DimensionScores, Weights) {
    args.apply(&mut scores, &mut weights);
    if let Err(errors) = validate_inputs(&scores, &weights, params) {
        exit_input_errors(&errors);
    }
    (scores, weights)
}

fn exit_input_errors(errors: &[String]) -> ! {
    eprintln!("Input errors:");
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(EXIT_INPUT);
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_IO);
        }
    }
}
