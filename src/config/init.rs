use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::assessment::{
    BASELINE_MAX, BASELINE_MIN, COEFFICIENT_MAX, COEFFICIENT_MIN, SCORE_MAX, SCORE_MIN,
    WEIGHT_MAX, WEIGHT_MIN,
};
use crate::config::{
    get_config_path, Config, Profile, ProfileConfig, ScoresConfig, ValuationConfig, WeightsConfig,
};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Prompt for a number until it parses and falls within [min, max].
fn prompt_in_range(message: &str, default: f64, min: f64, max: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &trim_float(default))?;
        match input.parse::<f64>() {
            Ok(v) if v >= min && v <= max => break Ok(v),
            Ok(_) => println!("  Invalid: must be within {}-{}. Try again.", min, max),
            Err(_) => println!("  Invalid: must be a number. Try again."),
        }
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("airval Configuration Wizard");
    println!("===========================");
    println!();

    // 1. Profile
    typewriter("First, who is running assessments and for which company. These names appear in page prose and in the narrative report.");
    println!();
    let defaults = Profile::default();
    let analyst = prompt_with_default("Analyst name", &defaults.analyst)?;
    let firm = prompt_with_default("Firm name", &defaults.firm)?;
    let company = prompt_with_default("Company under assessment", &defaults.company)?;

    // 2. Dimension defaults
    println!();
    let configure_scores = prompt_yes_no("Configure default dimension scores? (n accepts 75/60/80)", false)?;
    let scores = if configure_scores {
        println!();
        typewriter("Each dimension is rated 0-100 from a buyer's perspective.");
        typewriter("  Visible:     how clearly buyers perceive the AI in products and stack.");
        typewriter("  Documented:  auditable financial return on AI investments.");
        typewriter("  Sustainable: integration depth, governance, talent, scalability.");
        let visible = prompt_in_range("Visible score", 75.0, SCORE_MIN, SCORE_MAX)?;
        let documented = prompt_in_range("Documented score", 60.0, SCORE_MIN, SCORE_MAX)?;
        let sustainable = prompt_in_range("Sustainable score", 80.0, SCORE_MIN, SCORE_MAX)?;
        Some(ScoresConfig {
            visible: Some(visible),
            documented: Some(documented),
            sustainable: Some(sustainable),
        })
    } else {
        None
    };

    // 3. Weight defaults
    println!();
    let configure_weights =
        prompt_yes_no("Configure default weights? (n accepts 0.35/0.40/0.25)", false)?;
    let weights = if configure_weights {
        println!();
        typewriter("Weights express how buyers prioritize the dimensions. Each is 0-1.");
        typewriter("They don't have to sum to 1: any nonzero total is rescaled at compute time, with a notice showing the original sum.");
        let visible = prompt_in_range("Weight for Visible", 0.35, WEIGHT_MIN, WEIGHT_MAX)?;
        let documented = prompt_in_range("Weight for Documented", 0.40, WEIGHT_MIN, WEIGHT_MAX)?;
        let sustainable = prompt_in_range("Weight for Sustainable", 0.25, WEIGHT_MIN, WEIGHT_MAX)?;
        Some(WeightsConfig {
            visible: Some(visible),
            documented: Some(documented),
            sustainable: Some(sustainable),
        })
    } else {
        None
    };

    // 4. Valuation defaults
    println!();
    let configure_valuation =
        prompt_yes_no("Configure valuation parameters? (n accepts 7.0x / 2.0)", false)?;
    let valuation = if configure_valuation {
        println!();
        typewriter("The baseline is the sector's EBITDA multiple without AI considerations.");
        typewriter("The premium coefficient is how many turns of multiple a perfect readiness score (100) would add.");
        let baseline =
            prompt_in_range("Baseline EBITDA multiple", 7.0, BASELINE_MIN, BASELINE_MAX)?;
        let coefficient = prompt_in_range(
            "Premium coefficient",
            2.0,
            COEFFICIENT_MIN,
            COEFFICIENT_MAX,
        )?;
        Some(ValuationConfig {
            baseline_multiple: Some(baseline),
            premium_coefficient: Some(coefficient),
        })
    } else {
        None
    };

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        profile: Some(ProfileConfig {
            analyst: Some(analyst),
            firm: Some(firm),
            company: Some(company),
        }),
        scores,
        weights,
        valuation,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Every value here is only a default: flags on `airval score` / `airval project` / `airval report` override per run, and the interactive session edits everything in place.");
    println!("Run `airval` to start an assessment.");

    Ok(())
}
