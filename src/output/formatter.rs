use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::assessment::{
    DimensionScores, ScoreResult, ValuationResult, WeightNotice, SCORE_MAX,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Bar width that fits the current terminal next to a label column.
/// Falls back to the default width when output is piped.
fn bar_width() -> usize {
    const DEFAULT: usize = 30;
    match get_terminal_width() {
        Some(w) if w > 40 => DEFAULT.min(w - 30),
        Some(_) => 10,
        None => DEFAULT,
    }
}

/// Render a horizontal value bar: filled blocks up to value/max, the rest
/// as empty blocks. Clamps ratios above 1.
pub fn value_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Render a weight notice for the user. The original sum is always shown
/// to two decimal places.
pub fn format_notice(notice: &WeightNotice, use_colors: bool) -> String {
    match notice {
        WeightNotice::Normalized { original_sum } => {
            let text = format!(
                "Warning: weights sum to {:.2}; normalized to 1.00 for calculation.",
                original_sum
            );
            if use_colors {
                text.yellow().to_string()
            } else {
                text
            }
        }
        WeightNotice::ZeroSum => {
            let text =
                "Error: weights sum to zero and cannot be normalized; score reported as 0.00."
                    .to_string();
            if use_colors {
                text.red().to_string()
            } else {
                text
            }
        }
    }
}

/// Format the composite score summary: headline score plus the weights
/// actually used, with any notice first.
pub fn format_score_summary(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if let Some(ref notice) = result.notice {
        lines.push(format_notice(notice, use_colors));
    }

    let headline = format!("Exit-AI-R Score: {:.2}", result.score);
    if use_colors {
        lines.push(headline.bold().to_string());
    } else {
        lines.push(headline);
    }

    lines.push(format!(
        "Weights used: visible {:.2} | documented {:.2} | sustainable {:.2}",
        result.weights_used.visible,
        result.weights_used.documented,
        result.weights_used.sustainable
    ));

    lines.join("\n")
}

/// Bar chart of the three dimension scores on a 0-100 scale.
/// Dimension scores render with zero decimal places.
pub fn format_dimension_chart(scores: &DimensionScores, use_colors: bool) -> String {
    let width = bar_width();
    let rows = [
        ("Visible", scores.visible),
        ("Documented", scores.documented),
        ("Sustainable", scores.sustainable),
    ];

    rows.iter()
        .map(|(label, value)| {
            let bar = value_bar(*value, SCORE_MAX, width);
            if use_colors {
                format!("{:<12} {} {:>3.0}", label, bar.cyan(), value)
            } else {
                format!("{:<12} {} {:>3.0}", label, bar, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comparison chart of baseline vs projected EBITDA multiples.
pub fn format_valuation_chart(result: &ValuationResult, use_colors: bool) -> String {
    let width = bar_width();
    let max = result.baseline.max(result.projected);
    let rows = [
        ("Baseline", result.baseline),
        ("Projected", result.projected),
    ];

    let mut lines: Vec<String> = rows
        .iter()
        .map(|(label, value)| {
            let bar = value_bar(*value, max, width);
            if use_colors {
                format!("{:<10} {} {:.2}x", label, bar.cyan(), value)
            } else {
                format!("{:<10} {} {:.2}x", label, bar, value)
            }
        })
        .collect();

    let uplift = format!("Implied uplift: {:+.2}x", result.uplift());
    if use_colors {
        lines.push(uplift.green().to_string());
    } else {
        lines.push(uplift);
    }

    lines.join("\n")
}

/// Format the valuation projection summary.
pub fn format_valuation_summary(result: &ValuationResult, use_colors: bool) -> String {
    let text = format!(
        "Baseline EBITDA multiple: {:.2}x\nProjected EBITDA multiple: {:.2}x",
        result.baseline, result.projected
    );
    if use_colors {
        // Highlight only the projected line
        let mut lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        if let Some(last) = lines.last_mut() {
            *last = last.clone().bold().to_string();
        }
        lines.join("\n")
    } else {
        text
    }
}

/// Tab-separated score output for scripting:
/// score, weights used, notice kind (or "-").
/// No headers, no colors.
pub fn format_score_tsv(result: &ScoreResult) -> String {
    let notice = match result.notice {
        Some(WeightNotice::Normalized { .. }) => "normalized",
        Some(WeightNotice::ZeroSum) => "zero-sum",
        None => "-",
    };
    format!(
        "{:.2}\t{:.4}\t{:.4}\t{:.4}\t{}",
        result.score,
        result.weights_used.visible,
        result.weights_used.documented,
        result.weights_used.sustainable,
        notice
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{compute_score, project_valuation, ValuationParameters, Weights};

    fn unit_result() -> ScoreResult {
        compute_score(&DimensionScores::default(), &Weights::default())
    }

    #[test]
    fn test_value_bar_full_and_empty() {
        assert_eq!(value_bar(100.0, 100.0, 4), "████");
        assert_eq!(value_bar(0.0, 100.0, 4), "░░░░");
    }

    #[test]
    fn test_value_bar_half() {
        assert_eq!(value_bar(50.0, 100.0, 4), "██░░");
    }

    #[test]
    fn test_value_bar_zero_max() {
        assert_eq!(value_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn test_value_bar_clamps_overflow() {
        assert_eq!(value_bar(150.0, 100.0, 4), "████");
    }

    #[test]
    fn test_format_notice_two_decimal_sum() {
        let notice = WeightNotice::Normalized { original_sum: 0.5 };
        let text = format_notice(&notice, false);
        assert!(text.contains("0.50"));
        assert!(text.contains("normalized"));
    }

    #[test]
    fn test_format_notice_zero_sum() {
        let text = format_notice(&WeightNotice::ZeroSum, false);
        assert!(text.contains("zero"));
        assert!(text.contains("0.00"));
    }

    #[test]
    fn test_score_summary_two_decimals() {
        let text = format_score_summary(&unit_result(), false);
        assert!(text.contains("Exit-AI-R Score: 70.25"));
        assert!(text.contains("visible 0.35"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_score_summary_includes_notice() {
        let weights = Weights {
            visible: 0.2,
            documented: 0.2,
            sustainable: 0.1,
        };
        let result = compute_score(&DimensionScores::default(), &weights);
        let text = format_score_summary(&result, false);
        assert!(text.contains("0.50"));
        assert!(text.lines().next().unwrap().starts_with("Warning"));
    }

    #[test]
    fn test_dimension_chart_zero_decimals() {
        let text = format_dimension_chart(&DimensionScores::default(), false);
        assert!(text.contains("Visible"));
        assert!(text.contains(" 75"));
        assert!(!text.contains("75.00"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_valuation_chart_shows_uplift() {
        let result = project_valuation(75.0, &ValuationParameters::default());
        let text = format_valuation_chart(&result, false);
        assert!(text.contains("7.00x"));
        assert!(text.contains("8.50x"));
        assert!(text.contains("+1.50x"));
    }

    #[test]
    fn test_score_tsv_fields() {
        let line = format_score_tsv(&unit_result());
        assert_eq!(line.split('\t').count(), 5);
        assert!(line.starts_with("70.25\t"));
        assert!(line.ends_with("-"));
    }

    #[test]
    fn test_score_tsv_notice_column() {
        let result = compute_score(&DimensionScores::default(), &Weights::ZERO);
        let line = format_score_tsv(&result);
        assert!(line.ends_with("zero-sum"));
    }
}
