use serde::{Deserialize, Serialize};

// Entry ranges and adjustment steps for the input widgets (TUI and config
// validation both use these).
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;
pub const SCORE_STEP: f64 = 1.0;

pub const WEIGHT_MIN: f64 = 0.0;
pub const WEIGHT_MAX: f64 = 1.0;
pub const WEIGHT_STEP: f64 = 0.05;

pub const BASELINE_MIN: f64 = 0.0;
pub const BASELINE_MAX: f64 = 20.0;

pub const COEFFICIENT_MIN: f64 = 0.0;
pub const COEFFICIENT_MAX: f64 = 5.0;

pub const MULTIPLE_STEP: f64 = 0.1;

/// The three assessed readiness dimensions, each on a 0-100 scale.
///
/// Visible: how clearly buyers can perceive the AI in products and stack.
/// Documented: auditable financial return on AI investments.
/// Sustainable: depth of integration, governance, talent, scalability.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DimensionScores {
    pub visible: f64,
    pub documented: f64,
    pub sustainable: f64,
}

impl Default for DimensionScores {
    fn default() -> Self {
        Self {
            visible: 75.0,
            documented: 60.0,
            sustainable: 80.0,
        }
    }
}

/// Per-dimension weights, each constrained to [0, 1] at entry.
///
/// The sum is deliberately not constrained to 1.0: the engine normalizes
/// when needed and reports that it did so.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Weights {
    pub visible: f64,
    pub documented: f64,
    pub sustainable: f64,
}

impl Weights {
    pub const ZERO: Weights = Weights {
        visible: 0.0,
        documented: 0.0,
        sustainable: 0.0,
    };

    pub fn sum(&self) -> f64 {
        self.visible + self.documented + self.sustainable
    }

    /// Each weight divided by `total`. Caller guarantees `total != 0`.
    pub fn scaled_by(&self, total: f64) -> Weights {
        Weights {
            visible: self.visible / total,
            documented: self.documented / total,
            sustainable: self.sustainable / total,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            visible: 0.35,
            documented: 0.40,
            sustainable: 0.25,
        }
    }
}

/// Market parameters for the valuation projection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValuationParameters {
    /// Sector baseline EBITDA multiple, in turns.
    pub baseline_multiple: f64,
    /// Premium coefficient: turns of multiple added at a readiness score
    /// of 100.
    pub premium_coefficient: f64,
}

impl Default for ValuationParameters {
    fn default() -> Self {
        Self {
            baseline_multiple: 7.0,
            premium_coefficient: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = Weights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_by_rescales_to_unit_sum() {
        let weights = Weights {
            visible: 0.2,
            documented: 0.2,
            sustainable: 0.1,
        };
        let scaled = weights.scaled_by(weights.sum());
        assert!((scaled.sum() - 1.0).abs() < 1e-12);
        assert!((scaled.visible - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights_sum() {
        assert_eq!(Weights::ZERO.sum(), 0.0);
    }
}
