use serde::Serialize;

use super::types::{DimensionScores, Weights};

/// Absolute tolerance for accepting a weight sum as already 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-8;

/// Diagnostic attached to a score when the supplied weights needed
/// intervention. These are user-facing notices, not errors: the caller
/// decides how to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightNotice {
    /// Weights did not sum to 1.0; each was divided by the original sum
    /// before use.
    Normalized { original_sum: f64 },
    /// Weights summed to exactly zero. Normalization is impossible, so the
    /// sentinel result (score 0, all-zero weights) was returned.
    ZeroSum,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreResult {
    /// Composite readiness score, 0-100 under well-formed inputs.
    pub score: f64,
    /// The weights actually applied, post-normalization if it occurred.
    pub weights_used: Weights,
    pub notice: Option<WeightNotice>,
}

/// Compute the composite readiness score.
///
/// Weights summing to 1.0 (within [`WEIGHT_SUM_TOLERANCE`]) are used as
/// supplied. Any other nonzero sum triggers normalization, reported via
/// [`WeightNotice::Normalized`]. An exactly-zero sum cannot be normalized
/// and yields the sentinel result with [`WeightNotice::ZeroSum`] rather
/// than a division by zero.
pub fn compute_score(scores: &DimensionScores, weights: &Weights) -> ScoreResult {
    let total = weights.sum();

    if (total - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
        return ScoreResult {
            score: weighted_composite(scores, weights),
            weights_used: *weights,
            notice: None,
        };
    }

    if total == 0.0 {
        return ScoreResult {
            score: 0.0,
            weights_used: Weights::ZERO,
            notice: Some(WeightNotice::ZeroSum),
        };
    }

    let used = weights.scaled_by(total);
    ScoreResult {
        score: weighted_composite(scores, &used),
        weights_used: used,
        notice: Some(WeightNotice::Normalized { original_sum: total }),
    }
}

fn weighted_composite(scores: &DimensionScores, weights: &Weights) -> f64 {
    weights.visible * scores.visible
        + weights.documented * scores.documented
        + weights.sustainable * scores.sustainable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scores() -> DimensionScores {
        DimensionScores {
            visible: 75.0,
            documented: 60.0,
            sustainable: 80.0,
        }
    }

    #[test]
    fn test_unit_sum_weights_used_unchanged() {
        let weights = Weights {
            visible: 0.35,
            documented: 0.40,
            sustainable: 0.25,
        };
        let result = compute_score(&sample_scores(), &weights);

        assert!((result.score - 70.25).abs() < 1e-9);
        assert_eq!(result.weights_used, weights);
        assert!(result.notice.is_none());
    }

    #[test]
    fn test_within_tolerance_skips_normalization() {
        let weights = Weights {
            visible: 0.35 + 5e-9,
            documented: 0.40,
            sustainable: 0.25,
        };
        let result = compute_score(&sample_scores(), &weights);
        assert!(result.notice.is_none());
        assert_eq!(result.weights_used, weights);
    }

    #[test]
    fn test_nonunit_sum_normalizes_and_reports() {
        let scores = DimensionScores {
            visible: 100.0,
            documented: 50.0,
            sustainable: 0.0,
        };
        let weights = Weights {
            visible: 0.2,
            documented: 0.2,
            sustainable: 0.1,
        };
        let result = compute_score(&scores, &weights);

        assert!((result.score - 60.0).abs() < 1e-9);
        assert!((result.weights_used.visible - 0.4).abs() < 1e-12);
        assert!((result.weights_used.documented - 0.4).abs() < 1e-12);
        assert!((result.weights_used.sustainable - 0.2).abs() < 1e-12);
        assert!((result.weights_used.sum() - 1.0).abs() < 1e-12);
        match result.notice {
            Some(WeightNotice::Normalized { original_sum }) => {
                assert!((original_sum - 0.5).abs() < 1e-12);
            }
            other => panic!("expected Normalized notice, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sum_returns_sentinel() {
        let result = compute_score(&sample_scores(), &Weights::ZERO);

        assert_eq!(result.score, 0.0);
        assert_eq!(result.weights_used, Weights::ZERO);
        assert_eq!(result.notice, Some(WeightNotice::ZeroSum));
    }

    #[test]
    fn test_single_weight_isolates_dimension() {
        let weights = Weights {
            visible: 0.0,
            documented: 1.0,
            sustainable: 0.0,
        };
        let result = compute_score(&sample_scores(), &weights);
        assert!((result.score - 60.0).abs() < 1e-9);
        assert!(result.notice.is_none());
    }

    #[test]
    fn test_linear_in_each_score() {
        let weights = Weights::default();
        let base = compute_score(&sample_scores(), &weights).score;

        let mut bumped = sample_scores();
        bumped.visible += 10.0;
        let after = compute_score(&bumped, &weights).score;

        // Raising one dimension by d moves the composite by w_i * d.
        assert!((after - base - 0.35 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalization_is_scale_invariant() {
        let scores = sample_scores();
        let weights = Weights {
            visible: 0.35,
            documented: 0.40,
            sustainable: 0.25,
        };
        let doubled = Weights {
            visible: 0.70,
            documented: 0.80,
            sustainable: 0.50,
        };

        let unit = compute_score(&scores, &weights);
        let scaled = compute_score(&scores, &doubled);
        assert!((unit.score - scaled.score).abs() < 1e-9);
    }
}
