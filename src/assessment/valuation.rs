use serde::Serialize;

use super::types::ValuationParameters;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValuationResult {
    /// Sector baseline EBITDA multiple, carried through for comparison.
    pub baseline: f64,
    /// Baseline plus the readiness premium.
    pub projected: f64,
}

impl ValuationResult {
    /// Implied multiple uplift attributable to the readiness score.
    pub fn uplift(&self) -> f64 {
        self.projected - self.baseline
    }
}

/// Project the valuation multiple from a composite readiness score.
///
/// `projected = baseline + coefficient * score / 100`. Pure affine
/// transform: defined for all real inputs, callers own domain plausibility.
pub fn project_valuation(score: f64, params: &ValuationParameters) -> ValuationResult {
    let premium = params.premium_coefficient * score / 100.0;
    ValuationResult {
        baseline: params.baseline_multiple,
        projected: params.baseline_multiple + premium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(baseline: f64, coefficient: f64) -> ValuationParameters {
        ValuationParameters {
            baseline_multiple: baseline,
            premium_coefficient: coefficient,
        }
    }

    #[test]
    fn test_projection_example() {
        let result = project_valuation(70.25, &params(7.0, 2.0));
        assert!((result.projected - 8.405).abs() < 1e-9);
        assert!((result.uplift() - 1.405).abs() < 1e-9);
    }

    #[test]
    fn test_projection_second_example() {
        let result = project_valuation(82.5, &params(8.0, 2.5));
        assert!((result.projected - 10.0625).abs() < 1e-9);
    }

    #[test]
    fn test_zero_coefficient_yields_baseline() {
        let result = project_valuation(95.0, &params(7.0, 0.0));
        assert_eq!(result.projected, 7.0);
        assert_eq!(result.uplift(), 0.0);
    }

    #[test]
    fn test_zero_score_yields_baseline() {
        let result = project_valuation(0.0, &params(7.0, 2.0));
        assert_eq!(result.projected, 7.0);
    }

    #[test]
    fn test_monotone_in_score_and_coefficient() {
        let low = project_valuation(40.0, &params(7.0, 2.0));
        let high = project_valuation(60.0, &params(7.0, 2.0));
        assert!(high.projected >= low.projected);

        let weak = project_valuation(60.0, &params(7.0, 1.0));
        let strong = project_valuation(60.0, &params(7.0, 3.0));
        assert!(strong.projected >= weak.projected);
    }
}
