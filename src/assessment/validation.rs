use super::types::{
    DimensionScores, ValuationParameters, Weights, BASELINE_MAX, BASELINE_MIN, COEFFICIENT_MAX,
    COEFFICIENT_MIN, SCORE_MAX, SCORE_MIN, WEIGHT_MAX, WEIGHT_MIN,
};

/// Validate all entry values at once.
/// Returns every violation (not just the first) so the user can fix the
/// whole input set in one pass.
pub fn validate_inputs(
    scores: &DimensionScores,
    weights: &Weights,
    params: &ValuationParameters,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_range(&mut errors, "scores.visible", scores.visible, SCORE_MIN, SCORE_MAX);
    check_range(
        &mut errors,
        "scores.documented",
        scores.documented,
        SCORE_MIN,
        SCORE_MAX,
    );
    check_range(
        &mut errors,
        "scores.sustainable",
        scores.sustainable,
        SCORE_MIN,
        SCORE_MAX,
    );

    check_range(&mut errors, "weights.visible", weights.visible, WEIGHT_MIN, WEIGHT_MAX);
    check_range(
        &mut errors,
        "weights.documented",
        weights.documented,
        WEIGHT_MIN,
        WEIGHT_MAX,
    );
    check_range(
        &mut errors,
        "weights.sustainable",
        weights.sustainable,
        WEIGHT_MIN,
        WEIGHT_MAX,
    );

    check_range(
        &mut errors,
        "valuation.baseline_multiple",
        params.baseline_multiple,
        BASELINE_MIN,
        BASELINE_MAX,
    );
    check_range(
        &mut errors,
        "valuation.premium_coefficient",
        params.premium_coefficient,
        COEFFICIENT_MIN,
        COEFFICIENT_MAX,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_range(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() {
        errors.push(format!("{}: must be a finite number (got {})", field, value));
    } else if value < min || value > max {
        errors.push(format!(
            "{}: must be within {}-{} (got {})",
            field, min, max, value
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_inputs(
            &DimensionScores::default(),
            &Weights::default(),
            &ValuationParameters::default(),
        )
        .is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let scores = DimensionScores {
            visible: 0.0,
            documented: 100.0,
            sustainable: 50.0,
        };
        let weights = Weights {
            visible: 0.0,
            documented: 1.0,
            sustainable: 0.5,
        };
        let params = ValuationParameters {
            baseline_multiple: 20.0,
            premium_coefficient: 5.0,
        };
        assert!(validate_inputs(&scores, &weights, &params).is_ok());
    }

    #[test]
    fn test_out_of_range_score() {
        let scores = DimensionScores {
            visible: 120.0,
            ..DimensionScores::default()
        };
        let result = validate_inputs(&scores, &Weights::default(), &ValuationParameters::default());
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scores.visible"));
    }

    #[test]
    fn test_collects_all_errors() {
        let scores = DimensionScores {
            visible: -1.0,
            documented: 101.0,
            sustainable: 50.0,
        };
        let weights = Weights {
            visible: 1.5,
            ..Weights::default()
        };
        let params = ValuationParameters {
            baseline_multiple: 25.0,
            premium_coefficient: 2.0,
        };
        let errors = validate_inputs(&scores, &weights, &params).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_rejects_non_finite() {
        let weights = Weights {
            visible: f64::NAN,
            ..Weights::default()
        };
        let errors = validate_inputs(
            &DimensionScores::default(),
            &weights,
            &ValuationParameters::default(),
        )
        .unwrap_err();
        assert!(errors[0].contains("finite"));
    }
}
