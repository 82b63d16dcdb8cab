use serde::{Deserialize, Serialize};

use crate::assessment::{DimensionScores, ValuationParameters, Weights};

/// Top-level configuration file structure.
///
/// Every section is optional; missing sections and missing fields fall back
/// to the built-in defaults, so an empty file (or no file at all) is a
/// fully working configuration.
///
/// Example YAML:
/// ```yaml
/// profile:
///   analyst: Jane Doe
///   firm: Alpha Capital
///   company: InnovateTech
/// scores:
///   visible: 75
///   documented: 60
///   sustainable: 80
/// weights:
///   visible: 0.35
///   documented: 0.40
///   sustainable: 0.25
/// valuation:
///   baseline_multiple: 7.0
///   premium_coefficient: 2.0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub profile: Option<ProfileConfig>,

    #[serde(default)]
    pub scores: Option<ScoresConfig>,

    #[serde(default)]
    pub weights: Option<WeightsConfig>,

    #[serde(default)]
    pub valuation: Option<ValuationConfig>,
}

/// Who is running the assessment and for which company.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(default)]
    pub analyst: Option<String>,

    #[serde(default)]
    pub firm: Option<String>,

    #[serde(default)]
    pub company: Option<String>,
}

/// Resolved profile with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub analyst: String,
    pub firm: String,
    pub company: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            analyst: "Jane Doe".to_string(),
            firm: "Alpha Capital".to_string(),
            company: "InnovateTech".to_string(),
        }
    }
}

impl ProfileConfig {
    pub fn resolve(&self) -> Profile {
        let defaults = Profile::default();
        Profile {
            analyst: self.analyst.clone().unwrap_or(defaults.analyst),
            firm: self.firm.clone().unwrap_or(defaults.firm),
            company: self.company.clone().unwrap_or(defaults.company),
        }
    }
}

/// Default dimension scores used when flags don't supply them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoresConfig {
    #[serde(default)]
    pub visible: Option<f64>,

    #[serde(default)]
    pub documented: Option<f64>,

    #[serde(default)]
    pub sustainable: Option<f64>,
}

impl ScoresConfig {
    pub fn resolve(&self) -> DimensionScores {
        let defaults = DimensionScores::default();
        DimensionScores {
            visible: self.visible.unwrap_or(defaults.visible),
            documented: self.documented.unwrap_or(defaults.documented),
            sustainable: self.sustainable.unwrap_or(defaults.sustainable),
        }
    }
}

/// Default dimension weights. Entered per-dimension in [0, 1]; the sum is
/// not required to be 1 (the engine normalizes and says so).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightsConfig {
    #[serde(default)]
    pub visible: Option<f64>,

    #[serde(default)]
    pub documented: Option<f64>,

    #[serde(default)]
    pub sustainable: Option<f64>,
}

impl WeightsConfig {
    pub fn resolve(&self) -> Weights {
        let defaults = Weights::default();
        Weights {
            visible: self.visible.unwrap_or(defaults.visible),
            documented: self.documented.unwrap_or(defaults.documented),
            sustainable: self.sustainable.unwrap_or(defaults.sustainable),
        }
    }
}

/// Default valuation parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationConfig {
    #[serde(default)]
    pub baseline_multiple: Option<f64>,

    #[serde(default)]
    pub premium_coefficient: Option<f64>,
}

impl ValuationConfig {
    pub fn resolve(&self) -> ValuationParameters {
        let defaults = ValuationParameters::default();
        ValuationParameters {
            baseline_multiple: self.baseline_multiple.unwrap_or(defaults.baseline_multiple),
            premium_coefficient: self
                .premium_coefficient
                .unwrap_or(defaults.premium_coefficient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.profile.is_none());

        let scores = config.scores.clone().unwrap_or_default().resolve();
        assert_eq!(scores, DimensionScores::default());

        let profile = config.profile.clone().unwrap_or_default().resolve();
        assert_eq!(profile.analyst, "Jane Doe");
        assert_eq!(profile.company, "InnovateTech");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = r#"
scores:
  documented: 40
weights:
  visible: 0.5
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();

        let scores = config.scores.clone().unwrap_or_default().resolve();
        assert_eq!(scores.documented, 40.0);
        assert_eq!(scores.visible, 75.0);

        let weights = config.weights.clone().unwrap_or_default().resolve();
        assert_eq!(weights.visible, 0.5);
        assert_eq!(weights.sustainable, 0.25);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
profile:
  analyst: Alex Kim
  firm: Beta Partners
  company: Acme AI
scores:
  visible: 90
  documented: 85
  sustainable: 70
weights:
  visible: 0.4
  documented: 0.4
  sustainable: 0.2
valuation:
  baseline_multiple: 9.0
  premium_coefficient: 3.0
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();

        let profile = config.profile.clone().unwrap_or_default().resolve();
        assert_eq!(profile.firm, "Beta Partners");

        let params = config.valuation.clone().unwrap_or_default().resolve();
        assert_eq!(params.baseline_multiple, 9.0);
        assert_eq!(params.premium_coefficient, 3.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
scores:
  visible: 75
  brand_new_dimension: 50
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config {
            profile: Some(ProfileConfig {
                analyst: Some("Alex Kim".to_string()),
                firm: None,
                company: Some("Acme AI".to_string()),
            }),
            scores: Some(ScoresConfig {
                visible: Some(88.0),
                documented: None,
                sustainable: None,
            }),
            weights: None,
            valuation: None,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
