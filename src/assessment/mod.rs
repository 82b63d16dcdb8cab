pub mod engine;
pub mod types;
pub mod validation;
pub mod valuation;

pub use engine::{compute_score, ScoreResult, WeightNotice, WEIGHT_SUM_TOLERANCE};
pub use types::*;
pub use validation::validate_inputs;
pub use valuation::{project_valuation, ValuationResult};
