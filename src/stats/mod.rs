pub mod normalizer;
pub mod predictor;

pub use normalizer::{normalize, NormalizedStats, NormalizerConfig};
pub use predictor::{predict_by_name, MatchupResult, PredictError, PredictorConfig};
