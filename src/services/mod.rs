pub mod analysis;
pub mod embedding;
pub mod prediction;
pub mod providers;
pub mod ranking;
pub mod recommendations;
pub mod tags;

pub use analysis::AnalysisService;
pub use embedding::EmbeddingService;
pub use prediction::PredictionService;
pub use recommendations::RecommendationService;
