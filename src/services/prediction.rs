use crate::{
    error::{AppError, AppResult},
    models::{RatingPrediction, UserId},
    services::{analysis::AnalysisService, embedding::EmbeddingService},
    vector,
};

/// Scores arbitrary description text against a user's taste
#[derive(Clone)]
pub struct PredictionService {
    analysis: AnalysisService,
    embeddings: EmbeddingService,
}

impl PredictionService {
    pub fn new(analysis: AnalysisService, embeddings: EmbeddingService) -> Self {
        Self {
            analysis,
            embeddings,
        }
    }

    /// Predicts how well a description fits a user's taste, 0..=100.
    ///
    /// A user without qualifying rated history gets a neutral
    /// "insufficient data" result and no embedding call is made. An
    /// embedding failure for the description itself is surfaced, not
    /// reported as a low score.
    pub async fn predict_rating(
        &self,
        user_id: UserId,
        description: &str,
    ) -> AppResult<RatingPrediction> {
        let preference = self.analysis.preference_vector(user_id).await?;
        if preference.is_empty() {
            tracing::debug!(user_id = %user_id, "No preference signal for prediction");
            return Ok(RatingPrediction::insufficient_data());
        }

        let embedded = self.embeddings.embed_text(description).await?;
        if embedded.is_empty() {
            return Err(AppError::Embedding(
                "Embedding service returned no vector for description".to_string(),
            ));
        }

        let similarity = vector::cosine_similarity(&preference, &embedded);
        let prediction = RatingPrediction::from_similarity(similarity);

        tracing::info!(
            user_id = %user_id,
            similarity,
            prediction = prediction.prediction,
            "Rating predicted"
        );

        Ok(prediction)
    }
}
