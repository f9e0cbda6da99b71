use std::sync::Arc;

use chrono::Utc;

use crate::{
    db::WatchlistStore,
    error::AppResult,
    models::{AttributeSummary, PreferenceProfile, RatingWeights, TagScore, UserId},
    services::{embedding::EmbeddingService, ranking, tags::TagCache},
    vector,
};

/// Builds user taste profiles from rated watch history
///
/// The preference vector is recomputed on every request; only the tag
/// vocabulary embeddings are cached, since the vocabulary never changes
/// within a process while ratings do.
#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<dyn WatchlistStore>,
    embeddings: EmbeddingService,
    tags: Arc<TagCache>,
    weights: RatingWeights,
}

impl AnalysisService {
    pub fn new(
        store: Arc<dyn WatchlistStore>,
        embeddings: EmbeddingService,
        weights: RatingWeights,
    ) -> Self {
        Self {
            store,
            embeddings,
            tags: Arc::new(TagCache::new()),
            weights,
        }
    }

    /// Full preference analysis: ranked tags, attribute histogram and the
    /// preference vector itself.
    ///
    /// A user with no qualifying rated entries gets empty keyword analysis
    /// and an empty preference vector, never zero-scored noise.
    pub async fn analyze_preferences(&self, user_id: UserId) -> AppResult<PreferenceProfile> {
        let attribute_analysis = self.attribute_summary(user_id).await?;
        let user_preference_vector = self.preference_vector(user_id).await?;

        let keyword_analysis = if user_preference_vector.is_empty() {
            Vec::new()
        } else {
            let tags = self.tags.valid(&self.embeddings).await;
            let limit = tags.len();
            ranking::rank(&user_preference_vector, tags, |tag| tag.embedding.as_slice(), limit)
                .into_iter()
                .map(|ranked| TagScore {
                    text: ranked.item.text,
                    score: ranked.similarity,
                })
                .collect()
        };

        tracing::info!(
            user_id = %user_id,
            keywords = keyword_analysis.len(),
            has_signal = !user_preference_vector.is_empty(),
            "Preference analysis completed"
        );

        Ok(PreferenceProfile {
            keyword_analysis,
            attribute_analysis,
            user_preference_vector,
            generated_at: Utc::now(),
        })
    }

    /// Rating-weighted mean of the user's embedded history.
    ///
    /// Rows without a usable embedding or with zero-weight ratings are
    /// skipped; empty when nothing qualifies.
    pub async fn preference_vector(&self, user_id: UserId) -> AppResult<Vec<f32>> {
        let rows = self.store.embeddable_history(user_id).await?;

        let entries: Vec<(Vec<f32>, f32)> = rows
            .into_iter()
            .filter_map(|row| {
                let weight = self.weights.weight(row.rating);
                let embedding = row.embedding?;
                if weight <= 0.0 || embedding.is_empty() {
                    return None;
                }
                Some((embedding, weight))
            })
            .collect();

        Ok(vector::weighted_average(&entries))
    }

    async fn attribute_summary(&self, user_id: UserId) -> AppResult<AttributeSummary> {
        let rows = self.store.rated_history(user_id).await?;
        let mut summary = AttributeSummary::new();

        for row in rows {
            let weight = self.weights.weight(row.rating);
            if weight <= 0.0 {
                continue;
            }

            if let Some(content_type) = row.content_type {
                *summary
                    .entry("contentType".to_string())
                    .or_default()
                    .entry(content_type)
                    .or_insert(0.0) += weight;
            }
            if let Some(season) = row.season {
                *summary
                    .entry("season".to_string())
                    .or_default()
                    .entry(season)
                    .or_insert(0.0) += weight;
            }
        }

        Ok(summary)
    }
}
