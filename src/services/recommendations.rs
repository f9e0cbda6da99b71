use std::sync::Arc;

use crate::{
    db::WatchlistStore,
    error::{AppError, AppResult},
    models::{CatalogItem, ContentId, ScoredContent, UserId},
    services::{analysis::AnalysisService, ranking},
};

/// Catalog ranking against preference vectors and single-item embeddings
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn WatchlistStore>,
    analysis: AnalysisService,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn WatchlistStore>, analysis: AnalysisService) -> Self {
        Self { store, analysis }
    }

    /// Ranks unrated catalog items against the user's preference vector.
    ///
    /// A user without a preference signal gets an empty list; already-rated
    /// items are excluded by the store query.
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> AppResult<Vec<ScoredContent>> {
        let reference = self.analysis.preference_vector(user_id).await?;
        if reference.is_empty() {
            tracing::debug!(user_id = %user_id, "No preference signal, skipping recommendations");
            return Ok(Vec::new());
        }

        let candidates = self.store.unrated_catalog(user_id).await?;
        let results = scored(ranking::rank(
            &reference,
            candidates,
            |item| item.embedding.as_slice(),
            limit,
        ));

        tracing::info!(
            user_id = %user_id,
            results = results.len(),
            "Recommendations computed"
        );

        Ok(results)
    }

    /// Ranks the rest of the catalog against one item's own embedding.
    ///
    /// The reference item never appears in its own results. An item without
    /// a stored embedding yields an empty list; an unknown id is an error.
    pub async fn find_similar(
        &self,
        content_id: ContentId,
        limit: usize,
    ) -> AppResult<Vec<ScoredContent>> {
        let item = self
            .store
            .catalog_item(content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content {} not found", content_id)))?;

        if item.embedding.is_empty() {
            tracing::debug!(content_id, "Reference item has no embedding");
            return Ok(Vec::new());
        }

        let candidates: Vec<CatalogItem> = self
            .store
            .catalog_excluding(content_id)
            .await?
            .into_iter()
            .filter(|candidate| candidate.content_id != content_id)
            .collect();

        let results = scored(ranking::rank(
            &item.embedding,
            candidates,
            |candidate| candidate.embedding.as_slice(),
            limit,
        ));

        tracing::info!(content_id, results = results.len(), "Similar content ranked");

        Ok(results)
    }
}

fn scored(ranked: Vec<ranking::Ranked<CatalogItem>>) -> Vec<ScoredContent> {
    ranked
        .into_iter()
        .map(|ranked| ScoredContent {
            content_id: ranked.item.content_id,
            title: ranked.item.title,
            image: ranked.item.image,
            similarity: ranked.similarity,
        })
        .collect()
}
