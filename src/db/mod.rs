use crate::error::AppResult;
use crate::models::{CatalogItem, ContentId, EmbeddedEntry, RatedEntry, UserId};

pub mod postgres;

pub use postgres::{create_pool, PostgresStore};

/// Storage collaborator for watch history and the content catalog
///
/// The analysis core reads history and catalog snapshots through this trait;
/// schema and migrations stay behind it. Reads are tolerated to be slightly
/// stale: no transactional guarantee spans history read, aggregation and
/// ranking.
#[async_trait::async_trait]
pub trait WatchlistStore: Send + Sync {
    /// All rated-history rows for a user, embeddings not required.
    ///
    /// Feeds the attribute summary; rows missing an embedding still count.
    async fn rated_history(&self, user_id: UserId) -> AppResult<Vec<RatedEntry>>;

    /// The subset of rated history carrying a stored description embedding.
    async fn embeddable_history(&self, user_id: UserId) -> AppResult<Vec<EmbeddedEntry>>;

    /// Catalog items with embeddings that the user has not rated yet.
    async fn unrated_catalog(&self, user_id: UserId) -> AppResult<Vec<CatalogItem>>;

    /// A single catalog item; embedding is empty when none is stored.
    async fn catalog_item(&self, content_id: ContentId) -> AppResult<Option<CatalogItem>>;

    /// All other catalog items with embeddings, excluding the given id.
    async fn catalog_excluding(&self, content_id: ContentId) -> AppResult<Vec<CatalogItem>>;
}
