use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::WatchlistStore,
    error::AppResult,
    models::{CatalogItem, ContentId, EmbeddedEntry, RatedEntry, Rating, UserId},
    vector,
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres-backed [`WatchlistStore`]
///
/// Description embeddings are stored as JSON float-array text; rows whose
/// stored vector fails to parse are skipped per row, never failing the
/// surrounding query.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    content_type: Option<String>,
    season: Option<String>,
    rating: String,
}

#[derive(sqlx::FromRow)]
struct EmbeddedRow {
    description_embedding: String,
    rating: String,
}

#[derive(sqlx::FromRow)]
struct CatalogRow {
    id: i64,
    title: String,
    image_url: Option<String>,
    description_embedding: Option<String>,
}

impl From<CatalogRow> for CatalogItem {
    fn from(row: CatalogRow) -> Self {
        let embedding = row
            .description_embedding
            .as_deref()
            .and_then(vector::parse_embedding)
            .unwrap_or_default();

        CatalogItem {
            content_id: row.id,
            title: row.title,
            image: row.image_url,
            embedding,
        }
    }
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WatchlistStore for PostgresStore {
    async fn rated_history(&self, user_id: UserId) -> AppResult<Vec<RatedEntry>> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r#"
            SELECT c.content_type, c.season, w.rating
            FROM watch_statuses w
            JOIN contents c ON c.id = w.content_id
            WHERE w.user_id = $1 AND w.rating IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| RatedEntry {
                content_type: row.content_type,
                season: row.season,
                rating: Rating::parse(&row.rating),
            })
            .collect();

        Ok(entries)
    }

    async fn embeddable_history(&self, user_id: UserId) -> AppResult<Vec<EmbeddedEntry>> {
        let rows: Vec<EmbeddedRow> = sqlx::query_as(
            r#"
            SELECT c.description_embedding, w.rating
            FROM watch_statuses w
            JOIN contents c ON c.id = w.content_id
            WHERE w.user_id = $1
              AND w.rating IS NOT NULL
              AND c.description_embedding IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| EmbeddedEntry {
                embedding: vector::parse_embedding(&row.description_embedding),
                rating: Rating::parse(&row.rating),
            })
            .collect();

        Ok(entries)
    }

    async fn unrated_catalog(&self, user_id: UserId) -> AppResult<Vec<CatalogItem>> {
        let rows: Vec<CatalogRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.title, c.image_url, c.description_embedding
            FROM contents c
            WHERE c.description_embedding IS NOT NULL
              AND NOT EXISTS (
                  SELECT 1 FROM watch_statuses w
                  WHERE w.user_id = $1
                    AND w.content_id = c.id
                    AND w.rating IS NOT NULL
              )
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(CatalogItem::from)
            .filter(|item| !item.embedding.is_empty())
            .collect();

        Ok(items)
    }

    async fn catalog_item(&self, content_id: ContentId) -> AppResult<Option<CatalogItem>> {
        let row: Option<CatalogRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.title, c.image_url, c.description_embedding
            FROM contents c
            WHERE c.id = $1
            "#,
        )
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatalogItem::from))
    }

    async fn catalog_excluding(&self, content_id: ContentId) -> AppResult<Vec<CatalogItem>> {
        let rows: Vec<CatalogRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.title, c.image_url, c.description_embedding
            FROM contents c
            WHERE c.id <> $1 AND c.description_embedding IS NOT NULL
            ORDER BY c.id
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(CatalogItem::from)
            .filter(|item| !item.embedding.is_empty())
            .collect();

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_row_conversion_parses_embedding() {
        let row = CatalogRow {
            id: 7,
            title: "Frieren".to_string(),
            image_url: Some("https://img.example/7.jpg".to_string()),
            description_embedding: Some("[0.1, 0.2]".to_string()),
        };

        let item = CatalogItem::from(row);
        assert_eq!(item.content_id, 7);
        assert_eq!(item.embedding, vec![0.1, 0.2]);
    }

    #[test]
    fn test_catalog_row_conversion_tolerates_bad_embedding() {
        let row = CatalogRow {
            id: 8,
            title: "Corrupted".to_string(),
            image_url: None,
            description_embedding: Some("{broken".to_string()),
        };

        let item = CatalogItem::from(row);
        assert!(item.embedding.is_empty());
    }

    #[test]
    fn test_catalog_row_conversion_missing_embedding() {
        let row = CatalogRow {
            id: 9,
            title: "No embedding yet".to_string(),
            image_url: None,
            description_embedding: None,
        };

        let item = CatalogItem::from(row);
        assert!(item.embedding.is_empty());
    }
}
