/// Text-embedding provider abstraction
///
/// Pluggable backends for turning one text into one embedding vector. The
/// batch tolerance policy (blank skipping, per-item failure absorption,
/// bounded fan-out) lives in [`crate::services::EmbeddingService`], not here;
/// a provider only knows how to embed a single text or fail.
use crate::error::AppResult;

pub mod ollama;

/// Trait for text-embedding providers
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text into a fixed-length vector.
    ///
    /// Implementations return an error rather than an empty vector; callers
    /// decide whether that error is absorbed (batch) or surfaced (single).
    async fn fetch_embedding(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
