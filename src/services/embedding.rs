use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    error::{AppError, AppResult},
    services::providers::EmbeddingProvider,
};

/// Batch-tolerant front for a text-embedding provider
///
/// Batch embedding never aborts on a single bad item: blank texts and
/// per-item failures produce empty vectors in their slot while the rest of
/// the batch proceeds. Calls fan out with bounded concurrency; the output
/// array order always matches the input order regardless of completion order.
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    concurrency: usize,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Embeds a batch of texts, one vector per input, order-preserving.
    ///
    /// Blank inputs produce an empty vector without a network call. A failed
    /// item is logged and leaves an empty vector in its slot.
    pub async fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f32>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::with_capacity(texts.len());

        for text in texts {
            if text.trim().is_empty() {
                tasks.push(None);
                continue;
            }

            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let text = text.clone();
            tasks.push(Some(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                provider.fetch_embedding(&text).await
            })));
        }

        let mut results = Vec::with_capacity(tasks.len());
        let mut failures = 0usize;

        for task in tasks {
            let Some(task) = task else {
                results.push(Vec::new());
                continue;
            };

            match task.await {
                Ok(Ok(embedding)) => results.push(embedding),
                Ok(Err(e)) => {
                    tracing::warn!(
                        error = %e,
                        provider = self.provider.name(),
                        "Embedding failed for batch item"
                    );
                    failures += 1;
                    results.push(Vec::new());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Embedding task join error");
                    failures += 1;
                    results.push(Vec::new());
                }
            }
        }

        if failures > 0 {
            tracing::warn!(
                total = texts.len(),
                failures,
                "Partial embedding batch failure"
            );
        }

        results
    }

    /// Embeds a single text on demand.
    ///
    /// Unlike batch embedding there is no partial result to fall back into,
    /// so a provider failure is surfaced to the caller. Blank input yields an
    /// empty vector without a call.
    pub async fn embed_text(&self, text: &str) -> AppResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.provider.fetch_embedding(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that fails on texts containing "bad" and counts calls.
    struct ScriptedProvider {
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl EmbeddingProvider for ScriptedProvider {
        async fn fetch_embedding(&self, text: &str) -> AppResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("bad") {
                return Err(AppError::Embedding("scripted failure".to_string()));
            }
            Ok(vec![text.len() as f32, 1.0])
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_absorbs_failures() {
        let provider = ScriptedProvider::new();
        let service = EmbeddingService::new(provider.clone(), 2);

        let texts: Vec<String> = ["one", "bad item", "three", "four", "five"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = service.embed_batch(&texts).await;

        assert_eq!(results.len(), 5);
        assert_eq!(results[0], vec![3.0, 1.0]);
        assert!(results[1].is_empty());
        assert_eq!(results[2], vec![5.0, 1.0]);
        assert_eq!(results[3], vec![4.0, 1.0]);
        assert_eq!(results[4], vec![4.0, 1.0]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_batch_skips_blank_texts_without_calls() {
        let provider = ScriptedProvider::new();
        let service = EmbeddingService::new(provider.clone(), 4);

        let texts: Vec<String> = ["", "   ", "real"].iter().map(|s| s.to_string()).collect();
        let results = service.embed_batch(&texts).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_empty());
        assert!(results[1].is_empty());
        assert_eq!(results[2], vec![4.0, 1.0]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_embed_text_surfaces_failure() {
        let provider = ScriptedProvider::new();
        let service = EmbeddingService::new(provider, 1);

        let err = service.embed_text("bad text").await.unwrap_err();
        assert!(matches!(err, AppError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_embed_text_blank_is_empty_without_call() {
        let provider = ScriptedProvider::new();
        let service = EmbeddingService::new(provider.clone(), 1);

        let result = service.embed_text("  ").await.unwrap();
        assert!(result.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let provider = ScriptedProvider::new();
        let service = EmbeddingService::new(provider, 4);

        let results = service.embed_batch(&[]).await;
        assert!(results.is_empty());
    }
}
