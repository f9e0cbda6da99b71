/// Ollama-style embedding provider
///
/// Speaks the `/api/embeddings` contract: POST `{model, prompt}`, receive
/// `{embedding: [f32]}`. Both the endpoint URL and the model name must be
/// configured before any call is made.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::EmbeddingProvider,
};

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    http_client: HttpClient,
    api_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(api_url: String, model: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url,
            model,
        })
    }

    /// Builds a provider from application configuration.
    ///
    /// Fails fast with a [`AppError::Configuration`] when either required
    /// setting is absent, before any network call.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_url = config
            .embedding_api_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("EMBEDDING_API_URL is not set".to_string()))?;

        let model = config
            .embedding_model
            .clone()
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("EMBEDDING_MODEL is not set".to_string()))?;

        Self::new(
            api_url,
            model,
            Duration::from_secs(config.embed_timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn fetch_embedding(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!(
                "Embedding API returned status {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Malformed embedding response: {}", e)))?;

        let embedding = parsed
            .embedding
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Embedding("Embedding response missing embedding field".to_string())
            })?;

        tracing::debug!(
            model = %self.model,
            dims = embedding.len(),
            "Embedded text"
        );

        Ok(embedding)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
