use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from the text-embedding provider
///
/// Always recovered locally: a failed embedding leaves the semantic
/// sub-score undefined, it never fails a ranking pass.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Client for the opaque `embed(text) -> vector` collaborator
pub struct EmbeddingClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl EmbeddingClient {
    pub fn new(
        base_url: String,
        api_key: String,
        timeout_secs: u64,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Embed one text blob
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embed", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&EmbedRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmbeddingError::Unavailable(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if body.embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse("empty vector".into()));
        }

        Ok(body.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embed_parses_vector() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/embed")
            .with_status(200)
            .with_body(r#"{"embedding": [0.1, 0.2, 0.3]}"#)
            .create_async()
            .await;

        let client = EmbeddingClient::new(server.url(), "k".to_string(), 5).unwrap();
        let vector = client.embed("investor thesis").await.unwrap();
        assert_eq!(vector.len(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/embed")
            .with_status(503)
            .create_async()
            .await;

        let client = EmbeddingClient::new(server.url(), "k".to_string(), 5).unwrap();
        let err = client.embed("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_vector_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/embed")
            .with_status(200)
            .with_body(r#"{"embedding": []}"#)
            .create_async()
            .await;

        let client = EmbeddingClient::new(server.url(), "k".to_string(), 5).unwrap();
        let err = client.embed("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidResponse(_)));
    }
}
