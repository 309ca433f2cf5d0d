use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{EntityType, RawApplicant, RawRecord};

/// Errors that can occur when talking to the profile/job store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("store returned error: {0}")]
    ApiError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the marketplace profile/job store
///
/// The engine never writes through this client; profile persistence is
/// owned by the main backend. Exposes record lookup, pool listing and
/// the unscored applicant pass-through.
pub struct StoreClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl StoreClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch a single raw record by entity id
    pub async fn get_record(&self, entity_id: &str) -> Result<RawRecord, StoreError> {
        let url = format!(
            "{}/records/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(entity_id)
        );

        tracing::debug!("Fetching record from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(StoreError::NotFound(format!("record {}", entity_id)));
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "failed to fetch record {}: {}",
                entity_id,
                response.status()
            )));
        }

        let record: RawRecord = response.json().await.map_err(|e| {
            StoreError::InvalidResponse(format!("record {} did not parse: {}", entity_id, e))
        })?;
        Ok(record)
    }

    /// List the candidate pool for an entity type, optionally filtered
    pub async fn list_pool(
        &self,
        entity_type: EntityType,
        filter: Option<&str>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let mut url = format!(
            "{}/pools/{}",
            self.base_url.trim_end_matches('/'),
            entity_type
        );
        if let Some(filter) = filter {
            url.push_str(&format!("?filter={}", urlencoding::encode(filter)));
        }

        tracing::debug!("Listing pool from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "failed to list {} pool: {}",
                entity_type,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let records = json
            .get("records")
            .and_then(|r| r.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("missing records array".into()))?;

        // Individually malformed records are skipped with a warning so a
        // single bad profile cannot take down a whole ranking pass.
        let mut pool = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<RawRecord>(record.clone()) {
                Ok(parsed) => pool.push(parsed),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} pool record: {}", entity_type, e);
                }
            }
        }

        Ok(pool)
    }

    /// Applicants for one job posting, returned verbatim (never scored)
    pub async fn list_applicants(&self, job_id: &str) -> Result<Vec<RawApplicant>, StoreError> {
        let url = format!(
            "{}/jobs/{}/applicants",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(job_id)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(StoreError::NotFound(format!("job {}", job_id)));
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "failed to list applicants for {}: {}",
                job_id,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let applicants = json
            .get("applicants")
            .and_then(|a| a.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("missing applicants array".into()))?;

        applicants
            .iter()
            .map(|a| {
                serde_json::from_value::<RawApplicant>(a.clone())
                    .map_err(|e| StoreError::InvalidResponse(format!("applicant row: {}", e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_record_parses_tagged_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/records/s-1")
            .match_header("X-Api-Key", "test-key")
            .with_status(200)
            .with_body(r#"{"entity_type": "STARTUP", "id": "s-1", "name": "KathmanduPay"}"#)
            .create_async()
            .await;

        let client = StoreClient::new(server.url(), "test-key".to_string(), 5).unwrap();
        let record = client.get_record("s-1").await.unwrap();

        assert_eq!(record.id(), "s-1");
        assert_eq!(record.entity_type(), EntityType::Startup);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_record_404_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/records/ghost")
            .with_status(404)
            .create_async()
            .await;

        let client = StoreClient::new(server.url(), "k".to_string(), 5).unwrap();
        let err = client.get_record("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_pool_skips_malformed_records() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pools/INVESTOR")
            .with_status(200)
            .with_body(
                r#"{"records": [
                    {"entity_type": "INVESTOR", "id": "inv-1"},
                    {"entity_type": "UNKNOWN", "id": "inv-2"},
                    {"entity_type": "INVESTOR", "id": "inv-3"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = StoreClient::new(server.url(), "k".to_string(), 5).unwrap();
        let pool = client.list_pool(EntityType::Investor, None).await.unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].id(), "inv-1");
        assert_eq!(pool[1].id(), "inv-3");
    }

    #[tokio::test]
    async fn test_list_applicants_passthrough() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/job-1/applicants")
            .with_status(200)
            .with_body(
                r#"{"applicants": [
                    {"match_id": "m-1", "name": "Bibek", "headline": "Engineer", "message": "Hi"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = StoreClient::new(server.url(), "k".to_string(), 5).unwrap();
        let applicants = client.list_applicants("job-1").await.unwrap();

        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].match_id, "m-1");
    }
}
