//! Fieldbook REST client.
//!
//! Implements [`RecordStore`] against a Fieldbook book whose word sheet has
//! `word` and `how_well_known` columns:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | fetch all | `GET {base}/{book}/{sheet}` |
//! | create | `POST {base}/{book}/{sheet}` |
//! | update | `PUT {base}/{book}/{sheet}/{id}` |
//!
//! Requests authenticate with HTTP basic auth (API key as user, secret as
//! password).
//!
//! # Retry Strategy
//!
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use webwords_core::sync::{parse_record, parse_records};
use webwords_core::{RecordId, RecordStore, RemoteRecord, SyncError, Word};

use crate::config::{Credentials, FieldbookConfig};

pub struct FieldbookClient {
    http: reqwest::Client,
    sheet_url: String,
    credentials: Credentials,
    max_retries: u32,
}

impl FieldbookClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or secret cannot be resolved, or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &FieldbookConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let sheet_url = format!(
            "{}/{}/{}",
            config.base_url.trim_end_matches('/'),
            config.book,
            config.sheet
        );

        Ok(Self {
            http,
            sheet_url,
            credentials,
            max_retries: config.max_retries,
        })
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.sheet_url, id)
    }

    /// Send the request built by `build`, retrying transient failures.
    /// Returns the body of the first successful response.
    async fn send<F>(&self, build: F) -> Result<String, SyncError>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = build()
                .basic_auth(&self.credentials.key, Some(&self.credentials.secret))
                .header("Accept", "application/json")
                .send()
                .await;

            let err = match resp {
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| SyncError::Transport(e.to_string()))?;
                    if status.is_success() {
                        return Ok(body);
                    }
                    SyncError::Http {
                        status: status.as_u16(),
                        body,
                    }
                }
                Err(e) => SyncError::Transport(e.to_string()),
            };

            if !err.is_transient() {
                return Err(err);
            }
            last_err = Some(err);
        }

        Err(last_err
            .unwrap_or_else(|| SyncError::Transport("request failed after retries".to_string())))
    }
}

#[async_trait]
impl RecordStore for FieldbookClient {
    async fn fetch_all_records(&self) -> Result<Vec<RemoteRecord>, SyncError> {
        let body = self.send(|| self.http.get(&self.sheet_url)).await?;
        parse_records(&body)
    }

    async fn upsert_record(&self, word: &Word) -> Result<RecordId, SyncError> {
        let payload = serde_json::json!({
            "word": word.text(),
            "how_well_known": word.learning_status(),
        });

        let body = match word.remote_record_id() {
            Some(id) => {
                let url = self.record_url(id);
                self.send(|| self.http.put(&url).json(&payload)).await?
            }
            None => {
                self.send(|| self.http.post(&self.sheet_url).json(&payload))
                    .await?
            }
        };

        Ok(parse_record(&body)?.id)
    }
}
