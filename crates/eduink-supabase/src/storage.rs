// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the Supabase object storage API.
//!
//! Uploads land under `storage/v1/object/{bucket}/{path}`; the public URL
//! is a pure derivation from the same path, no network call involved.

use eduink_config::model::SupabaseConfig;
use eduink_core::EduinkError;
use serde::Deserialize;
use tracing::debug;

use crate::{build_http_client, unconfigured, Credentials};

/// HTTP client for the object storage half of the Supabase backend.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    credentials: Option<Credentials>,
    bucket: String,
}

/// Error body shape returned by the storage API.
#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl StorageClient {
    /// Creates a storage client from configuration. Missing credentials do
    /// not fail construction; calls fail at request time instead.
    pub fn new(config: &SupabaseConfig) -> Result<Self, EduinkError> {
        let credentials = Credentials::from_config(config);
        if credentials.is_none() {
            tracing::warn!("supabase credentials missing -- storage calls will fail");
        }
        Ok(Self {
            http: build_http_client()?,
            credentials,
            bucket: config.bucket.clone(),
        })
    }

    fn credentials(&self) -> Result<&Credentials, EduinkError> {
        self.credentials.as_ref().ok_or_else(unconfigured)
    }

    /// Upload bytes under `path` and return the public URL of the object.
    pub async fn upload(
        &self,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, EduinkError> {
        let creds = self.credentials()?;
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            creds.base_url, self.bucket, path
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content)
            .send()
            .await
            .map_err(|e| EduinkError::Storage {
                message: format!("upload request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, path, "storage upload response");

        if status.is_success() {
            return Ok(self.public_url(path));
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_error_message(&body)
            .unwrap_or_else(|| format!("storage returned {status}: {body}"));
        Err(EduinkError::Storage {
            message,
            source: None,
        })
    }

    /// Publicly resolvable URL for an object path. Returns an empty string
    /// when the backend is unconfigured, matching what callers store.
    pub fn public_url(&self, path: &str) -> String {
        match &self.credentials {
            Some(creds) => format!(
                "{}/storage/v1/object/public/{}/{}",
                creds.base_url, self.bucket, path
            ),
            None => String::new(),
        }
    }

    /// Remove objects by path. Removal of a non-existent path is not an
    /// error; callers treat any failure here as advisory.
    pub async fn remove(&self, paths: &[String]) -> Result<(), EduinkError> {
        let creds = self.credentials()?;
        let url = format!("{}/storage/v1/object/{}", creds.base_url, self.bucket);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| EduinkError::Storage {
                message: format!("remove request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, count = paths.len(), "storage remove response");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_error_message(&body)
            .unwrap_or_else(|| format!("storage returned {status}: {body}"));
        Err(EduinkError::Storage {
            message,
            source: None,
        })
    }
}

/// Extract the human-readable message from a storage error body.
fn parse_error_message(body: &str) -> Option<String> {
    let parsed: StorageErrorBody = serde_json::from_str(body).ok()?;
    parsed.message.or(parsed.error)
}
