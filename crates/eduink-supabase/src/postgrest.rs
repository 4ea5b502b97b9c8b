// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the PostgREST metadata repository.
//!
//! Rows travel as JSON values so unknown columns survive the round trip;
//! callers that need a typed view deserialize on their side. A PostgREST
//! error for a relation that does not exist yet maps to
//! [`EduinkError::SchemaMissing`], which read and delete flows degrade to
//! "no data".

use eduink_config::model::SupabaseConfig;
use eduink_core::EduinkError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{build_http_client, unconfigured, Credentials};

/// A repository row, passed through verbatim.
pub type Row = serde_json::Value;

/// HTTP client for the PostgREST half of the Supabase backend.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    http: reqwest::Client,
    credentials: Option<Credentials>,
}

/// Error body shape returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RepositoryClient {
    /// Creates a repository client from configuration. Missing credentials
    /// do not fail construction; calls fail at request time instead.
    pub fn new(config: &SupabaseConfig) -> Result<Self, EduinkError> {
        let credentials = Credentials::from_config(config);
        if credentials.is_none() {
            tracing::warn!("supabase credentials missing -- repository calls will fail");
        }
        Ok(Self {
            http: build_http_client()?,
            credentials,
        })
    }

    fn credentials(&self) -> Result<&Credentials, EduinkError> {
        self.credentials.as_ref().ok_or_else(unconfigured)
    }

    fn table_url(&self, creds: &Credentials, table: &str) -> String {
        format!("{}/rest/v1/{}", creds.base_url, table)
    }

    /// Insert a row and return the representation the repository echoes.
    pub async fn insert<T: Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<Vec<Row>, EduinkError> {
        let creds = self.credentials()?;

        let response = self
            .http
            .post(self.table_url(creds, table))
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .header("prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| EduinkError::Repository {
                message: format!("insert request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, table, "repository insert response");

        if !status.is_success() {
            return Err(error_from_response(table, response).await);
        }

        response.json().await.map_err(|e| EduinkError::Repository {
            message: format!("failed to parse insert response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Select rows matching equality filters, optionally ordered by a
    /// column descending.
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        order_desc: Option<&str>,
    ) -> Result<Vec<Row>, EduinkError> {
        let creds = self.credentials()?;
        let mut query: Vec<(String, String)> = vec![("select".into(), "*".into())];
        for (field, value) in filters {
            query.push(((*field).into(), format!("eq.{value}")));
        }
        if let Some(column) = order_desc {
            query.push(("order".into(), format!("{column}.desc")));
        }

        let response = self
            .http
            .get(self.table_url(creds, table))
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| EduinkError::Repository {
                message: format!("select request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, table, "repository select response");

        if !status.is_success() {
            return Err(error_from_response(table, response).await);
        }

        response.json().await.map_err(|e| EduinkError::Repository {
            message: format!("failed to parse select response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Fetch at most one row matching the filters, deserialized into `T`.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Option<T>, EduinkError> {
        let creds = self.credentials()?;
        let mut query: Vec<(String, String)> = vec![
            ("select".into(), "*".into()),
            ("limit".into(), "1".into()),
        ];
        for (field, value) in filters {
            query.push(((*field).into(), format!("eq.{value}")));
        }

        let response = self
            .http
            .get(self.table_url(creds, table))
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| EduinkError::Repository {
                message: format!("select request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, table, "repository select-one response");

        if !status.is_success() {
            return Err(error_from_response(table, response).await);
        }

        let mut rows: Vec<T> = response.json().await.map_err(|e| EduinkError::Repository {
            message: format!("failed to parse select response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Delete rows matching equality filters.
    pub async fn delete(&self, table: &str, filters: &[(&str, &str)]) -> Result<(), EduinkError> {
        let creds = self.credentials()?;
        let query: Vec<(String, String)> = filters
            .iter()
            .map(|(field, value)| ((*field).into(), format!("eq.{value}")))
            .collect();

        let response = self
            .http
            .delete(self.table_url(creds, table))
            .bearer_auth(&creds.anon_key)
            .header("apikey", &creds.anon_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| EduinkError::Repository {
                message: format!("delete request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, table, "repository delete response");

        if !status.is_success() {
            return Err(error_from_response(table, response).await);
        }

        Ok(())
    }
}

/// Map a non-success PostgREST response to an error, special-casing the
/// missing-relation condition (SQLSTATE 42P01, or any message naming a
/// relation -- the signal older deployments matched on).
async fn error_from_response(table: &str, response: reqwest::Response) -> EduinkError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(parsed) = serde_json::from_str::<PostgrestErrorBody>(&body) {
        let relation_missing = parsed.code.as_deref() == Some("42P01")
            || parsed
                .message
                .as_deref()
                .is_some_and(|m| m.contains("relation"));
        if relation_missing {
            return EduinkError::SchemaMissing {
                table: table.to_string(),
            };
        }
        if let Some(message) = parsed.message {
            return EduinkError::Repository {
                message,
                source: None,
            };
        }
    }

    EduinkError::Repository {
        message: format!("repository returned {status}: {body}"),
        source: None,
    }
}
