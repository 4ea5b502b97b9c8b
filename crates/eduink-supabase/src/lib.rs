// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin HTTP adapters for the Supabase backend.
//!
//! [`StorageClient`] talks to the binary object storage API;
//! [`RepositoryClient`] talks to the PostgREST metadata repository. Both
//! tolerate missing credentials at construction time: the service still
//! starts, and every call fails with a configuration error at request time.

use std::time::Duration;

use eduink_config::model::SupabaseConfig;
use eduink_core::EduinkError;

pub mod postgrest;
pub mod storage;

pub use postgrest::RepositoryClient;
pub use storage::StorageClient;

/// Timeout for calls to the Supabase backend. Uploads are capped at the
/// server's body limit, so a minute covers the worst case.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolved Supabase endpoint credentials.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
}

impl Credentials {
    /// Build credentials from config, treating empty strings as unset.
    pub(crate) fn from_config(config: &SupabaseConfig) -> Option<Self> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())?
            .trim_end_matches('/')
            .to_string();
        let anon_key = config
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())?
            .to_string();
        Some(Self { base_url, anon_key })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[redacted]")
            .finish()
    }
}

/// Build the shared reqwest client.
pub(crate) fn build_http_client() -> Result<reqwest::Client, EduinkError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| EduinkError::Internal(format!("failed to build HTTP client: {e}")))
}

/// The error every adapter call returns when credentials are absent.
pub(crate) fn unconfigured() -> EduinkError {
    EduinkError::Config("supabase url and anon key are not configured".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_trim_trailing_slash() {
        let config = SupabaseConfig {
            url: Some("https://abc.supabase.co/".into()),
            anon_key: Some("key".into()),
            bucket: "question-papers".into(),
        };
        let creds = Credentials::from_config(&config).unwrap();
        assert_eq!(creds.base_url, "https://abc.supabase.co");
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let config = SupabaseConfig {
            url: Some("".into()),
            anon_key: Some("key".into()),
            bucket: "question-papers".into(),
        };
        assert!(Credentials::from_config(&config).is_none());
    }

    #[test]
    fn debug_redacts_anon_key() {
        let creds = Credentials {
            base_url: "https://abc.supabase.co".into(),
            anon_key: "very-secret".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
