// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the EduInk content service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level EduInk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EduinkConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Supabase backend settings (object storage + metadata repository).
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// Admin authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Seed data for the volatile catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for static pages (admin HTML lives under
    /// `<public_dir>/admin/`).
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Maximum accepted request body size for uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Supabase backend configuration.
///
/// `url` and `anon_key` are optional on purpose: a deployment without them
/// still starts and serves the volatile catalog, but every storage and
/// repository call fails at request time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// Anon/service API key used for both storage and PostgREST calls.
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Storage bucket holding uploaded files.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    "question-papers".to_string()
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared bearer token required on admin mutation routes. When unset,
    /// those routes are open and a startup warning is logged.
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Seed data for the volatile catalog store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Class labels served by `/api/classes`, in display order.
    #[serde(default = "default_classes")]
    pub classes: Vec<String>,

    /// Subject lists per class label.
    #[serde(default = "default_subjects")]
    pub subjects: BTreeMap<String, Vec<String>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            subjects: default_subjects(),
        }
    }
}

fn default_classes() -> Vec<String> {
    ["9th", "10th", "11th", "12th"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_subjects() -> BTreeMap<String, Vec<String>> {
    let junior = ["Mathematics", "Science", "Social Studies", "English", "Hindi"];
    let senior = ["Physics", "Chemistry", "Biology", "Mathematics", "English"];

    let mut subjects = BTreeMap::new();
    for class in ["9th", "10th"] {
        subjects.insert(
            class.to_string(),
            junior.into_iter().map(String::from).collect(),
        );
    }
    for class in ["11th", "12th"] {
        subjects.insert(
            class.to_string(),
            senior.into_iter().map(String::from).collect(),
        );
    }
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_covers_every_class() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.classes.len(), 4);
        for class in &catalog.classes {
            assert!(
                catalog.subjects.contains_key(class),
                "class {class} has no subject list"
            );
        }
    }

    #[test]
    fn supabase_defaults_to_unconfigured() {
        let supabase = SupabaseConfig::default();
        assert!(supabase.url.is_none());
        assert!(supabase.anon_key.is_none());
        assert_eq!(supabase.bucket, "question-papers");
    }
}
