// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and well-formed seed data.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::EduinkConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &EduinkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate server.host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let host = config.server.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate public_dir is not empty
    if config.server.public_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.public_dir must not be empty".to_string(),
        });
    }

    // Validate the upload cap is usable
    if config.server.max_upload_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "server.max_upload_bytes must be greater than zero".to_string(),
        });
    }

    // Validate supabase.url scheme when set
    if let Some(url) = &config.supabase.url
        && !url.trim().is_empty()
        && !url.starts_with("http://")
        && !url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!("supabase.url `{url}` must start with http:// or https://"),
        });
    }

    // Validate bucket name is not empty
    if config.supabase.bucket.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "supabase.bucket must not be empty".to_string(),
        });
    }

    // Validate class labels are non-empty and unique
    if config.catalog.classes.is_empty() {
        errors.push(ConfigError::Validation {
            message: "catalog.classes must list at least one class".to_string(),
        });
    }
    let mut seen_classes = HashSet::new();
    for (i, class) in config.catalog.classes.iter().enumerate() {
        if class.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("catalog.classes[{i}] must not be empty"),
            });
        } else if !seen_classes.insert(class) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate class `{class}` in catalog.classes"),
            });
        }
    }

    // Validate subject lists contain no duplicates
    for (class, subjects) in &config.catalog.subjects {
        let mut seen = HashSet::new();
        for subject in subjects {
            if !seen.insert(subject) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "duplicate subject `{subject}` for class `{class}` in catalog.subjects"
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
