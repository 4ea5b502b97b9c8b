// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./eduink.toml` > `~/.config/eduink/eduink.toml` > `/etc/eduink/eduink.toml`
//! with environment variable overrides via `EDUINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::EduinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/eduink/eduink.toml` (system-wide)
/// 3. `~/.config/eduink/eduink.toml` (user XDG config)
/// 4. `./eduink.toml` (local directory)
/// 5. `EDUINK_*` environment variables
pub fn load_config() -> Result<EduinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EduinkConfig::default()))
        .merge(Toml::file("/etc/eduink/eduink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("eduink/eduink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("eduink.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<EduinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EduinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EduinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EduinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `EDUINK_SUPABASE_ANON_KEY`
/// must map to `supabase.anon_key`, not `supabase.anon.key`.
fn env_provider() -> Env {
    Env::prefixed("EDUINK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: EDUINK_SERVER_MAX_UPLOAD_BYTES -> "server_max_upload_bytes"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("supabase_", "supabase.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("catalog_", "catalog.", 1);
        mapped.into()
    })
}
