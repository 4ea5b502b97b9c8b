// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `eduink serve` command implementation.
//!
//! Builds the volatile catalog and Supabase clients from configuration and
//! serves the HTTP API until a shutdown signal arrives.

use eduink_config::EduinkConfig;
use eduink_core::EduinkError;
use eduink_server::{start_server, AppState};
use tracing::{info, warn};

/// Runs the `eduink serve` command.
pub async fn run_serve(config: EduinkConfig) -> Result<(), EduinkError> {
    init_tracing(&config.server.log_level);

    info!("starting eduink serve");

    if config.auth.admin_token.is_none() {
        warn!("no admin token configured -- admin mutation routes are unauthenticated");
    }
    if config.supabase.url.is_none() || config.supabase.anon_key.is_none() {
        warn!("supabase credentials missing -- note and storage operations will fail at request time");
    }

    let state = AppState::from_config(&config)?;
    start_server(&config, state).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("eduink={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
