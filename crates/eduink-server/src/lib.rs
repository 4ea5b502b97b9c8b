// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API server for the EduInk content portal.
//!
//! Serves the JSON browsing API backed by the volatile catalog and the
//! Supabase repository, the multipart upload pipelines, and the static
//! admin pages.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod upload;

pub use server::{build_router, start_server, AppState};
