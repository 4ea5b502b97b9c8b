// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API error and success payload shapes.
//!
//! The admin UI reads failures from two different payload keys: mutation
//! endpoints respond with `{"message": …}` while read and delete endpoints
//! respond with `{"error": …}`. [`ApiError`] keeps that split explicit so
//! each handler states which contract it serves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Which key carries the error text in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKey {
    /// `{"error": …}` — read and delete endpoints.
    Error,
    /// `{"message": …}` — mutation endpoints.
    Message,
}

impl PayloadKey {
    fn as_str(self) -> &'static str {
        match self {
            PayloadKey::Error => "error",
            PayloadKey::Message => "message",
        }
    }
}

/// An error response with its status, payload key, and text.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub key: PayloadKey,
    pub detail: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 400 — a required field or file is missing or invalid.
    pub fn validation(key: PayloadKey, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            key,
            detail: detail.into(),
        }
    }

    /// 404 — the addressed record or class does not exist.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            key: PayloadKey::Error,
            detail: detail.into(),
        }
    }

    /// 500 — an object storage or repository call failed.
    pub fn upstream(key: PayloadKey, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            key,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ self.key.as_str(): self.detail });
        (self.status, Json(body)).into_response()
    }
}

/// Success envelope returned by mutation endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Substitute `fallback` when an upstream message is empty.
pub fn or_fallback(detail: String, fallback: &str) -> String {
    if detail.trim().is_empty() {
        fallback.to_string()
    } else {
        detail
    }
}
