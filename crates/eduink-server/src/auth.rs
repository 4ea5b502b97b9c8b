// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token authentication for admin mutation routes.
//!
//! The original deployment left admin verification to the client; the
//! server now checks a shared token when one is configured. With no token
//! configured the admin surface stays open — the serve command logs a
//! warning so the gap is visible instead of silent.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Admin authentication configuration for the router.
#[derive(Clone, Default)]
pub struct AdminAuth {
    /// Expected bearer token. `None` leaves admin routes open.
    pub admin_token: Option<String>,
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field(
                "admin_token",
                &self.admin_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Middleware that validates `Authorization: Bearer <token>` on admin
/// mutation routes when a token is configured.
pub async fn require_admin(
    State(auth): State<AdminAuth>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth.admin_token.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if provided == Some(expected) {
        next.run(request).await
    } else {
        tracing::debug!("admin request rejected: missing or invalid bearer token");
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}
