// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EduInk HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state: public read routes, admin
//! mutation routes behind the bearer middleware, static admin pages, and a
//! static-file fallback whose not-found service returns the JSON 404.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use eduink_catalog::Catalog;
use eduink_config::EduinkConfig;
use eduink_core::EduinkError;
use eduink_supabase::{RepositoryClient, StorageClient};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, AdminAuth};
use crate::handlers;
use crate::upload;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Volatile catalog of classes, subjects, questions, and videos.
    pub catalog: Arc<Catalog>,
    /// Object storage client for uploaded files.
    pub storage: Arc<StorageClient>,
    /// Metadata repository client for notes and the manage listings.
    pub repository: Arc<RepositoryClient>,
}

impl AppState {
    /// Build the catalog and backend clients from configuration.
    pub fn from_config(config: &EduinkConfig) -> Result<Self, EduinkError> {
        Ok(Self {
            catalog: Arc::new(Catalog::new(&config.catalog)),
            storage: Arc::new(StorageClient::new(&config.supabase)?),
            repository: Arc::new(RepositoryClient::new(&config.supabase)?),
        })
    }
}

/// Assemble the full application router.
pub fn build_router(config: &EduinkConfig, state: AppState) -> Router {
    let auth = AdminAuth {
        admin_token: config.auth.admin_token.clone(),
    };
    let public_dir = Path::new(&config.server.public_dir);

    let read_routes = Router::new()
        .route("/api/classes", get(handlers::get_classes))
        .route("/api/subjects/{class}", get(handlers::get_subjects))
        .route("/api/questions/{subject}", get(handlers::get_questions))
        .route("/api/videos/{subject}", get(handlers::get_videos))
        .route("/api/all-subjects", get(handlers::get_all_subjects))
        .route("/api/notes/{class}/{subject}", get(handlers::get_notes))
        .route("/api/notes/{subject}", get(handlers::get_notes_legacy))
        .route("/api/all-notes", get(handlers::get_all_notes))
        .route("/api/all-questions", get(handlers::get_all_questions))
        .route("/api/all-videos", get(handlers::get_all_videos));

    let admin_routes = Router::new()
        .route("/api/upload-question", post(upload::upload_question))
        .route("/api/add-subject", post(handlers::add_subject))
        .route("/api/add-video", post(handlers::add_video))
        .route("/api/upload-notes", post(upload::upload_notes))
        .route("/api/delete-note/{note_id}", delete(handlers::delete_note))
        .route(
            "/api/delete-question/{question_id}",
            delete(handlers::delete_question),
        )
        .route(
            "/api/delete-video/{video_id}",
            delete(handlers::delete_video),
        )
        .route_layer(axum_middleware::from_fn_with_state(auth, require_admin))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes));

    let pages = Router::new()
        .route("/favicon.ico", get(favicon))
        .route_service("/admin", ServeFile::new(public_dir.join("admin/login.html")))
        .route_service(
            "/admin/dashboard",
            ServeFile::new(public_dir.join("admin/dashboard.html")),
        )
        .route_service(
            "/admin/upload",
            ServeFile::new(public_dir.join("admin/upload.html")),
        );

    // Unmatched paths fall through to the static directory, and from there
    // to the JSON 404 for every method.
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(route_not_found.into_service());

    Router::new()
        .merge(read_routes)
        .merge(admin_routes)
        .merge(pages)
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn start_server(config: &EduinkConfig, state: AppState) -> Result<(), EduinkError> {
    let app = build_router(config, state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EduinkError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!(
        %addr,
        supabase_configured = config.supabase.url.is_some() && config.supabase.anon_key.is_some(),
        "eduink server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EduinkError::Internal(format!("server error: {e}")))?;

    Ok(())
}

/// GET /favicon.ico
async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// JSON 404 for unmatched routes.
async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}

/// Map a handler panic to the generic JSON 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Resolve on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received, closing HTTP server");
}
