// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read, add, and delete handlers for the EduInk API.
//!
//! Volatile-store reads filter in application code (case-insensitive
//! subject, exact class). Repository reads send equality filters to
//! PostgREST and order by creation time, descending. The "all-*" listings
//! and the delete flows degrade the schema-missing condition to "no data"
//! instead of an error.

use axum::extract::{Path, Query, State};
use axum::Json;
use eduink_core::types::{QuestionRecord, VideoRecord};
use eduink_supabase::postgrest::Row;
use eduink_supabase::StorageClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{or_fallback, ApiError, ApiResult, Envelope, PayloadKey};
use crate::server::AppState;

/// Query string accepted by the question/video listings.
#[derive(Debug, Deserialize)]
pub struct ClassQuery {
    #[serde(default)]
    pub class: Option<String>,
}

/// Request body for POST /api/add-subject.
#[derive(Debug, Deserialize)]
pub struct AddSubjectRequest {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for POST /api/add-video.
#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

/// Row fields the delete flows read from a fetched record.
#[derive(Debug, Deserialize)]
struct StoredContentRow {
    #[serde(default)]
    class: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    file_url: Option<String>,
}

/// Outcome of the advisory object-removal phase of a delete. The
/// repository row is the authoritative record; a failed removal leaves an
/// orphaned object behind and is only ever logged.
enum CleanupOutcome {
    Removed,
    SkippedNoUrl,
    Failed { path: String, message: String },
}

/// Remove the stored object referenced by a just-deleted row, at the
/// reconstructed path the manage UI has always used.
async fn cleanup_stored_object(
    storage: &StorageClient,
    file_url: Option<&str>,
    path: String,
) -> CleanupOutcome {
    match file_url {
        Some(url) if !url.is_empty() => match storage.remove(std::slice::from_ref(&path)).await {
            Ok(()) => CleanupOutcome::Removed,
            Err(error) => CleanupOutcome::Failed {
                path,
                message: error.detail(),
            },
        },
        _ => CleanupOutcome::SkippedNoUrl,
    }
}

fn log_cleanup(table: &str, outcome: CleanupOutcome) {
    match outcome {
        CleanupOutcome::Removed => debug!(table, "stored object removed"),
        CleanupOutcome::SkippedNoUrl => debug!(table, "no file url on record, skipping cleanup"),
        CleanupOutcome::Failed { path, message } => {
            warn!(table, %path, %message, "object cleanup failed after repository delete");
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// --- Catalog reads ---

/// GET /api/classes
pub async fn get_classes(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.classes())
}

/// GET /api/subjects/{class}
pub async fn get_subjects(
    State(state): State<AppState>,
    Path(class): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    state
        .catalog
        .subjects_for(&class)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Class not found"))
}

/// GET /api/questions/{subject}?class=
pub async fn get_questions(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Query(query): Query<ClassQuery>,
) -> Json<Vec<QuestionRecord>> {
    Json(state.catalog.questions(&subject, query.class.as_deref()))
}

/// GET /api/videos/{subject}?class=
pub async fn get_videos(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Query(query): Query<ClassQuery>,
) -> Json<Vec<VideoRecord>> {
    Json(state.catalog.videos(&subject, query.class.as_deref()))
}

/// GET /api/all-subjects
pub async fn get_all_subjects(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.all_subjects())
}

// --- Repository reads ---

/// GET /api/notes/{class}/{subject}
pub async fn get_notes(
    State(state): State<AppState>,
    Path((class, subject)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Row>>> {
    state
        .repository
        .select(
            "notes",
            &[("class", class.as_str()), ("subject", subject.as_str())],
            Some("created_at"),
        )
        .await
        .map(Json)
        .map_err(|error| {
            warn!(%error, "notes fetch failed");
            ApiError::upstream(PayloadKey::Error, "Error fetching notes")
        })
}

/// GET /api/notes/{subject} — legacy listing without a class filter.
pub async fn get_notes_legacy(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> ApiResult<Json<Vec<Row>>> {
    state
        .repository
        .select("notes", &[("subject", subject.as_str())], Some("created_at"))
        .await
        .map(Json)
        .map_err(|error| {
            warn!(%error, "notes fetch failed");
            ApiError::upstream(PayloadKey::Error, "Error fetching notes")
        })
}

async fn fetch_all(state: &AppState, table: &str, fallback: &str) -> ApiResult<Json<Vec<Row>>> {
    match state.repository.select(table, &[], Some("created_at")).await {
        Ok(rows) => Ok(Json(rows)),
        Err(error) if error.is_schema_missing() => {
            debug!(table, "backing table missing, returning empty list");
            Ok(Json(Vec::new()))
        }
        Err(error) => Err(ApiError::upstream(
            PayloadKey::Error,
            or_fallback(error.detail(), fallback),
        )),
    }
}

/// GET /api/all-notes
pub async fn get_all_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<Row>>> {
    fetch_all(&state, "notes", "Failed to fetch notes").await
}

/// GET /api/all-questions
pub async fn get_all_questions(State(state): State<AppState>) -> ApiResult<Json<Vec<Row>>> {
    fetch_all(&state, "question_banks", "Failed to fetch questions").await
}

/// GET /api/all-videos
pub async fn get_all_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<Row>>> {
    fetch_all(&state, "videos", "Failed to fetch videos").await
}

// --- Catalog mutations ---

/// POST /api/add-subject
pub async fn add_subject(
    State(state): State<AppState>,
    Json(body): Json<AddSubjectRequest>,
) -> ApiResult<Json<Envelope<Row>>> {
    let (Some(class), Some(name)) = (non_empty(body.class), non_empty(body.name)) else {
        return Err(ApiError::validation(
            PayloadKey::Message,
            "Missing required fields",
        ));
    };

    state.catalog.add_subject(&class, &name);

    Ok(Json(Envelope::with_data(
        "Subject added successfully",
        serde_json::json!({ "class": class, "subject": name }),
    )))
}

/// POST /api/add-video
pub async fn add_video(
    State(state): State<AppState>,
    Json(body): Json<AddVideoRequest>,
) -> ApiResult<Json<Envelope<VideoRecord>>> {
    let (Some(class), Some(subject), Some(title), Some(video_url)) = (
        non_empty(body.class),
        non_empty(body.subject),
        non_empty(body.title),
        non_empty(body.video_url),
    ) else {
        return Err(ApiError::validation(
            PayloadKey::Message,
            "Missing required fields",
        ));
    };

    let record = state.catalog.add_video(eduink_catalog::NewVideo {
        class,
        subject,
        title,
        video_url,
    });

    Ok(Json(Envelope::with_data("Video added successfully", record)))
}

// --- Deletes ---

/// DELETE /api/delete-note/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let filters = [("id", note_id.as_str())];

    let note = match state
        .repository
        .select_one::<StoredContentRow>("notes", &filters)
        .await
    {
        Ok(Some(note)) => note,
        Ok(None) => return Err(ApiError::not_found("Note not found")),
        Err(error) if error.is_schema_missing() => {
            debug!("notes table missing, treating note as already deleted");
            return Ok(Json(Envelope::message_only("Note deleted successfully")));
        }
        Err(error) => {
            return Err(ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete note"),
            ));
        }
    };

    state
        .repository
        .delete("notes", &filters)
        .await
        .map_err(|error| {
            ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete note"),
            )
        })?;

    // The row is gone; object removal is advisory from here on.
    let path = format!("notes/{}/{}/{}", note.class, note.subject, note_id);
    let outcome = cleanup_stored_object(&state.storage, note.file_url.as_deref(), path).await;
    log_cleanup("notes", outcome);

    Ok(Json(Envelope::message_only("Note deleted successfully")))
}

/// DELETE /api/delete-question/{question_id}
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let filters = [("id", question_id.as_str())];

    let question = match state
        .repository
        .select_one::<StoredContentRow>("question_banks", &filters)
        .await
    {
        Ok(Some(question)) => question,
        Ok(None) => return Err(ApiError::not_found("Question not found")),
        Err(error) if error.is_schema_missing() => {
            debug!("question_banks table missing, treating question as already deleted");
            return Ok(Json(Envelope::message_only(
                "Question deleted successfully",
            )));
        }
        Err(error) => {
            return Err(ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete question"),
            ));
        }
    };

    state
        .repository
        .delete("question_banks", &filters)
        .await
        .map_err(|error| {
            ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete question"),
            )
        })?;

    let path = format!(
        "questions/{}/{}/{}",
        question.class, question.subject, question_id
    );
    let outcome =
        cleanup_stored_object(&state.storage, question.file_url.as_deref(), path).await;
    log_cleanup("question_banks", outcome);

    Ok(Json(Envelope::message_only("Question deleted successfully")))
}

/// DELETE /api/delete-video/{video_id}
///
/// Videos are links, not stored objects, so there is no cleanup phase.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let filters = [("id", video_id.as_str())];

    match state
        .repository
        .select_one::<Row>("videos", &filters)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ApiError::not_found("Video not found")),
        Err(error) if error.is_schema_missing() => {
            debug!("videos table missing, treating video as already deleted");
            return Ok(Json(Envelope::message_only("Video deleted successfully")));
        }
        Err(error) => {
            return Err(ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete video"),
            ));
        }
    }

    state
        .repository
        .delete("videos", &filters)
        .await
        .map_err(|error| {
            ApiError::upstream(
                PayloadKey::Error,
                or_fallback(error.detail(), "Failed to delete video"),
            )
        })?;

    Ok(Json(Envelope::message_only("Video deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_video_request_reads_camel_case_url() {
        let json = r#"{"class": "9th", "subject": "Math", "title": "Intro", "videoUrl": "https://youtu.be/x"}"#;
        let body: AddVideoRequest = serde_json::from_str(json).unwrap();
        assert_eq!(body.video_url.as_deref(), Some("https://youtu.be/x"));
    }

    #[test]
    fn missing_body_fields_default_to_none() {
        let body: AddSubjectRequest = serde_json::from_str("{}").unwrap();
        assert!(body.class.is_none());
        assert!(body.name.is_none());
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("Math".into())), Some("Math".into()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn stored_content_row_tolerates_sparse_rows() {
        let row: StoredContentRow = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(row.class.is_empty());
        assert!(row.file_url.is_none());
    }
}
