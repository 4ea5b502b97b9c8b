// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multipart upload pipelines for question papers and study notes.
//!
//! Both pipelines validate the form, build a deterministic storage path,
//! upload via the storage client, then record metadata — question papers
//! into the volatile catalog, notes into the repository. A note upload
//! whose repository insert fails leaves the uploaded object orphaned; the
//! failure is surfaced as-is rather than rolled back.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use eduink_core::types::{FileType, NewNote, NoteRecord};
use eduink_supabase::postgrest::Row;
use tracing::warn;

use crate::error::{ApiError, ApiResult, Envelope, PayloadKey};
use crate::server::AppState;

/// MIME type accepted for note uploads.
const PDF_MIME: &str = "application/pdf";

/// Fallback shown when the storage backend fails without a message.
const UPLOAD_FALLBACK: &str = "Check if bucket exists and is public";

/// A parsed multipart upload form.
#[derive(Debug, Default)]
struct UploadForm {
    class: Option<String>,
    subject: Option<String>,
    title: Option<String>,
    caption: Option<String>,
    file: Option<FilePart>,
}

/// The binary part of an upload form.
#[derive(Debug)]
struct FilePart {
    filename: String,
    content_type: String,
    bytes: Bytes,
}

/// Drain a multipart stream into an [`UploadForm`]. Unknown parts are
/// consumed and dropped.
async fn read_form(mut multipart: Multipart, key: PayloadKey) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(key, format!("Invalid upload payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "class" => form.class = Some(read_text(field, key).await?),
            "subject" => form.subject = Some(read_text(field, key).await?),
            "title" => form.title = Some(read_text(field, key).await?),
            "caption" => form.caption = Some(read_text(field, key).await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::validation(key, format!("Invalid upload payload: {e}"))
                })?;
                form.file = Some(FilePart {
                    filename,
                    content_type,
                    bytes,
                });
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    key: PayloadKey,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(key, format!("Invalid upload payload: {e}")))
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The extension of an uploaded filename, dot included. Empty when the
/// filename has none.
fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Classify an upload by its declared content type. The stored `fileType`
/// field keeps its historical two-value shape.
fn classify_content_type(content_type: &str) -> Option<FileType> {
    if content_type == PDF_MIME {
        Some(FileType::Pdf)
    } else if content_type.starts_with("image/") {
        Some(FileType::Image)
    } else {
        None
    }
}

/// POST /api/upload-question
///
/// Uploads a question paper (PDF or image) and records it in the volatile
/// catalog. Question metadata never reaches the repository.
pub async fn upload_question(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Envelope<eduink_core::QuestionRecord>>> {
    let form = read_form(multipart, PayloadKey::Error).await?;

    let Some(file) = form.file else {
        return Err(ApiError::validation(PayloadKey::Error, "No file provided"));
    };

    let (Some(class), Some(subject), Some(title)) = (
        required(form.class),
        required(form.subject),
        required(form.title),
    ) else {
        return Err(ApiError::validation(
            PayloadKey::Error,
            "Missing required fields",
        ));
    };

    let Some(file_type) = classify_content_type(&file.content_type) else {
        return Err(ApiError::validation(
            PayloadKey::Error,
            "Only PDF or image files are allowed for question papers",
        ));
    };

    let ext = file_extension(&file.filename);
    let timestamp = chrono::Utc::now().timestamp_millis();
    let object_path = format!(
        "question-papers/{class}/{subject}/{timestamp}_{subject}_{title}{ext}"
    );

    let file_url = state
        .storage
        .upload(&object_path, file.bytes.to_vec(), &file.content_type)
        .await
        .map_err(|error| {
            warn!(%error, %object_path, "question paper upload failed");
            ApiError::upstream(
                PayloadKey::Message,
                format!(
                    "Failed to upload file: {}",
                    crate::error::or_fallback(error.detail(), UPLOAD_FALLBACK)
                ),
            )
        })?;

    let record = state.catalog.add_question(eduink_catalog::NewQuestion {
        class,
        subject,
        title,
        file_url,
        file_type,
    });

    Ok(Json(Envelope::with_data(
        "Question uploaded successfully",
        record,
    )))
}

/// POST /api/upload-notes
///
/// Uploads a study note (PDF only) and persists its metadata in the
/// repository.
pub async fn upload_notes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Envelope<Row>>> {
    let form = read_form(multipart, PayloadKey::Message).await?;

    let Some(file) = form.file else {
        return Err(ApiError::validation(PayloadKey::Message, "No file provided"));
    };

    let (Some(class), Some(subject), Some(title)) = (
        required(form.class),
        required(form.subject),
        required(form.title),
    ) else {
        return Err(ApiError::validation(
            PayloadKey::Message,
            "Missing required fields (class, subject, title)",
        ));
    };

    if file.content_type != PDF_MIME {
        return Err(ApiError::validation(
            PayloadKey::Message,
            "Only PDF files are allowed for notes",
        ));
    }

    let ext = file_extension(&file.filename);
    let timestamp = chrono::Utc::now().timestamp_millis();
    let object_path = format!(
        "question-papers/notes/{class}/{subject}/{timestamp}_{class}_{subject}_{title}{ext}"
    );

    let file_url = state
        .storage
        .upload(&object_path, file.bytes.to_vec(), &file.content_type)
        .await
        .map_err(|error| {
            warn!(%error, %object_path, "note upload failed");
            ApiError::upstream(
                PayloadKey::Message,
                format!(
                    "Failed to upload file: {}",
                    crate::error::or_fallback(error.detail(), UPLOAD_FALLBACK)
                ),
            )
        })?;

    let caption = required(form.caption);
    let inserted = state
        .repository
        .insert(
            "notes",
            &NewNote {
                class: class.clone(),
                subject: subject.clone(),
                title: title.clone(),
                caption: caption.clone(),
                file_url: file_url.clone(),
            },
        )
        .await
        .map_err(|error| {
            // The object is already uploaded; a failed insert orphans it.
            warn!(%error, %object_path, "note metadata insert failed after upload");
            ApiError::upstream(
                PayloadKey::Message,
                format!("Failed to save note metadata: {}", error.detail()),
            )
        })?;

    let data = inserted.into_iter().next().unwrap_or_else(|| {
        serde_json::to_value(NoteRecord {
            id: None,
            class,
            subject,
            title,
            caption,
            file_url,
            created_at: None,
        })
        .unwrap_or_default()
    });

    Ok(Json(Envelope::with_data("Notes uploaded successfully", data)))
}
