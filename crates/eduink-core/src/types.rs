// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain record types exposed through the HTTP API.
//!
//! Volatile records (question papers, video links) serialize with the
//! camelCase field names the admin UI reads. Repository rows (notes) keep
//! the snake_case column names of the `notes` table. The asymmetry is part
//! of the API contract.

use serde::{Deserialize, Serialize};

/// Kind of file backing a question paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
}

/// A question paper held in the volatile catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub class: String,
    pub subject: String,
    pub title: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileType")]
    pub file_type: FileType,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: String,
}

/// A video link held in the volatile catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i64,
    pub class: String,
    pub subject: String,
    pub title: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    #[serde(rename = "addedAt")]
    pub added_at: String,
}

/// A study note row as stored in the `notes` repository table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Repository-assigned primary key. Absent on rows the service
    /// synthesizes before the repository has echoed them back.
    #[serde(default)]
    pub id: Option<i64>,
    pub class: String,
    pub subject: String,
    pub title: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub file_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for the `notes` table. The id and creation timestamp are
/// assigned by the repository.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub class: String,
    pub subject: String,
    pub title: String,
    pub caption: Option<String>,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_record_uses_camel_case_keys() {
        let record = QuestionRecord {
            id: 1,
            class: "9th".into(),
            subject: "Mathematics".into(),
            title: "Algebra".into(),
            file_url: "https://example.com/q.pdf".into(),
            file_type: FileType::Pdf,
            uploaded_at: "2026-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileUrl"], "https://example.com/q.pdf");
        assert_eq!(json["fileType"], "pdf");
        assert!(json["uploadedAt"].is_string());
        assert!(json.get("file_url").is_none());
    }

    #[test]
    fn video_record_uses_camel_case_keys() {
        let record = VideoRecord {
            id: 2,
            class: "10th".into(),
            subject: "Science".into(),
            title: "Optics".into(),
            video_url: "https://youtu.be/abc".into(),
            added_at: "2026-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["videoUrl"], "https://youtu.be/abc");
        assert!(json["addedAt"].is_string());
    }

    #[test]
    fn note_record_keeps_snake_case_columns() {
        let json = serde_json::json!({
            "id": 7,
            "class": "10th",
            "subject": "Physics",
            "title": "Ch1",
            "caption": null,
            "file_url": "https://example.com/n.pdf",
            "created_at": "2026-01-01T00:00:00+00:00"
        });
        let record: NoteRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.file_url, "https://example.com/n.pdf");
        assert!(record.caption.is_none());
    }

    #[test]
    fn note_record_tolerates_missing_optional_columns() {
        let json = serde_json::json!({
            "class": "10th",
            "subject": "Physics",
            "title": "Ch1",
            "file_url": "https://example.com/n.pdf"
        });
        let record: NoteRecord = serde_json::from_value(json).unwrap();
        assert!(record.id.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn file_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(FileType::Pdf).unwrap(), "pdf");
        assert_eq!(serde_json::to_value(FileType::Image).unwrap(), "image");
    }
}
