// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-lifetime catalog of classes, subjects, question papers, and
//! video links.
//!
//! Everything here is seeded from configuration at startup and dies with
//! the process. Only note metadata has durability, in the remote
//! repository. Mutations take the write lock; handlers run on a
//! multi-threaded runtime, so the lock is what serializes concurrent
//! appends.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use eduink_config::model::CatalogConfig;
use eduink_core::types::{FileType, QuestionRecord, VideoRecord};

/// Input for [`Catalog::add_question`]. The id and timestamp are assigned
/// by the catalog.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub class: String,
    pub subject: String,
    pub title: String,
    pub file_url: String,
    pub file_type: FileType,
}

/// Input for [`Catalog::add_video`].
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub class: String,
    pub subject: String,
    pub title: String,
    pub video_url: String,
}

/// The volatile catalog store.
///
/// Record ids keep the numeric wall-clock-millis shape the API has always
/// exposed, but are handed out by a monotonic counter so records created
/// within the same clock tick cannot collide.
pub struct Catalog {
    inner: RwLock<Inner>,
    next_id: AtomicI64,
}

struct Inner {
    classes: Vec<String>,
    subjects: BTreeMap<String, Vec<String>>,
    questions: Vec<QuestionRecord>,
    videos: Vec<VideoRecord>,
}

impl Catalog {
    /// Create a catalog seeded from configuration.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                classes: config.classes.clone(),
                subjects: config.subjects.clone(),
                questions: Vec::new(),
                videos: Vec::new(),
            }),
            next_id: AtomicI64::new(chrono::Utc::now().timestamp_millis()),
        }
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// All class labels, in configured order.
    pub fn classes(&self) -> Vec<String> {
        self.inner.read().expect("catalog lock poisoned").classes.clone()
    }

    /// Subject list for a class, or `None` for an unknown class.
    pub fn subjects_for(&self, class: &str) -> Option<Vec<String>> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .subjects
            .get(class)
            .cloned()
    }

    /// Add a subject to a class. Idempotent: a subject already present for
    /// the class is left untouched. An unknown class gains a subject list
    /// without being appended to the class label list.
    pub fn add_subject(&self, class: &str, name: &str) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        let subjects = inner.subjects.entry(class.to_string()).or_default();
        if !subjects.iter().any(|s| s == name) {
            subjects.push(name.to_string());
            tracing::debug!(class, subject = name, "subject added");
        }
    }

    /// Union of subjects across all classes, deduplicated and
    /// lexicographically sorted.
    pub fn all_subjects(&self) -> Vec<String> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        let set: BTreeSet<&String> = inner.subjects.values().flatten().collect();
        set.into_iter().cloned().collect()
    }

    /// Append a question paper record, assigning its id and upload time.
    pub fn add_question(&self, new: NewQuestion) -> QuestionRecord {
        let record = QuestionRecord {
            id: self.assign_id(),
            class: new.class,
            subject: new.subject,
            title: new.title,
            file_url: new.file_url,
            file_type: new.file_type,
            uploaded_at: chrono::Utc::now().to_rfc3339(),
        };
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.questions.push(record.clone());
        tracing::debug!(id = record.id, class = %record.class, subject = %record.subject, "question recorded");
        record
    }

    /// Question papers matching a subject (case-insensitive) and class
    /// (exact). No class means no matches; records always carry one.
    pub fn questions(&self, subject: &str, class: Option<&str>) -> Vec<QuestionRecord> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        inner
            .questions
            .iter()
            .filter(|q| {
                q.subject.eq_ignore_ascii_case(subject)
                    && class.is_some_and(|c| q.class == c)
            })
            .cloned()
            .collect()
    }

    /// Append a video link record, assigning its id and addition time.
    pub fn add_video(&self, new: NewVideo) -> VideoRecord {
        let record = VideoRecord {
            id: self.assign_id(),
            class: new.class,
            subject: new.subject,
            title: new.title,
            video_url: new.video_url,
            added_at: chrono::Utc::now().to_rfc3339(),
        };
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.videos.push(record.clone());
        tracing::debug!(id = record.id, class = %record.class, subject = %record.subject, "video recorded");
        record
    }

    /// Video links with the same filter semantics as [`Catalog::questions`].
    pub fn videos(&self, subject: &str, class: Option<&str>) -> Vec<VideoRecord> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        inner
            .videos
            .iter()
            .filter(|v| {
                v.subject.eq_ignore_ascii_case(subject)
                    && class.is_some_and(|c| v.class == c)
            })
            .cloned()
            .collect()
    }
}
