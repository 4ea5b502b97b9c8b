// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the EduInk content service.
//!
//! Provides the shared error type and the domain record types used by the
//! catalog store, the Supabase adapters, and the HTTP server.

pub mod error;
pub mod types;

pub use error::EduinkError;
pub use types::{FileType, NewNote, NoteRecord, QuestionRecord, VideoRecord};
