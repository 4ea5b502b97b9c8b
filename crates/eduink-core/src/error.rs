// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the EduInk content service.

use thiserror::Error;

/// The primary error type used across the EduInk service crates.
#[derive(Debug, Error)]
pub enum EduinkError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Object storage errors (upload or removal failed upstream).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Metadata repository errors (insert, query, or delete failed upstream).
    #[error("repository error: {message}")]
    Repository {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backing table does not exist yet. Read and delete flows degrade
    /// this to "no data" instead of surfacing a failure.
    #[error("relation `{table}` does not exist")]
    SchemaMissing { table: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EduinkError {
    /// True for the schema-missing condition.
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, EduinkError::SchemaMissing { .. })
    }

    /// The bare upstream message, without the variant prefix. Used when a
    /// handler passes the message through inside its own response wording.
    pub fn detail(&self) -> String {
        match self {
            EduinkError::Config(message) | EduinkError::Internal(message) => message.clone(),
            EduinkError::Storage { message, .. } | EduinkError::Repository { message, .. } => {
                message.clone()
            }
            EduinkError::SchemaMissing { table } => {
                format!("relation \"{table}\" does not exist")
            }
        }
    }
}
