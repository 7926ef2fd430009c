// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rowboat report dispatcher.

use thiserror::Error;

use crate::types::{Department, UserId};

/// The primary error type used across all Rowboat crates.
///
/// Every user-facing error is caught at the dispatch boundary and converted
/// to the short text from [`RowboatError::user_message`]; the technical
/// detail carried by the variant is logged, never forwarded to the chat.
#[derive(Debug, Error)]
pub enum RowboatError {
    /// Identity is absent from the access map. Always user-visible, never retried.
    #[error("unauthorized: user {user} is not in the access list")]
    Unauthorized { user: UserId },

    /// Authorized identity, wrong department for the requested resource.
    #[error("forbidden: department `{department}` may not access {resource}")]
    Forbidden {
        department: Department,
        resource: String,
    },

    /// Unknown service, query, or callback key. May indicate a stale menu.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Missing connection string, unresolvable binding, invalid config value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Data-store failure while executing a catalog query.
    #[error("query execution failed: {source}")]
    Execution {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization failure in the export pipeline.
    #[error("export failed: {source}")]
    Export {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport failure while delivering a reply or file.
    #[error("delivery failed: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persistence-layer failure (activity table, migrations, pragmas).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Bounded query execution exceeded its deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RowboatError {
    /// The short, non-leaking message shown to the chat user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "You do not have access to this bot.",
            Self::Forbidden { .. } => "You do not have access to this.",
            Self::NotFound { .. } => "Query not found.",
            Self::Config(_) => "The selected service is not configured.",
            Self::Execution { .. } | Self::Timeout { .. } => {
                "The query against the data store failed."
            }
            Self::Export { .. } => "The report file could not be generated.",
            Self::Delivery { .. } => "The file could not be delivered.",
            Self::Storage { .. } | Self::Internal(_) => "Something went wrong.",
        }
    }

    /// True for errors a systems rewrite may classify as transient.
    ///
    /// `Unauthorized`/`Forbidden`/`NotFound` are never retryable.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Execution { .. } | Self::Timeout { .. })
    }
}
