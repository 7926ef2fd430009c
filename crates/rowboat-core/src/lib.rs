// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rowboat report dispatcher.
//!
//! This crate provides the foundational trait definitions, error types, the
//! tagged event model, and the domain types used throughout the Rowboat
//! workspace. All adapter crates implement traits defined here.

pub mod error;
pub mod event;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RowboatError;
pub use event::{CallbackAction, Event, Incoming, MenuButton, Outbound, parse_callback};
pub use types::{
    AdapterType, ChatActivity, ChatId, ChatKind, Department, HealthStatus, QueryDef, Row,
    ServiceDef, TabularResult, UserId, Value,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    ActivityStore, ChannelAdapter, ChannelCapabilities, DataStore, PluginAdapter, StorageAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_taxonomy_is_complete() {
        // One constructor per variant of the dispatch error taxonomy.
        let _unauthorized = RowboatError::Unauthorized { user: UserId(1) };
        let _forbidden = RowboatError::Forbidden {
            department: Department::new("marketing"),
            resource: "query analytics:export_users".into(),
        };
        let _not_found = RowboatError::NotFound {
            what: "service s9".into(),
        };
        let _config = RowboatError::Config("test".into());
        let _execution = RowboatError::Execution {
            source: Box::new(std::io::Error::other("test")),
        };
        let _export = RowboatError::Export {
            source: Box::new(std::io::Error::other("test")),
        };
        let _delivery = RowboatError::Delivery {
            message: "test".into(),
            source: None,
        };
        let _storage = RowboatError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _timeout = RowboatError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = RowboatError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Compile-time check that every adapter trait is reachable from the
        // crate root. A missing module would fail to compile here.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_data_store<T: DataStore>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_activity_store<T: ActivityStore>() {}
    }
}
