// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Rowboat plugin seams.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod channel;
pub mod datastore;
pub mod storage;

pub use adapter::PluginAdapter;
pub use channel::{ChannelAdapter, ChannelCapabilities};
pub use datastore::DataStore;
pub use storage::{ActivityStore, StorageAdapter};
