// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits for persistence backends.

use async_trait::async_trait;

use crate::error::RowboatError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatActivity, ChatId, UserId};

/// Lifecycle trait for storage and persistence backends.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, pragmas, connection).
    async fn initialize(&self) -> Result<(), RowboatError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), RowboatError>;
}

/// Durable group-chat activity aggregate, keyed by `(chat, user)`.
///
/// `record_group_message` must be atomic at the storage layer -- a single
/// conditional insert-or-update, never a read-then-write pair -- so it stays
/// correct under concurrent writers for the same key.
#[async_trait]
pub trait ActivityStore: StorageAdapter {
    /// Upserts one observed message: increments count by 1 and total length
    /// by `text_len`, and overwrites the stored title/topic with the latest
    /// observed values (last seen, not historical).
    async fn record_group_message(
        &self,
        chat: ChatId,
        user: UserId,
        chat_title: Option<&str>,
        chat_topic: Option<&str>,
        text_len: u64,
    ) -> Result<(), RowboatError>;

    /// Reads the aggregate for one `(chat, user)` pair, if any.
    async fn group_activity(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<Option<ChatActivity>, RowboatError>;
}
