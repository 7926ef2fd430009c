// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory activity store mirroring the durable upsert semantics.

use async_trait::async_trait;
use dashmap::DashMap;

use rowboat_core::traits::adapter::PluginAdapter;
use rowboat_core::traits::storage::{ActivityStore, StorageAdapter};
use rowboat_core::{AdapterType, ChatActivity, ChatId, HealthStatus, RowboatError, UserId};

/// An `ActivityStore` backed by a concurrent map instead of a database.
///
/// Matches the durable implementation's observable behavior: one upsert per
/// observed message, title and topic overwritten with the latest values.
#[derive(Default)]
pub struct MockActivityStore {
    rows: DashMap<(ChatId, UserId), ChatActivity>,
}

impl MockActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for MockActivityStore {
    fn name(&self) -> &str {
        "mock-activity-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MockActivityStore {
    async fn initialize(&self) -> Result<(), RowboatError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), RowboatError> {
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for MockActivityStore {
    async fn record_group_message(
        &self,
        chat: ChatId,
        user: UserId,
        chat_title: Option<&str>,
        chat_topic: Option<&str>,
        text_len: u64,
    ) -> Result<(), RowboatError> {
        self.rows
            .entry((chat, user))
            .and_modify(|row| {
                row.message_count += 1;
                row.total_length += text_len;
                row.chat_title = chat_title.map(str::to_string);
                row.chat_topic = chat_topic.map(str::to_string);
            })
            .or_insert_with(|| ChatActivity {
                chat_id: chat,
                user_id: user,
                chat_title: chat_title.map(str::to_string),
                chat_topic: chat_topic.map(str::to_string),
                message_count: 1,
                total_length: text_len,
            });
        Ok(())
    }

    async fn group_activity(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<Option<ChatActivity>, RowboatError> {
        Ok(self.rows.get(&(chat, user)).map(|row| row.clone()))
    }
}
