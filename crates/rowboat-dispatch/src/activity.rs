// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user activity aggregation.
//!
//! Two aggregates with different lifetimes: an in-memory per-user counter
//! covering every observed message, and a durable per-(chat, user) table
//! written only for group chats. The in-memory update happens inside the map
//! entry guard, so concurrent observers of the same user cannot lose counts.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;

use rowboat_core::traits::storage::ActivityStore;
use rowboat_core::{ChatId, ChatKind, Department, RowboatError, UserId};

/// In-memory per-user counters. Lost on restart by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityRecord {
    pub count: u64,
    pub total_length: u64,
}

/// One user's summary line: message count and average message length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserSummary {
    pub user: UserId,
    pub count: u64,
    pub average_length: f64,
}

/// Tracks message counts in memory and mirrors group-chat activity into the
/// durable store.
pub struct ActivityTracker {
    records: DashMap<UserId, ActivityRecord>,
    store: Arc<dyn ActivityStore>,
}

impl ActivityTracker {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self {
            records: DashMap::new(),
            store,
        }
    }

    /// Observes one inbound message.
    ///
    /// Always updates the in-memory aggregate. For group chats additionally
    /// performs the durable upsert; a storage failure there is logged and
    /// does not disturb the in-memory count or the caller.
    pub async fn observe(
        &self,
        user: UserId,
        chat: ChatId,
        chat_kind: ChatKind,
        chat_title: Option<&str>,
        chat_topic: Option<&str>,
        text_len: u64,
    ) {
        {
            let mut entry = self.records.entry(user).or_default();
            entry.count += 1;
            entry.total_length += text_len;
        }

        if chat_kind == ChatKind::Group {
            if let Err(e) = self
                .store
                .record_group_message(chat, user, chat_title, chat_topic, text_len)
                .await
            {
                warn!(user = user.0, chat = chat.0, error = %e, "durable activity upsert failed");
            }
        }
    }

    /// The caller's own summary. Average is 0 when nothing was observed.
    pub fn summary_for(&self, user: UserId) -> UserSummary {
        let record = self
            .records
            .get(&user)
            .map(|entry| *entry)
            .unwrap_or_default();
        UserSummary {
            user,
            count: record.count,
            average_length: average(record),
        }
    }

    /// Every tracked user's summary, sorted by user id. Admin only.
    pub fn full_summary(&self, caller: &Department) -> Result<Vec<UserSummary>, RowboatError> {
        if !caller.is_admin() {
            return Err(RowboatError::Forbidden {
                department: caller.clone(),
                resource: "full activity summary".to_string(),
            });
        }
        let mut summaries: Vec<UserSummary> = self
            .records
            .iter()
            .map(|entry| UserSummary {
                user: *entry.key(),
                count: entry.count,
                average_length: average(*entry.value()),
            })
            .collect();
        summaries.sort_by_key(|s| s.user);
        Ok(summaries)
    }
}

fn average(record: ActivityRecord) -> f64 {
    if record.count == 0 {
        0.0
    } else {
        record.total_length as f64 / record.count as f64
    }
}
