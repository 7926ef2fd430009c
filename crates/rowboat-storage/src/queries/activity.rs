// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat activity aggregate operations.
//!
//! The write path is a single conditional upsert statement, never a
//! read-then-write pair, so concurrent observers of the same `(chat, user)`
//! pair cannot lose updates.

use rusqlite::params;

use rowboat_core::{ChatActivity, ChatId, RowboatError, UserId};

use crate::database::Database;

/// Records one observed group message for `(chat, user)`.
///
/// Increments the message count by one and the total length by `text_len`;
/// title and topic are overwritten with the latest observed values.
pub async fn upsert_group_message(
    db: &Database,
    chat: ChatId,
    user: UserId,
    chat_title: Option<&str>,
    chat_topic: Option<&str>,
    text_len: u64,
) -> Result<(), RowboatError> {
    let chat_title = chat_title.map(str::to_string);
    let chat_topic = chat_topic.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_activity
                     (chat_id, user_id, chat_title, chat_topic, message_count, total_length)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5)
                 ON CONFLICT (chat_id, user_id) DO UPDATE SET
                     message_count = message_count + 1,
                     total_length = total_length + excluded.total_length,
                     chat_title = excluded.chat_title,
                     chat_topic = excluded.chat_topic",
                params![chat.0, user.0, chat_title, chat_topic, text_len as i64],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Reads the aggregate for one `(chat, user)` pair.
pub async fn get_group_activity(
    db: &Database,
    chat: ChatId,
    user: UserId,
) -> Result<Option<ChatActivity>, RowboatError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT chat_id, user_id, chat_title, chat_topic, message_count, total_length
                 FROM chat_activity WHERE chat_id = ?1 AND user_id = ?2",
            )?;
            let result = stmt.query_row(params![chat.0, user.0], |row| {
                Ok(ChatActivity {
                    chat_id: ChatId(row.get(0)?),
                    user_id: UserId(row.get(1)?),
                    chat_title: row.get(2)?,
                    chat_topic: row.get(3)?,
                    message_count: row.get::<_, i64>(4)? as u64,
                    total_length: row.get::<_, i64>(5)? as u64,
                })
            });
            match result {
                Ok(activity) => Ok(Some(activity)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    async fn open_db(dir: &tempfile::TempDir) -> Database {
        let path = dir.path().join("activity.db");
        Database::open(path.to_str().unwrap(), true).await.unwrap()
    }

    #[tokio::test]
    async fn upsert_inserts_then_accumulates() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir).await;

        upsert_group_message(&db, ChatId(-100), UserId(7), Some("Ops"), None, 12)
            .await
            .unwrap();
        upsert_group_message(&db, ChatId(-100), UserId(7), Some("Ops Renamed"), Some("general"), 8)
            .await
            .unwrap();

        let row = get_group_activity(&db, ChatId(-100), UserId(7))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.message_count, 2);
        assert_eq!(row.total_length, 20);
        assert_eq!(row.chat_title.as_deref(), Some("Ops Renamed"));
        assert_eq!(row.chat_topic.as_deref(), Some("general"));
    }

    #[tokio::test]
    async fn pairs_are_isolated() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir).await;

        upsert_group_message(&db, ChatId(-100), UserId(7), None, None, 3)
            .await
            .unwrap();
        upsert_group_message(&db, ChatId(-100), UserId(8), None, None, 5)
            .await
            .unwrap();
        upsert_group_message(&db, ChatId(-200), UserId(7), None, None, 9)
            .await
            .unwrap();

        let a = get_group_activity(&db, ChatId(-100), UserId(7))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((a.message_count, a.total_length), (1, 3));
        assert!(
            get_group_activity(&db, ChatId(-300), UserId(7))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn concurrent_upserts_lose_nothing() {
        let dir = tempdir().unwrap();
        let db = Arc::new(open_db(&dir).await);

        let mut handles = Vec::new();
        for i in 0..32u64 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                upsert_group_message(&db, ChatId(-1), UserId(42), Some("Load"), None, i)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let row = get_group_activity(&db, ChatId(-1), UserId(42))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.message_count, 32);
        assert_eq!(row.total_length, (0..32).sum::<u64>());
    }
}
