// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ActivityStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use rowboat_config::model::StorageConfig;
use rowboat_core::traits::adapter::PluginAdapter;
use rowboat_core::traits::storage::{ActivityStore, StorageAdapter};
use rowboat_core::{AdapterType, ChatActivity, ChatId, HealthStatus, RowboatError, UserId};

use crate::database::Database;
use crate::queries;

/// SQLite-backed activity store.
///
/// Wraps a [`Database`] handle and delegates query operations to the typed
/// query module. The database is lazily opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteActivityStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteActivityStore {
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, RowboatError> {
        self.db.get().ok_or_else(|| RowboatError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteActivityStore {
    fn name(&self) -> &str {
        "sqlite-activity"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        // Shutdown delegates to close if the DB was initialized.
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteActivityStore {
    async fn initialize(&self) -> Result<(), RowboatError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| RowboatError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite activity store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), RowboatError> {
        let db = self.db()?;
        // Checkpoint WAL before close.
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for SqliteActivityStore {
    async fn record_group_message(
        &self,
        chat: ChatId,
        user: UserId,
        chat_title: Option<&str>,
        chat_topic: Option<&str>,
        text_len: u64,
    ) -> Result<(), RowboatError> {
        queries::activity::upsert_group_message(self.db()?, chat, user, chat_title, chat_topic, text_len)
            .await
    }

    async fn group_activity(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<Option<ChatActivity>, RowboatError> {
        queries::activity::get_group_activity(self.db()?, chat, user).await
    }
}
