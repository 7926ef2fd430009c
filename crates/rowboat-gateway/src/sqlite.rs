// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`DataStore`] trait.
//!
//! Each call opens exactly one connection, runs the opaque statement, and
//! releases the connection on every exit path. Nothing is pooled: the
//! scoped-acquisition contract means concurrent calls never share a
//! connection.

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use tracing::{debug, warn};

use rowboat_core::{
    AdapterType, DataStore, HealthStatus, PluginAdapter, Row, RowboatError, TabularResult, Value,
};

/// Data store backed by SQLite files; the connection string is the database
/// path.
#[derive(Debug, Default)]
pub struct SqliteDataStore;

impl SqliteDataStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginAdapter for SqliteDataStore {
    fn name(&self) -> &str {
        "sqlite-datastore"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DataStore
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        // There is no standing connection to probe; per-call opens surface
        // their own failures.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        Ok(())
    }
}

#[async_trait]
impl DataStore for SqliteDataStore {
    async fn run_query(
        &self,
        connection: &str,
        statement: &str,
    ) -> Result<TabularResult, RowboatError> {
        let conn = tokio_rusqlite::Connection::open(connection)
            .await
            .map_err(exec_err)?;

        let statement = statement.to_string();
        let result = conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&statement)?;
                let columns: Vec<String> =
                    stmt.column_names().iter().map(|s| s.to_string()).collect();

                let mut rows = Vec::new();
                let mut cursor = stmt.query([])?;
                while let Some(row) = cursor.next()? {
                    let mut pairs = Vec::with_capacity(columns.len());
                    for (i, name) in columns.iter().enumerate() {
                        pairs.push((name.clone(), map_value(row.get_ref(i)?)));
                    }
                    rows.push(Row(pairs));
                }
                Ok(TabularResult { columns, rows })
            })
            .await
            .map_err(exec_err);

        // Release the connection on success and failure alike. Close errors
        // are logged, not surfaced: the query outcome wins.
        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close data-store connection cleanly");
        } else {
            debug!(connection, "data-store connection released");
        }

        result
    }
}

fn map_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        // Blobs have no tabular rendering; expose the size rather than raw bytes.
        ValueRef::Blob(b) => Value::Text(format!("<blob {} bytes>", b.len())),
    }
}

fn exec_err(err: tokio_rusqlite::Error) -> RowboatError {
    RowboatError::Execution {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed_db(path: &str) {
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE users_marketing (id INTEGER, name TEXT, score REAL, active INTEGER);
             INSERT INTO users_marketing VALUES (1, 'alice', 9.5, 1);
             INSERT INTO users_marketing VALUES (2, 'bob', NULL, 0);
             INSERT INTO users_marketing VALUES (3, NULL, 3.25, 1);",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn executes_statement_and_maps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marketing.db");
        let path = path.to_str().unwrap();
        seed_db(path);

        let store = SqliteDataStore::new();
        let result = store
            .run_query(path, "SELECT * FROM users_marketing ORDER BY id;")
            .await
            .unwrap();

        assert_eq!(result.columns, vec!["id", "name", "score", "active"]);
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0].get("name"), Some(&Value::Text("alice".into())));
        assert_eq!(result.rows[1].get("score"), Some(&Value::Null));
        assert_eq!(result.rows[2].get("name"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn empty_table_yields_empty_result_with_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let path = path.to_str().unwrap();
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.execute_batch("CREATE TABLE t (a INTEGER, b TEXT);")
            .unwrap();
        drop(conn);

        let store = SqliteDataStore::new();
        let result = store.run_query(path, "SELECT * FROM t;").await.unwrap();
        assert!(result.rows.is_empty());
        // Column names still come from the prepared statement.
        assert_eq!(result.columns, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn statement_failure_is_an_execution_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.db");
        seed_db(path.to_str().unwrap());

        let store = SqliteDataStore::new();
        let err = store
            .run_query(path.to_str().unwrap(), "SELECT * FROM no_such_table;")
            .await
            .unwrap_err();
        assert!(matches!(err, RowboatError::Execution { .. }));
    }

    #[tokio::test]
    async fn unreachable_connection_string_is_an_execution_error() {
        let store = SqliteDataStore::new();
        let err = store
            .run_query("/nonexistent-dir/nope/x.db", "SELECT 1;")
            .await
            .unwrap_err();
        assert!(matches!(err, RowboatError::Execution { .. }));
    }
}
