// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock data store for deterministic gateway and dispatch tests.
//!
//! `MockDataStore` implements `DataStore` with injectable results, scripted
//! failures, an optional artificial delay, and a captured call log.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use rowboat_core::{
    AdapterType, DataStore, HealthStatus, PluginAdapter, RowboatError, TabularResult,
};

/// A scripted in-memory data store.
///
/// Results queued via [`push_result`](Self::push_result) are returned in
/// order; an empty queue yields an empty result. Every call is recorded as a
/// `(connection, statement)` pair for assertion.
pub struct MockDataStore {
    results: Mutex<VecDeque<TabularResult>>,
    fail_next: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockDataStore {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            fail_next: Mutex::new(None),
            delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a result for a future `run_query` call.
    pub fn push_result(&self, result: TabularResult) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Makes the next `run_query` call fail with an execution error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    /// Delays every `run_query` call, for timeout tests.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// All `(connection, statement)` pairs observed so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockDataStore {
    fn name(&self) -> &str {
        "mock-datastore"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DataStore
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        Ok(())
    }
}

#[async_trait]
impl DataStore for MockDataStore {
    async fn run_query(
        &self,
        connection: &str,
        statement: &str,
    ) -> Result<TabularResult, RowboatError> {
        self.calls
            .lock()
            .unwrap()
            .push((connection.to_string(), statement.to_string()));

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(RowboatError::Execution {
                source: Box::new(std::io::Error::other(message)),
            });
        }

        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_core::{Row, Value};

    #[tokio::test]
    async fn returns_queued_results_in_order() {
        let store = MockDataStore::new();
        store.push_result(TabularResult::from_rows(vec![Row(vec![(
            "n".into(),
            Value::Int(1),
        )])]));
        store.push_result(TabularResult::default());

        let first = store.run_query("c", "SELECT 1;").await.unwrap();
        assert_eq!(first.rows.len(), 1);
        let second = store.run_query("c", "SELECT 2;").await.unwrap();
        assert!(second.rows.is_empty());

        assert_eq!(store.calls().len(), 2);
        assert_eq!(store.calls()[1].1, "SELECT 2;");
    }

    #[tokio::test]
    async fn scripted_failure_fires_once() {
        let store = MockDataStore::new();
        store.fail_next("boom");

        assert!(store.run_query("c", "SELECT 1;").await.is_err());
        assert!(store.run_query("c", "SELECT 1;").await.is_ok());
    }
}
