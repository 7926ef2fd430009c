// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query execution gateway for the Rowboat report dispatcher.
//!
//! Resolves a query's logical binding to a connection string, executes the
//! opaque statement through a [`DataStore`], and bounds the execution with a
//! timeout. Failures surface exactly once; the gateway never retries.

pub mod sqlite;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use rowboat_config::model::GatewayConfig;
use rowboat_core::{DataStore, QueryDef, RowboatError, TabularResult};

pub use sqlite::SqliteDataStore;

/// Executes catalog queries against their bound data stores.
pub struct Gateway {
    bindings: BTreeMap<String, String>,
    store: Arc<dyn DataStore>,
    timeout: Duration,
}

impl Gateway {
    pub fn new(
        bindings: BTreeMap<String, String>,
        store: Arc<dyn DataStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            bindings,
            store,
            timeout,
        }
    }

    /// Builds the gateway from the `[bindings]` table and `[gateway]` section.
    pub fn from_config(
        bindings: BTreeMap<String, String>,
        config: &GatewayConfig,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self::new(
            bindings,
            store,
            Duration::from_secs(config.query_timeout_secs),
        )
    }

    /// Executes one catalog query.
    ///
    /// A binding with no configured connection string is a terminal
    /// configuration error; no connection is opened. On timeout the
    /// in-flight store future is dropped, which releases its scoped
    /// connection, and [`RowboatError::Timeout`] surfaces once.
    #[instrument(skip(self, query), fields(query = %query.key, binding = %query.binding))]
    pub async fn execute(&self, query: &QueryDef) -> Result<TabularResult, RowboatError> {
        let connection = self.bindings.get(&query.binding).ok_or_else(|| {
            RowboatError::Config(format!(
                "binding `{}` has no connection string",
                query.binding
            ))
        })?;

        let result = tokio::time::timeout(
            self.timeout,
            self.store.run_query(connection, &query.statement),
        )
        .await
        .map_err(|_| RowboatError::Timeout {
            duration: self.timeout,
        })??;

        debug!(rows = result.rows.len(), "query executed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_core::{Department, Row, Value};
    use rowboat_test_utils::MockDataStore;

    fn query(binding: &str) -> QueryDef {
        QueryDef {
            key: "q1".into(),
            name: "Query One".into(),
            statement: "SELECT 1;".into(),
            binding: binding.into(),
            department: Department::new("marketing"),
        }
    }

    fn bindings() -> BTreeMap<String, String> {
        BTreeMap::from([("b1".to_string(), "mock://b1".to_string())])
    }

    #[tokio::test]
    async fn missing_binding_is_config_error_and_opens_nothing() {
        let store = Arc::new(MockDataStore::new());
        let gateway = Gateway::new(bindings(), store.clone(), Duration::from_secs(5));

        let err = gateway.execute(&query("unbound")).await.unwrap_err();
        assert!(matches!(err, RowboatError::Config(_)));
        assert_eq!(store.calls().len(), 0, "no connection may be opened");
    }

    #[tokio::test]
    async fn execute_passes_connection_and_statement_through() {
        let store = Arc::new(MockDataStore::new());
        store.push_result(rowboat_core::TabularResult::from_rows(vec![Row(vec![(
            "id".into(),
            Value::Int(1),
        )])]));
        let gateway = Gateway::new(bindings(), store.clone(), Duration::from_secs(5));

        let result = gateway.execute(&query("b1")).await.unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            store.calls(),
            vec![("mock://b1".to_string(), "SELECT 1;".to_string())]
        );
    }

    #[tokio::test]
    async fn store_failure_surfaces_once_without_retry() {
        let store = Arc::new(MockDataStore::new());
        store.fail_next("disk on fire");
        let gateway = Gateway::new(bindings(), store.clone(), Duration::from_secs(5));

        let err = gateway.execute(&query("b1")).await.unwrap_err();
        assert!(matches!(err, RowboatError::Execution { .. }));
        assert_eq!(store.calls().len(), 1, "a failed execution is not retried");
    }

    #[tokio::test]
    async fn slow_query_times_out() {
        let store = Arc::new(MockDataStore::new());
        store.set_delay(Duration::from_secs(60));
        store.push_result(rowboat_core::TabularResult::default());
        let gateway = Gateway::new(bindings(), store, Duration::from_millis(20));

        let err = gateway.execute(&query("b1")).await.unwrap_err();
        assert!(matches!(err, RowboatError::Timeout { .. }));
    }
}
