// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-store trait: an opaque row-producing service per connection string.

use async_trait::async_trait;

use crate::error::RowboatError;
use crate::traits::adapter::PluginAdapter;
use crate::types::TabularResult;

/// A relational query engine reachable through a connection string.
///
/// Implementations open exactly one connection per call and guarantee its
/// release on every exit path (success, statement failure, cancellation).
/// Concurrent calls never share a connection; this is a scoped-acquisition
/// contract, not a pool.
#[async_trait]
pub trait DataStore: PluginAdapter {
    /// Executes the opaque statement and returns the ordered row sequence.
    ///
    /// The statement text is owned by the catalog; the store does not parse
    /// or validate it beyond what the engine itself enforces.
    async fn run_query(
        &self,
        connection: &str,
        statement: &str,
    ) -> Result<TabularResult, RowboatError>;
}
