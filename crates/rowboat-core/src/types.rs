// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Rowboat workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// External numeric identity of an operator (Telegram user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a chat (private or group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a message arrived in a private conversation or a group chat.
///
/// Group messages additionally feed the durable per-(chat, user) activity
/// table; private messages only update the in-memory tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

/// Authorization scope label. Lowercased on construction; `admin` is the
/// distinguished superuser scope that passes every department check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    pub const ADMIN: &'static str = "admin";

    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_lowercase())
    }

    pub fn admin() -> Self {
        Self(Self::ADMIN.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named grouping of queries, optionally restricted to one department.
///
/// A service with no declared department is visible to every authorized
/// operator. Declaration order is preserved by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDef {
    /// Stable identifier used in callback payloads. Must not contain `:`.
    pub id: String,
    /// Display name shown on menu buttons.
    pub name: String,
    /// Department allowed to browse this service, if restricted.
    pub department: Option<Department>,
    /// Queries in declaration order.
    pub queries: Vec<QueryDef>,
}

/// A bound, parameterless read statement producing tabular rows.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDef {
    /// Callback key, unique within the owning service. Must not contain `:`.
    pub key: String,
    /// Display name shown on menu buttons and in the delivery caption.
    pub name: String,
    /// Opaque statement text. The data store owns its correctness.
    pub statement: String,
    /// Logical data-store binding, resolved to a connection string via config.
    pub binding: String,
    /// Department required to run this query (unless the caller is admin).
    pub department: Department,
}

/// A scalar cell value. Closed variant set; both export formats render
/// through [`Value::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(String),
}

impl Value {
    /// Text rendering used by the spreadsheet and delimited exporters.
    /// `Null` renders as the empty field.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Timestamp(s) => s.clone(),
        }
    }
}

/// One result row: an ordered list of (column name, value) pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(pub Vec<(String, Value)>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }
}

/// An ordered sequence of rows with the column set carried once.
///
/// Columns are derived from the first row and assumed uniform; a row with a
/// differing column set is not an error -- missing columns render as empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TabularResult {
    /// Builds a result, deriving the header from the first row.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.0.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Durable per-(chat, user) activity aggregate, as stored in `chat_activity`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatActivity {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Last seen chat title, not historical.
    pub chat_title: Option<String>,
    /// Last seen topic; best-effort, absent means NULL.
    pub chat_topic: Option<String>,
    pub message_count: u64,
    pub total_length: u64,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Identifies the type of adapter behind the [`crate::traits::PluginAdapter`] base trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Channel,
    Storage,
    DataStore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_is_lowercased_and_trimmed() {
        let dept = Department::new("  Marketing ");
        assert_eq!(dept.as_str(), "marketing");
        assert!(!dept.is_admin());
        assert!(Department::new("Admin").is_admin());
    }

    #[test]
    fn result_columns_come_from_first_row() {
        let rows = vec![
            Row(vec![
                ("id".into(), Value::Int(1)),
                ("name".into(), Value::Text("a".into())),
            ]),
            Row(vec![("id".into(), Value::Int(2))]),
        ];
        let result = TabularResult::from_rows(rows);
        assert_eq!(result.columns, vec!["id", "name"]);
        assert_eq!(result.rows.len(), 2);
        // Second row is missing `name`; lookup yields None, rendered empty downstream.
        assert!(result.rows[1].get("name").is_none());
    }

    #[test]
    fn empty_result_has_no_columns() {
        let result = TabularResult::from_rows(vec![]);
        assert!(result.is_empty());
        assert!(result.columns.is_empty());
    }

    #[test]
    fn value_rendering() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Bool(true).render(), "true");
        assert_eq!(Value::Int(-3).render(), "-3");
        assert_eq!(Value::Text("hi".into()).render(), "hi");
        assert_eq!(
            Value::Timestamp("2026-01-01T00:00:00Z".into()).render(),
            "2026-01-01T00:00:00Z"
        );
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;
        for variant in [AdapterType::Channel, AdapterType::Storage, AdapterType::DataStore] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(variant, parsed);
        }
    }
}
