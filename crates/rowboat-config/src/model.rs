// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Rowboat report dispatcher.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Rowboat configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the compiled default catalog mirrors the two stock services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RowboatConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Operator access list.
    #[serde(default)]
    pub access: AccessConfig,

    /// Logical data-store binding -> connection string.
    ///
    /// Multiple services may share one binding. A catalog query whose
    /// binding has no entry here is a terminal configuration error at
    /// execution time.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,

    /// Service and query catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Durable activity storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Query execution gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Export pipeline settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for RowboatConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            telegram: TelegramConfig::default(),
            access: AccessConfig::default(),
            bindings: BTreeMap::new(),
            catalog: CatalogConfig::default(),
            storage: StorageConfig::default(),
            gateway: GatewayConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "rowboat".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` means the transport cannot start.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Operator access list configuration.
///
/// Each entry is `"<numeric user id>:<department>"`, e.g.
/// `"111111111:admin"`. An identity absent from this list is unauthorized;
/// there is no default department.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    #[serde(default)]
    pub operators: Vec<String>,
}

/// Catalog of services and their queries, in declaration order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        // Stock catalog: one user-export query per department service.
        Self {
            services: vec![
                ServiceConfig {
                    id: "marketing".into(),
                    name: "Marketing".into(),
                    department: Some("marketing".into()),
                    queries: vec![QueryConfig {
                        key: "export_users".into(),
                        name: "Export all users".into(),
                        statement: "SELECT * FROM users_marketing;".into(),
                        binding: "marketing".into(),
                        department: "marketing".into(),
                    }],
                },
                ServiceConfig {
                    id: "analytics".into(),
                    name: "Analytics".into(),
                    department: Some("analytics".into()),
                    queries: vec![QueryConfig {
                        key: "export_users".into(),
                        name: "Export all users".into(),
                        statement: "SELECT * FROM users_analytics;".into(),
                        binding: "analytics".into(),
                        department: "analytics".into(),
                    }],
                },
            ],
        }
    }
}

/// One service: a named grouping of queries, optionally department-restricted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Identifier used in callback payloads. Must not contain `:` and must
    /// not be the reserved word `service`.
    pub id: String,

    /// Display name shown on menu buttons.
    pub name: String,

    /// Department allowed to browse this service. Omitted means visible to
    /// every authorized operator.
    #[serde(default)]
    pub department: Option<String>,

    /// Queries in declaration order.
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

/// One catalog query: opaque parameterless statement plus its binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Callback key, unique within the owning service. Must not contain `:`.
    pub key: String,

    /// Display name shown on menu buttons and in the delivery caption.
    pub name: String,

    /// Statement text. Not parsed or validated here; the data store owns it.
    pub statement: String,

    /// Logical binding name resolved through `[bindings]`.
    pub binding: String,

    /// Department required to run this query (admin always passes).
    pub department: String,
}

/// Durable activity storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding `chat_activity`.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("rowboat").join("rowboat.db"))
        .and_then(|p| p.to_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "rowboat.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Query execution gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Bounded execution timeout per query, in seconds. On timeout the
    /// connection is still released and the failure surfaces once.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

fn default_query_timeout_secs() -> u64 {
    30
}

/// Export pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Serialized files strictly larger than this are zip-wrapped before
    /// delivery. Evaluated once per export.
    #[serde(default = "default_compression_threshold")]
    pub compression_threshold_bytes: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression_threshold_bytes: default_compression_threshold(),
        }
    }
}

fn default_compression_threshold() -> u64 {
    50 * 1024 * 1024 // 50 MiB
}
