// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./rowboat.toml` > `~/.config/rowboat/rowboat.toml`
//! > `/etc/rowboat/rowboat.toml`, with environment variable overrides via the
//! `ROWBOAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RowboatConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rowboat/rowboat.toml` (system-wide)
/// 3. `~/.config/rowboat/rowboat.toml` (user XDG config)
/// 4. `./rowboat.toml` (local directory)
/// 5. `ROWBOAT_*` environment variables
pub fn load_config() -> Result<RowboatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RowboatConfig::default()))
        .merge(Toml::file("/etc/rowboat/rowboat.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("rowboat/rowboat.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("rowboat.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RowboatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RowboatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RowboatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RowboatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ROWBOAT_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`. `ROWBOAT_BINDINGS_<NAME>`
/// maps into the `[bindings]` table.
fn env_provider() -> Env {
    Env::prefixed("ROWBOAT_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("bot_", "bot.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("access_", "access.", 1)
            .replacen("bindings_", "bindings.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("export_", "export.", 1);
        mapped.into()
    })
}
