// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors into miette diagnostics so
//! startup failures render with codes and help text instead of a bare
//! `Debug` dump.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for terminal rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env layers could not be deserialized into the config model.
    #[error("configuration could not be loaded: {message}")]
    #[diagnostic(
        code(rowboat::config::load),
        help("check rowboat.toml against the documented keys; unknown keys are rejected")
    )]
    Load {
        /// Figment's description of the failure, including the key path.
        message: String,
    },

    /// A semantic constraint failed after deserialization.
    #[error("validation error: {message}")]
    #[diagnostic(code(rowboat::config::validation))]
    Validation { message: String },
}

/// Converts a figment error (which may aggregate several failures) into one
/// `ConfigError` per underlying failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Load {
            message: e.to_string(),
        })
        .collect()
}

/// Renders collected configuration errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("error[{}]: {error}", code_of(error));
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
    eprintln!(
        "rowboat: {} configuration error{} -- aborting",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

fn code_of(error: &ConfigError) -> String {
    error
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "rowboat::config".to_string())
}
