// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: operator entry format, callback-payload safety of catalog
//! identifiers, per-service key uniqueness, and non-empty paths.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::RowboatConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RowboatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Operator entries must be "<numeric id>:<department>".
    let mut seen_operators = HashSet::new();
    for (i, entry) in config.access.operators.iter().enumerate() {
        match entry.split_once(':') {
            Some((id, dept)) if !dept.trim().is_empty() => {
                match id.trim().parse::<i64>() {
                    Ok(uid) => {
                        if !seen_operators.insert(uid) {
                            errors.push(ConfigError::Validation {
                                message: format!(
                                    "access.operators[{i}]: duplicate user id {uid}"
                                ),
                            });
                        }
                    }
                    Err(_) => errors.push(ConfigError::Validation {
                        message: format!(
                            "access.operators[{i}]: `{id}` is not a numeric user id"
                        ),
                    }),
                }
            }
            _ => errors.push(ConfigError::Validation {
                message: format!(
                    "access.operators[{i}]: expected `<user id>:<department>`, got `{entry}`"
                ),
            }),
        }
    }

    // Catalog identifiers feed callback payloads split on the first colon,
    // so neither service ids nor query keys may contain one. `service` is
    // reserved as the browse-payload prefix.
    let mut seen_services = HashSet::new();
    for service in &config.catalog.services {
        if service.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "catalog service id must not be empty".to_string(),
            });
            continue;
        }
        if service.id.contains(':') {
            errors.push(ConfigError::Validation {
                message: format!("catalog service id `{}` must not contain `:`", service.id),
            });
        }
        if service.id == "service" {
            errors.push(ConfigError::Validation {
                message: "catalog service id `service` is reserved".to_string(),
            });
        }
        if !seen_services.insert(&service.id) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate catalog service id `{}`", service.id),
            });
        }

        let mut seen_keys = HashSet::new();
        for query in &service.queries {
            if query.key.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("service `{}`: query key must not be empty", service.id),
                });
                continue;
            }
            if query.key.contains(':') {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "service `{}`: query key `{}` must not contain `:`",
                        service.id, query.key
                    ),
                });
            }
            if !seen_keys.insert(&query.key) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "service `{}`: duplicate query key `{}`",
                        service.id, query.key
                    ),
                });
            }
            if query.binding.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "service `{}`: query `{}` has an empty binding name",
                        service.id, query.key
                    ),
                });
            }
            if query.department.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "service `{}`: query `{}` has an empty department",
                        service.id, query.key
                    ),
                });
            }
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.gateway.query_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.query_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.export.compression_threshold_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "export.compression_threshold_bytes must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
