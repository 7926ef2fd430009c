// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static catalog of services and queries.
//!
//! Built once from configuration; declaration order is stable and is the
//! order menus are rendered in. The composite key (service id, callback key)
//! resolves exactly one query once the catalog is loaded.

use rowboat_core::{Department, QueryDef, RowboatError, ServiceDef};
use rowboat_config::model::CatalogConfig;

/// Immutable service/query catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<ServiceDef>,
}

impl Catalog {
    /// Builds a catalog, enforcing the composite-key uniqueness invariant.
    pub fn new(services: Vec<ServiceDef>) -> Result<Self, RowboatError> {
        let mut seen = std::collections::HashSet::new();
        for service in &services {
            if !seen.insert(service.id.clone()) {
                return Err(RowboatError::Config(format!(
                    "duplicate service id `{}` in catalog",
                    service.id
                )));
            }
            let mut keys = std::collections::HashSet::new();
            for query in &service.queries {
                if !keys.insert(query.key.as_str()) {
                    return Err(RowboatError::Config(format!(
                        "service `{}`: duplicate query key `{}`",
                        service.id, query.key
                    )));
                }
            }
        }
        Ok(Self { services })
    }

    /// Builds the catalog from its configuration shape.
    pub fn from_config(catalog: &CatalogConfig) -> Result<Self, RowboatError> {
        let services = catalog
            .services
            .iter()
            .map(|service| ServiceDef {
                id: service.id.clone(),
                name: service.name.clone(),
                department: service.department.as_deref().map(Department::new),
                queries: service
                    .queries
                    .iter()
                    .map(|query| QueryDef {
                        key: query.key.clone(),
                        name: query.name.clone(),
                        statement: query.statement.clone(),
                        binding: query.binding.clone(),
                        department: Department::new(&query.department),
                    })
                    .collect(),
            })
            .collect();
        Self::new(services)
    }

    /// Every service, in declaration order.
    pub fn services(&self) -> &[ServiceDef] {
        &self.services
    }

    /// Services visible to the given department, in declaration order.
    ///
    /// Admin sees every service; otherwise a service is included when it
    /// declares no department or declares the caller's.
    pub fn services_for(&self, department: &Department) -> Vec<&ServiceDef> {
        self.services
            .iter()
            .filter(|service| {
                department.is_admin()
                    || service
                        .department
                        .as_ref()
                        .is_none_or(|declared| declared == department)
            })
            .collect()
    }

    /// Looks up a service by id.
    pub fn service(&self, service_id: &str) -> Option<&ServiceDef> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// Queries of a service in declaration order. An unknown or query-less
    /// service yields an empty slice, not an error.
    pub fn queries_for(&self, service_id: &str) -> &[QueryDef] {
        self.service(service_id)
            .map(|s| s.queries.as_slice())
            .unwrap_or(&[])
    }

    /// Resolves the composite key to exactly one query.
    pub fn resolve(&self, service_id: &str, key: &str) -> Result<&QueryDef, RowboatError> {
        self.queries_for(service_id)
            .iter()
            .find(|q| q.key == key)
            .ok_or_else(|| RowboatError::NotFound {
                what: format!("query {service_id}:{key}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_config::model::RowboatConfig;

    fn stock_catalog() -> Catalog {
        Catalog::from_config(&RowboatConfig::default().catalog).unwrap()
    }

    #[test]
    fn declaration_order_is_preserved() {
        let catalog = stock_catalog();
        let ids: Vec<_> = catalog.services().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["marketing", "analytics"]);
    }

    #[test]
    fn admin_sees_union_of_all_services() {
        let catalog = stock_catalog();
        assert_eq!(catalog.services_for(&Department::admin()).len(), 2);
    }

    #[test]
    fn department_sees_exactly_its_services() {
        let catalog = stock_catalog();
        let visible = catalog.services_for(&Department::new("marketing"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "marketing");
    }

    #[test]
    fn undeclared_service_is_visible_to_every_department() {
        let toml_str = r#"
[[services]]
id = "common"
name = "Common"

[[services]]
id = "marketing"
name = "Marketing"
department = "marketing"
"#;
        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        let catalog = Catalog::from_config(&config).unwrap();
        let visible = catalog.services_for(&Department::new("analytics"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "common");
        assert_eq!(catalog.services_for(&Department::new("marketing")).len(), 2);
    }

    #[test]
    fn unknown_service_yields_empty_queries() {
        let catalog = stock_catalog();
        assert!(catalog.queries_for("does_not_exist").is_empty());
    }

    #[test]
    fn resolve_hits_exactly_one_query() {
        let catalog = stock_catalog();
        let query = catalog.resolve("marketing", "export_users").unwrap();
        assert_eq!(query.statement, "SELECT * FROM users_marketing;");
    }

    #[test]
    fn resolve_miss_is_not_found() {
        let catalog = stock_catalog();
        assert!(matches!(
            catalog.resolve("marketing", "no_such_key"),
            Err(RowboatError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.resolve("no_such_service", "export_users"),
            Err(RowboatError::NotFound { .. })
        ));
    }

    #[test]
    fn duplicate_keys_rejected_at_build() {
        let toml_str = r#"
[[services]]
id = "s1"
name = "S1"

[[services.queries]]
key = "q"
name = "Q"
statement = "SELECT 1;"
binding = "b"
department = "d"

[[services.queries]]
key = "q"
name = "Q again"
statement = "SELECT 2;"
binding = "b"
department = "d"
"#;
        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            Catalog::from_config(&config),
            Err(RowboatError::Config(_))
        ));
    }
}
