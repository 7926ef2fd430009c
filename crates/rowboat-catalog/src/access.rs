// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Department-based access resolution.
//!
//! The identity -> department map is immutable configuration, loaded once at
//! process start. All checks are pure functions over that map: no side
//! effects, no blocking. Absence from the map means unauthorized, never a
//! default department.

use std::collections::HashMap;

use rowboat_core::{Department, QueryDef, RowboatError, ServiceDef, UserId};
use rowboat_config::model::AccessConfig;

/// Resolves external identities to departments and answers authorization
/// questions against catalog entries.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    map: HashMap<UserId, Department>,
}

impl AccessResolver {
    pub fn new(map: HashMap<UserId, Department>) -> Self {
        Self { map }
    }

    /// Builds the resolver from `access.operators` entries
    /// (`"<user id>:<department>"`). Malformed entries are a configuration
    /// error; config validation normally rejects them earlier.
    pub fn from_config(access: &AccessConfig) -> Result<Self, RowboatError> {
        let mut map = HashMap::with_capacity(access.operators.len());
        for entry in &access.operators {
            let (id, dept) = entry.split_once(':').ok_or_else(|| {
                RowboatError::Config(format!("malformed operator entry `{entry}`"))
            })?;
            let uid: i64 = id.trim().parse().map_err(|_| {
                RowboatError::Config(format!("operator entry `{entry}`: non-numeric user id"))
            })?;
            map.insert(UserId(uid), Department::new(dept));
        }
        Ok(Self::new(map))
    }

    /// The caller's department, if the identity is in the access map.
    pub fn department_of(&self, user: UserId) -> Option<&Department> {
        self.map.get(&user)
    }

    /// True iff the identity is present in the access map.
    pub fn is_authorized(&self, user: UserId) -> bool {
        self.map.contains_key(&user)
    }

    /// True iff the caller is admin, the service declares no department, or
    /// the departments match. Unauthorized callers always fail.
    pub fn can_access_service(&self, user: UserId, service: &ServiceDef) -> bool {
        match self.department_of(user) {
            Some(dept) if dept.is_admin() => true,
            Some(dept) => service
                .department
                .as_ref()
                .is_none_or(|required| required == dept),
            None => false,
        }
    }

    /// True iff the caller is admin or matches the query's required department.
    pub fn can_run_query(&self, user: UserId, query: &QueryDef) -> bool {
        match self.department_of(user) {
            Some(dept) => dept.is_admin() || *dept == query.department,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AccessResolver {
        AccessResolver::from_config(&AccessConfig {
            operators: vec![
                "111111111:admin".into(),
                "123456789:Marketing".into(),
                "987654321:analytics".into(),
            ],
        })
        .unwrap()
    }

    fn service(dept: Option<&str>) -> ServiceDef {
        ServiceDef {
            id: "s1".into(),
            name: "Service One".into(),
            department: dept.map(Department::new),
            queries: vec![],
        }
    }

    fn query(dept: &str) -> QueryDef {
        QueryDef {
            key: "q1".into(),
            name: "Query One".into(),
            statement: "SELECT 1;".into(),
            binding: "b1".into(),
            department: Department::new(dept),
        }
    }

    #[test]
    fn absent_identity_is_unauthorized_everywhere() {
        let resolver = resolver();
        let stranger = UserId(5);
        assert!(!resolver.is_authorized(stranger));
        assert!(resolver.department_of(stranger).is_none());
        assert!(!resolver.can_access_service(stranger, &service(None)));
        assert!(!resolver.can_run_query(stranger, &query("marketing")));
    }

    #[test]
    fn admin_passes_every_check() {
        let resolver = resolver();
        let admin = UserId(111_111_111);
        assert!(resolver.can_access_service(admin, &service(Some("marketing"))));
        assert!(resolver.can_access_service(admin, &service(Some("analytics"))));
        assert!(resolver.can_run_query(admin, &query("marketing")));
        assert!(resolver.can_run_query(admin, &query("analytics")));
    }

    #[test]
    fn department_must_match() {
        let resolver = resolver();
        let marketer = UserId(123_456_789);
        assert!(resolver.can_access_service(marketer, &service(Some("marketing"))));
        assert!(!resolver.can_access_service(marketer, &service(Some("analytics"))));
        assert!(resolver.can_run_query(marketer, &query("marketing")));
        assert!(!resolver.can_run_query(marketer, &query("analytics")));
    }

    #[test]
    fn undeclared_service_department_is_open_to_authorized() {
        let resolver = resolver();
        assert!(resolver.can_access_service(UserId(123_456_789), &service(None)));
        assert!(resolver.can_access_service(UserId(987_654_321), &service(None)));
    }

    #[test]
    fn departments_are_normalized() {
        // "Marketing" in config matches a lowercase catalog department.
        let resolver = resolver();
        assert_eq!(
            resolver.department_of(UserId(123_456_789)).unwrap().as_str(),
            "marketing"
        );
    }

    #[test]
    fn malformed_entry_is_a_config_error() {
        let result = AccessResolver::from_config(&AccessConfig {
            operators: vec!["oops".into()],
        });
        assert!(matches!(result, Err(RowboatError::Config(_))));
    }
}
