//! Aggregation of role grants into the identity carried by tokens.

use std::collections::HashSet;

use roomhub_entity::access::{Permission, RoleWithPermissions};

/// Flatten a user's roles into role names and a de-duplicated permission
/// list. Permissions keep first-seen order and are unique by id.
pub fn aggregate(grants: &[RoleWithPermissions]) -> (Vec<String>, Vec<Permission>) {
    let roles = grants.iter().map(|g| g.role.name.clone()).collect();

    let mut seen = HashSet::new();
    let permissions = grants
        .iter()
        .flat_map(|g| g.permissions.iter())
        .filter(|p| seen.insert(p.id))
        .cloned()
        .collect();

    (roles, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomhub_entity::access::Role;

    fn permission(id: i64, code: &str) -> Permission {
        Permission {
            id,
            code: code.to_string(),
            description: format!("{code} access"),
        }
    }

    #[test]
    fn test_aggregate_dedups_by_id_keeping_first_seen() {
        let grants = vec![
            RoleWithPermissions {
                role: Role { id: 1, name: "admin".into() },
                permissions: vec![permission(10, "ccc"), permission(11, "ddd")],
            },
            RoleWithPermissions {
                role: Role { id: 2, name: "member".into() },
                permissions: vec![permission(11, "ddd"), permission(12, "eee")],
            },
        ];

        let (roles, permissions) = aggregate(&grants);
        assert_eq!(roles, vec!["admin", "member"]);
        let codes: Vec<_> = permissions.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["ccc", "ddd", "eee"]);
    }

    #[test]
    fn test_aggregate_empty() {
        let (roles, permissions) = aggregate(&[]);
        assert!(roles.is_empty());
        assert!(permissions.is_empty());
    }
}
