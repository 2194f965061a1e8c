//! Role and permission wire models.

use serde::{Deserialize, Serialize};

/// A grantable capability.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionRecord {
    pub id: i64,

    /// Slug checked by the access resolver, e.g. `"users:read"`.
    pub slug: String,
}

/// A role with its granted permissions.
///
/// Some endpoints return roles without the nested permission objects; those
/// deserialize with an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

impl RoleRecord {
    /// Permission slugs of this role, in wire order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.permissions
            .iter()
            .map(|permission| permission.slug.as_str())
            .collect()
    }
}

/// Role creation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRole {
    pub name: String,

    /// Ids of the permissions to grant.
    pub permission_ids: Vec<i64>,
}

/// Role partial-update payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_ids: Option<Vec<i64>>,
}
