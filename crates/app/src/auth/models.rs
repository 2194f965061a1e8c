//! Auth wire models.

use kopi::access::Principal;
use serde::{Deserialize, Serialize};

use crate::roles::RoleRecord;

/// Response of the setup-status probe.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    /// Whether an administrator account exists.
    pub is_configured: bool,
}

/// One-time administrator bootstrap payload.
#[derive(Debug, Clone, Serialize)]
pub struct SetupAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the bearer token plus a principal snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: RoleRecord,

    /// Flat permission slugs granted to the principal.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl LoginResponse {
    /// Build the resolver's principal from this response.
    ///
    /// The role collapses to its name; permissions stay flat slugs, which is
    /// the shape the route guard consumes.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.name.clone(),
            permissions: self.permissions.iter().cloned().collect(),
        }
    }
}
