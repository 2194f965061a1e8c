//! Roles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    roles::models::{NewRole, PermissionRecord, RolePatch, RoleRecord},
};

/// HTTP implementation of [`RolesService`].
#[derive(Debug, Clone)]
pub struct HttpRolesService {
    api: ApiClient,
}

impl HttpRolesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RolesService for HttpRolesService {
    async fn list_roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.api.get("/admin/roles").await
    }

    async fn create_role(&self, role: &NewRole) -> Result<RoleRecord, ApiError> {
        self.api.post("/admin/roles", role).await
    }

    async fn update_role(&self, id: i64, patch: &RolePatch) -> Result<RoleRecord, ApiError> {
        self.api.patch(&format!("/admin/roles/{id}"), patch).await
    }

    async fn delete_role(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/admin/roles/{id}")).await
    }

    async fn list_permissions(&self) -> Result<Vec<PermissionRecord>, ApiError> {
        self.api.get("/admin/permissions").await
    }
}

#[automock]
#[async_trait]
pub trait RolesService: Send + Sync {
    /// Retrieve all roles with their permissions.
    async fn list_roles(&self) -> Result<Vec<RoleRecord>, ApiError>;

    /// Create a role.
    async fn create_role(&self, role: &NewRole) -> Result<RoleRecord, ApiError>;

    /// Apply a partial update to a role.
    async fn update_role(&self, id: i64, patch: &RolePatch) -> Result<RoleRecord, ApiError>;

    /// Delete a role.
    async fn delete_role(&self, id: i64) -> Result<(), ApiError>;

    /// Retrieve the catalogue of grantable permissions.
    async fn list_permissions(&self) -> Result<Vec<PermissionRecord>, ApiError>;
}
