//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    users::models::{NewUser, UserPatch, UserRecord},
};

/// HTTP implementation of [`UsersService`].
#[derive(Debug, Clone)]
pub struct HttpUsersService {
    api: ApiClient,
}

impl HttpUsersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.api.get("/admin/users").await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ApiError> {
        self.api.post("/admin/users", user).await
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<UserRecord, ApiError> {
        self.api.patch(&format!("/admin/users/{id}"), patch).await
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/admin/users/{id}")).await
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve all user accounts.
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// Create a user account.
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ApiError>;

    /// Apply a partial update to a user account.
    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<UserRecord, ApiError>;

    /// Delete a user account.
    async fn delete_user(&self, id: i64) -> Result<(), ApiError>;
}
