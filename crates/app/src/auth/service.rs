//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    auth::models::{LoginRequest, LoginResponse, SetupAdminRequest, SetupStatus},
};

/// HTTP implementation of [`AuthService`].
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn setup_status(&self) -> Result<SetupStatus, ApiError> {
        self.api.get("/auth/setup-status").await
    }

    async fn setup_admin(&self, request: &SetupAdminRequest) -> Result<(), ApiError> {
        self.api.post_unit("/auth/setup-admin", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.api.post("/auth/login", request).await
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Whether an administrator account exists yet.
    async fn setup_status(&self) -> Result<SetupStatus, ApiError>;

    /// One-time administrator bootstrap. Non-idempotent.
    async fn setup_admin(&self, request: &SetupAdminRequest) -> Result<(), ApiError>;

    /// Exchange credentials for a bearer token and principal snapshot.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
}
