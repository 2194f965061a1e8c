//! App Context

use std::{path::PathBuf, sync::Arc};

use crate::{
    api::{ApiClient, ApiConfig},
    auth::{AuthService, HttpAuthService, SessionStore},
    products::{HttpProductsService, ProductsService},
    reports::{HttpReportsService, ReportsService},
    roles::{HttpRolesService, RolesService},
    sales::{HttpSalesService, SalesService},
    session::SessionController,
    users::{HttpUsersService, UsersService},
};

/// Application configuration, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL.
    pub api_url: String,

    /// Where the authenticated session is persisted.
    pub session_file: PathBuf,
}

/// Shared service handles over one API client.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub sales: Arc<dyn SalesService>,
    pub reports: Arc<dyn ReportsService>,
    pub users: Arc<dyn UsersService>,
    pub roles: Arc<dyn RolesService>,
    session_file: PathBuf,
}

impl AppContext {
    /// Build the context from configuration.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let api = ApiClient::new(ApiConfig {
            base_url: config.api_url.clone(),
        });

        Self {
            auth: Arc::new(HttpAuthService::new(api.clone())),
            products: Arc::new(HttpProductsService::new(api.clone())),
            sales: Arc::new(HttpSalesService::new(api.clone())),
            reports: Arc::new(HttpReportsService::new(api.clone())),
            users: Arc::new(HttpUsersService::new(api.clone())),
            roles: Arc::new(HttpRolesService::new(api.clone())),
            api,
            session_file: config.session_file.clone(),
        }
    }

    /// Build the session controller for this context.
    #[must_use]
    pub fn session(&self) -> SessionController {
        SessionController::new(
            self.api.clone(),
            Arc::clone(&self.auth),
            SessionStore::new(self.session_file.clone()),
        )
    }
}
