//! Session controller.
//!
//! Owns the session state machine, the durable store, and the auth service,
//! and keeps the three consistent: what the machine believes, what the store
//! holds, and which bearer token the API client sends.

use std::sync::Arc;

use kopi::{
    access::Principal,
    session::{SessionMachine, SessionState},
};
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError},
    auth::{
        AuthService, LoginRequest, SessionStore, SessionStoreError, SetupAdminRequest,
        StoredSession,
    },
    validate::{self, ValidationErrors},
};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A form field failed local validation; nothing was sent to the server.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session file could not be written or removed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Drives the session lifecycle.
pub struct SessionController {
    api: ApiClient,
    auth: Arc<dyn AuthService>,
    store: SessionStore,
    machine: SessionMachine,
}

impl SessionController {
    /// Create a controller in the initial `CheckingSetup` state.
    #[must_use]
    pub fn new(api: ApiClient, auth: Arc<dyn AuthService>, store: SessionStore) -> Self {
        Self {
            api,
            auth,
            store,
            machine: SessionMachine::new(),
        }
    }

    /// The underlying state machine.
    #[must_use]
    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    /// The logged-in principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.machine.principal()
    }

    /// Run the one-time startup sequence: probe setup status and restore a
    /// stored session.
    ///
    /// A failed probe counts as unconfigured, and an unreadable store as no
    /// session; both degrade with a diagnostic instead of failing startup.
    pub async fn start(&mut self) {
        let is_configured = match self.auth.setup_status().await {
            Ok(status) => status.is_configured,
            Err(error) => {
                tracing::warn!(%error, "setup-status probe failed, assuming unconfigured");
                false
            }
        };

        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(%error, "could not read stored session");
                None
            }
        };

        let principal = stored.map(|session| {
            self.api.set_bearer(Some(session.access_token));
            session.principal
        });

        self.machine.setup_checked(is_configured, principal);
    }

    /// Create the one-time administrator account.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, or the API error.
    pub async fn setup_admin(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        validate::setup_admin(name, email, password)?;

        self.auth
            .setup_admin(&SetupAdminRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.machine.setup_completed();

        Ok(())
    }

    /// Log in and persist the session atomically.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, the API error, or
    /// a store error when the session file cannot be written. The machine
    /// only advances once the session is durably stored.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Principal, SessionError> {
        validate::login(email, password)?;

        let response = self
            .auth
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        let principal = response.principal();

        self.store.save(&StoredSession {
            access_token: response.access_token.clone(),
            principal: principal.clone(),
        })?;

        self.api.set_bearer(Some(response.access_token));
        self.machine.login_succeeded(principal);

        self.machine
            .principal()
            .ok_or(SessionError::Api(ApiError::Unauthorized))
    }

    /// Log out: remove the stored session and drop the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error when the session file cannot be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.api.set_bearer(None);
        self.machine.logged_out();

        Ok(())
    }

    /// Inspect a failed API call for the authentication-failure signal.
    ///
    /// A 401 means the server no longer honors the stored credential, so the
    /// session is dropped before the error is surfaced; any other failure
    /// leaves the session alone.
    pub fn observe_api_error(&mut self, error: &ApiError) {
        if error.is_auth_failure() {
            self.auth_failed();
        }
    }

    /// Handle the authentication-failure signal from the API: the server no
    /// longer honors the stored credential, so drop it everywhere.
    pub fn auth_failed(&mut self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "could not remove stored session");
        }

        self.api.set_bearer(None);
        self.machine.auth_failed();
    }

    /// Whether a principal is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.machine.state(), SessionState::Authenticated(_))
    }
}
