//! Authentication: wire models, the auth service, and the durable session
//! store.

mod models;
mod service;
mod store;

pub use models::{LoginRequest, LoginResponse, SetupAdminRequest, SetupStatus};
pub use service::{AuthService, HttpAuthService, MockAuthService};
pub use store::{SessionStore, SessionStoreError, StoredSession};
