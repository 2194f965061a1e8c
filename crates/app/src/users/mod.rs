//! User administration.

mod models;
mod service;

pub use models::{NewUser, UserPatch, UserRecord};
pub use service::{HttpUsersService, MockUsersService, UsersService};
