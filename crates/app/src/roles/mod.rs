//! Role and permission administration.

mod models;
mod service;

pub use models::{NewRole, PermissionRecord, RolePatch, RoleRecord};
pub use service::{HttpRolesService, MockRolesService, RolesService};
