//! Client plumbing for the kopi point-of-sale: typed HTTP API access,
//! durable session storage, and the controllers that drive the domain core.

pub mod api;
pub mod auth;
pub mod context;
pub mod fetch;
pub mod products;
pub mod register;
pub mod reports;
pub mod roles;
pub mod sales;
pub mod session;
pub mod users;
pub mod validate;
