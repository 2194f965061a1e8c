//! Kopi
//!
//! Kopi is the domain core of a cafeteria point-of-sale client: the shopping
//! cart state machine, the permission-gated navigation resolver, and the
//! session lifecycle machine. Every state transition is a synchronous reducer
//! over plain data; network and persistence plumbing live in `kopi-app`.

pub mod access;
pub mod cart;
pub mod payment;
pub mod prelude;
pub mod products;
pub mod session;
