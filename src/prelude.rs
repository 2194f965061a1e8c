//! Kopi prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::{
        LOGIN_PATH, NavigationRoute, Outcome, Principal, ROUTES, SETUP_PATH, SUPER_ROLE,
        first_available_route, guard, visible_routes,
    },
    cart::{Cart, CartError, CartLine, SaleRequest, SaleRequestItem},
    payment::{PaymentMethod, UnknownPaymentMethod},
    products::{ProductId, ProductSnapshot},
    session::{RouteDecision, SessionMachine, SessionState},
};
