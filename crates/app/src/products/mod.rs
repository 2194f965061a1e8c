//! Product catalog access.

mod models;
mod service;

pub use models::{NewProduct, ProductPatch, ProductRecord};
pub use service::{HttpProductsService, MockProductsService, ProductsService};
