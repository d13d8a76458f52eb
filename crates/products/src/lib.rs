//! Products domain module.
//!
//! Only the slice of the catalog the order form needs: identity, compact display
//! fields and the per-product quantity update policy.

pub mod product;

pub use product::{Product, ProductId, ProductRef, UpdateType};
