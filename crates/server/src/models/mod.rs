//! Domain models for the four record collections.
//!
//! These are the documents as the persistence gateway stores them. The
//! GraphQL layer exposes separate output types (see `schema::types`) so the
//! password hash never crosses the API boundary.

pub mod client;
pub mod order;
pub mod product;
pub mod user;

pub use client::Client;
pub use order::{Order, OrderLine};
pub use product::Product;
pub use user::User;
