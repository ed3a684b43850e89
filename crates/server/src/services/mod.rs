//! Business-rule services sitting between the GraphQL surface and the store.

pub mod catalog;
pub mod clients;
pub mod guard;
pub mod orders;

pub use catalog::CatalogService;
pub use clients::ClientRegistry;
pub use orders::OrderService;
