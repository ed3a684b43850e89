//! Persistence gateway for the four record collections.
//!
//! The document-storage engine is an external collaborator; this module
//! defines the port the rest of the server talks through. Operations are
//! generic find/save/update/delete per collection, plus the vendor-scoped
//! finders the services need. [`MemoryStore`] is the in-tree implementation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use vendstock_core::{ClientId, OrderId, ProductId, UserId};

use crate::models::{Client, Order, Product, User};

/// Errors surfaced by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed to execute the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Gateway to the document store.
///
/// One method per find/save/update/delete the services perform. Every call
/// is a single round trip; there are no multi-document transactions, which
/// is what makes the order workflow's per-line reservation non-atomic.
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    // Products

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn insert_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Full-document replace keyed by `product.id`.
    async fn save_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Returns `true` if a document was removed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError>;

    // Clients

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, StoreError>;

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, StoreError>;

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    async fn list_clients_for_vendor(&self, vendor: UserId) -> Result<Vec<Client>, StoreError>;

    async fn insert_client(&self, client: Client) -> Result<Client, StoreError>;

    /// Full-document replace keyed by `client.id`.
    async fn save_client(&self, client: Client) -> Result<Client, StoreError>;

    /// Returns `true` if a document was removed.
    async fn delete_client(&self, id: ClientId) -> Result<bool, StoreError>;

    // Orders

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn list_orders_for_vendor(&self, vendor: UserId) -> Result<Vec<Order>, StoreError>;

    async fn insert_order(&self, order: Order) -> Result<Order, StoreError>;
}
