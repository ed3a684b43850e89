//! In-memory document store.
//!
//! Backs the server in development and tests. Collections are concurrent
//! maps keyed by the document's UUID; reads clone the document, matching
//! the by-value semantics a remote document store would have.

use dashmap::DashMap;
use uuid::Uuid;

use async_trait::async_trait;

use vendstock_core::{ClientId, OrderId, ProductId, UserId};

use super::{Store, StoreError};
use crate::models::{Client, Order, Product, User};

/// In-memory implementation of the persistence gateway.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    products: DashMap<Uuid, Product>,
    clients: DashMap<Uuid, Client>,
    orders: DashMap<Uuid, Order>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id.as_uuid()).map(|e| e.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().email.as_str() == email)
            .map(|e| e.value().clone()))
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        self.users.insert(user.id.as_uuid(), user.clone());
        Ok(user)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.get(&id.as_uuid()).map(|e| e.value().clone()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> =
            self.products.iter().map(|e| e.value().clone()).collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        self.products.insert(product.id.as_uuid(), product.clone());
        Ok(product)
    }

    async fn save_product(&self, product: Product) -> Result<Product, StoreError> {
        self.products.insert(product.id.as_uuid(), product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.products.remove(&id.as_uuid()).is_some())
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        Ok(self.clients.get(&id.as_uuid()).map(|e| e.value().clone()))
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, StoreError> {
        Ok(self
            .clients
            .iter()
            .find(|e| e.value().email.as_str() == email)
            .map(|e| e.value().clone()))
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let mut clients: Vec<Client> = self.clients.iter().map(|e| e.value().clone()).collect();
        clients.sort_by_key(|c| c.created_at);
        Ok(clients)
    }

    async fn list_clients_for_vendor(&self, vendor: UserId) -> Result<Vec<Client>, StoreError> {
        let mut clients: Vec<Client> = self
            .clients
            .iter()
            .filter(|e| e.value().vendor == vendor)
            .map(|e| e.value().clone())
            .collect();
        clients.sort_by_key(|c| c.created_at);
        Ok(clients)
    }

    async fn insert_client(&self, client: Client) -> Result<Client, StoreError> {
        self.clients.insert(client.id.as_uuid(), client.clone());
        Ok(client)
    }

    async fn save_client(&self, client: Client) -> Result<Client, StoreError> {
        self.clients.insert(client.id.as_uuid(), client.clone());
        Ok(client)
    }

    async fn delete_client(&self, id: ClientId) -> Result<bool, StoreError> {
        Ok(self.clients.remove(&id.as_uuid()).is_some())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&id.as_uuid()).map(|e| e.value().clone()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.orders.iter().map(|e| e.value().clone()).collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn list_orders_for_vendor(&self, vendor: UserId) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|e| e.value().vendor == vendor)
            .map(|e| e.value().clone())
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn insert_order(&self, order: Order) -> Result<Order, StoreError> {
        self.orders.insert(order.id.as_uuid(), order.clone());
        Ok(order)
    }
}
