//! Order workflow: validation and stock reservation.
//!
//! Creation sequence: resolve the client, check ownership, then walk the
//! order lines in input order reserving stock, then persist the order.
//!
//! Stock decrements are committed per line as soon as the line validates.
//! In the default mode there is no all-or-nothing reservation: when a later
//! line fails with insufficient stock, earlier lines keep their decrements
//! and the order itself is never persisted. This mirrors the documented
//! behavior of the system this replaces. `atomic_reservation` opts into a
//! corrected mode that validates every line before the first decrement.
//!
//! There is still no concurrency control in either mode: two simultaneous
//! orders can both observe sufficient stock for the same product and both
//! decrement (see the concurrency notes in the crate docs).

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use vendstock_core::{ClientId, OrderId, OrderStatus, ProductId};

use super::guard;
use crate::auth::Identity;
use crate::error::{ApiError, ApiResult};
use crate::models::{Order, OrderLine};
use crate::store::Store;

/// One requested order line.
#[derive(Debug, Clone, Copy)]
pub struct OrderLineInput {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Order creation input.
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub details: Vec<OrderLineInput>,
    pub total: Decimal,
    pub client: ClientId,
    pub status: Option<OrderStatus>,
}

/// Order workflow service.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn Store>,
    atomic_reservation: bool,
}

impl OrderService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, atomic_reservation: bool) -> Self {
        Self {
            store,
            atomic_reservation,
        }
    }

    /// Place an order for one of the caller's clients.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` if the client or a referenced product is absent,
    /// `ApiError::Unauthorized` if the client belongs to another vendor,
    /// `ApiError::InsufficientStock` naming the product when a line asks for
    /// more units than available.
    pub async fn create(&self, identity: &Identity, input: OrderInput) -> ApiResult<Order> {
        let client = self
            .store
            .find_client(input.client)
            .await?
            .ok_or_else(|| ApiError::NotFound("client".to_owned()))?;

        guard::authorize_owner(identity, client.vendor, "client")?;

        if self.atomic_reservation {
            // Corrected mode: nothing is decremented until every line checks out.
            for line in &input.details {
                let product = self.fetch_product(line.product_id).await?;
                if line.quantity > product.stock {
                    return Err(ApiError::InsufficientStock {
                        product: product.name,
                    });
                }
            }
        }

        for line in &input.details {
            let mut product = self.fetch_product(line.product_id).await?;

            if line.quantity > product.stock {
                // Earlier lines stay decremented; no rollback.
                return Err(ApiError::InsufficientStock {
                    product: product.name,
                });
            }

            product.stock -= line.quantity;
            // Persisted immediately, not batched with the other lines.
            self.store.save_product(product).await?;
        }

        let order = Order {
            id: OrderId::generate(),
            details: input
                .details
                .iter()
                .map(|line| OrderLine {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            total: input.total,
            status: input.status.unwrap_or_default(),
            client: client.id,
            vendor: identity.user_id,
            created_at: Utc::now(),
        };

        Ok(self.store.insert_order(order).await?)
    }

    /// Fetch an order; only its owning vendor may see it.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` if absent, `ApiError::Unauthorized` if the
    /// caller is not the owner.
    pub async fn get(&self, identity: &Identity, id: OrderId) -> ApiResult<Order> {
        let order = self
            .store
            .find_order(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("order".to_owned()))?;

        guard::authorize_owner(identity, order.vendor, "order")?;
        Ok(order)
    }

    /// Administrative listing across all vendors; no auth filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` on a store fault.
    pub async fn list_all(&self) -> ApiResult<Vec<Order>> {
        Ok(self.store.list_orders().await?)
    }

    /// List the calling vendor's own orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` on a store fault.
    pub async fn list_for_vendor(&self, identity: &Identity) -> ApiResult<Vec<Order>> {
        Ok(self.store.list_orders_for_vendor(identity.user_id).await?)
    }

    async fn fetch_product(&self, id: ProductId) -> ApiResult<crate::models::Product> {
        self.store
            .find_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }
}
