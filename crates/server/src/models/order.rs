//! Order record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendstock_core::{ClientId, OrderId, OrderStatus, ProductId, UserId};

/// One line of an order: a product and the quantity reserved from its stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// An order placed by a vendor on behalf of one of their clients.
///
/// Invariant: `vendor` equals the vendor of the referenced client at
/// creation time. Status defaults to `Pending` and is otherwise
/// caller-supplied; no workflow transitions it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub details: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub client: ClientId,
    pub vendor: UserId,
    pub created_at: DateTime<Utc>,
}
