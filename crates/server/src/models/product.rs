//! Product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendstock_core::ProductId;

/// A catalog product.
///
/// Products are global: any authenticated vendor may mutate any product.
/// Stock stays non-negative after any committed operation, though the order
/// workflow's check-then-decrement is not atomic under concurrency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
