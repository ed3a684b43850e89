//! Catalog manager: CRUD over the shared product catalog.
//!
//! Products carry no ownership scoping - any authenticated vendor may
//! mutate any product. There is no uniqueness constraint on names.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use vendstock_core::ProductId;

use crate::error::{ApiError, ApiResult};
use crate::models::Product;
use crate::store::Store;

/// Total (not partial) product input; updates replace every field.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
}

/// Catalog manager.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if the price is negative.
    pub async fn create(&self, input: ProductInput) -> ApiResult<Product> {
        validate_price(input.price)?;

        let product = Product {
            id: ProductId::generate(),
            name: input.name,
            stock: input.stock,
            price: input.price,
            created_at: Utc::now(),
        };

        Ok(self.store.insert_product(product).await?)
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no such product exists.
    pub async fn get(&self, id: ProductId) -> ApiResult<Product> {
        self.store
            .find_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("product".to_owned()))
    }

    /// List every product. Order unspecified.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` on a store fault.
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    /// Replace all fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if absent, `ApiError::BadRequest` for a
    /// negative price.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> ApiResult<Product> {
        validate_price(input.price)?;

        let existing = self.get(id).await?;
        let product = Product {
            id: existing.id,
            name: input.name,
            stock: input.stock,
            price: input.price,
            created_at: existing.created_at,
        };

        Ok(self.store.save_product(product).await?)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if absent.
    pub async fn delete(&self, id: ProductId) -> ApiResult<()> {
        if self.store.delete_product(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound("product".to_owned()))
        }
    }
}

fn validate_price(price: Decimal) -> ApiResult<()> {
    if price < Decimal::ZERO {
        return Err(ApiError::BadRequest("price must be non-negative".to_owned()));
    }
    Ok(())
}
