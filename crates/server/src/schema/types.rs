//! GraphQL object and input types, plus conversions from the domain models.
//!
//! The API surface keeps its own types so internals never leak: `User`
//! omits the password hash, and ids cross the wire as opaque `ID` scalars
//! that get parsed back into typed ids at the boundary.

use std::str::FromStr;

use async_graphql::{Enum, ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};
use crate::models;
use crate::services::catalog;
use crate::services::clients;
use crate::services::orders;

/// Parse a wire `ID` into a typed entity id.
pub(crate) fn parse_id<T: FromStr>(id: &ID, what: &str) -> ApiResult<T> {
    id.as_str()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("malformed {what} id")))
}

/// Order lifecycle status.
#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "vendstock_core::OrderStatus")]
pub enum OrderStatus {
    Pending,
    Canceled,
    Completed,
}

/// A registered vendor. The password hash never appears here.
#[derive(SimpleObject)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id.to_string().into(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.into_inner(),
            created_at: user.created_at,
        }
    }
}

/// The identity a session token resolves to.
#[derive(SimpleObject)]
pub struct IdentityPayload {
    pub id: ID,
}

/// A freshly issued session token.
#[derive(SimpleObject)]
pub struct Token {
    pub token: String,
}

/// A catalog product.
#[derive(SimpleObject)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<models::Product> for Product {
    fn from(product: models::Product) -> Self {
        Self {
            id: product.id.to_string().into(),
            name: product.name,
            stock: product.stock,
            price: product.price,
            created_at: product.created_at,
        }
    }
}

/// A client scoped to its owning vendor.
#[derive(SimpleObject)]
pub struct Client {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub vendor: ID,
    pub created_at: DateTime<Utc>,
}

impl From<models::Client> for Client {
    fn from(client: models::Client) -> Self {
        Self {
            id: client.id.to_string().into(),
            first_name: client.first_name,
            last_name: client.last_name,
            company: client.company,
            email: client.email.into_inner(),
            phone: client.phone,
            vendor: client.vendor.to_string().into(),
            created_at: client.created_at,
        }
    }
}

/// One reserved line of an order.
#[derive(SimpleObject)]
pub struct OrderLine {
    pub product_id: ID,
    pub quantity: u32,
}

/// An order with its reserved lines.
#[derive(SimpleObject)]
pub struct Order {
    pub id: ID,
    pub details: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub client: ID,
    pub vendor: ID,
    pub created_at: DateTime<Utc>,
}

impl From<models::Order> for Order {
    fn from(order: models::Order) -> Self {
        Self {
            id: order.id.to_string().into(),
            details: order
                .details
                .into_iter()
                .map(|line| OrderLine {
                    product_id: line.product_id.to_string().into(),
                    quantity: line.quantity,
                })
                .collect(),
            total: order.total,
            status: order.status.into(),
            client: order.client.to_string().into(),
            vendor: order.vendor.to_string().into(),
            created_at: order.created_at,
        }
    }
}

/// Registration input.
#[derive(InputObject)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login input.
#[derive(InputObject)]
pub struct AuthInput {
    pub email: String,
    pub password: String,
}

/// Total product input; updates replace every field.
#[derive(InputObject)]
pub struct ProductInput {
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
}

impl From<ProductInput> for catalog::ProductInput {
    fn from(input: ProductInput) -> Self {
        Self {
            name: input.name,
            stock: input.stock,
            price: input.price,
        }
    }
}

/// Total client input; updates replace every field.
#[derive(InputObject)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<ClientInput> for clients::ClientInput {
    fn from(input: ClientInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            company: input.company,
            email: input.email,
            phone: input.phone,
        }
    }
}

/// One requested order line.
#[derive(InputObject)]
pub struct OrderLineInput {
    pub product_id: ID,
    pub quantity: u32,
}

/// Order creation input. Status defaults to PENDING when omitted.
#[derive(InputObject)]
pub struct OrderInput {
    pub details: Vec<OrderLineInput>,
    pub total: Decimal,
    pub client: ID,
    pub status: Option<OrderStatus>,
}

impl OrderInput {
    /// Convert to the service input, parsing all wire ids.
    pub(crate) fn into_service(self) -> ApiResult<orders::OrderInput> {
        let details = self
            .details
            .iter()
            .map(|line| {
                Ok(orders::OrderLineInput {
                    product_id: parse_id(&line.product_id, "product")?,
                    quantity: line.quantity,
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(orders::OrderInput {
            details,
            total: self.total,
            client: parse_id(&self.client, "client")?,
            status: self.status.map(Into::into),
        })
    }
}
