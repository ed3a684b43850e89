//! Query resolvers.

use async_graphql::{Context, ID, Object, Result as GqlResult};

use crate::auth::AuthService;
use crate::services::{CatalogService, ClientRegistry, OrderService};

use super::AuthSession;
use super::types::{Client, IdentityPayload, Order, Product, parse_id};

/// Root query object.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Resolve a session token to the identity it was signed for.
    async fn get_user(&self, ctx: &Context<'_>, token: String) -> GqlResult<IdentityPayload> {
        let auth = ctx.data::<AuthService>()?;
        let identity = auth.verify(&token)?;
        Ok(IdentityPayload {
            id: identity.user_id.to_string().into(),
        })
    }

    /// Fetch a product by id. No auth required.
    async fn get_product(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Product> {
        let catalog = ctx.data::<CatalogService>()?;
        let product = catalog.get(parse_id(&id, "product")?).await?;
        Ok(product.into())
    }

    /// List the whole catalog. No auth required.
    async fn get_products(&self, ctx: &Context<'_>) -> GqlResult<Vec<Product>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.list().await?.into_iter().map(Into::into).collect())
    }

    /// Fetch one of the caller's clients.
    async fn get_client(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Client> {
        let registry = ctx.data::<ClientRegistry>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        let client = registry.get(identity, parse_id(&id, "client")?).await?;
        Ok(client.into())
    }

    /// Administrative listing of every client, across vendors.
    async fn get_clients(&self, ctx: &Context<'_>) -> GqlResult<Vec<Client>> {
        let registry = ctx.data::<ClientRegistry>()?;
        Ok(registry
            .list_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// List the calling vendor's clients.
    async fn get_clients_vendor(&self, ctx: &Context<'_>) -> GqlResult<Vec<Client>> {
        let registry = ctx.data::<ClientRegistry>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        Ok(registry
            .list_for_vendor(identity)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Fetch one of the caller's orders.
    async fn get_order(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Order> {
        let orders = ctx.data::<OrderService>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        let order = orders.get(identity, parse_id(&id, "order")?).await?;
        Ok(order.into())
    }

    /// Administrative listing of every order, across vendors.
    async fn get_orders(&self, ctx: &Context<'_>) -> GqlResult<Vec<Order>> {
        let orders = ctx.data::<OrderService>()?;
        Ok(orders
            .list_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// List the calling vendor's orders.
    async fn get_orders_vendor(&self, ctx: &Context<'_>) -> GqlResult<Vec<Order>> {
        let orders = ctx.data::<OrderService>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        Ok(orders
            .list_for_vendor(identity)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
