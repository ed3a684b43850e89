//! Mutation resolvers.
//!
//! Authorization happens inside each resolver (never at the transport
//! layer): operations that need a caller identity pull it from the
//! request's [`AuthSession`] and fail with UNAUTHORIZED when absent.

use async_graphql::{Context, ID, Object, Result as GqlResult};

use crate::auth::{AuthService, NewUser};
use crate::services::{CatalogService, ClientRegistry, OrderService};

use super::AuthSession;
use super::types::{
    AuthInput, Client, ClientInput, Order, OrderInput, Product, ProductInput, Token, User,
    UserInput, parse_id,
};

/// Root mutation object.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new vendor account.
    async fn create_user(&self, ctx: &Context<'_>, input: UserInput) -> GqlResult<User> {
        let auth = ctx.data::<AuthService>()?;
        let user = auth
            .register(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: input.password,
            })
            .await?;
        Ok(user.into())
    }

    /// Log in; returns a 24h session token.
    async fn authenticate_user(&self, ctx: &Context<'_>, input: AuthInput) -> GqlResult<Token> {
        let auth = ctx.data::<AuthService>()?;
        let token = auth.authenticate(&input.email, &input.password).await?;
        Ok(Token { token })
    }

    /// Add a product to the shared catalog.
    async fn create_product(&self, ctx: &Context<'_>, input: ProductInput) -> GqlResult<Product> {
        ctx.data::<AuthSession>()?.require()?;
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.create(input.into()).await?.into())
    }

    /// Replace all fields of a product.
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ProductInput,
    ) -> GqlResult<Product> {
        ctx.data::<AuthSession>()?.require()?;
        let catalog = ctx.data::<CatalogService>()?;
        let product = catalog
            .update(parse_id(&id, "product")?, input.into())
            .await?;
        Ok(product.into())
    }

    /// Remove a product from the catalog.
    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> GqlResult<String> {
        ctx.data::<AuthSession>()?.require()?;
        let catalog = ctx.data::<CatalogService>()?;
        catalog.delete(parse_id(&id, "product")?).await?;
        Ok("product deleted".to_owned())
    }

    /// Register a client owned by the calling vendor.
    async fn create_client(&self, ctx: &Context<'_>, input: ClientInput) -> GqlResult<Client> {
        let registry = ctx.data::<ClientRegistry>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        Ok(registry.create(identity, input.into()).await?.into())
    }

    /// Replace all fields of a client the caller owns.
    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ClientInput,
    ) -> GqlResult<Client> {
        let registry = ctx.data::<ClientRegistry>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        let client = registry
            .update(identity, parse_id(&id, "client")?, input.into())
            .await?;
        Ok(client.into())
    }

    /// Delete a client the caller owns.
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> GqlResult<String> {
        let registry = ctx.data::<ClientRegistry>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        registry.delete(identity, parse_id(&id, "client")?).await?;
        Ok("client deleted".to_owned())
    }

    /// Place an order for one of the caller's clients, reserving stock.
    async fn create_order(&self, ctx: &Context<'_>, input: OrderInput) -> GqlResult<Order> {
        let orders = ctx.data::<OrderService>()?;
        let identity = ctx.data::<AuthSession>()?.require()?;
        let order = orders.create(identity, input.into_service()?).await?;
        Ok(order.into())
    }
}
