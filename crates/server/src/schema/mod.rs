//! GraphQL schema wiring.
//!
//! Services are registered as schema data once at startup; the caller
//! identity is attached per request as [`AuthSession`] so resolvers can
//! enforce ownership without reaching into transport state.

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use crate::auth::{AuthService, Identity};
use crate::error::{ApiError, ApiResult};
use crate::services::{CatalogService, ClientRegistry, OrderService};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Per-request caller identity, decoded from the `Authorization` header
/// before execution. `None` means the request carried no valid token.
pub struct AuthSession(pub Option<Identity>);

impl AuthSession {
    /// The verified caller, or UNAUTHORIZED for anonymous requests.
    pub fn require(&self) -> ApiResult<&Identity> {
        self.0
            .as_ref()
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_owned()))
    }
}

/// Build the executable schema with all services attached.
pub fn build_schema(
    auth: AuthService,
    catalog: CatalogService,
    clients: ClientRegistry,
    orders: OrderService,
) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(catalog)
        .data(clients)
        .data(orders)
        .finish()
}
