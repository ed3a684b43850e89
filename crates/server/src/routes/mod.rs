//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST /graphql   - GraphQL endpoint (single entry point for the API)
//! GET  /graphql   - GraphQL playground
//! GET  /health    - Health check
//! ```

use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
};

use crate::schema::AuthSession;
use crate::state::AppState;

/// Execute a GraphQL request.
///
/// The `Authorization` header is decoded here once; resolvers see only
/// the resulting [`AuthSession`]. An invalid or absent token yields an
/// anonymous session rather than an HTTP error, so public operations
/// keep working and protected ones fail with UNAUTHORIZED.
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let identity = match bearer_token(&headers) {
        Some(token) => state.auth().verify(token).ok(),
        None => None,
    };
    let req = req.into_inner().data(AuthSession(identity));
    state.schema().execute(req).await.into()
}

/// Serve the GraphQL playground.
pub async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Pull the token out of the `Authorization` header.
///
/// Accepts both `Bearer <token>` and a bare token, matching what common
/// GraphQL clients send.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}
