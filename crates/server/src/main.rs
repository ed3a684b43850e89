//! Vendstock server binary.
//!
//! Serves the vendor inventory GraphQL API on port 4000.
//!
//! # Architecture
//!
//! - Axum web framework carrying a single `/graphql` endpoint
//! - `async-graphql` schema with services attached as schema data
//! - In-memory document store behind the `Store` trait
//! - JWT bearer tokens for vendor sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vendstock_server::auth::AuthService;
use vendstock_server::config::ServerConfig;
use vendstock_server::routes;
use vendstock_server::schema::build_schema;
use vendstock_server::services::{CatalogService, ClientRegistry, OrderService};
use vendstock_server::state::AppState;
use vendstock_server::store::{MemoryStore, Store};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vendstock_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build services over a shared store
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let auth = AuthService::new(Arc::clone(&store), &config.jwt_secret, config.token_ttl);
    let catalog = CatalogService::new(Arc::clone(&store));
    let clients = ClientRegistry::new(Arc::clone(&store));
    let orders = OrderService::new(Arc::clone(&store), config.atomic_reservation);

    let schema = build_schema(auth.clone(), catalog, clients, orders);
    let state = AppState::new(schema, auth);

    // Build router
    let app = Router::new()
        .route(
            "/graphql",
            get(routes::playground).post(routes::graphql_handler),
        )
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("vendstock listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
