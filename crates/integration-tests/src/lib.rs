//! Integration test harness for Vendstock.
//!
//! Tests execute GraphQL operations directly against the schema with an
//! in-memory store, so no running server or external services are
//! needed. Each [`TestApi`] gets its own store; tests never share state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vendstock-integration-tests
//! ```

use std::sync::Arc;

use async_graphql::{Request, Response};
use chrono::Duration;
use secrecy::SecretString;

use vendstock_server::auth::AuthService;
use vendstock_server::schema::{AppSchema, AuthSession, build_schema};
use vendstock_server::services::{CatalogService, ClientRegistry, OrderService};
use vendstock_server::store::{MemoryStore, Store};

/// Signing secret for test tokens. Never used outside tests.
const TEST_JWT_SECRET: &str = "k9Qm2Xv7Lp4Zr8Wn3Jt6Hd0Fb5Cg1YsT4Ej";

/// A fully wired schema over a fresh in-memory store.
pub struct TestApi {
    schema: AppSchema,
    auth: AuthService,
}

impl TestApi {
    /// Build an API with the default per-line stock reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Build an API that validates every order line before any stock write.
    #[must_use]
    pub fn with_atomic_reservation() -> Self {
        Self::build(true)
    }

    fn build(atomic_reservation: bool) -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let auth = AuthService::new(
            Arc::clone(&store),
            &SecretString::from(TEST_JWT_SECRET),
            Duration::hours(24),
        );
        let catalog = CatalogService::new(Arc::clone(&store));
        let clients = ClientRegistry::new(Arc::clone(&store));
        let orders = OrderService::new(Arc::clone(&store), atomic_reservation);
        let schema = build_schema(auth.clone(), catalog, clients, orders);
        Self { schema, auth }
    }

    /// Execute an operation anonymously.
    pub async fn execute(&self, query: &str) -> Response {
        self.schema
            .execute(Request::new(query).data(AuthSession(None)))
            .await
    }

    /// Execute an operation as the holder of `token`.
    ///
    /// The token is verified the same way the HTTP layer does it, so an
    /// invalid token degrades to an anonymous session.
    pub async fn execute_as(&self, query: &str, token: &str) -> Response {
        let identity = self.auth.verify(token).ok();
        self.schema
            .execute(Request::new(query).data(AuthSession(identity)))
            .await
    }

    /// Register a vendor and log them in, returning a session token.
    pub async fn register_vendor(&self, email: &str) -> String {
        let create = format!(
            r#"mutation {{
                createUser(input: {{
                    firstName: "Test"
                    lastName: "Vendor"
                    email: "{email}"
                    password: "hunter2hunter2"
                }}) {{ id }}
            }}"#
        );
        let resp = self.execute(&create).await;
        assert!(
            resp.errors.is_empty(),
            "vendor registration failed: {:?}",
            resp.errors
        );

        let login = format!(
            r#"mutation {{
                authenticateUser(input: {{
                    email: "{email}"
                    password: "hunter2hunter2"
                }}) {{ token }}
            }}"#
        );
        let resp = self.execute(&login).await;
        assert!(resp.errors.is_empty(), "login failed: {:?}", resp.errors);
        data(&resp)["authenticateUser"]["token"]
            .as_str()
            .expect("token missing from login payload")
            .to_owned()
    }
}

impl Default for TestApi {
    fn default() -> Self {
        Self::new()
    }
}

/// The response data as JSON.
#[must_use]
pub fn data(resp: &Response) -> serde_json::Value {
    serde_json::to_value(&resp.data).expect("response data is valid JSON")
}

/// The `code` extension of the first error, if any.
#[must_use]
pub fn error_code(resp: &Response) -> Option<String> {
    let errors = serde_json::to_value(&resp.errors).ok()?;
    errors
        .get(0)?
        .get("extensions")?
        .get("code")?
        .as_str()
        .map(ToOwned::to_owned)
}
