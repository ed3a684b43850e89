//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::schema::AppSchema;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    schema: AppSchema,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(schema: AppSchema, auth: AuthService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { schema, auth }),
        }
    }

    /// The executable GraphQL schema.
    pub fn schema(&self) -> &AppSchema {
        &self.inner.schema
    }

    /// The token verification service.
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
