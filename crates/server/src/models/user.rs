//! Vendor (user) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendstock_core::{Email, UserId};

/// A registered vendor.
///
/// Created via registration and immutable thereafter; no update or delete
/// operation exists for users. Acts as the owning party for clients and
/// orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Argon2 hash of the registration password. Never serialized to the API.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
