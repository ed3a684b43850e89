//! Client record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendstock_core::{ClientId, Email, UserId};

/// A client belonging to exactly one vendor.
///
/// The `vendor` reference is set at creation and never reassigned. It is a
/// weak reference: deleting a vendor does not cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: Email,
    pub phone: Option<String>,
    pub vendor: UserId,
    pub created_at: DateTime<Utc>,
}
