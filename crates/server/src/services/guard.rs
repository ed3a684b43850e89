//! Authorization guard.
//!
//! Pure ownership check used by every single-resource client/order read,
//! update and delete. Callers must resolve existence first: a missing
//! resource is `NotFound` before ownership is ever evaluated.

use vendstock_core::UserId;

use crate::auth::Identity;
use crate::error::{ApiError, ApiResult};

/// Allow iff `owner` is the caller. `resource` names the resource kind in
/// the denial message ("client", "order").
pub fn authorize_owner(identity: &Identity, owner: UserId, resource: &str) -> ApiResult<()> {
    if identity.user_id == owner {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(format!(
            "caller does not own this {resource}"
        )))
    }
}
