//! Client registry: vendor-scoped CRUD over client records.
//!
//! Client emails are globally unique - the uniqueness check looks across
//! all vendors, not per-vendor. Single-resource reads, updates and deletes
//! run the authorization guard after the existence check; a missing client
//! is `NotFound` regardless of who asks.

use std::sync::Arc;

use chrono::Utc;

use vendstock_core::{ClientId, Email};

use super::guard;
use crate::auth::Identity;
use crate::error::{ApiError, ApiResult};
use crate::models::Client;
use crate::store::Store;

/// Total (not partial) client input; updates replace every field.
#[derive(Debug, Clone)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Client registry.
#[derive(Clone)]
pub struct ClientRegistry {
    store: Arc<dyn Store>,
}

impl ClientRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a client owned by the calling vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::DuplicateEmail` if any vendor already has a client
    /// with this email, `ApiError::BadRequest` for a malformed email.
    pub async fn create(&self, identity: &Identity, input: ClientInput) -> ApiResult<Client> {
        let email = parse_email(&input.email)?;

        if self
            .store
            .find_client_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(ApiError::DuplicateEmail(email.into_inner()));
        }

        let client = Client {
            id: ClientId::generate(),
            first_name: input.first_name,
            last_name: input.last_name,
            company: input.company,
            email,
            phone: input.phone,
            vendor: identity.user_id,
            created_at: Utc::now(),
        };

        Ok(self.store.insert_client(client).await?)
    }

    /// Fetch a client; only its owning vendor may see it.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` if absent, `ApiError::Unauthorized` if the
    /// caller is not the owner.
    pub async fn get(&self, identity: &Identity, id: ClientId) -> ApiResult<Client> {
        let client = self.find_existing(id).await?;
        guard::authorize_owner(identity, client.vendor, "client")?;
        Ok(client)
    }

    /// Administrative listing across all vendors; no auth filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` on a store fault.
    pub async fn list_all(&self) -> ApiResult<Vec<Client>> {
        Ok(self.store.list_clients().await?)
    }

    /// List the calling vendor's own clients.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` on a store fault.
    pub async fn list_for_vendor(&self, identity: &Identity) -> ApiResult<Vec<Client>> {
        Ok(self.store.list_clients_for_vendor(identity.user_id).await?)
    }

    /// Replace all fields of a client the caller owns.
    ///
    /// The vendor reference is never reassigned. Email uniqueness is only
    /// enforced at creation.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound`, `ApiError::Unauthorized` or
    /// `ApiError::BadRequest` as for the other operations.
    pub async fn update(
        &self,
        identity: &Identity,
        id: ClientId,
        input: ClientInput,
    ) -> ApiResult<Client> {
        let existing = self.find_existing(id).await?;
        guard::authorize_owner(identity, existing.vendor, "client")?;

        let client = Client {
            id: existing.id,
            first_name: input.first_name,
            last_name: input.last_name,
            company: input.company,
            email: parse_email(&input.email)?,
            phone: input.phone,
            vendor: existing.vendor,
            created_at: existing.created_at,
        };

        Ok(self.store.save_client(client).await?)
    }

    /// Delete a client the caller owns.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` or `ApiError::Unauthorized`.
    pub async fn delete(&self, identity: &Identity, id: ClientId) -> ApiResult<()> {
        let existing = self.find_existing(id).await?;
        guard::authorize_owner(identity, existing.vendor, "client")?;

        self.store.delete_client(id).await?;
        Ok(())
    }

    async fn find_existing(&self, id: ClientId) -> ApiResult<Client> {
        self.store
            .find_client(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("client".to_owned()))
    }
}

fn parse_email(email: &str) -> ApiResult<Email> {
    Email::parse(email).map_err(|e| ApiError::BadRequest(format!("invalid email: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use vendstock_core::UserId;

    fn registry() -> ClientRegistry {
        ClientRegistry::new(Arc::new(MemoryStore::new()))
    }

    fn vendor() -> Identity {
        Identity {
            user_id: UserId::generate(),
        }
    }

    fn input(email: &str) -> ClientInput {
        ClientInput {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            company: "Analytical Engines Ltd".to_owned(),
            email: email.to_owned(),
            phone: Some("+44 20 7946 0000".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_create_sets_vendor_to_caller() {
        let registry = registry();
        let caller = vendor();

        let client = registry
            .create(&caller, input("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(client.vendor, caller.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_email_fails_regardless_of_caller() {
        let registry = registry();
        let vendor_a = vendor();
        let vendor_b = vendor();

        registry
            .create(&vendor_a, input("ada@example.com"))
            .await
            .unwrap();

        // Uniqueness is global, so a different vendor still collides.
        let err = registry
            .create(&vendor_b, input("ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_non_owner_access_is_unauthorized() {
        let registry = registry();
        let owner = vendor();
        let stranger = vendor();

        let client = registry
            .create(&owner, input("ada@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            registry.get(&stranger, client.id).await.unwrap_err(),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            registry
                .update(&stranger, client.id, input("ada@example.com"))
                .await
                .unwrap_err(),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            registry.delete(&stranger, client.id).await.unwrap_err(),
            ApiError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_client_is_not_found_before_ownership() {
        let registry = registry();
        let err = registry
            .get(&vendor(), ClientId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_owner_update_is_full_replace() {
        let registry = registry();
        let owner = vendor();
        let client = registry
            .create(&owner, input("ada@example.com"))
            .await
            .unwrap();

        let updated = registry
            .update(
                &owner,
                client.id,
                ClientInput {
                    first_name: "Augusta".to_owned(),
                    last_name: "King".to_owned(),
                    company: "Lovelace & Byron".to_owned(),
                    email: "augusta@example.com".to_owned(),
                    phone: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.vendor, owner.user_id);

        // Reflected in a subsequent get
        let fetched = registry.get(&owner, client.id).await.unwrap();
        assert_eq!(fetched.email.as_str(), "augusta@example.com");
    }

    #[tokio::test]
    async fn test_vendor_scoped_listing() {
        let registry = registry();
        let vendor_a = vendor();
        let vendor_b = vendor();

        registry.create(&vendor_a, input("a1@example.com")).await.unwrap();
        registry.create(&vendor_a, input("a2@example.com")).await.unwrap();
        registry.create(&vendor_b, input("b1@example.com")).await.unwrap();

        assert_eq!(registry.list_for_vendor(&vendor_a).await.unwrap().len(), 2);
        assert_eq!(registry.list_for_vendor(&vendor_b).await.unwrap().len(), 1);
        assert_eq!(registry.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_the_client() {
        let registry = registry();
        let owner = vendor();
        let client = registry
            .create(&owner, input("ada@example.com"))
            .await
            .unwrap();

        registry.delete(&owner, client.id).await.unwrap();
        assert!(matches!(
            registry.get(&owner, client.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
