//! Principal Repository
//!
//! MongoDB identity store over the `_User` collection.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, Collection, Database};
use tracing::{debug, info};

use crate::auth::login::{require_credentials, verify_candidate};
use crate::auth::PasswordService;
use crate::principal::entity::Principal;
use crate::shared::error::Result;
use crate::store::IdentityStore;

pub const COLLECTION: &str = "_User";

pub struct PrincipalRepository {
    collection: Collection<Principal>,
    passwords: Arc<PasswordService>,
}

impl PrincipalRepository {
    pub fn new(db: &Database, passwords: Arc<PasswordService>) -> Self {
        Self {
            collection: db.collection(COLLECTION),
            passwords,
        }
    }
}

#[async_trait]
impl IdentityStore for PrincipalRepository {
    async fn log_in(&self, username: &str, password: &str) -> Result<Principal> {
        require_credentials(username, password)?;

        let candidate = self.find_by_username(username).await?;
        let mut principal = verify_candidate(candidate, password, &self.passwords)?;

        principal.record_login();
        if let Some(at) = principal.last_login_at {
            self.collection
                .update_one(
                    doc! { "_id": principal.id.as_str() },
                    doc! { "$set": { "lastLoginAt": bson::DateTime::from_chrono(at) } },
                )
                .await?;
        }

        info!(principal_id = %principal.id, "Principal logged in");
        Ok(principal)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        debug!(username, "Looking up principal");
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    async fn insert(&self, principal: &Principal) -> Result<()> {
        self.collection.insert_one(principal).await?;
        Ok(())
    }
}
