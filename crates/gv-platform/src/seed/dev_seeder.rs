//! Development Data Seeder
//!
//! Seeds demo players, their game sessions and a few GameRtp rows when the
//! server runs in dev mode. Existing rows are left alone, so it is safe to
//! run on every start.
//!
//! Default credentials:
//!   alice / DevPassword123!  (two sessions)
//!   bob   / DevPassword123!  (no sessions)

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::auth::PasswordService;
use crate::game_rtp::GameRtp;
use crate::game_session::GameSession;
use crate::principal::Principal;
use crate::shared::Result;
use crate::store::Stores;

pub const DEV_PASSWORD: &str = "DevPassword123!";

pub struct DevDataSeeder {
    stores: Stores,
    passwords: Arc<PasswordService>,
}

impl DevDataSeeder {
    pub fn new(stores: Stores, passwords: Arc<PasswordService>) -> Self {
        Self { stores, passwords }
    }

    pub async fn seed(&self) -> Result<()> {
        info!("=== DEV DATA SEEDER ===");

        if let Some(alice) = self
            .create_principal_if_not_exists("alice", "alice@gamevault.local", 1000.0)
            .await?
        {
            self.seed_sessions(&alice).await?;
        }
        self.create_principal_if_not_exists("bob", "bob@gamevault.local", 250.0)
            .await?;
        self.seed_game_rtp().await?;

        info!("Default logins:");
        info!("  alice / {}", DEV_PASSWORD);
        info!("  bob   / {}", DEV_PASSWORD);
        info!("=======================");
        Ok(())
    }

    /// Returns the new principal, or `None` if the username was taken.
    async fn create_principal_if_not_exists(
        &self,
        username: &str,
        email: &str,
        balance: f64,
    ) -> Result<Option<Principal>> {
        if self.stores.identity.find_by_username(username).await?.is_some() {
            return Ok(None);
        }

        let principal = Principal::new(username)
            .with_email(email)
            .with_balance(balance)
            .with_password_hash(self.passwords.hash_password(DEV_PASSWORD)?);
        self.stores.identity.insert(&principal).await?;
        info!(principal_id = %principal.id, "Created principal: {}", username);

        Ok(Some(principal))
    }

    async fn seed_sessions(&self, owner: &Principal) -> Result<()> {
        let sessions = [
            GameSession::new(&owner.id)
                .with_catalogue_id("starburst")
                .with_balances(1000.0, 1040.0)
                .with_totals(200.0, 240.0),
            GameSession::new(&owner.id)
                .with_catalogue_id("book-of-ra")
                .with_balances(1040.0, 1000.0)
                .with_totals(120.0, 80.0),
        ];
        for session in &sessions {
            self.stores.sessions.insert(session).await?;
        }
        info!(principal_id = %owner.id, count = sessions.len(), "Created game sessions");
        Ok(())
    }

    async fn seed_game_rtp(&self) -> Result<()> {
        let rows = [
            GameRtp::new("Starburst", 96.1).with_features(Some(json!({"count": 3})), Some(json!("expanding"))),
            GameRtp::new("Book of Ra", 95.1),
        ];
        for row in &rows {
            let existing = self
                .stores
                .game_rtp
                .find_by_name_and_rtp(&Value::String(row.game_name.clone()), &Value::from(row.rtp))
                .await?;
            if existing.is_empty() {
                self.stores.game_rtp.insert(row).await?;
                info!("Created GameRtp: {} ({})", row.game_name, row.rtp);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2Config;

    fn passwords() -> Arc<PasswordService> {
        Arc::new(PasswordService::new(Argon2Config::testing()).unwrap())
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let passwords = passwords();
        let stores = Stores::memory(passwords.clone());
        let seeder = DevDataSeeder::new(stores.clone(), passwords);

        seeder.seed().await.unwrap();
        seeder.seed().await.unwrap();

        let alice = stores.identity.log_in("alice", DEV_PASSWORD).await.unwrap();
        assert_eq!(stores.sessions.find_by_owner(&alice.id).await.unwrap().len(), 2);

        let bob = stores.identity.log_in("bob", DEV_PASSWORD).await.unwrap();
        assert!(stores.sessions.find_by_owner(&bob.id).await.unwrap().is_empty());

        let rtp = stores
            .game_rtp
            .find_by_name_and_rtp(&Value::from("Starburst"), &Value::from(96.1))
            .await
            .unwrap();
        assert_eq!(rtp.len(), 1);
    }
}
