//! In-memory stores
//!
//! Used by the `memory` backend and by tests. Locks are never held across
//! an await point.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{GameRtpStore, IdentityStore, ObjectStore, SessionStore};
use crate::auth::login::{require_credentials, verify_candidate};
use crate::auth::PasswordService;
use crate::game_rtp::GameRtp;
use crate::game_session::GameSession;
use crate::object::StoredObject;
use crate::principal::Principal;
use crate::shared::json::loose_eq;
use crate::shared::{PlatformError, Result};

pub struct MemoryIdentityStore {
    principals: RwLock<HashMap<String, Principal>>,
    passwords: Arc<PasswordService>,
}

impl MemoryIdentityStore {
    pub fn new(passwords: Arc<PasswordService>) -> Self {
        Self {
            principals: RwLock::new(HashMap::new()),
            passwords,
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<Principal> {
        self.principals.read().get(id).cloned()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn log_in(&self, username: &str, password: &str) -> Result<Principal> {
        require_credentials(username, password)?;

        let candidate = self.find_by_username(username).await?;
        let mut principal = verify_candidate(candidate, password, &self.passwords)?;

        principal.record_login();
        if let Some(stored) = self.principals.write().get_mut(&principal.id) {
            stored.last_login_at = principal.last_login_at;
        }
        Ok(principal)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self
            .principals
            .read()
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn insert(&self, principal: &Principal) -> Result<()> {
        let mut principals = self.principals.write();
        if principals.contains_key(&principal.id) {
            return Err(PlatformError::internal(format!(
                "duplicate principal id {}",
                principal.id
            )));
        }
        principals.insert(principal.id.clone(), principal.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<Vec<GameSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<GameSession>> {
        Ok(self
            .sessions
            .read()
            .iter()
            .filter(|s| s.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, session: &GameSession) -> Result<()> {
        self.sessions.write().push(session.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryGameRtpStore {
    records: RwLock<Vec<GameRtp>>,
}

impl MemoryGameRtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<GameRtp> {
        self.records.read().clone()
    }
}

#[async_trait]
impl GameRtpStore for MemoryGameRtpStore {
    async fn insert(&self, record: &GameRtp) -> Result<()> {
        self.records.write().push(record.clone());
        Ok(())
    }

    async fn find_by_name_and_rtp(&self, game_name: &Value, rtp: &Value) -> Result<Vec<GameRtp>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| {
                loose_eq(&Value::String(r.game_name.clone()), game_name)
                    && loose_eq(&Value::from(r.rtp), rtp)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<StoredObject>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, class_name: &str) -> usize {
        self.objects.read().get(class_name).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn insert(&self, object: &StoredObject) -> Result<()> {
        self.objects
            .write()
            .entry(object.class_name.clone())
            .or_default()
            .push(object.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2Config;
    use serde_json::json;

    fn passwords() -> Arc<PasswordService> {
        Arc::new(PasswordService::new(Argon2Config::testing()).unwrap())
    }

    #[tokio::test]
    async fn test_log_in_stamps_last_login() {
        let passwords = passwords();
        let store = MemoryIdentityStore::new(passwords.clone());
        let hash = passwords.hash_password("secret").unwrap();
        store
            .insert(&Principal::new("alice").with_id("U1").with_password_hash(hash))
            .await
            .unwrap();

        let principal = store.log_in("alice", "secret").await.unwrap();
        assert_eq!(principal.id, "U1");
        assert!(store.find_by_id("U1").unwrap().last_login_at.is_some());

        let err = store.log_in("alice", "nope").await.unwrap_err();
        assert_eq!(err.classified().unwrap().0, 101);
    }

    #[tokio::test]
    async fn test_duplicate_principal_rejected() {
        let store = MemoryIdentityStore::new(passwords());
        let principal = Principal::new("alice");
        store.insert(&principal).await.unwrap();
        assert!(store.insert(&principal).await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_filtered_in_insertion_order() {
        let store = MemorySessionStore::new();
        let first = GameSession::new("U1").with_catalogue_id("a");
        let other = GameSession::new("U2");
        let second = GameSession::new("U1").with_catalogue_id("b");
        for s in [&first, &other, &second] {
            store.insert(s).await.unwrap();
        }

        let found = store.find_by_owner("U1").await.unwrap();
        assert_eq!(found, vec![first, second]);
        assert!(store.find_by_owner("U3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rtp_lookup_compares_numbers_by_value() {
        let store = MemoryGameRtpStore::new();
        store.insert(&GameRtp::new("Starburst", 96.0)).await.unwrap();
        store.insert(&GameRtp::new("Starburst", 94.5)).await.unwrap();

        let found = store
            .find_by_name_and_rtp(&json!("Starburst"), &json!(96))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rtp, 96.0);

        let none = store
            .find_by_name_and_rtp(&json!("Starburst"), &json!("96"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
