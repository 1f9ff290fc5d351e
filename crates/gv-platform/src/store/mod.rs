//! Store interfaces
//!
//! The cloud functions only ever see these traits. Each has a MongoDB
//! implementation (the aggregate repositories) and an in-memory one.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::Database;
use serde_json::Value;

use crate::auth::PasswordService;
use crate::game_rtp::{GameRtp, GameRtpRepository};
use crate::game_session::{GameSession, GameSessionRepository};
use crate::object::{ObjectRepository, StoredObject};
use crate::principal::{Principal, PrincipalRepository};
use crate::shared::Result;

pub mod memory;

pub use memory::{
    MemoryGameRtpStore, MemoryIdentityStore, MemoryObjectStore, MemorySessionStore,
};

/// Credential verification and principal storage
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Verify credentials and stamp the login time.
    async fn log_in(&self, username: &str, password: &str) -> Result<Principal>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;

    async fn insert(&self, principal: &Principal) -> Result<()>;
}

/// Game session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All sessions whose owner reference equals `owner_id`, in store order.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<GameSession>>;

    async fn insert(&self, session: &GameSession) -> Result<()>;
}

/// Game return-to-player records
#[async_trait]
pub trait GameRtpStore: Send + Sync {
    async fn insert(&self, record: &GameRtp) -> Result<()>;

    /// Records with `gameName == game_name` and `rtp == rtp`.
    async fn find_by_name_and_rtp(&self, game_name: &Value, rtp: &Value) -> Result<Vec<GameRtp>>;
}

/// Free-form objects created through the class endpoint
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn insert(&self, object: &StoredObject) -> Result<()>;
}

/// The full set of stores a server instance runs with
#[derive(Clone)]
pub struct Stores {
    pub identity: Arc<dyn IdentityStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub game_rtp: Arc<dyn GameRtpStore>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Stores {
    pub fn mongo(db: &Database, passwords: Arc<PasswordService>) -> Self {
        Self {
            identity: Arc::new(PrincipalRepository::new(db, passwords)),
            sessions: Arc::new(GameSessionRepository::new(db)),
            game_rtp: Arc::new(GameRtpRepository::new(db)),
            objects: Arc::new(ObjectRepository::new(db)),
        }
    }

    pub fn memory(passwords: Arc<PasswordService>) -> Self {
        Self {
            identity: Arc::new(MemoryIdentityStore::new(passwords)),
            sessions: Arc::new(MemorySessionStore::new()),
            game_rtp: Arc::new(MemoryGameRtpStore::new()),
            objects: Arc::new(MemoryObjectStore::new()),
        }
    }
}
