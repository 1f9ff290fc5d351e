//! Game Session Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use super::entity::GameSession;
use crate::shared::error::Result;
use crate::store::SessionStore;

pub const COLLECTION: &str = "GameSession";

pub struct GameSessionRepository {
    collection: Collection<GameSession>,
}

impl GameSessionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl SessionStore for GameSessionRepository {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<GameSession>> {
        let cursor = self.collection.find(doc! { "userId": owner_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, session: &GameSession) -> Result<()> {
        self.collection.insert_one(session).await?;
        Ok(())
    }
}
