//! Object Repository
//!
//! One MongoDB collection per class name.

use async_trait::async_trait;
use mongodb::{bson::Document, Database};

use super::entity::StoredObject;
use crate::shared::error::Result;
use crate::store::ObjectStore;

pub struct ObjectRepository {
    db: Database,
}

impl ObjectRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl ObjectStore for ObjectRepository {
    async fn insert(&self, object: &StoredObject) -> Result<()> {
        let doc = object.to_document()?;
        self.db
            .collection::<Document>(&object.class_name)
            .insert_one(doc)
            .await?;
        Ok(())
    }
}
