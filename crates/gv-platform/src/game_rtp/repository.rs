//! GameRtp Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use serde_json::Value;

use super::entity::{GameRtp, CLASS_NAME};
use crate::shared::error::Result;
use crate::store::GameRtpStore;

/// Equality filter on `gameName` and `rtp`.
///
/// Values go through `$eq` so an object param such as `{"$gt": 0}` is
/// matched literally instead of being read as a query operator.
pub fn name_and_rtp_filter(game_name: &Value, rtp: &Value) -> Result<Document> {
    Ok(doc! {
        "gameName": { "$eq": bson::to_bson(game_name)? },
        "rtp": { "$eq": bson::to_bson(rtp)? },
    })
}

pub struct GameRtpRepository {
    collection: Collection<GameRtp>,
}

impl GameRtpRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(CLASS_NAME),
        }
    }
}

#[async_trait]
impl GameRtpStore for GameRtpRepository {
    async fn insert(&self, record: &GameRtp) -> Result<()> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    async fn find_by_name_and_rtp(&self, game_name: &Value, rtp: &Value) -> Result<Vec<GameRtp>> {
        // MongoDB compares int and double by value, matching the memory store
        let cursor = self
            .collection
            .find(name_and_rtp_filter(game_name, rtp)?)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_wraps_values_in_eq() {
        let filter = name_and_rtp_filter(&json!("Starburst"), &json!(96.1)).unwrap();
        assert_eq!(
            filter,
            doc! { "gameName": { "$eq": "Starburst" }, "rtp": { "$eq": 96.1 } }
        );
    }

    #[test]
    fn test_operator_objects_stay_literal() {
        let filter = name_and_rtp_filter(&json!({"$ne": null}), &json!({"$gt": 0})).unwrap();

        let rtp = filter.get_document("rtp").unwrap();
        assert_eq!(rtp.keys().collect::<Vec<_>>(), vec!["$eq"]);
        assert!(rtp.get_document("$eq").unwrap().contains_key("$gt"));

        let name = filter.get_document("gameName").unwrap();
        assert_eq!(name.get_document("$eq").unwrap(), &doc! { "$ne": null });
    }
}
