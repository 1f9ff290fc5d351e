//! `createGameRtpData`: validate and store one GameRtp record.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cloud::function::{CloudFunction, Params};
use crate::cloud::triggers::TriggerRegistry;
use crate::game_rtp::{GameRtp, GameRtpData, CLASS_NAME};
use crate::shared::{Envelope, Result};
use crate::store::GameRtpStore;

pub const CREATED_MESSAGE: &str = "GameRtp record created successfully.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRtpCreated {
    pub message: String,
    pub data: GameRtpData,
}

pub struct CreateGameRtpData {
    store: Arc<dyn GameRtpStore>,
    triggers: Arc<TriggerRegistry>,
}

impl CreateGameRtpData {
    pub const NAME: &'static str = "createGameRtpData";

    pub fn new(store: Arc<dyn GameRtpStore>, triggers: Arc<TriggerRegistry>) -> Self {
        Self { store, triggers }
    }

    pub async fn create(&self, params: &Params) -> Envelope<GameRtpCreated> {
        Envelope::from_result(self.try_create(params).await)
    }

    async fn try_create(&self, params: &Params) -> Result<GameRtpCreated> {
        let record = GameRtp::from_params(params)?;
        self.triggers.before_save(CLASS_NAME, &record.fields())?;
        self.store.insert(&record).await?;

        info!(id = %record.id, game_name = %record.game_name, rtp = record.rtp, "GameRtp record created");
        Ok(GameRtpCreated {
            message: CREATED_MESSAGE.to_string(),
            data: GameRtpData::from(&record),
        })
    }
}

#[async_trait]
impl CloudFunction for CreateGameRtpData {
    async fn call(&self, params: &Params) -> Result<Value> {
        Ok(serde_json::to_value(self.create(params).await)?)
    }
}
