//! `fetchGameRtpData`: look up GameRtp records by name and rtp.
//!
//! Unlike the session aggregator, an empty result is reported as an error.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cloud::function::{CloudFunction, Params};
use crate::game_rtp::GameRtpData;
use crate::shared::json::{display, is_truthy};
use crate::shared::{codes, Envelope, PlatformError};
use crate::store::GameRtpStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRtpMatches {
    pub game_rtp_data: Vec<GameRtpData>,
}

pub struct FetchGameRtpData {
    store: Arc<dyn GameRtpStore>,
}

impl FetchGameRtpData {
    pub const NAME: &'static str = "fetchGameRtpData";

    pub fn new(store: Arc<dyn GameRtpStore>) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, params: &Params) -> Envelope<GameRtpMatches> {
        let game_name = params.get("gameName").filter(|v| is_truthy(v));
        let rtp = params.get("rtp").filter(|v| is_truthy(v));
        let (Some(game_name), Some(rtp)) = (game_name, rtp) else {
            return Envelope::from_error(&PlatformError::validation(
                codes::VALIDATION_ERROR,
                "Please provide both 'gamename' and 'rtp'.",
            ));
        };

        let records = match self.store.find_by_name_and_rtp(game_name, rtp).await {
            Ok(records) => records,
            Err(err) => return Envelope::from_error(&err),
        };

        debug!(matches = records.len(), "GameRtp lookup finished");
        if records.is_empty() {
            return Envelope::message(format!(
                "No records found for gameName '{}' with rtp '{}'.",
                display(game_name),
                display(rtp)
            ));
        }

        Envelope::success(GameRtpMatches {
            game_rtp_data: records.iter().map(GameRtpData::from).collect(),
        })
    }
}

#[async_trait]
impl CloudFunction for FetchGameRtpData {
    async fn call(&self, params: &Params) -> crate::shared::Result<Value> {
        Ok(serde_json::to_value(self.fetch(params).await)?)
    }
}
