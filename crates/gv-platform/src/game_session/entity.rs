//! Game Session Entity
//!
//! One row per play session, owned by a principal.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::ObjectIdGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning principal id
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_catalogue_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_on_enter: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_on_exit: Option<f64>,

    /// Total amount wagered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_played: Option<f64>,

    /// Total amount won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_win: Option<f64>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectIdGenerator::generate(),
            user_id: user_id.into(),
            game_catalogue_id: None,
            balance_on_enter: None,
            balance_on_exit: None,
            total_played: None,
            total_win: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_catalogue_id(mut self, catalogue_id: impl Into<String>) -> Self {
        self.game_catalogue_id = Some(catalogue_id.into());
        self
    }

    pub fn with_balances(mut self, on_enter: f64, on_exit: f64) -> Self {
        self.balance_on_enter = Some(on_enter);
        self.balance_on_exit = Some(on_exit);
        self
    }

    pub fn with_totals(mut self, played: f64, win: f64) -> Self {
        self.total_played = Some(played);
        self.total_win = Some(win);
        self
    }
}
