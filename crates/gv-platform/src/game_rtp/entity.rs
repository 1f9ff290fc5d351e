//! GameRtp Entity
//!
//! Return-to-player configuration for one game.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::{codes, ObjectIdGenerator, PlatformError, Result};

pub const CLASS_NAME: &str = "GameRtp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRtp {
    #[serde(rename = "_id")]
    pub id: String,

    pub game_name: String,

    /// Percentage in (0, 100]
    pub rtp: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scatter: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wild: Option<Value>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn optional(params: &Map<String, Value>, key: &str) -> Option<Value> {
    params.get(key).filter(|v| !v.is_null()).cloned()
}

impl GameRtp {
    pub fn new(game_name: impl Into<String>, rtp: f64) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectIdGenerator::generate(),
            game_name: game_name.into(),
            rtp,
            scatter: None,
            wild: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_features(mut self, scatter: Option<Value>, wild: Option<Value>) -> Self {
        self.scatter = scatter;
        self.wild = wild;
        self
    }

    /// Validate untyped params into a new record.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self> {
        let game_name = match params.get("gameName") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => {
                return Err(PlatformError::validation(
                    codes::VALIDATION_ERROR,
                    "'gameName' is required and must be a non-empty string.",
                ))
            }
        };

        let rtp = match params.get("rtp").and_then(Value::as_f64) {
            Some(rtp) if rtp > 0.0 && rtp <= 100.0 => rtp,
            _ => {
                return Err(PlatformError::validation(
                    codes::VALIDATION_ERROR,
                    "'rtp' is required and must be a number between 0 and 100.",
                ))
            }
        };

        Ok(Self::new(game_name, rtp)
            .with_features(optional(params, "scatter"), optional(params, "wild")))
    }

    /// Field map as seen by save triggers
    pub fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("gameName".into(), Value::String(self.game_name.clone()));
        fields.insert("rtp".into(), Value::from(self.rtp));
        if let Some(scatter) = &self.scatter {
            fields.insert("scatter".into(), scatter.clone());
        }
        if let Some(wild) = &self.wild {
            fields.insert("wild".into(), wild.clone());
        }
        fields
    }
}

/// Client-facing projection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRtpData {
    pub id: String,
    pub game_name: String,
    pub rtp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wild: Option<Value>,
}

impl From<&GameRtp> for GameRtpData {
    fn from(record: &GameRtp) -> Self {
        Self {
            id: record.id.clone(),
            game_name: record.game_name.clone(),
            rtp: record.rtp,
            scatter: record.scatter.clone(),
            wild: record.wild.clone(),
        }
    }
}
