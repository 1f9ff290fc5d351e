//! Session Aggregator
//!
//! Authenticates a player and returns their profile together with every game
//! session they own.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::auth::login::credential_param;
use crate::cloud::function::{CloudFunction, Params};
use crate::game_session::GameSession;
use crate::principal::Principal;
use crate::shared::{Envelope, Result};
use crate::store::{IdentityStore, SessionStore};

/// Public profile of the authenticated principal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Principal> for UserData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            username: principal.username.clone(),
            email: principal.email.clone(),
            balance: principal.balance,
            created_at: principal.created_at,
            updated_at: principal.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionSummary {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_on_enter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_on_exit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_played: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_win: Option<f64>,
}

impl From<&GameSession> for GameSessionSummary {
    fn from(session: &GameSession) -> Self {
        Self {
            session_id: session.id.clone(),
            game_catalog_id: session.game_catalogue_id.clone(),
            balance_on_enter: session.balance_on_enter,
            balance_on_exit: session.balance_on_exit,
            total_played: session.total_played,
            total_win: session.total_win,
        }
    }
}

/// Success payload: `{"userData": {...}, "gameData": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGameData {
    pub user_data: UserData,
    pub game_data: Vec<GameSessionSummary>,
}

pub struct CheckUserCredentials {
    identity: Arc<dyn IdentityStore>,
    sessions: Arc<dyn SessionStore>,
}

impl CheckUserCredentials {
    pub const NAME: &'static str = "checkUserCredentials";

    pub fn new(identity: Arc<dyn IdentityStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { identity, sessions }
    }

    /// Log in, then collect the principal's sessions in store order.
    ///
    /// Never fails: rejected logins come back with the store's code and
    /// message, anything else as the generic 500 envelope.
    pub async fn authenticate_and_aggregate(
        &self,
        username: &str,
        password: &str,
    ) -> Envelope<UserGameData> {
        Envelope::from_result(self.aggregate(username, password).await)
    }

    async fn aggregate(&self, username: &str, password: &str) -> Result<UserGameData> {
        let principal = self.identity.log_in(username, password).await?;
        debug!(principal_id = %principal.id, "Credentials accepted, loading sessions");

        let sessions = self.sessions.find_by_owner(&principal.id).await?;
        info!(
            principal_id = %principal.id,
            sessions = sessions.len(),
            "User game data aggregated"
        );

        Ok(UserGameData {
            user_data: UserData::from(&principal),
            game_data: sessions.iter().map(GameSessionSummary::from).collect(),
        })
    }
}

#[async_trait]
impl CloudFunction for CheckUserCredentials {
    async fn call(&self, params: &Params) -> Result<Value> {
        let credentials = credential_param(params, "username", "Username")
            .and_then(|u| credential_param(params, "password", "Password").map(|p| (u, p)));

        let envelope = match credentials {
            Ok((username, password)) => self.authenticate_and_aggregate(&username, &password).await,
            Err(err) => Envelope::from_error(&err),
        };
        Ok(serde_json::to_value(envelope)?)
    }
}
