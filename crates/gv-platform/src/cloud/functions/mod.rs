//! Built-in cloud functions

pub mod check_user_credentials;
pub mod create_game_rtp;
pub mod fetch_game_rtp;

pub use check_user_credentials::{
    CheckUserCredentials, GameSessionSummary, UserData, UserGameData,
};
pub use create_game_rtp::{CreateGameRtpData, GameRtpCreated};
pub use fetch_game_rtp::{FetchGameRtpData, GameRtpMatches};
