//! GameVault Platform
//!
//! Cloud functions for a game backend:
//! - `checkUserCredentials` - log in and return the player's game sessions
//! - `createGameRtpData` / `fetchGameRtpData` - return-to-player records
//! - before-save triggers and a generic object-create endpoint
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - MongoDB data access
//!
//! `store` defines the interfaces the cloud functions depend on, with the
//! repositories and in-memory implementations behind them.

// Aggregates
pub mod principal;
pub mod game_session;
pub mod game_rtp;
pub mod object;

// Authentication
pub mod auth;

// Store interfaces
pub mod store;

// Cloud functions and HTTP surface
pub mod cloud;

// Shared infrastructure
pub mod shared;

pub mod seed;

pub use shared::error::{PlatformError, Result};
pub use shared::envelope::Envelope;
pub use shared::object_id::ObjectIdGenerator;

pub use principal::{Principal, PrincipalRepository};
pub use game_session::{GameSession, GameSessionRepository};
pub use game_rtp::{GameRtp, GameRtpData, GameRtpRepository};
pub use object::{ObjectRepository, StoredObject};

pub use auth::{Argon2Config, PasswordService};
pub use store::{GameRtpStore, IdentityStore, ObjectStore, SessionStore, Stores};
pub use cloud::{mounted_router, CloudFunction, CloudState, FunctionRegistry, TriggerRegistry};
pub use seed::DevDataSeeder;
