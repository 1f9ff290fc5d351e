//! GameRtp Aggregate

pub mod entity;
pub mod repository;

pub use entity::{GameRtp, GameRtpData, CLASS_NAME};
pub use repository::GameRtpRepository;
