//! Game Session Aggregate

pub mod entity;
pub mod repository;

pub use entity::GameSession;
pub use repository::GameSessionRepository;
