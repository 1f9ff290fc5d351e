//! Principal Aggregate
//!
//! Player identities and the MongoDB-backed identity store.

pub mod entity;
pub mod repository;

pub use entity::Principal;
pub use repository::PrincipalRepository;
