//! Authentication
//!
//! Password hashing and the login rules every identity store applies.

pub mod login;
pub mod password_service;

pub use password_service::{Argon2Config, PasswordService};
