//! GameVault Common
//!
//! Infrastructure shared by the GameVault crates and binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat};
