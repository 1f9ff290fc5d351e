//! Shared Module
//!
//! Cross-cutting concerns and shared utilities.

pub mod envelope;
pub mod error;
pub mod health_api;
pub mod json;
pub mod middleware;
pub mod object_id;

pub use envelope::{Envelope, ErrorBody, UNEXPECTED_MESSAGE};
pub use error::{codes, PlatformError, Result};
pub use health_api::health_router;
pub use middleware::{ApplicationIdLayer, APPLICATION_ID_HEADER};
pub use object_id::ObjectIdGenerator;
