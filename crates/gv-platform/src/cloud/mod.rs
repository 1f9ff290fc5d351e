//! Cloud Code
//!
//! Named functions, before-save triggers and the HTTP routes that expose
//! them.

pub mod api;
pub mod function;
pub mod functions;
pub mod triggers;

pub use api::{cloud_router, mounted_router, CloudState};
pub use function::{CloudFunction, FunctionRegistry, Params};
pub use triggers::TriggerRegistry;
