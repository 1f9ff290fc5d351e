//! Generic objects saved by class name

pub mod entity;
pub mod repository;

pub use entity::{validate_class_name, StoredObject};
pub use repository::ObjectRepository;
