//! Stored Object
//!
//! A free-form object saved through the class endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::shared::{codes, ObjectIdGenerator, PlatformError, Result};

/// Keys the server owns; clients may not set them.
const RESERVED_KEYS: &[&str] = &["objectId", "createdAt", "updatedAt"];

fn class_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid class name regex"))
}

pub fn validate_class_name(class_name: &str) -> Result<()> {
    if class_name_pattern().is_match(class_name) {
        Ok(())
    } else {
        Err(PlatformError::validation(
            codes::INVALID_CLASS_NAME,
            format!("Invalid classname: {}, classnames can only have alphanumeric characters and _, and must start with an alpha character ", class_name),
        ))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.starts_with('_') || RESERVED_KEYS.contains(&key) {
        return Err(PlatformError::validation(
            codes::INVALID_KEY_NAME,
            format!("Invalid field name: {}.", key),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub id: String,
    pub class_name: String,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredObject {
    pub fn new(class_name: &str, fields: Map<String, Value>) -> Result<Self> {
        validate_class_name(class_name)?;
        for key in fields.keys() {
            validate_key(key)?;
        }

        let now = Utc::now();
        Ok(Self {
            id: ObjectIdGenerator::generate(),
            class_name: class_name.to_string(),
            fields,
            created_at: now,
            updated_at: now,
        })
    }

    /// BSON document for the class collection
    pub fn to_document(&self) -> Result<bson::Document> {
        let mut doc = bson::to_document(&self.fields)?;
        doc.insert("_id", self.id.clone());
        doc.insert("createdAt", bson::DateTime::from_chrono(self.created_at));
        doc.insert("updatedAt", bson::DateTime::from_chrono(self.updated_at));
        Ok(doc)
    }
}
