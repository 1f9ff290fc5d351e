//! Before-save triggers
//!
//! Guards run in registration order before an object of their class is
//! stored. The first failing guard aborts the save.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::shared::{codes, PlatformError, Result};

pub type BeforeSaveHook = Arc<dyn Fn(&str, &Map<String, Value>) -> Result<()> + Send + Sync>;

/// Class that may never be written through the public API.
pub const LOCKED_TEST_CLASS: &str = "Test";

#[derive(Default, Clone)]
pub struct TriggerRegistry {
    before_save: HashMap<String, Vec<BeforeSaveHook>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the stock guards installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_before_save(LOCKED_TEST_CLASS, |_, _| {
            Err(PlatformError::validation(
                codes::TEST_CLASS_LOCKED,
                "Saving test objects is not available.",
            ))
        });
        registry
    }

    pub fn register_before_save<F>(&mut self, class_name: impl Into<String>, hook: F)
    where
        F: Fn(&str, &Map<String, Value>) -> Result<()> + Send + Sync + 'static,
    {
        self.before_save
            .entry(class_name.into())
            .or_default()
            .push(Arc::new(hook));
    }

    pub fn before_save(&self, class_name: &str, fields: &Map<String, Value>) -> Result<()> {
        let Some(hooks) = self.before_save.get(class_name) else {
            return Ok(());
        };

        debug!(class_name = %class_name, hooks = hooks.len(), "Running beforeSave triggers");
        for hook in hooks {
            hook(class_name, fields)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_default_guard_blocks_test_class() {
        let registry = TriggerRegistry::with_defaults();
        let err = registry
            .before_save("Test", &fields(json!({"foo": "bar"})))
            .unwrap_err();
        assert_eq!(
            err.classified(),
            Some((9001, "Saving test objects is not available."))
        );
    }

    #[test]
    fn test_other_classes_pass() {
        let registry = TriggerRegistry::with_defaults();
        assert_ok!(registry.before_save("GameRtp", &Map::new()));
        assert_ok!(registry.before_save("test", &Map::new()));
    }

    #[test]
    fn test_first_failure_stops_remaining_hooks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = TriggerRegistry::new();

        let counter = calls.clone();
        registry.register_before_save("Score", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(PlatformError::validation(codes::VALIDATION_ERROR, "nope"))
        });
        let counter = calls.clone();
        registry.register_before_save("Score", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_err!(registry.before_save("Score", &Map::new()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hook_sees_fields() {
        let mut registry = TriggerRegistry::new();
        registry.register_before_save("GameRtp", |class, fields| {
            assert_eq!(class, "GameRtp");
            match fields.get("rtp").and_then(Value::as_f64) {
                Some(rtp) if rtp < 90.0 => {
                    Err(PlatformError::validation(codes::VALIDATION_ERROR, "rtp too low"))
                }
                _ => Ok(()),
            }
        });

        assert!(registry.before_save("GameRtp", &fields(json!({"rtp": 96.5}))).is_ok());
        assert!(registry.before_save("GameRtp", &fields(json!({"rtp": 80}))).is_err());
    }
}
