//! Cloud function registry

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::functions::{CheckUserCredentials, CreateGameRtpData, FetchGameRtpData};
use super::triggers::TriggerRegistry;
use crate::shared::{PlatformError, Result};
use crate::store::Stores;

/// Untyped request params
pub type Params = Map<String, Value>;

/// A named server-side function callable over HTTP.
///
/// Implementations report expected failures inside the returned value
/// (usually an `Envelope`); an `Err` means the call itself failed.
#[async_trait]
pub trait CloudFunction: Send + Sync {
    async fn call(&self, params: &Params) -> Result<Value>;
}

#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Arc<dyn CloudFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in function wired to `stores`.
    pub fn with_defaults(stores: &Stores, triggers: Arc<TriggerRegistry>) -> Self {
        let mut registry = Self::new();
        registry.define(
            CheckUserCredentials::NAME,
            CheckUserCredentials::new(stores.identity.clone(), stores.sessions.clone()),
        );
        registry.define(
            CreateGameRtpData::NAME,
            CreateGameRtpData::new(stores.game_rtp.clone(), triggers),
        );
        registry.define(
            FetchGameRtpData::NAME,
            FetchGameRtpData::new(stores.game_rtp.clone()),
        );
        registry
    }

    /// Register `function` under `name`, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>, function: impl CloudFunction + 'static) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CloudFunction>> {
        self.functions.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub async fn run(&self, name: &str, params: &Params) -> Result<Value> {
        let function = self
            .get(name)
            .ok_or_else(|| PlatformError::script_failed(format!("Invalid function: \"{}\"", name)))?;
        function.call(params).await
    }
}
