//! Cloud API
//!
//! - POST {mount}/functions/:name - run a cloud function
//! - POST {mount}/classes/:class_name - create an object

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use super::function::{FunctionRegistry, Params};
use super::triggers::TriggerRegistry;
use crate::object::{validate_class_name, StoredObject};
use crate::shared::{codes, health_router, ApplicationIdLayer, PlatformError};
use crate::store::ObjectStore;

#[derive(Clone)]
pub struct CloudState {
    pub functions: Arc<FunctionRegistry>,
    pub triggers: Arc<TriggerRegistry>,
    pub objects: Arc<dyn ObjectStore>,
}

#[derive(Debug, Serialize)]
pub struct FunctionResponse {
    pub result: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedObjectResponse {
    pub object_id: String,
    pub created_at: String,
}

fn body_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

pub async fn run_function(
    State(state): State<CloudState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<FunctionResponse>, PlatformError> {
    let params: Params = body_object(&body).unwrap_or_default();
    debug!(function = %name, params = params.len(), "Running cloud function");

    match state.functions.run(&name, &params).await {
        Ok(result) => Ok(Json(FunctionResponse { result })),
        Err(err) if err.is_classified() => Err(err),
        Err(err) => {
            error!(function = %name, error = %err, "Cloud function failed");
            Err(PlatformError::script_failed("Cloud function failed."))
        }
    }
}

pub async fn create_object(
    State(state): State<CloudState>,
    Path(class_name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedObjectResponse>), PlatformError> {
    let fields = body_object(&body).ok_or_else(|| {
        PlatformError::validation(codes::INVALID_JSON, "request body must be a JSON object")
    })?;

    validate_class_name(&class_name)?;
    state.triggers.before_save(&class_name, &fields)?;

    let object = StoredObject::new(&class_name, fields)?;
    state.objects.insert(&object).await?;

    info!(class_name = %class_name, object_id = %object.id, "Object created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedObjectResponse {
            object_id: object.id,
            created_at: object.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    ))
}

pub fn cloud_router(state: CloudState) -> Router {
    Router::new()
        .route("/functions/:name", post(run_function))
        .route("/classes/:class_name", post(create_object))
        .with_state(state)
}

/// Cloud routes nested under `mount_path` behind the application id gate,
/// plus the unauthenticated health probes at the root.
pub fn mounted_router(mount_path: &str, app_id: &str, state: CloudState) -> Router {
    let cloud = cloud_router(state).layer(ApplicationIdLayer::new(app_id));
    Router::new().nest(mount_path, cloud).merge(health_router())
}
