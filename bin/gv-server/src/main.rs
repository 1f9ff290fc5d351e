//! GameVault Server
//!
//! Serves the cloud functions and class endpoint under the configured mount
//! path, plus health probes.
//!
//! Configuration comes from `gamevault.toml` (or `GAMEVAULT_CONFIG`) with
//! `GAMEVAULT_*` environment overrides; see `gv-config`.

use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use gv_config::{AppConfig, HttpConfig};
use gv_platform::{
    mounted_router, Argon2Config, CloudState, DevDataSeeder, FunctionRegistry, PasswordService,
    Stores, TriggerRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    gv_common::init_logging("gv-server");

    info!("Starting GameVault Server");

    let config = AppConfig::load()?;

    let passwords = Arc::new(PasswordService::new(Argon2Config {
        memory_cost: config.auth.argon2_memory_cost,
        time_cost: config.auth.argon2_time_cost,
        parallelism: config.auth.argon2_parallelism,
        ..Argon2Config::default()
    })?);

    let stores = if config.store.is_memory() {
        warn!("Using in-memory stores; data is lost on shutdown");
        Stores::memory(passwords.clone())
    } else {
        info!("Connecting to MongoDB: {}/{}", config.mongodb.uri, config.mongodb.database);
        let client = mongodb::Client::with_uri_str(&config.mongodb.uri).await?;
        Stores::mongo(&client.database(&config.mongodb.database), passwords.clone())
    };

    if config.dev_mode {
        let seeder = DevDataSeeder::new(stores.clone(), Arc::new(PasswordService::new(Argon2Config::testing())?));
        if let Err(e) = seeder.seed().await {
            warn!("Dev data seeding failed: {}", e);
        }
    }

    let triggers = Arc::new(TriggerRegistry::with_defaults());
    let functions = FunctionRegistry::with_defaults(&stores, triggers.clone());
    info!(functions = ?functions.names().collect::<Vec<_>>(), "Cloud functions registered");

    let state = CloudState {
        functions: Arc::new(functions),
        triggers,
        objects: stores.objects.clone(),
    };

    let app = mounted_router(&config.parse.mount_path, &config.parse.app_id, state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.http));

    let addr = config.http.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}{}", addr, config.parse.mount_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("GameVault Server shutdown complete");
    Ok(())
}

fn cors_layer(http: &HttpConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if http.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = http
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received...");
}
