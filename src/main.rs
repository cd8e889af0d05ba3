//! Symplibackup REST proxy.
//!
//! A stateless French-language REST façade over an UrBackup server's
//! management API: every route validates its input, resolves loose client
//! references, makes one backend call and translates the outcome.

mod api;
mod auth;
mod backend;
mod config;
mod errors;
mod models;
mod resolve;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::{HttpSessionFactory, SessionFactory};
use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn SessionFactory>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Symplibackup REST proxy");
    tracing::info!("Backend URL: {}", config.backend_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.docs_user.is_none() || config.docs_pass.is_none() {
        tracing::warn!(
            "No documentation credentials configured (SYMPLI_DOCS_USER/PASS). /docs is open!"
        );
    }

    let config = Arc::new(config);
    let factory = Arc::new(HttpSessionFactory::new(config.clone()));

    let state = AppState {
        factory,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Server
        .route("/status", get(api::get_status))
        .route("/health", get(api::health_check))
        .route("/version", get(api::get_version))
        .route("/server/settings", get(api::get_server_settings))
        .route("/server/settings", post(api::update_server_settings))
        .route("/alerts", get(api::list_alerts))
        // Client directory
        .route("/clients", get(api::list_clients))
        .route("/client/create", post(api::create_client))
        .route("/client/delete", post(api::delete_client))
        .route("/client/rename", post(api::rename_client))
        .route("/client/settings/change", post(api::set_client_setting))
        .route("/client/settings/{identifier}", get(api::get_client_settings))
        .route("/client/authkey/{identifier}", get(api::get_client_authkey))
        .route("/client/quota", post(api::set_client_quota))
        .route("/client/{identifier}", get(api::get_client_detail))
        .route("/client/{identifier}/quota", get(api::get_client_quota))
        .route("/client/{identifier}/quota/history", get(api::quota_history))
        .route("/client/{identifier}/used_space", get(api::get_client_used_space))
        .route("/client/{identifier}/activity", get(api::client_activity))
        // Backup lifecycle
        .route("/backup/full", post(api::launch_full_backup))
        .route("/backup/image", post(api::launch_image_backup))
        .route("/backup/incremental", post(api::launch_incremental_backup))
        .route("/backup/delete", post(api::delete_backup))
        .route("/backups/{identifier}", get(api::get_client_backups))
        .route("/backups/{identifier}/latest", get(api::get_latest_backup))
        .route(
            "/backups/{identifier}/{backup_id}/files",
            get(api::list_files_in_backup),
        )
        .route(
            "/backups/{identifier}/{backup_id}/download",
            get(api::download_file_from_backup),
        )
        .route(
            "/backups/{identifier}/{backup_id}/restore",
            post(api::restore_backup),
        )
        // Logs ("/logs/server" wins over the client route by segment precedence)
        .route("/logs/server", get(api::get_server_logs))
        .route("/logs/{identifier}", get(api::get_client_logs))
        .route("/logs/{identifier}/search", get(api::search_logs_client))
        // Groups & schedules
        .route("/groups", get(api::list_groups))
        .route("/groups/create", post(api::create_group))
        .route("/groups/{group_id}/clients", get(api::list_clients_in_group))
        .route("/groups/{group_id}/delete", delete(api::delete_group))
        .route("/schedules", get(api::list_schedules))
        .route("/schedules/create", post(api::create_schedule))
        .route("/schedules/{schedule_id}/delete", delete(api::delete_schedule))
        // Documentation
        .route("/docs", get(api::documentation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
