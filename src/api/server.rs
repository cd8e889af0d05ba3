//! Server-wide endpoints: status, health, version, global settings, alerts.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::{open_session, ApiResult};
use crate::AppState;

/// Version announced by the proxy itself.
pub const API_VERSION: &str = "1.1";

/// GET /status - Statut global du serveur UrBackup.
pub async fn get_status(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    Ok(Json(session.get_status().await?))
}

/// GET /health - Santé du proxy et du serveur.
///
/// Always answers 200: proxy liveness must be checkable even when the
/// backend is down, so a backend failure lands in the body instead of
/// the status code.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let status = match open_session(&state).await {
        Ok(session) => match session.get_status().await {
            Ok(status) => status,
            Err(e) => Value::String(format!("Erreur: {e}")),
        },
        Err(e) => Value::String(format!("Erreur: {e}")),
    };

    Json(json!({ "proxy": "ok", "urbackup": status }))
}

/// GET /version - Version de l'API et du serveur UrBackup.
pub async fn get_version(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let urbackup_version = session.get_server_version().await?;
    Ok(Json(json!({
        "api_version": API_VERSION,
        "urbackup_version": urbackup_version,
    })))
}

/// GET /server/settings - Paramètres globaux du serveur.
pub async fn get_server_settings(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let settings = session.get_server_settings().await?;
    Ok(Json(json!({ "settings": settings })))
}

/// POST /server/settings - Modifier les paramètres globaux du serveur.
pub async fn update_server_settings(
    State(state): State<AppState>,
    Json(settings): Json<Value>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let result = session.update_server_settings(&settings).await?;
    Ok(Json(json!({
        "status": "paramètres serveur mis à jour",
        "resultat": result,
    })))
}

/// GET /alerts - Alertes et notifications récentes.
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let alerts = session.get_alerts().await?;
    Ok(Json(json!({ "alerts": alerts })))
}
