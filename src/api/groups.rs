//! Group and schedule endpoints.
//!
//! Group and schedule identifiers are passed through to the backend raw;
//! only clients get the loose id-or-name resolution.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{open_session, ApiResult};
use crate::AppState;

/// GET /groups - Lister tous les groupes de clients.
pub async fn list_groups(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let groups = session.get_groups().await?;
    Ok(Json(json!({ "groups": groups })))
}

/// GET /groups/{group_id}/clients - Clients appartenant à un groupe.
pub async fn list_clients_in_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let clients = session.get_group_clients(&group_id).await?;
    Ok(Json(json!({ "clients": clients })))
}

#[derive(Debug, Deserialize)]
pub struct GroupCreateQuery {
    /// Nom du groupe à créer
    pub group_name: String,
}

/// POST /groups/create - Créer un nouveau groupe de clients.
pub async fn create_group(
    State(state): State<AppState>,
    Query(query): Query<GroupCreateQuery>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let group = session.create_group(&query.group_name).await?;
    Ok(Json(json!({ "status": "groupe créé", "groupe": group })))
}

/// DELETE /groups/{group_id}/delete - Supprimer un groupe.
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let result = session.delete_group(&group_id).await?;
    Ok(Json(json!({ "status": "groupe supprimé", "resultat": result })))
}

/// GET /schedules - Lister les tâches de sauvegarde planifiées.
pub async fn list_schedules(State(state): State<AppState>) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let schedules = session.get_schedules().await?;
    Ok(Json(json!({ "schedules": schedules })))
}

/// POST /schedules/create - Créer une tâche planifiée (objet opaque).
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(schedule_data): Json<Value>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let schedule = session.create_schedule(&schedule_data).await?;
    Ok(Json(json!({
        "status": "tâche planifiée créée",
        "schedule": schedule,
    })))
}

/// DELETE /schedules/{schedule_id}/delete - Supprimer une tâche planifiée.
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let result = session.delete_schedule(&schedule_id).await?;
    Ok(Json(json!({
        "status": "tâche planifiée supprimée",
        "resultat": result,
    })))
}
