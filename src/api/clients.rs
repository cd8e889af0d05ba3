//! Client directory endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{open_session, resolve_client, ApiResult};
use crate::models::{
    ClientCreateRequest, ClientDeleteRequest, ClientRecord, ClientRef, ClientRenameRequest,
};
use crate::AppState;

/// GET /clients - Lister tous les clients (nom et identifiant seulement).
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    let session = open_session(&state).await?;
    let clients = session.get_clients().await?;
    let projection = clients
        .iter()
        .map(|c| json!({ "name": c.name, "id": c.id }))
        .collect();
    Ok(Json(projection))
}

/// GET /client/{id_or_name} - Détail d'un client.
pub async fn get_client_detail(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<ClientRecord> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    Ok(Json(client))
}

/// POST /client/create - Créer un nouveau client.
pub async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<ClientCreateRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    Ok(Json(session.add_client(&req.client).await?))
}

/// POST /client/delete - Supprimer un client existant.
pub async fn delete_client(
    State(state): State<AppState>,
    Json(req): Json<ClientDeleteRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(session.remove_client(client.id).await?))
}

/// POST /client/rename - Renommer un client existant.
pub async fn rename_client(
    State(state): State<AppState>,
    Json(req): Json<ClientRenameRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.old.normalized()).await?;
    Ok(Json(session.rename_client(client.id, &req.new).await?))
}
