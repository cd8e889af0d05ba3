//! Backup lifecycle and backup content endpoints.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::io::ReaderStream;

use super::{open_session, resolve_client, ApiResult};
use crate::backend::BackupSession;
use crate::errors::ApiError;
use crate::models::{BackupDeleteRequest, BackupRecord, BackupRequest, ClientRef};
use crate::resolve::{latest_backup, list_backup_files, resolve_backup};
use crate::AppState;

/// POST /backup/full - Lancer une sauvegarde complète des fichiers.
pub async fn launch_full_backup(
    State(state): State<AppState>,
    Json(req): Json<BackupRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(session.start_full_file_backup(client.id).await?))
}

/// POST /backup/image - Lancer une sauvegarde complète d'image disque.
pub async fn launch_image_backup(
    State(state): State<AppState>,
    Json(req): Json<BackupRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(session.start_full_image_backup(client.id).await?))
}

/// POST /backup/incremental - Lancer une sauvegarde incrémentale des fichiers.
pub async fn launch_incremental_backup(
    State(state): State<AppState>,
    Json(req): Json<BackupRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(session.start_incremental_file_backup(client.id).await?))
}

/// POST /backup/delete - Supprimer une sauvegarde spécifique d'un client.
pub async fn delete_backup(
    State(state): State<AppState>,
    Json(req): Json<BackupDeleteRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(session.delete_backup(client.id, req.backup_id).await?))
}

/// GET /backups/{id_or_name} - Lister toutes les sauvegardes d'un client.
pub async fn get_client_backups(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Vec<BackupRecord>> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    Ok(Json(session.get_client_backups(client.id).await?))
}

/// GET /backups/{id_or_name}/latest - Dernière sauvegarde réalisée.
pub async fn get_latest_backup(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<BackupRecord> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let backups = session.get_client_backups(client.id).await?;
    let latest = latest_backup(&backups)?;
    Ok(Json(latest.clone()))
}

/// GET /backups/{id_or_name}/{backup_id}/files - Fichiers d'une sauvegarde.
pub async fn list_files_in_backup(
    State(state): State<AppState>,
    Path((identifier, backup_id)): Path<(String, i64)>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let backup = locate_backup(session.as_ref(), &identifier, backup_id).await?;
    let files = list_backup_files(&backup);
    Ok(Json(json!({ "files": files })))
}

/// POST /backups/{id_or_name}/{backup_id}/restore - Restaurer une sauvegarde.
pub async fn restore_backup(
    State(state): State<AppState>,
    Path((identifier, backup_id)): Path<(String, i64)>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let backups = session.get_client_backups(client.id).await?;
    let backup = resolve_backup(&backups, client.id, backup_id)?;
    let result = session.restore_backup(client.id, backup.id).await?;
    Ok(Json(json!({
        "status": "restauration lancée",
        "resultat": result,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Chemin relatif du fichier à télécharger
    pub filepath: String,
}

/// GET /backups/{id_or_name}/{backup_id}/download - Télécharger un fichier.
///
/// Streams the file straight from disk; backups can be arbitrarily large
/// and must never be buffered whole.
pub async fn download_file_from_backup(
    State(state): State<AppState>,
    Path((identifier, backup_id)): Path<(String, i64)>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let session = open_session(&state).await?;
    let backup = locate_backup(session.as_ref(), &identifier, backup_id).await?;

    let root = backup
        .path
        .as_deref()
        .ok_or_else(|| ApiError::FileNotFound("Chemin de sauvegarde introuvable".to_string()))?;

    let target: PathBuf = FsPath::new(root).join(&query.filepath);
    let is_regular = tokio::fs::metadata(&target)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_regular {
        return Err(ApiError::FileNotFound("Fichier non trouvé".to_string()));
    }

    let filename = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fichier".to_string());

    let file = tokio::fs::File::open(&target)
        .await
        .map_err(|_| ApiError::FileNotFound("Fichier non trouvé".to_string()))?;

    let body = Body::from_stream(ReaderStream::new(file));
    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(body)
        .map_err(|e| ApiError::FileNotFound(e.to_string()))?;

    Ok(response)
}

/// Resolve a client reference and then one of its backups.
async fn locate_backup(
    session: &dyn BackupSession,
    identifier: &str,
    backup_id: i64,
) -> Result<BackupRecord, ApiError> {
    let client = resolve_client(session, &ClientRef::from_segment(identifier)).await?;
    let backups = session.get_client_backups(client.id).await?;
    let backup = resolve_backup(&backups, client.id, backup_id)?;
    Ok(backup.clone())
}
