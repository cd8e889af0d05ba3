//! Log endpoints: structured client logs, server log tailing, log search.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::AsyncBufReadExt;
use tokio_util::io::ReaderStream;

use super::{open_session, resolve_client, ApiResult};
use crate::errors::ApiError;
use crate::models::ClientRef;
use crate::AppState;

/// GET /logs/{id_or_name} - Logs structurés d'un client via le serveur.
pub async fn get_client_logs(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    Ok(Json(session.get_client_logs(client.id).await?))
}

/// GET /logs/server - Log global du serveur, streamé ligne à ligne.
///
/// The file can be large; it is streamed, never loaded whole.
pub async fn get_server_logs(State(state): State<AppState>) -> Result<Response, ApiError> {
    let log_path = &state.config.server_log;

    let file = tokio::fs::File::open(log_path)
        .await
        .map_err(|_| ApiError::FileNotFound("Fichier log introuvable".to_string()))?;

    let body = Body::from_stream(ReaderStream::new(file));
    let response = Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .map_err(|e| ApiError::FileNotFound(e.to_string()))?;

    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Texte à rechercher (sous-chaîne, insensible à la casse)
    pub query: String,
}

/// GET /logs/{id_or_name}/search - Recherche dans le log d'un client.
pub async fn search_logs_client(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Value> {
    let log_path = state.config.client_log_path(&identifier);

    let file = tokio::fs::File::open(&log_path)
        .await
        .map_err(|_| ApiError::FileNotFound("Fichier log du client introuvable".to_string()))?;

    let needle = search.query.to_lowercase();
    let mut results = Vec::new();
    let mut lines = tokio::io::BufReader::new(file).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.to_lowercase().contains(&needle) {
            results.push(line.trim_end().to_string());
        }
    }

    Ok(Json(json!({ "results": results })))
}
