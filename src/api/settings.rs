//! Client settings, quota, used space, authkey and activity endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};

use super::{open_session, resolve_client, ApiResult};
use crate::models::{ClientRef, QuotaRequest, SettingChangeRequest};
use crate::resolve::used_space;
use crate::AppState;

/// GET /client/settings/{id_or_name} - Paramètres d'un client.
pub async fn get_client_settings(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Map<String, Value>> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    Ok(Json(session.get_client_settings(client.id).await?))
}

/// POST /client/settings/change - Modifier un paramètre d'un client.
pub async fn set_client_setting(
    State(state): State<AppState>,
    Json(req): Json<SettingChangeRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    Ok(Json(
        session
            .change_client_setting(client.id, &req.key, &req.new_value)
            .await?,
    ))
}

/// GET /client/authkey/{id_or_name} - Clé d'authentification d'un client.
pub async fn get_client_authkey(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let authkey = session.get_client_authkey(client.id).await?;
    Ok(Json(json!({ "authkey": authkey })))
}

/// GET /client/{id_or_name}/quota - Quota de stockage attribué à un client.
///
/// The quota is a specialized setting: settings["quota"]["value"], read as
/// an integer number of bytes when present.
pub async fn get_client_quota(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let settings = session.get_client_settings(client.id).await?;

    let quota_bytes = settings
        .get("quota")
        .and_then(|q| q.get("value"))
        .and_then(parse_bytes);

    Ok(Json(json!({
        "client": client.name,
        "quota_bytes": quota_bytes,
    })))
}

/// POST /client/quota - Définir le quota de stockage d'un client.
pub async fn set_client_quota(
    State(state): State<AppState>,
    Json(req): Json<QuotaRequest>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &req.client.normalized()).await?;
    let result = session
        .change_client_setting(client.id, "quota", &req.quota_bytes.to_string())
        .await?;
    Ok(Json(json!({ "result": result })))
}

/// GET /client/{id_or_name}/quota/history - Historique d'utilisation du quota.
pub async fn quota_history(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let history = session.get_quota_history(client.id).await?;
    Ok(Json(json!({ "historique_quota": history })))
}

/// GET /client/{id_or_name}/used_space - Espace occupé par les sauvegardes.
pub async fn get_client_used_space(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let backups = session.get_client_backups(client.id).await?;
    Ok(Json(json!({
        "client": client.name,
        "used_bytes": used_space(&backups),
    })))
}

/// GET /client/{id_or_name}/activity - Historique d'activité d'un client.
pub async fn client_activity(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Value> {
    let session = open_session(&state).await?;
    let client = resolve_client(session.as_ref(), &ClientRef::from_segment(&identifier)).await?;
    let activity = session.get_client_activity(client.id).await?;
    Ok(Json(json!({ "activité": activity })))
}

/// The backend reports quota values as numbers or numeric strings.
fn parse_bytes(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_number_and_string() {
        assert_eq!(parse_bytes(&json!(5000000)), Some(5000000));
        assert_eq!(parse_bytes(&json!("5000000")), Some(5000000));
        assert_eq!(parse_bytes(&json!(null)), None);
    }
}
