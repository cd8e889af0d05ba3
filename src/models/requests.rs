//! Request bodies accepted by the mutating endpoints.

use serde::Deserialize;

use super::ClientRef;

/// Body designating one client, for backup triggers and the like.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupRequest {
    pub client: ClientRef,
}

/// Body for deleting one backup of one client.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupDeleteRequest {
    pub client: ClientRef,
    pub backup_id: i64,
}

/// Body for creating a client; the name is raw, never resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientCreateRequest {
    pub client: String,
}

/// Body for deleting a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDeleteRequest {
    pub client: ClientRef,
}

/// Body for renaming a client: the old reference is resolved, the new
/// value is a raw name.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRenameRequest {
    pub old: ClientRef,
    pub new: String,
}

/// Body for changing one client setting.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingChangeRequest {
    pub client: ClientRef,
    pub key: String,
    pub new_value: String,
}

/// Body for setting a client's storage quota.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaRequest {
    pub client: ClientRef,
    pub quota_bytes: i64,
}
