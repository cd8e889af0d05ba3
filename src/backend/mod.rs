//! Backend capability interface.
//!
//! Everything the proxy knows how to do is one call into a [`BackupSession`].
//! Sessions are opened fresh for every request through a [`SessionFactory`]
//! injected into the application state, so tests can swap in a fake backend
//! without touching the handlers.

mod http;

pub use http::HttpSessionFactory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{BackupRecord, ClientRecord};

/// Errors surfaced by the backend client.
///
/// The proxy makes no transient/permanent distinction and never retries;
/// every variant translates to a 500 except where the health endpoint
/// captures it.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Failed to reach the UrBackup server
    #[error("Connexion au serveur UrBackup impossible: {0}")]
    Connection(#[from] reqwest::Error),

    /// The server refused the configured credentials
    #[error("Authentification UrBackup refusée: {0}")]
    Auth(String),

    /// The server answered with something other than the expected shape
    #[error("Réponse UrBackup invalide: {0}")]
    Protocol(String),
}

/// Opens authenticated backend sessions, one per request.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn BackupSession>, BackendError>;
}

/// One authenticated conversation with the UrBackup server.
///
/// Roster-returning calls are typed so the resolver can work on them;
/// everything else passes the backend's JSON through verbatim.
#[async_trait]
pub trait BackupSession: Send + Sync {
    async fn get_status(&self) -> Result<Value, BackendError>;
    async fn get_server_version(&self) -> Result<Value, BackendError>;

    async fn get_clients(&self) -> Result<Vec<ClientRecord>, BackendError>;
    async fn add_client(&self, name: &str) -> Result<Value, BackendError>;
    async fn remove_client(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn rename_client(&self, client_id: i64, new_name: &str) -> Result<Value, BackendError>;

    async fn get_client_backups(&self, client_id: i64) -> Result<Vec<BackupRecord>, BackendError>;
    async fn start_full_file_backup(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn start_full_image_backup(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn start_incremental_file_backup(&self, client_id: i64)
        -> Result<Value, BackendError>;
    async fn delete_backup(&self, client_id: i64, backup_id: i64) -> Result<Value, BackendError>;
    async fn restore_backup(&self, client_id: i64, backup_id: i64) -> Result<Value, BackendError>;

    async fn get_client_settings(
        &self,
        client_id: i64,
    ) -> Result<Map<String, Value>, BackendError>;
    async fn change_client_setting(
        &self,
        client_id: i64,
        key: &str,
        new_value: &str,
    ) -> Result<Value, BackendError>;
    async fn get_client_authkey(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn get_quota_history(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn get_client_activity(&self, client_id: i64) -> Result<Value, BackendError>;
    async fn get_client_logs(&self, client_id: i64) -> Result<Value, BackendError>;

    async fn get_groups(&self) -> Result<Value, BackendError>;
    async fn get_group_clients(&self, group_id: &str) -> Result<Value, BackendError>;
    async fn create_group(&self, group_name: &str) -> Result<Value, BackendError>;
    async fn delete_group(&self, group_id: &str) -> Result<Value, BackendError>;

    async fn get_schedules(&self) -> Result<Value, BackendError>;
    async fn create_schedule(&self, schedule: &Value) -> Result<Value, BackendError>;
    async fn delete_schedule(&self, schedule_id: &str) -> Result<Value, BackendError>;

    async fn get_alerts(&self) -> Result<Value, BackendError>;
    async fn get_server_settings(&self) -> Result<Value, BackendError>;
    async fn update_server_settings(&self, settings: &Value) -> Result<Value, BackendError>;
}
