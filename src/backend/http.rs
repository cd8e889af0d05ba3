//! HTTP implementation of the backend capability interface.
//!
//! Speaks the UrBackup web API: every call is a form-encoded POST to the
//! configured base URL carrying an `a=<action>` selector and the session
//! token obtained at login. One factory `open()` performs one login; the
//! session is dropped with the request that opened it.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use super::{BackendError, BackupSession, SessionFactory};
use crate::config::Config;
use crate::models::{BackupRecord, ClientRecord};

/// Opens logged-in sessions against a real UrBackup server.
pub struct HttpSessionFactory {
    config: Arc<Config>,
    client: Client,
}

impl HttpSessionFactory {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    async fn open(&self) -> Result<Box<dyn BackupSession>, BackendError> {
        let params = [
            ("a", "login".to_string()),
            ("username", self.config.backend_user.clone()),
            ("password", self.config.backend_pass.clone()),
            ("plainpw", "1".to_string()),
        ];

        let resp: Value = self
            .client
            .post(&self.config.backend_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(BackendError::Auth(format!(
                "login refusé pour l'utilisateur '{}'",
                self.config.backend_user
            )));
        }

        let token = resp
            .get("session")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::Protocol("jeton de session absent".to_string()))?
            .to_string();

        tracing::debug!("Session UrBackup ouverte");

        Ok(Box::new(HttpSession {
            url: self.config.backend_url.clone(),
            client: self.client.clone(),
            token,
        }))
    }
}

struct HttpSession {
    url: String,
    client: Client,
    token: String,
}

impl HttpSession {
    async fn call(&self, action: &str, params: &[(&str, String)]) -> Result<Value, BackendError> {
        let mut form: Vec<(&str, String)> = vec![
            ("a", action.to_string()),
            ("ses", self.token.clone()),
        ];
        form.extend(params.iter().cloned());

        let resp = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = resp.json().await?;

        if let Some(err) = body.get("error").and_then(Value::as_str) {
            return Err(BackendError::Protocol(format!(
                "action '{action}' en erreur: {err}"
            )));
        }

        Ok(body)
    }

    /// Extract and deserialize an array field from an action's response.
    fn take_list<T: serde::de::DeserializeOwned>(
        body: Value,
        field: &str,
    ) -> Result<Vec<T>, BackendError> {
        let list = body
            .get(field)
            .cloned()
            .ok_or_else(|| BackendError::Protocol(format!("champ '{field}' absent")))?;
        serde_json::from_value(list)
            .map_err(|e| BackendError::Protocol(format!("champ '{field}' invalide: {e}")))
    }
}

#[async_trait]
impl BackupSession for HttpSession {
    async fn get_status(&self) -> Result<Value, BackendError> {
        self.call("status", &[]).await
    }

    async fn get_server_version(&self) -> Result<Value, BackendError> {
        let body = self.call("status", &[]).await?;
        Ok(body.get("server_version_str").cloned().unwrap_or(Value::Null))
    }

    async fn get_clients(&self) -> Result<Vec<ClientRecord>, BackendError> {
        let body = self.call("status", &[]).await?;
        Self::take_list(body, "status")
    }

    async fn add_client(&self, name: &str) -> Result<Value, BackendError> {
        self.call("add_client", &[("clientname", name.to_string())])
            .await
    }

    async fn remove_client(&self, client_id: i64) -> Result<Value, BackendError> {
        self.call("status", &[("remove_client", client_id.to_string())])
            .await
    }

    async fn rename_client(&self, client_id: i64, new_name: &str) -> Result<Value, BackendError> {
        self.call(
            "rename_client",
            &[
                ("clientid", client_id.to_string()),
                ("newname", new_name.to_string()),
            ],
        )
        .await
    }

    async fn get_client_backups(&self, client_id: i64) -> Result<Vec<BackupRecord>, BackendError> {
        let body = self
            .call(
                "backups",
                &[("sa", "backups".to_string()), ("clientid", client_id.to_string())],
            )
            .await?;
        Self::take_list(body, "backups")
    }

    async fn start_full_file_backup(&self, client_id: i64) -> Result<Value, BackendError> {
        self.call(
            "start_backup",
            &[
                ("start_client", client_id.to_string()),
                ("start_type", "full_file".to_string()),
            ],
        )
        .await
    }

    async fn start_full_image_backup(&self, client_id: i64) -> Result<Value, BackendError> {
        self.call(
            "start_backup",
            &[
                ("start_client", client_id.to_string()),
                ("start_type", "full_image".to_string()),
            ],
        )
        .await
    }

    async fn start_incremental_file_backup(
        &self,
        client_id: i64,
    ) -> Result<Value, BackendError> {
        self.call(
            "start_backup",
            &[
                ("start_client", client_id.to_string()),
                ("start_type", "incr_file".to_string()),
            ],
        )
        .await
    }

    async fn delete_backup(&self, client_id: i64, backup_id: i64) -> Result<Value, BackendError> {
        self.call(
            "backups",
            &[
                ("sa", "backup".to_string()),
                ("clientid", client_id.to_string()),
                ("backupid", backup_id.to_string()),
                ("delete_now", "1".to_string()),
            ],
        )
        .await
    }

    async fn restore_backup(&self, client_id: i64, backup_id: i64) -> Result<Value, BackendError> {
        self.call(
            "backups",
            &[
                ("sa", "restore".to_string()),
                ("clientid", client_id.to_string()),
                ("backupid", backup_id.to_string()),
            ],
        )
        .await
    }

    async fn get_client_settings(
        &self,
        client_id: i64,
    ) -> Result<Map<String, Value>, BackendError> {
        let body = self
            .call(
                "settings",
                &[
                    ("sa", "clientsettings".to_string()),
                    ("t_clientid", client_id.to_string()),
                ],
            )
            .await?;
        match body.get("settings") {
            Some(Value::Object(map)) => Ok(map.clone()),
            _ => Err(BackendError::Protocol("champ 'settings' absent".to_string())),
        }
    }

    async fn change_client_setting(
        &self,
        client_id: i64,
        key: &str,
        new_value: &str,
    ) -> Result<Value, BackendError> {
        self.call(
            "settings",
            &[
                ("sa", "clientsettings_save".to_string()),
                ("t_clientid", client_id.to_string()),
                (key, new_value.to_string()),
            ],
        )
        .await
    }

    async fn get_client_authkey(&self, client_id: i64) -> Result<Value, BackendError> {
        let settings = self.get_client_settings(client_id).await?;
        Ok(settings
            .get("internet_authkey")
            .and_then(|v| v.get("value"))
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn get_quota_history(&self, client_id: i64) -> Result<Value, BackendError> {
        self.call(
            "usagegraph",
            &[("t_clientid", client_id.to_string())],
        )
        .await
    }

    async fn get_client_activity(&self, client_id: i64) -> Result<Value, BackendError> {
        let body = self
            .call("progress", &[("clientid", client_id.to_string())])
            .await?;
        Ok(body.get("past_activities").cloned().unwrap_or(body))
    }

    async fn get_client_logs(&self, client_id: i64) -> Result<Value, BackendError> {
        self.call(
            "logs",
            &[("filter", client_id.to_string())],
        )
        .await
    }

    async fn get_groups(&self) -> Result<Value, BackendError> {
        let body = self
            .call("settings", &[("sa", "listgroups".to_string())])
            .await?;
        Ok(body.get("navitems").cloned().unwrap_or(body))
    }

    async fn get_group_clients(&self, group_id: &str) -> Result<Value, BackendError> {
        self.call(
            "settings",
            &[
                ("sa", "groupclients".to_string()),
                ("groupid", group_id.to_string()),
            ],
        )
        .await
    }

    async fn create_group(&self, group_name: &str) -> Result<Value, BackendError> {
        self.call(
            "settings",
            &[
                ("sa", "groupadd".to_string()),
                ("name", group_name.to_string()),
            ],
        )
        .await
    }

    async fn delete_group(&self, group_id: &str) -> Result<Value, BackendError> {
        self.call(
            "settings",
            &[
                ("sa", "groupremove".to_string()),
                ("id", group_id.to_string()),
            ],
        )
        .await
    }

    async fn get_schedules(&self) -> Result<Value, BackendError> {
        self.call("schedules", &[]).await
    }

    async fn create_schedule(&self, schedule: &Value) -> Result<Value, BackendError> {
        self.call(
            "schedules",
            &[
                ("sa", "add".to_string()),
                ("schedule", schedule.to_string()),
            ],
        )
        .await
    }

    async fn delete_schedule(&self, schedule_id: &str) -> Result<Value, BackendError> {
        self.call(
            "schedules",
            &[
                ("sa", "remove".to_string()),
                ("id", schedule_id.to_string()),
            ],
        )
        .await
    }

    async fn get_alerts(&self) -> Result<Value, BackendError> {
        self.call("alerts", &[]).await
    }

    async fn get_server_settings(&self) -> Result<Value, BackendError> {
        let body = self
            .call("settings", &[("sa", "general".to_string())])
            .await?;
        Ok(body.get("settings").cloned().unwrap_or(body))
    }

    async fn update_server_settings(&self, settings: &Value) -> Result<Value, BackendError> {
        self.call(
            "settings",
            &[
                ("sa", "general_save".to_string()),
                ("settings", settings.to_string()),
            ],
        )
        .await
    }
}
