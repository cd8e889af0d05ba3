//! REST API module.
//!
//! Contains all route handlers, grouped by resource. Every handler follows
//! the same shape: validate, resolve, one backend call, shape, respond.

mod backups;
mod clients;
mod docs;
mod groups;
mod logs;
mod server;
mod settings;

pub use backups::*;
pub use clients::*;
pub use docs::*;
pub use groups::*;
pub use logs::*;
pub use server::*;
pub use settings::*;

use axum::Json;

use crate::backend::BackupSession;
use crate::errors::ApiError;
use crate::models::{ClientRecord, ClientRef};
use crate::AppState;

/// Handler result: a JSON body or a translated error.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Open a fresh backend session for the current request.
pub(crate) async fn open_session(state: &AppState) -> Result<Box<dyn BackupSession>, ApiError> {
    Ok(state.factory.open().await?)
}

/// Fetch the roster and resolve one client reference against it.
pub(crate) async fn resolve_client(
    session: &dyn BackupSession,
    reference: &ClientRef,
) -> Result<ClientRecord, ApiError> {
    let roster = session.get_clients().await?;
    let client = crate::resolve::resolve_client(&roster, reference)?;
    Ok(client.clone())
}
