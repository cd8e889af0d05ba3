//! Documentation endpoint, optionally gated by HTTP Basic credentials.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
};

use crate::auth::check_basic;
use crate::errors::ApiError;
use crate::AppState;

/// The rendered documentation page, embedded at build time.
const DOCS_HTML: &str = include_str!("docs.html");

/// GET /docs - Documentation de l'API, en français.
///
/// When an operator account is configured, the page is only served against
/// valid Basic credentials; anything else gets a 401 with a Basic challenge.
pub async fn documentation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<&'static str>, ApiError> {
    if let (Some(user), Some(pass)) = (&state.config.docs_user, &state.config.docs_pass) {
        check_basic(&headers, user, pass)?;
    }

    Ok(Html(DOCS_HTML))
}
