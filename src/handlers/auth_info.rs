use axum::{
    extract::State,
    response::Json,
};
use tracing::debug;

use crate::middleware::auth::API_KEY_HEADER;
use crate::models::AuthInfoResponse;
use crate::state::AppState;

/// Describes the credential requirement without revealing the key, so
/// clients can discover how to authenticate and operators can verify
/// whether a deployment is still on the development default.
pub async fn auth_info_handler(State(state): State<AppState>) -> Json<AuthInfoResponse> {
    debug!("Auth info requested");

    Json(AuthInfoResponse {
        auth_required: true,
        header: API_KEY_HEADER.to_string(),
        dev_mode: state.gate.dev_mode(),
    })
}
