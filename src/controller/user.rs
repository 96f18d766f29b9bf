use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{error::AppError, state::AppState};

/// GET /users - List every saved OAuth record.
///
/// Serves the credential document verbatim, access tokens included: this is an
/// operator-facing endpoint and must only be reachable inside the operator's
/// network boundary.
///
/// # Returns
/// - `200 OK`: JSON object mapping user id to saved record (empty object
///   before the first authorization)
/// - `500 Internal Server Error`: the credential document could not be read
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.user_store.load_all().await?;

    Ok((StatusCode::OK, Json(users)))
}
