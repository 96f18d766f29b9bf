use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{error::AppError, service::oauth::DiscordAuthService, state::AppState};

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// Authorization code from Discord SSO for token exchange. Absent when the
    /// user denied the authorization prompt.
    pub code: Option<String>,
}

/// GET / - Landing page pointing at the login route.
pub async fn home() -> impl IntoResponse {
    "OAuth app running. Go to /login to authenticate with Discord."
}

/// GET /login - Redirect to the Discord authorization URL.
///
/// # Returns
/// - `307 Temporary Redirect`: to Discord's consent screen carrying the client
///   id, redirect URI, response type, and scope
pub async fn login(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.http_client, &state.config);
    let url = auth_service.login_url()?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /callback - Exchange the authorization code and persist the credential.
///
/// Exchange failures are reported in-band: the response is always a rendered
/// page with status 200, so the user sees what happened instead of a generic
/// error page. Only storage failures surface as server errors, since they mean
/// the credential was not saved.
///
/// # Returns
/// - `200 OK`: confirmation with the resolved identity, or the rendered
///   exchange failure
/// - `500 Internal Server Error`: the credential could not be persisted
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    let auth_service = DiscordAuthService::new(&state.http_client, &state.config);

    let code = params.code.unwrap_or_default();
    let authorized = match auth_service.exchange(&code).await {
        Ok(authorized) => authorized,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth exchange failed");
            return Ok(Html(format!("<p>{}</p>", escape(&e.to_string()))).into_response());
        }
    };

    state
        .user_store
        .upsert(&authorized.id, authorized.record.clone())
        .await?;

    tracing::info!(
        user_id = %authorized.id,
        username = %authorized.record.username,
        "Authorized user saved"
    );

    Ok(Html(format!(
        "<h1>Authorized &amp; Saved:</h1><pre>{} ({})</pre>",
        escape(authorized.display_name()),
        escape(&authorized.id)
    ))
    .into_response())
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
