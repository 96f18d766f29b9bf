//! OAuth2 login with Discord.

use serde::Deserialize;
use url::Url;

use crate::{
    config::Config,
    error::{exchange::ExchangeError, AppError},
    model::user::{AuthorizedUser, UserRecord},
};

const OAUTH_SCOPE: &str = "identify guilds.join";

/// Token endpoint response. Discord error responses carry no `access_token`
/// field and therefore fail to parse, which is the failure signal.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Identity returned by the current-user endpoint.
#[derive(Deserialize)]
struct DiscordProfile {
    id: String,
    username: String,
    global_name: Option<String>,
}

pub struct DiscordAuthService<'a> {
    http_client: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, config: &'a Config) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Builds the Discord authorization URL the login route redirects to.
    pub fn login_url(&self) -> Result<Url, AppError> {
        Url::parse_with_params(
            &self.config.discord_auth_url,
            [
                ("client_id", self.config.discord_client_id.as_str()),
                ("redirect_uri", self.config.discord_redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", OAUTH_SCOPE),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Invalid authorization URL: {e}")))
    }

    /// Exchanges an authorization code for a verified credential record.
    ///
    /// Makes exactly two outbound calls: a form-encoded POST to the token
    /// endpoint, then a Bearer GET of the current-user endpoint. No retries,
    /// and no storage side effect; persisting the result is the caller's job,
    /// which keeps this independently testable against a stubbed transport.
    ///
    /// # Arguments
    /// - `code` - Authorization code from the OAuth redirect
    ///
    /// # Returns
    /// - `Ok(AuthorizedUser)` - Resolved identity plus the record to persist
    /// - `Err(ExchangeError)` - Renderable failure; never an unhandled fault
    pub async fn exchange(&self, code: &str) -> Result<AuthorizedUser, ExchangeError> {
        if code.is_empty() {
            return Err(ExchangeError::MissingCode);
        }

        let access_token = self.fetch_access_token(code).await?;
        let profile = self.fetch_discord_user(&access_token).await?;

        Ok(AuthorizedUser {
            id: profile.id,
            record: UserRecord {
                username: profile.username,
                global_name: profile.global_name,
                access_token,
            },
        })
    }

    /// Exchanges the code at the token endpoint.
    ///
    /// Any outcome that does not produce a non-empty access token is reported
    /// as `TokenExchangeFailed` carrying the raw response body.
    async fn fetch_access_token(&self, code: &str) -> Result<String, ExchangeError> {
        let params = [
            ("client_id", self.config.discord_client_id.as_str()),
            ("client_secret", self.config.discord_client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.discord_redirect_url.as_str()),
        ];

        let body = self
            .http_client
            .post(&self.config.discord_token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ExchangeError::TokenExchangeFailed {
                body: e.to_string(),
            })?
            .text()
            .await
            .map_err(|e| ExchangeError::TokenExchangeFailed {
                body: e.to_string(),
            })?;

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(token) if !token.access_token.is_empty() => Ok(token.access_token),
            _ => Err(ExchangeError::TokenExchangeFailed { body }),
        }
    }

    /// Retrieves the authorizing user's identity with the freshly issued token.
    async fn fetch_discord_user(&self, access_token: &str) -> Result<DiscordProfile, ExchangeError> {
        let body = self
            .http_client
            .get(format!(
                "{}/users/@me",
                self.config.discord_api_base_url
            ))
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| ExchangeError::IdentityFetchFailed {
                detail: e.to_string(),
            })?
            .text()
            .await
            .map_err(|e| ExchangeError::IdentityFetchFailed {
                detail: e.to_string(),
            })?;

        serde_json::from_str(&body)
            .map_err(|_| ExchangeError::IdentityFetchFailed { detail: body })
    }
}
