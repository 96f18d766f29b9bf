//! Guild membership calls against the Discord REST API.

use crate::{config::Config, model::join::MembershipResult};

pub struct GuildMembershipService<'a> {
    http_client: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> GuildMembershipService<'a> {
    pub fn new(http_client: &'a reqwest::Client, config: &'a Config) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Adds a user to a guild on their behalf.
    ///
    /// Issues a single PUT to the guild-members endpoint with bot-level
    /// authorization and the user's access token in the JSON body. No retries
    /// and no timeout beyond the transport default.
    ///
    /// # Arguments
    /// - `guild_id` - Target guild
    /// - `user_id` - Discord id of the user to add
    /// - `access_token` - The user's saved OAuth token (`guilds.join` scope)
    ///
    /// # Returns
    /// - `Ok(MembershipResult)` - Discord answered; 200/201/204 are success
    /// - `Err(reqwest::Error)` - The call never produced a response
    pub async fn join_guild(
        &self,
        guild_id: u64,
        user_id: &str,
        access_token: &str,
    ) -> Result<MembershipResult, reqwest::Error> {
        let url = format!(
            "{}/guilds/{}/members/{}",
            self.config.discord_api_base_url, guild_id, user_id
        );

        let response = self
            .http_client
            .put(url)
            .header(
                "Authorization",
                format!("Bot {}", self.config.discord_bot_token),
            )
            .json(&serde_json::json!({ "access_token": access_token }))
            .send()
            .await?;

        let status = response.status().as_u16();
        match status {
            200 | 201 => Ok(MembershipResult::Added),
            // 204 means the user was already a member; the desired end state
            // is reached either way.
            204 => Ok(MembershipResult::AlreadyMember),
            _ => {
                let body = response.text().await?;
                Ok(MembershipResult::Failed { status, body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(base: &str) -> Config {
        Config {
            discord_client_id: "client-id".to_string(),
            discord_client_secret: "client-secret".to_string(),
            discord_redirect_url: "http://localhost:5000/callback".to_string(),
            discord_bot_token: "bot-token".to_string(),
            discord_auth_url: format!("{base}/oauth2/authorize"),
            discord_token_url: format!("{base}/api/oauth2/token"),
            discord_api_base_url: base.to_string(),
            data_dir: PathBuf::from("."),
            port: 0,
        }
    }

    /// Tests the join call shape and the 201 success mapping.
    ///
    /// Verifies the PUT goes to the guild-members path for (guild, user) with
    /// bot authorization, and that 201 maps to Added.
    ///
    /// Expected: Ok(Added)
    #[tokio::test]
    async fn join_maps_201_to_added() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/guilds/42/members/u1"))
            .and(header("Authorization", "Bot bot-token"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let http_client = reqwest::Client::new();
        let service = GuildMembershipService::new(&http_client, &config);

        let result = service.join_guild(42, "u1", "tok1").await.unwrap();
        assert_eq!(result, MembershipResult::Added);
    }

    /// Tests the already-a-member mapping.
    ///
    /// Verifies that 204 is modeled as success, since the desired end state
    /// (user is a member) is already achieved.
    ///
    /// Expected: Ok(AlreadyMember)
    #[tokio::test]
    async fn join_maps_204_to_already_member() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/guilds/42/members/u1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let http_client = reqwest::Client::new();
        let service = GuildMembershipService::new(&http_client, &config);

        let result = service.join_guild(42, "u1", "tok1").await.unwrap();
        assert_eq!(result, MembershipResult::AlreadyMember);
        assert!(result.is_success());
    }

    /// Tests the failure mapping keeps status and body verbatim.
    ///
    /// Verifies that a non-2xx response is reported as Failed with the exact
    /// status code and response body, uninterpreted.
    ///
    /// Expected: Ok(Failed) with status 403 and the body preserved
    #[tokio::test]
    async fn join_preserves_failure_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/guilds/42/members/u2"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"message":"Missing Access"}"#),
            )
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let http_client = reqwest::Client::new();
        let service = GuildMembershipService::new(&http_client, &config);

        let result = service.join_guild(42, "u2", "tok2").await.unwrap();
        assert_eq!(
            result,
            MembershipResult::Failed {
                status: 403,
                body: r#"{"message":"Missing Access"}"#.to_string(),
            }
        );
        assert!(!result.is_success());
    }

    /// Tests that the user's access token travels in the JSON body.
    ///
    /// Expected: Ok with the stub matching on the serialized token field
    #[tokio::test]
    async fn join_sends_access_token_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/guilds/7/members/u9"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({ "access_token": "secret-tok" }),
            ))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let http_client = reqwest::Client::new();
        let service = GuildMembershipService::new(&http_client, &config);

        let result = service.join_guild(7, "u9", "secret-tok").await.unwrap();
        assert!(result.is_success());
    }
}
