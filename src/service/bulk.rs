//! Bulk guild-join orchestration over the credential store.

use crate::{
    config::Config,
    data::{guild::GuildConfigStore, user::UserStore},
    error::{config::ConfigError, AppError},
    model::join::{BatchSummary, JoinFailure, MembershipResult},
    service::member::GuildMembershipService,
};

pub struct BulkJoinService<'a> {
    users: &'a UserStore,
    guild_config: &'a GuildConfigStore,
    http_client: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> BulkJoinService<'a> {
    pub fn new(
        users: &'a UserStore,
        guild_config: &'a GuildConfigStore,
        http_client: &'a reqwest::Client,
        config: &'a Config,
    ) -> Self {
        Self {
            users,
            guild_config,
            http_client,
            config,
        }
    }

    /// Attempts to add every stored user to the configured guild.
    ///
    /// Each stored credential is attempted exactly once, sequentially. A
    /// failure for one user never stops or skips the rest; the whole batch is
    /// safe to rerun since re-adding an existing member reports success.
    ///
    /// # Returns
    /// - `Ok(BatchSummary)` - Counts plus failure details; zero attempts for an
    ///   empty store
    /// - `Err(ConfigError::GuildIdUnset)` - No target guild configured, so no
    ///   work was performed (distinct from an empty batch)
    /// - `Err(StorageError)` - The credential snapshot could not be read
    pub async fn join_all(&self) -> Result<BatchSummary, AppError> {
        let guild_id = self
            .guild_config
            .get_guild_id()
            .await?
            .ok_or(ConfigError::GuildIdUnset)?;

        let records = self.users.list_all().await?;
        let membership = GuildMembershipService::new(self.http_client, self.config);

        let mut summary = BatchSummary::default();
        for (user_id, record) in records {
            summary.attempted += 1;

            match membership
                .join_guild(guild_id, &user_id, &record.access_token)
                .await
            {
                Ok(MembershipResult::Failed { status, body }) => {
                    summary.failed += 1;
                    let failure = JoinFailure {
                        user_id,
                        status: Some(status),
                        detail: body,
                    };
                    tracing::warn!(
                        user_id = %failure.user_id,
                        status,
                        detail = %failure.detail,
                        "Guild join rejected"
                    );
                    summary.failures.push(failure);
                }
                Ok(result) => {
                    summary.succeeded += 1;
                    tracing::debug!(
                        user_id = %user_id,
                        guild_id,
                        already_member = matches!(result, MembershipResult::AlreadyMember),
                        "User joined guild"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(user_id = %user_id, error = %e, "Guild join call failed");
                    summary.failures.push(JoinFailure {
                        user_id,
                        status: None,
                        detail: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            guild_id,
            "Bulk join finished"
        );

        Ok(summary)
    }

    /// Attempts to add a single stored user to the configured guild.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user to add
    ///
    /// # Returns
    /// - `Ok(MembershipResult)` - Outcome of the join call
    /// - `Err(ConfigError::GuildIdUnset)` - No target guild configured
    /// - `Err(AppError::NotFound)` - No stored credential for that id
    pub async fn join_one(&self, user_id: &str) -> Result<MembershipResult, AppError> {
        let guild_id = self
            .guild_config
            .get_guild_id()
            .await?
            .ok_or(ConfigError::GuildIdUnset)?;

        let record = self.users.get(user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("No OAuth record stored for user {user_id}"))
        })?;

        let membership = GuildMembershipService::new(self.http_client, self.config);
        let result = membership
            .join_guild(guild_id, user_id, &record.access_token)
            .await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::model::user::UserRecord;

    struct TestHarness {
        _dir: tempfile::TempDir,
        users: UserStore,
        guild_config: GuildConfigStore,
        http_client: reqwest::Client,
        config: Config,
    }

    fn harness(base: &str) -> TestHarness {
        let dir = tempfile::tempdir().unwrap();
        let users = UserStore::new(dir.path().join("users.json"));
        let guild_config = GuildConfigStore::new(dir.path().join("config.json"));
        let config = Config {
            discord_client_id: "client-id".to_string(),
            discord_client_secret: "client-secret".to_string(),
            discord_redirect_url: "http://localhost:5000/callback".to_string(),
            discord_bot_token: "bot-token".to_string(),
            discord_auth_url: format!("{base}/oauth2/authorize"),
            discord_token_url: format!("{base}/api/oauth2/token"),
            discord_api_base_url: base.to_string(),
            data_dir: dir.path().to_path_buf(),
            port: 0,
        };
        TestHarness {
            _dir: dir,
            users,
            guild_config,
            http_client: reqwest::Client::new(),
            config,
        }
    }

    fn record(username: &str, token: &str) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            global_name: None,
            access_token: token.to_string(),
        }
    }

    async fn stub_join(server: &MockServer, guild_id: u64, user_id: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(format!("/guilds/{guild_id}/members/{user_id}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    /// Tests the unset-guild guard.
    ///
    /// Verifies that join_all refuses to run without a configured guild and
    /// reports it as a configuration error, never as an empty summary.
    ///
    /// Expected: Err(ConfigError::GuildIdUnset)
    #[tokio::test]
    async fn join_all_without_guild_is_config_error() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.users.upsert("u1", record("a", "tok1")).await.unwrap();

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let err = service.join_all().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigErr(ConfigError::GuildIdUnset)
        ));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    /// Tests the legitimate empty batch.
    ///
    /// Verifies that a configured guild with no stored credentials yields a
    /// zero-attempt summary rather than an error.
    ///
    /// Expected: Ok with attempted/succeeded/failed all zero
    #[tokio::test]
    async fn join_all_with_empty_store_is_empty_summary() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.guild_config.set_guild_id(42).await.unwrap();

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let summary = service.join_all().await.unwrap();
        assert_eq!(summary, BatchSummary::default());
    }

    /// Tests partial-failure accounting across a mixed batch.
    ///
    /// Verifies the defining contract: with guild 42 configured, u1 answered
    /// 204 and u2 answered 403, the batch attempts both users, counts one
    /// success and one failure, and retains the failure detail for u2 only.
    ///
    /// Expected: Ok with attempted 2, succeeded 1, failed 1, failures [u2]
    #[tokio::test]
    async fn join_all_accumulates_mixed_outcomes() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.guild_config.set_guild_id(42).await.unwrap();
        h.users.upsert("u1", record("a", "tok1")).await.unwrap();
        h.users.upsert("u2", record("b", "tok2")).await.unwrap();

        stub_join(&server, 42, "u1", 204).await;
        stub_join(&server, 42, "u2", 403).await;

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let summary = service.join_all().await.unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        let failed_ids: Vec<&str> = summary
            .failures
            .iter()
            .map(|f| f.user_id.as_str())
            .collect();
        assert_eq!(failed_ids, vec!["u2"]);
        assert_eq!(summary.failures[0].status, Some(403));
    }

    /// Tests that one failure never stops the batch.
    ///
    /// Verifies that with three stored users and the middle one stubbed to
    /// fail, every user is attempted exactly once and the counts add up.
    ///
    /// Expected: Ok with succeeded 2, failed 1, and three observed calls
    #[tokio::test]
    async fn join_all_continues_past_failures() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.guild_config.set_guild_id(42).await.unwrap();
        h.users.upsert("u1", record("a", "tok1")).await.unwrap();
        h.users.upsert("u2", record("b", "tok2")).await.unwrap();
        h.users.upsert("u3", record("c", "tok3")).await.unwrap();

        stub_join(&server, 42, "u1", 201).await;
        stub_join(&server, 42, "u2", 500).await;
        stub_join(&server, 42, "u3", 204).await;

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let summary = service.join_all().await.unwrap();

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    /// Tests the single-user join against a stored credential.
    ///
    /// Expected: Ok(Added)
    #[tokio::test]
    async fn join_one_adds_stored_user() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.guild_config.set_guild_id(42).await.unwrap();
        h.users.upsert("u1", record("a", "tok1")).await.unwrap();
        stub_join(&server, 42, "u1", 201).await;

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let result = service.join_one("u1").await.unwrap();
        assert_eq!(result, MembershipResult::Added);
    }

    /// Tests the single-user join for an unknown user.
    ///
    /// Verifies that a user with no stored credential is reported as not
    /// found without any join call being made.
    ///
    /// Expected: Err(NotFound) and no recorded requests
    #[tokio::test]
    async fn join_one_unknown_user_is_not_found() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.guild_config.set_guild_id(42).await.unwrap();

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let err = service.join_one("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    /// Tests the single-user join without a configured guild.
    ///
    /// Expected: Err(ConfigError::GuildIdUnset)
    #[tokio::test]
    async fn join_one_without_guild_is_config_error() {
        let server = MockServer::start().await;
        let h = harness(&server.uri());

        h.users.upsert("u1", record("a", "tok1")).await.unwrap();

        let service = BulkJoinService::new(&h.users, &h.guild_config, &h.http_client, &h.config);
        let err = service.join_one("u1").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigErr(ConfigError::GuildIdUnset)
        ));
    }
}
