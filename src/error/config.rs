use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    #[error("Invalid value for environment variable {0}")]
    InvalidEnvVar(String),

    /// No target guild has been configured.
    ///
    /// Guild-join operations require a target guild id, set through the bot's
    /// `!setserver` command. Returned instead of a batch summary so callers can
    /// tell "nothing configured" apart from "nothing to do".
    #[error("No target guild configured")]
    GuildIdUnset,
}
