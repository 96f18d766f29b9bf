use thiserror::Error;

/// Failures while turning an authorization code into a stored credential.
///
/// Every variant is renderable: the OAuth callback reports these in-band to the
/// browser rather than surfacing a generic error page, so each one carries
/// enough context for a human-readable message.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The callback was hit without an authorization code.
    ///
    /// Checked before any network call is made.
    #[error("No authorization code provided")]
    MissingCode,

    /// The token endpoint did not yield an access token.
    ///
    /// Covers transport failures, unparseable responses, and structured error
    /// responses (e.g. `invalid_grant`). The raw response body is preserved
    /// verbatim for diagnostics.
    #[error("Error retrieving access token: {body}")]
    TokenExchangeFailed {
        /// Raw token endpoint response body, or the transport error text.
        body: String,
    },

    /// The current-user endpoint returned something other than a user identity.
    #[error("Error fetching user identity: {detail}")]
    IdentityFetchFailed {
        /// Raw identity response body, or the transport error text.
        detail: String,
    },
}
