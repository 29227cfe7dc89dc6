//! OAuth 1.0 PLAINTEXT authorization.
//!
//! The PLAINTEXT signature method (RFC 5849 §3.4.4) sends the two secrets
//! joined by `&` as the signature itself, so constructing the
//! `Authorization` header is pure string formatting. TLS provides the
//! confidentiality; nothing here hashes or signs.

use cubby_core::encode::percent_encode_rfc5849;
use cubby_core::{Error, Result};
use http::HeaderValue;

use crate::credential::Credentials;

/// Render the `Authorization` header value for a request signed by
/// `client` (the application) on behalf of `signing` (the token holder).
///
/// While no token exists yet — the temporary-credentials request — pass
/// `None`: the `oauth_token` pair is omitted and the signature ends in a
/// bare `&` (empty token secret). All dynamic values are percent-encoded
/// per RFC 5849 §3.6.
pub fn authorization_header(client: &Credentials, signing: Option<&Credentials>) -> String {
    match signing {
        Some(signing) => format!(
            "OAuth oauth_version=\"1.0\", \
             oauth_signature_method=\"PLAINTEXT\", \
             oauth_consumer_key=\"{}\", \
             oauth_token=\"{}\", \
             oauth_signature=\"{}&{}\"",
            percent_encode_rfc5849(client.key()),
            percent_encode_rfc5849(signing.key()),
            percent_encode_rfc5849(client.secret()),
            percent_encode_rfc5849(signing.secret()),
        ),
        None => format!(
            "OAuth oauth_version=\"1.0\", \
             oauth_signature_method=\"PLAINTEXT\", \
             oauth_consumer_key=\"{}\", \
             oauth_signature=\"{}&\"",
            percent_encode_rfc5849(client.key()),
            percent_encode_rfc5849(client.secret()),
        ),
    }
}

/// The client's authorization state.
///
/// A client starts `Unauthenticated` and moves to `Authenticated` at most
/// once, when token credentials are set; every other transition attempt is a
/// contract violation, not a retryable condition.
#[derive(Debug, Clone)]
pub(crate) enum AuthState {
    Unauthenticated,
    Authenticated(HeaderValue),
}

impl AuthState {
    /// Transition `Unauthenticated` -> `Authenticated`.
    pub(crate) fn authenticate(&mut self, header: HeaderValue) -> Result<()> {
        match self {
            AuthState::Unauthenticated => {
                *self = AuthState::Authenticated(header);
                Ok(())
            }
            AuthState::Authenticated(_) => {
                Err(Error::state_invalid("token credentials already set"))
            }
        }
    }

    /// The authorization header for signed calls.
    pub(crate) fn header(&self) -> Result<&HeaderValue> {
        match self {
            AuthState::Authenticated(header) => Ok(header),
            AuthState::Unauthenticated => Err(Error::state_invalid(
                "token credentials not set; authenticate first",
            )),
        }
    }
}
