use std::fmt::{Debug, Formatter};

use cubby_core::{encode::parse_form, utils::Redact, Error, Result};

/// An OAuth 1.0 key/secret pair.
///
/// The same type carries the application (consumer) identity and the token
/// identity; which role a pair plays depends on where it is used. Instances
/// are immutable and compare by value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Create a new credential pair.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Parse a pair from an `application/x-www-form-urlencoded` response
    /// body carrying `oauth_token` and `oauth_token_secret`, percent-decoding
    /// both values. Any other fields (such as `uid`) are ignored.
    pub fn from_form(body: &str) -> Result<Self> {
        let mut token = None;
        let mut secret = None;
        for (name, value) in parse_form(body) {
            match name.as_str() {
                "oauth_token" => token = Some(value),
                "oauth_token_secret" => secret = Some(value),
                _ => {}
            }
        }
        match (token, secret) {
            (Some(key), Some(secret)) => Ok(Self { key, secret }),
            _ => Err(Error::credential_invalid(
                "response carries no oauth_token/oauth_token_secret pair",
            )),
        }
    }

    /// The key (identifier) half of the pair.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The secret half of the pair.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}
