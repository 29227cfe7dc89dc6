use std::fmt::{Debug, Formatter};

use cubby_core::{utils::Redact, Context};

use crate::constants::*;
use crate::credential::Credentials;

/// Config carries all the configuration for the Cubby client.
#[derive(Clone, Default)]
pub struct Config {
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CUBBY_APP_KEY`]
    pub app_key: Option<String>,
    /// `app_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CUBBY_APP_SECRET`]
    pub app_secret: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CUBBY_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `access_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CUBBY_ACCESS_SECRET`]
    pub access_secret: Option<String>,
    /// Language sent with every request as the `locale` parameter.
    ///
    /// Defaults to `"en"`.
    pub language: Option<String>,
    /// Root collection scoping metadata and content paths.
    ///
    /// Defaults to `"sandbox"`.
    pub root: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set app_key
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Set app_secret
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set access_secret
    pub fn with_access_secret(mut self, access_secret: impl Into<String>) -> Self {
        self.access_secret = Some(access_secret.into());
        self
    }

    /// Set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set root collection
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Load config from env. Explicit values win over environment values.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CUBBY_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CUBBY_APP_SECRET) {
            self.app_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CUBBY_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CUBBY_ACCESS_SECRET) {
            self.access_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CUBBY_LANGUAGE) {
            self.language.get_or_insert(v);
        }

        self
    }

    /// The application (consumer) credentials, when both halves are present.
    pub(crate) fn client_credentials(&self) -> Option<Credentials> {
        match (&self.app_key, &self.app_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
            _ => None,
        }
    }

    /// The long-lived token credentials, when both halves are present.
    pub(crate) fn token_credentials(&self) -> Option<Credentials> {
        match (&self.access_key, &self.access_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
            _ => None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_key", &self.app_key.as_ref().map(Redact::from))
            .field("app_secret", &self.app_secret.as_ref().map(Redact::from))
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field(
                "access_secret",
                &self.access_secret.as_ref().map(Redact::from),
            )
            .field("language", &self.language)
            .field("root", &self.root)
            .finish()
    }
}
