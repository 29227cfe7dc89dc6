//! The `Cubby` client facade.
//!
//! All service operations are issued through this type. A client is cheap to
//! construct and meant to be short-lived: create one, use it from a single
//! caller, throw it away. It is not meant to be shared or pooled — the
//! authorization state evolves with the instance.

use cubby_core::{Context, Error, Request, RequestBuilder, Result};
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method, Uri};

use crate::account::Account;
use crate::auth::{authorization_header, AuthState};
use crate::config::Config;
use crate::constants::*;
use crate::credential::Credentials;
use crate::delta::DeltaPage;
use crate::download::{FilesGet, ThumbFormat, ThumbSize};
use crate::entry::Entry;
use crate::json::{as_string, parse_list, parse_map};
use crate::upload::{FilesPut, UploadMode};

/// Client for the Cubby file storage REST API.
///
/// The service uses the OAuth 1.0 protocol (RFC 5849) with the PLAINTEXT
/// signature method. A freshly created client can only run the
/// authentication flow; once token credentials are set (from configuration
/// or via [`set_token_credentials`](Cubby::set_token_credentials)), all
/// other operations become available.
///
/// ## Example
///
/// ```no_run
/// use cubby::{Config, Context, Cubby};
/// use cubby_http_send_reqwest::ReqwestHttpSend;
///
/// # async fn example() -> cubby::Result<()> {
/// let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
/// let config = Config::new()
///     .with_app_key("app-key")
///     .with_app_secret("app-secret")
///     .with_access_key("access-key")
///     .with_access_secret("access-secret");
/// let cubby = Cubby::from_config(ctx, &config)?;
///
/// let account = cubby.account_info().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cubby {
    ctx: Context,
    client_credentials: Credentials,
    auth: AuthState,
    language: String,
    root: String,
}

impl Cubby {
    /// Create a new unauthenticated client from the application (consumer)
    /// credentials. Token credentials must be obtained through the
    /// authentication flow and applied with
    /// [`set_token_credentials`](Cubby::set_token_credentials).
    pub fn new(ctx: Context, client_credentials: Credentials) -> Self {
        Self {
            ctx,
            client_credentials,
            auth: AuthState::Unauthenticated,
            language: DEFAULT_LANGUAGE.to_string(),
            root: DEFAULT_ROOT.to_string(),
        }
    }

    /// Create a client from a [`Config`]. The application credentials are
    /// mandatory; token credentials are applied when both halves are
    /// present.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let client_credentials = config
            .client_credentials()
            .ok_or_else(|| Error::config_invalid("app_key and app_secret are required"))?;

        let mut cubby = Self::new(ctx, client_credentials);
        if let Some(language) = &config.language {
            cubby.language = language.clone();
        }
        if let Some(root) = &config.root {
            cubby.root = root.clone();
        }
        if let Some(token) = config.token_credentials() {
            cubby.set_token_credentials(&token)?;
        }
        Ok(cubby)
    }

    /// Configure the language sent as the `locale` parameter of every
    /// request. Default is `"en"`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The configured language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set the token credentials, as returned by
    /// [`request_token_credentials`](Cubby::request_token_credentials).
    /// This is allowed exactly once per client; a second attempt fails with
    /// [`ErrorKind::StateInvalid`](cubby_core::ErrorKind::StateInvalid).
    pub fn set_token_credentials(&mut self, token_credentials: &Credentials) -> Result<()> {
        let header = sensitive_header(authorization_header(
            &self.client_credentials,
            Some(token_credentials),
        ))?;
        self.auth.authenticate(header)
    }

    // Authentication ======================================================

    /// First step of the OAuth 1.0 flow: the temporary-credentials request.
    /// Only the application credentials sign this call; the signature
    /// carries an empty token secret.
    pub async fn request_temporary_credentials(&self) -> Result<Credentials> {
        let header = sensitive_header(authorization_header(&self.client_credentials, None))?;
        let response = self
            .request(Method::GET, API_HOST, "/oauth/request_token")
            .with_header_value(AUTHORIZATION, header)
            .as_string(&self.ctx)
            .await?;
        Credentials::from_form(&response)
    }

    /// Second step of the OAuth 1.0 flow: the resource-owner authorization
    /// URL. Send the user's browser there; once they approve, finish with
    /// [`request_token_credentials`](Cubby::request_token_credentials).
    /// Performs no I/O.
    pub fn authorization_url(&self, temporary_credentials: &Credentials) -> Result<Uri> {
        self.request(Method::GET, API_HOST, "/oauth/authorize")
            .with_parameter("oauth_token", Some(temporary_credentials.key()))
            .url()
    }

    /// Third step of the OAuth 1.0 flow: the token-credentials request,
    /// signed with the application and temporary credentials. Returns the
    /// long-lived token credentials. A `uid` field in the response is
    /// ignored; use [`account_info`](Cubby::account_info) for identity.
    pub async fn request_token_credentials(
        &self,
        temporary_credentials: &Credentials,
    ) -> Result<Credentials> {
        let header = sensitive_header(authorization_header(
            &self.client_credentials,
            Some(temporary_credentials),
        ))?;
        let response = self
            .request(Method::GET, API_HOST, "/oauth/access_token")
            .with_header_value(AUTHORIZATION, header)
            .as_string(&self.ctx)
            .await?;
        Credentials::from_form(&response)
    }

    // Account =============================================================

    /// Retrieve information about the user's account.
    pub async fn account_info(&self) -> Result<Account> {
        let response = self
            .signed_request(Method::GET, API_HOST, "/account/info")?
            .as_string(&self.ctx)
            .await?;
        Account::from_json(&parse_map(&response)?)
    }

    // Files and metadata ==================================================

    /// Download a file.
    ///
    /// ```no_run
    /// # async fn example(cubby: &cubby::Cubby) -> cubby::Result<()> {
    /// let size = cubby
    ///     .files_get("/reports/q3.pdf")
    ///     .with_range(0, 65535)
    ///     .to_file("q3-head.pdf")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn files_get(&self, path: &str) -> FilesGet<'_> {
        FilesGet::new(self, path)
    }

    /// Upload a file in one request using PUT semantics. Payloads beyond the
    /// single-request ceiling should use
    /// [`chunked_upload`](Cubby::chunked_upload) instead.
    pub fn files_put(&self, path: &str) -> FilesPut<'_> {
        FilesPut::new(self, path, UploadMode::Single)
    }

    /// Upload a file as a sequence of bounded chunks followed by a commit.
    /// The default chunk size is 4 MiB; see
    /// [`with_chunk_size`](FilesPut::with_chunk_size).
    pub fn chunked_upload(&self, path: &str) -> FilesPut<'_> {
        FilesPut::new(self, path, UploadMode::chunked_default())
    }

    /// Retrieve file or folder metadata.
    pub fn metadata(&self, path: &str) -> Metadata<'_> {
        Metadata {
            client: self,
            path: path.to_string(),
            file_limit: 25000,
            hash: None,
            list: false,
            rev: None,
        }
    }

    /// Return a page of delta entries: instructions on how to update your
    /// local state to match the server's state.
    ///
    /// Pass `None` on the first call; on subsequent calls pass the
    /// [`cursor`](DeltaPage::cursor) returned by the previous page.
    pub async fn delta(&self, cursor: Option<&str>) -> Result<DeltaPage> {
        let response = self
            .signed_request(Method::POST, API_HOST, "/delta")?
            .with_parameter("cursor", cursor)
            .as_string(&self.ctx)
            .await?;
        DeltaPage::from_json(&parse_map(&response)?)
    }

    /// Obtain metadata for previous revisions of a file. `limit` caps the
    /// number of revisions reported (service default 10, maximum 1000).
    pub async fn revisions(&self, path: &str, limit: u32) -> Result<Vec<Entry>> {
        let response = self
            .signed_request(
                Method::GET,
                API_HOST,
                &self.scoped_path("revisions", path),
            )?
            .with_parameter("rev_limit", Some(limit))
            .as_string(&self.ctx)
            .await?;
        parse_list(&response)?
            .iter()
            .filter(|value| !value.is_null())
            .map(|value| match value.as_object() {
                Some(map) => Entry::from_json(map),
                None => Err(Error::response_invalid(format!(
                    "revision entry is not an object: {value}"
                ))),
            })
            .collect()
    }

    /// Return a public link directly to a file, bypassing the service's
    /// preview pages so the content can be streamed.
    pub async fn media(&self, path: &str) -> Result<String> {
        let response = self
            .signed_request(Method::POST, API_HOST, &self.scoped_path("media", path))?
            .as_string(&self.ctx)
            .await?;
        as_string(&parse_map(&response)?, "url")?
            .ok_or_else(|| Error::response_invalid("media response carries no 'url'"))
    }

    /// Fetch a thumbnail for an image and write it to `out`. Returns the
    /// bytes written. Images over 20 MB are not converted by the service.
    pub async fn thumbnail(
        &self,
        path: &str,
        size: ThumbSize,
        format: ThumbFormat,
        out: &mut dyn std::io::Write,
    ) -> Result<u64> {
        self.signed_request(
            Method::GET,
            CONTENT_HOST,
            &self.scoped_path("thumbnails", path),
        )?
        .with_parameter("size", Some(size.api_value()))
        .with_parameter("format", Some(format.api_value()))
        .to_writer(&self.ctx, out)
        .await
    }

    // File operations =====================================================

    /// Copy a file or folder to a new location.
    pub async fn copy(&self, from_path: &str, to_path: &str) -> Result<Entry> {
        self.fileops("copy", from_path, Some(to_path)).await
    }

    /// Move a file or folder to a new location.
    pub async fn move_(&self, from_path: &str, to_path: &str) -> Result<Entry> {
        self.fileops("move", from_path, Some(to_path)).await
    }

    /// Delete a file or folder. Deleting a path that does not exist is a
    /// service error (404), surfaced like any other transport failure.
    pub async fn delete(&self, path: &str) -> Result<Entry> {
        self.fileops("delete", path, None).await
    }

    /// Create a folder.
    pub async fn create_folder(&self, path: &str) -> Result<Entry> {
        self.fileops("create_folder", path, None).await
    }

    // Implementation ======================================================

    pub(crate) fn ctx(&self) -> &Context {
        &self.ctx
    }

    /// A request preconfigured for the service: versioned path plus the
    /// configured locale.
    fn request(&self, method: Method, host: &str, path: &str) -> RequestBuilder {
        Request::with_method(method)
            .with_host(host)
            .with_path(&format!("/{API_VERSION}{path}"))
            .with_parameter("locale", Some(&self.language))
    }

    /// A [`request`](Cubby::request) carrying the authorization header.
    /// Fails before any I/O when no token credentials are set.
    pub(crate) fn signed_request(
        &self,
        method: Method,
        host: &str,
        path: &str,
    ) -> Result<RequestBuilder> {
        let header = self.auth.header()?.clone();
        Ok(self
            .request(method, host, path)
            .with_header_value(AUTHORIZATION, header))
    }

    /// Scope a user path under a service prefix and the configured root:
    /// `("files", "a/b.txt")` becomes `/files/sandbox/a/b.txt`.
    pub(crate) fn scoped_path(&self, service: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("/{service}/{}", self.root)
        } else {
            format!("/{service}/{}/{path}", self.root)
        }
    }

    async fn fileops(&self, action: &str, path: &str, to_path: Option<&str>) -> Result<Entry> {
        let response = self
            .signed_request(Method::POST, API_HOST, &format!("/fileops/{action}"))?
            .with_parameter("root", Some(&self.root))
            .with_parameter(
                if to_path.is_some() { "from_path" } else { "path" },
                Some(path),
            )
            .with_parameter("to_path", to_path)
            .as_string(&self.ctx)
            .await?;
        Entry::from_json(&parse_map(&response)?)
    }
}

/// Builder for the [`metadata`](Cubby::metadata) service.
#[derive(Debug)]
pub struct Metadata<'a> {
    client: &'a Cubby,
    path: String,
    file_limit: u32,
    hash: Option<String>,
    list: bool,
    rev: Option<String>,
}

impl Metadata<'_> {
    /// Specify the revision to query (`rev`). Optional.
    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    /// Specify the maximum number of listed children (`file_limit`).
    /// Optional; the default is 25000.
    pub fn with_file_limit(mut self, file_limit: u32) -> Self {
        self.file_limit = file_limit;
        self
    }

    /// Specify the previously seen folder hash (`hash`); the service then
    /// answers 304 when nothing changed. Optional.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Request the children of a queried folder (`list`). Optional,
    /// default off.
    pub fn with_list(mut self) -> Self {
        self.list = true;
        self
    }

    /// Call the service and return the raw JSON response.
    pub async fn as_json(self) -> Result<String> {
        let path = self.client.scoped_path("metadata", &self.path);
        self.client
            .signed_request(Method::GET, API_HOST, &path)?
            .with_parameter("file_limit", Some(self.file_limit))
            .with_parameter("hash", self.hash.as_deref())
            .with_parameter("list", Some(self.list))
            .with_parameter("rev", self.rev.as_deref())
            .as_string(self.client.ctx())
            .await
    }

    /// Call the service and project the response into an [`Entry`].
    pub async fn as_entry(self) -> Result<Entry> {
        let json = self.as_json().await?;
        Entry::from_json(&parse_map(&json)?)
    }
}

/// Parse a header value that carries secrets, marking it sensitive so it
/// stays out of debug output.
fn sensitive_header(value: String) -> Result<HeaderValue> {
    let mut header: HeaderValue = value
        .parse()
        .map_err(|_| Error::credential_invalid("credentials are not valid header material"))?;
    header.set_sensitive(true);
    Ok(header)
}
