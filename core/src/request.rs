//! The immutable request model and its builder.
//!
//! A [`Request`] describes one HTTP(S) call against the service: method,
//! endpoint, parameters, headers and an optional payload. Instances are
//! assembled fluently through [`RequestBuilder`] and consumed exactly once by
//! one of the terminal methods (`as_string`, `to_writer`, ...), which execute
//! the call through the [`Context`]'s transport.
//!
//! Parameter placement follows one policy: parameters travel in the URL query
//! string whenever the method is GET or an explicit payload already occupies
//! the body; otherwise they are rendered as an
//! `application/x-www-form-urlencoded` body and the URL carries no query.
//!
//! ## Example
//!
//! ```no_run
//! use cubby_core::{Context, Request};
//! use http::Method;
//!
//! # async fn example(ctx: &Context) -> cubby_core::Result<()> {
//! let body = Request::with_method(Method::GET)
//!     .with_host("api.cubby.io")
//!     .with_path("/1/account/info")
//!     .with_parameter("locale", Some("en"))
//!     .as_string(ctx)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::uri::Scheme;
use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use log::debug;

use crate::encode::encode_form;
use crate::{Context, Error, Result};

/// An immutable description of one HTTP request.
///
/// Created through [`Request::with_method`]; render it with [`Request::url`]
/// or execute it through the builder's terminal methods.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    path: Option<String>,
    parameters: BTreeMap<String, String>,
    headers: HeaderMap,
    payload: Option<Bytes>,
}

impl Request {
    /// Start building a request. The method must be GET, POST or PUT;
    /// anything else is reported when the builder is consumed, before any
    /// I/O happens.
    pub fn with_method(method: Method) -> RequestBuilder {
        let inner = if method == Method::GET || method == Method::POST || method == Method::PUT {
            Ok(Request {
                method,
                scheme: Scheme::HTTPS,
                host: String::new(),
                port: None,
                path: None,
                parameters: BTreeMap::new(),
                headers: HeaderMap::new(),
                payload: None,
            })
        } else {
            Err(Error::request_invalid(format!(
                "method must be GET, POST or PUT: {method}"
            )))
        };
        RequestBuilder { inner }
    }

    /// The HTTP method of this request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The headers of this request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Render the URL for this request, including the query string when the
    /// parameters are not part of the body.
    pub fn url(&self) -> Result<Uri> {
        let authority = match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        };
        let mut path_and_query = self.path.clone().unwrap_or_default();
        if !self.parameters_as_payload() && !self.parameters.is_empty() {
            path_and_query.push('?');
            path_and_query.push_str(&self.query_string());
        }
        if path_and_query.is_empty() {
            path_and_query.push('/');
        }
        Ok(format!("{}://{authority}{path_and_query}", self.scheme).parse()?)
    }

    /// The effective request body: the explicit payload if one was supplied,
    /// otherwise the parameters rendered as a form body (POST/PUT only).
    /// `None` when the request has no body at all.
    pub fn payload(&self) -> Option<Bytes> {
        if self.parameters_as_payload() {
            if self.parameters.is_empty() {
                None
            } else {
                Some(Bytes::from(self.query_string()))
            }
        } else {
            self.payload.clone()
        }
    }

    /// Parameters become the body only for POST/PUT requests whose body slot
    /// is still free.
    fn parameters_as_payload(&self) -> bool {
        self.payload.is_none() && self.method != Method::GET
    }

    fn query_string(&self) -> String {
        encode_form(
            self.parameters
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Execute this request through the context's transport and enforce the
    /// response-status contract: anything other than 200 or 206 is surfaced
    /// as an error carrying the status line and the error body.
    async fn execute(&self, ctx: &Context) -> Result<http::Response<Bytes>> {
        let uri = self.url()?;
        let started = Instant::now();

        let mut form_body = false;
        let body = if self.parameters_as_payload() && !self.parameters.is_empty() {
            form_body = true;
            Bytes::from(self.query_string())
        } else {
            self.payload.clone().unwrap_or_default()
        };

        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(uri.clone())
            .body(body)?;
        *req.headers_mut() = self.headers.clone();
        if form_body && !req.headers().contains_key(CONTENT_TYPE) {
            req.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }

        let resp = ctx.http_send(req).await?;

        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            let body = String::from_utf8_lossy(resp.body());
            return Err(Error::unexpected(format!(
                "{} {uri} failed: {} {}{}",
                self.method,
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown"),
                if body.is_empty() {
                    String::new()
                } else {
                    format!(": {body}")
                }
            )));
        }

        debug!(
            "{} {uri} executed in {}ms",
            self.method,
            started.elapsed().as_millis()
        );
        Ok(resp)
    }
}

/// The builder for [`Request`] instances.
///
/// Builder methods never fail mid-chain; the first contract violation (bad
/// method, relative path, blank parameter name, ...) is remembered and
/// returned when the builder is consumed, so every client-side error still
/// surfaces before any network attempt.
#[derive(Debug)]
pub struct RequestBuilder {
    inner: Result<Request>,
}

impl RequestBuilder {
    fn and_then(mut self, f: impl FnOnce(&mut Request) -> Result<()>) -> Self {
        if let Ok(request) = &mut self.inner {
            if let Err(err) = f(request) {
                self.inner = Err(err);
            }
        }
        self
    }

    /// Specify the scheme of the request. Optional; `https` is assumed.
    /// Only `http` and `https` are allowed.
    pub fn with_scheme(self, scheme: Scheme) -> Self {
        self.and_then(|request| {
            if scheme != Scheme::HTTP && scheme != Scheme::HTTPS {
                return Err(Error::request_invalid(format!(
                    "scheme must be http or https: {scheme}"
                )));
            }
            request.scheme = scheme;
            Ok(())
        })
    }

    /// Specify the host (server address) of the request endpoint. Mandatory.
    pub fn with_host(self, host: &str) -> Self {
        self.and_then(|request| {
            if host.trim().is_empty() {
                return Err(Error::request_invalid("'host' is empty"));
            }
            request.host = host.to_string();
            Ok(())
        })
    }

    /// Specify the port of the request endpoint. If not specified, the port
    /// is omitted from the URL. Zero is rejected.
    pub fn with_port(self, port: u16) -> Self {
        self.and_then(|request| {
            if port == 0 {
                return Err(Error::request_invalid("'port' must be positive"));
            }
            request.port = Some(port);
            Ok(())
        })
    }

    /// Specify the absolute path of the request endpoint. Optional; when
    /// given, the path must start with `/`.
    pub fn with_path(self, path: &str) -> Self {
        self.and_then(|request| {
            if !path.starts_with('/') {
                return Err(Error::request_invalid(format!(
                    "'path' must be absolute: {path}"
                )));
            }
            request.path = Some(path.to_string());
            Ok(())
        })
    }

    /// Add a parameter. The value is stringified; `None` silently omits the
    /// parameter. The name must be non-blank. Setting the same name again
    /// replaces the earlier value.
    pub fn with_parameter(self, name: &str, value: Option<impl ToString>) -> Self {
        self.and_then(|request| {
            if name.trim().is_empty() {
                return Err(Error::request_invalid("parameter name is empty"));
            }
            if let Some(value) = value {
                request.parameters.insert(name.to_string(), value.to_string());
            }
            Ok(())
        })
    }

    /// Add a header name-value pair. `None` silently omits the header.
    pub fn with_header(self, name: &str, value: Option<&str>) -> Self {
        self.and_then(|request| {
            if let Some(value) = value {
                let name: HeaderName = name.parse()?;
                request.headers.insert(name, value.parse()?);
            }
            Ok(())
        })
    }

    /// Add an already-parsed header value. `HeaderValue` carries its
    /// sensitivity flag along, which keeps authorization material out of
    /// debug output.
    pub fn with_header_value(self, name: HeaderName, value: HeaderValue) -> Self {
        self.and_then(|request| {
            request.headers.insert(name, value);
            Ok(())
        })
    }

    /// Specify the payload (request body) data. Optional.
    pub fn with_payload(self, payload: impl Into<Bytes>) -> Self {
        self.and_then(|request| {
            request.payload = Some(payload.into());
            Ok(())
        })
    }

    /// Freeze the builder into an immutable [`Request`].
    pub fn build(self) -> Result<Request> {
        let request = self.inner?;
        if request.host.is_empty() {
            return Err(Error::request_invalid("'host' is required"));
        }
        Ok(request)
    }

    /// Return the URL for this request without executing it.
    pub fn url(self) -> Result<Uri> {
        self.build()?.url()
    }

    /// Execute the request and return the raw response body.
    pub async fn as_bytes(self, ctx: &Context) -> Result<Bytes> {
        let request = self.build()?;
        Ok(request.execute(ctx).await?.into_body())
    }

    /// Execute the request and return the response body as a string.
    ///
    /// The body is decoded as UTF-8 (lossy); every endpoint of this protocol
    /// answers in UTF-8.
    pub async fn as_string(self, ctx: &Context) -> Result<String> {
        let body = self.as_bytes(ctx).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Execute the request and write the response body to the given sink.
    ///
    /// Returns the number of bytes written.
    pub async fn to_writer(self, ctx: &Context, out: &mut dyn Write) -> Result<u64> {
        let body = self.as_bytes(ctx).await?;
        out.write_all(&body)?;
        Ok(body.len() as u64)
    }

    /// Execute the request and write the response body to the given file.
    ///
    /// Returns the number of bytes written (the file size).
    pub async fn to_file(self, ctx: &Context, path: impl AsRef<Path>) -> Result<u64> {
        let mut file = std::fs::File::create(path)?;
        self.to_writer(ctx, &mut file).await
    }
}
