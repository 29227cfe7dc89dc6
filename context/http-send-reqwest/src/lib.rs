//! Reqwest-based transport implementation for cubby.
//!
//! This crate provides [`ReqwestHttpSend`], the default [`HttpSend`]
//! implementation. It moves bytes and reports the raw response; status
//! interpretation stays with the request layer in `cubby-core`.
//!
//! ## Example
//!
//! ```no_run
//! use cubby_core::Context;
//! use cubby_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```
//!
//! Connection-level settings (timeouts, proxies, TLS) belong to the
//! underlying [`reqwest::Client`]; pass a configured client to
//! [`ReqwestHttpSend::new`] to apply them.

use async_trait::async_trait;
use bytes::Bytes;
use cubby_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::Client;

/// [`HttpSend`] implementation backed by a [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a custom reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = reqwest::Request::try_from(req)
            .map_err(|e| Error::unexpected("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
