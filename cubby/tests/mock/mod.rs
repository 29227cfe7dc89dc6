//! A scripted transport for driving the client without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use cubby_core::{Context, Error, HttpSend, Result};
use cubby::{Credentials, Cubby};

/// One request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// `HttpSend` double that records every request and answers from a scripted
/// queue of responses. Clones share the same queue and record.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    responses: Arc<Mutex<VecDeque<(u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next response as 200 with the given body.
    pub fn push_ok(&self, body: &str) {
        self.push_response(200, body);
    }

    /// Script the next response.
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    /// Everything sent so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method.to_string(),
            uri: parts.uri.to_string(),
            headers: parts
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or("<binary>").to_string(),
                    )
                })
                .collect(),
            body,
        });

        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("no scripted response left"))?;
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .expect("valid response"))
    }
}

/// A client wired to the mock transport, with token credentials already set.
pub fn authenticated_client(mock: &MockHttpSend) -> Cubby {
    let ctx = Context::new().with_http_send(mock.clone());
    let mut cubby = Cubby::new(ctx, Credentials::new("app-key", "app-secret"));
    cubby
        .set_token_credentials(&Credentials::new("token-key", "token-secret"))
        .unwrap();
    cubby
}

/// A client wired to the mock transport, without token credentials.
pub fn unauthenticated_client(mock: &MockHttpSend) -> Cubby {
    let ctx = Context::new().with_http_send(mock.clone());
    Cubby::new(ctx, Credentials::new("app-key", "app-secret"))
}
