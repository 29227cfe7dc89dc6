//! The three-legged OAuth 1.0 flow against a scripted transport.

use cubby::{Credentials, ErrorKind};
use pretty_assertions::assert_eq;

use crate::mock::{unauthenticated_client, MockHttpSend};

#[tokio::test]
async fn temporary_credentials_request() {
    let mock = MockHttpSend::new();
    mock.push_ok("oauth_token=req-key&oauth_token_secret=req-secret");

    let cubby = unauthenticated_client(&mock);
    let temporary = cubby.request_temporary_credentials().await.unwrap();
    assert_eq!("req-key", temporary.key());
    assert_eq!("req-secret", temporary.secret());

    let requests = mock.requests();
    assert_eq!(1, requests.len());
    assert_eq!("GET", requests[0].method);
    assert_eq!(
        "https://api.cubby.io/1/oauth/request_token?locale=en",
        requests[0].uri
    );
    // Consumer-only signature: no oauth_token, trailing `&`.
    assert_eq!(
        "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
         oauth_consumer_key=\"app-key\", oauth_signature=\"app-secret&\"",
        requests[0].header("authorization").unwrap()
    );
}

#[tokio::test]
async fn authorization_url_is_pure() {
    let mock = MockHttpSend::new();
    let cubby = unauthenticated_client(&mock);

    let url = cubby
        .authorization_url(&Credentials::new("req-key", "req-secret"))
        .unwrap();
    assert_eq!(
        "https://api.cubby.io/1/oauth/authorize?locale=en&oauth_token=req-key",
        url.to_string()
    );
    // No network I/O happened.
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn token_credentials_request() {
    let mock = MockHttpSend::new();
    mock.push_ok("oauth_token=access-key&oauth_token_secret=access-secret&uid=174");

    let cubby = unauthenticated_client(&mock);
    let token = cubby
        .request_token_credentials(&Credentials::new("req-key", "req-secret"))
        .await
        .unwrap();
    // The uid field is ignored.
    assert_eq!(Credentials::new("access-key", "access-secret"), token);

    let requests = mock.requests();
    assert_eq!(
        "https://api.cubby.io/1/oauth/access_token?locale=en",
        requests[0].uri
    );
    assert_eq!(
        "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
         oauth_consumer_key=\"app-key\", oauth_token=\"req-key\", \
         oauth_signature=\"app-secret&req-secret\"",
        requests[0].header("authorization").unwrap()
    );
}

#[tokio::test]
async fn token_credentials_can_only_be_set_once() {
    let mock = MockHttpSend::new();
    let mut cubby = unauthenticated_client(&mock);

    cubby
        .set_token_credentials(&Credentials::new("token-key", "token-secret"))
        .unwrap();
    let err = cubby
        .set_token_credentials(&Credentials::new("other-key", "other-secret"))
        .unwrap_err();
    assert_eq!(ErrorKind::StateInvalid, err.kind());
}

#[tokio::test]
async fn signed_calls_require_authentication() {
    let mock = MockHttpSend::new();
    let cubby = unauthenticated_client(&mock);

    let err = cubby.account_info().await.unwrap_err();
    assert_eq!(ErrorKind::StateInvalid, err.kind());
    // Failed before any transport call.
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn flow_error_is_propagated() {
    let mock = MockHttpSend::new();
    mock.push_response(401, "{\"error\": \"invalid consumer key\"}");

    let cubby = unauthenticated_client(&mock);
    let err = cubby.request_temporary_credentials().await.unwrap_err();
    assert_eq!(ErrorKind::Unexpected, err.kind());
    assert!(err.to_string().contains("401"));
}
