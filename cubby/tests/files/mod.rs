//! Metadata, download and file operations against a scripted transport.

use cubby::{ErrorKind, ThumbFormat, ThumbSize};
use pretty_assertions::assert_eq;

use crate::mock::{authenticated_client, MockHttpSend};

const SIGNED_HEADER: &str = "OAuth oauth_version=\"1.0\", \
    oauth_signature_method=\"PLAINTEXT\", oauth_consumer_key=\"app-key\", \
    oauth_token=\"token-key\", oauth_signature=\"app-secret&token-secret\"";

#[tokio::test]
async fn account_info() {
    let mock = MockHttpSend::new();
    mock.push_ok(
        r#"{"display_name": "John Q. User", "uid": 174,
            "quota_info": {"quota": 1000, "normal": 600, "shared": 400}}"#,
    );

    let cubby = authenticated_client(&mock);
    let account = cubby.account_info().await.unwrap();
    assert_eq!(Some("John Q. User"), account.display_name());
    assert_eq!(174, account.uid());
    assert_eq!(1000, account.quota());

    let requests = mock.requests();
    assert_eq!("GET", requests[0].method);
    assert_eq!(
        "https://api.cubby.io/1/account/info?locale=en",
        requests[0].uri
    );
    assert_eq!(
        SIGNED_HEADER,
        requests[0].header("authorization").unwrap()
    );
}

#[tokio::test]
async fn metadata_as_entry() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/docs", "is_dir": true, "contents": [{"path": "/docs/a.txt"}]}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby
        .metadata("/docs")
        .with_list()
        .with_file_limit(100)
        .as_entry()
        .await
        .unwrap();
    assert!(entry.is_dir());
    assert_eq!(1, entry.contents().len());
    assert_eq!("a.txt", entry.contents()[0].file_name());

    assert_eq!(
        "https://api.cubby.io/1/metadata/sandbox/docs?file_limit=100&list=true&locale=en",
        mock.requests()[0].uri
    );
}

#[tokio::test]
async fn files_get_with_range() {
    let mock = MockHttpSend::new();
    mock.push_response(206, "partial content");

    let cubby = authenticated_client(&mock);
    let mut sink = Vec::new();
    let written = cubby
        .files_get("/big.bin")
        .with_range(0, 14)
        .to_writer(&mut sink)
        .await
        .unwrap();
    assert_eq!(15, written);
    assert_eq!(b"partial content".to_vec(), sink);

    let requests = mock.requests();
    assert_eq!(
        "https://content.cubby.io/1/files/sandbox/big.bin?locale=en",
        requests[0].uri
    );
    assert_eq!(Some("bytes=0-14"), requests[0].header("range"));
}

#[tokio::test]
async fn files_get_without_range_sends_no_range_header() {
    let mock = MockHttpSend::new();
    mock.push_ok("whole file");

    let cubby = authenticated_client(&mock);
    let mut sink = Vec::new();
    cubby.files_get("/a.txt").to_writer(&mut sink).await.unwrap();
    assert_eq!(None, mock.requests()[0].header("range"));
}

#[tokio::test]
async fn files_get_rejects_inverted_range() {
    let mock = MockHttpSend::new();
    let cubby = authenticated_client(&mock);

    let mut sink = Vec::new();
    let err = cubby
        .files_get("/big.bin")
        .with_range(64, 64)
        .to_writer(&mut sink)
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn copy_posts_form_parameters() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/b.txt", "bytes": 5}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby.copy("/a.txt", "/b.txt").await.unwrap();
    assert_eq!("/b.txt", entry.path());

    let requests = mock.requests();
    assert_eq!("POST", requests[0].method);
    // No query string: POST parameters travel as the form body.
    assert_eq!("https://api.cubby.io/1/fileops/copy", requests[0].uri);
    assert_eq!(
        "from_path=%2Fa.txt&locale=en&root=sandbox&to_path=%2Fb.txt",
        String::from_utf8_lossy(&requests[0].body)
    );
    assert_eq!(
        Some("application/x-www-form-urlencoded"),
        requests[0].header("content-type")
    );
}

#[tokio::test]
async fn delete_sends_path_parameter() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/a.txt", "is_deleted": true}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby.delete("/a.txt").await.unwrap();
    assert!(entry.is_deleted());

    assert_eq!(
        "locale=en&path=%2Fa.txt&root=sandbox",
        String::from_utf8_lossy(&mock.requests()[0].body)
    );
}

#[tokio::test]
async fn delta_omits_missing_cursor() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"cursor": "abc", "has_more": true, "entries": []}"#);
    mock.push_ok(r#"{"cursor": "def", "has_more": false, "entries": []}"#);

    let cubby = authenticated_client(&mock);
    let page = cubby.delta(None).await.unwrap();
    assert!(page.has_more());
    let page = cubby.delta(page.cursor()).await.unwrap();
    assert!(!page.has_more());

    let requests = mock.requests();
    assert_eq!("locale=en", String::from_utf8_lossy(&requests[0].body));
    assert_eq!(
        "cursor=abc&locale=en",
        String::from_utf8_lossy(&requests[1].body)
    );
}

#[tokio::test]
async fn revisions_lists_entries() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"[{"path": "/n.txt", "rev": "2"}, {"path": "/n.txt", "rev": "1"}]"#);

    let cubby = authenticated_client(&mock);
    let revisions = cubby.revisions("n.txt", 5).await.unwrap();
    assert_eq!(2, revisions.len());
    assert_eq!(Some("2"), revisions[0].rev());

    assert_eq!(
        "https://api.cubby.io/1/revisions/sandbox/n.txt?locale=en&rev_limit=5",
        mock.requests()[0].uri
    );
}

#[tokio::test]
async fn media_returns_url() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"url": "https://dl.cubby.io/view/abc/photo.jpg",
                     "expires": "Sat, 29 Sep 2012 19:16:20 +0000"}"#);

    let cubby = authenticated_client(&mock);
    let url = cubby.media("photo.jpg").await.unwrap();
    assert_eq!("https://dl.cubby.io/view/abc/photo.jpg", url);
}

#[tokio::test]
async fn thumbnail_parameters() {
    let mock = MockHttpSend::new();
    mock.push_ok("imagebytes");

    let cubby = authenticated_client(&mock);
    let mut sink = Vec::new();
    let written = cubby
        .thumbnail("/photo.jpg", ThumbSize::Small, ThumbFormat::Jpeg, &mut sink)
        .await
        .unwrap();
    assert_eq!(10, written);

    assert_eq!(
        "https://content.cubby.io/1/thumbnails/sandbox/photo.jpg?format=jpeg&locale=en&size=s",
        mock.requests()[0].uri
    );
}

#[tokio::test]
async fn service_error_carries_status_and_body() {
    let mock = MockHttpSend::new();
    mock.push_response(404, r#"{"error": "Path '/missing' not found"}"#);

    let cubby = authenticated_client(&mock);
    let err = cubby.metadata("/missing").as_entry().await.unwrap_err();
    assert_eq!(ErrorKind::Unexpected, err.kind());
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("Path '/missing' not found"));
}
