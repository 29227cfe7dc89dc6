//! Single-shot and chunked uploads against a scripted transport.

use cubby::ErrorKind;
use pretty_assertions::assert_eq;

use crate::mock::{authenticated_client, MockHttpSend};

#[tokio::test]
async fn files_put_single_request() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/notes.txt", "bytes": 11, "rev": "a1b2"}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby
        .files_put("/notes.txt")
        .with_overwrite()
        .with_parent_rev("00aa")
        .from_bytes(&b"hello world"[..])
        .await
        .unwrap();
    assert_eq!("/notes.txt", entry.path());
    assert_eq!(Some("a1b2"), entry.rev());

    let requests = mock.requests();
    assert_eq!(1, requests.len());
    assert_eq!("PUT", requests[0].method);
    // The explicit payload occupies the body; parameters go to the query.
    assert_eq!(
        "https://content.cubby.io/1/files_put/sandbox/notes.txt\
         ?locale=en&overwrite=true&parent_rev=00aa",
        requests[0].uri
    );
    assert_eq!(b"hello world".as_slice(), &requests[0].body[..]);
}

#[tokio::test]
async fn chunked_upload_small_payload_is_one_chunk_plus_commit() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"upload_id": "session-1", "offset": 9}"#);
    mock.push_ok(r#"{"path": "/big.bin", "bytes": 9, "rev": "r9"}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(1) // smallest allowed: 1 MiB
        .from_bytes(&b"123456789"[..])
        .await
        .unwrap();
    assert_eq!("/big.bin", entry.path());

    // One 1 MiB chunk holds the whole payload: one PUT plus the commit.
    let requests = mock.requests();
    assert_eq!(2, requests.len());
    assert_eq!(
        "https://content.cubby.io/1/chunked_upload?locale=en&offset=0",
        requests[0].uri
    );
    assert_eq!(
        "https://content.cubby.io/1/commit_chunked_upload/sandbox/big.bin",
        requests[1].uri
    );
}

// Chunk sizes are whole MiB at the public API, so the 3-chunk sequence
// (full, full, remainder) is exercised with a 2 MiB + 1 byte payload.
#[tokio::test]
async fn chunked_upload_splits_and_threads_session_state() {
    const MIB: usize = 1024 * 1024;

    let mock = MockHttpSend::new();
    mock.push_ok(&format!(r#"{{"upload_id": "s1", "offset": {MIB}}}"#));
    mock.push_ok(&format!(r#"{{"upload_id": "s1", "offset": {}}}"#, 2 * MIB));
    mock.push_ok(&format!(r#"{{"upload_id": "s1", "offset": {}}}"#, 2 * MIB + 1));
    mock.push_ok(r#"{"path": "/big.bin", "bytes": 2097153}"#);

    let cubby = authenticated_client(&mock);
    // 2 MiB + 1 byte at 1 MiB chunks: exactly three chunks of 1M, 1M, 1.
    let payload = vec![0x5au8; 2 * MIB + 1];
    let entry = cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(1)
        .from_bytes(payload)
        .await
        .unwrap();
    assert_eq!(2097153, entry.bytes());

    let requests = mock.requests();
    assert_eq!(4, requests.len());

    // First chunk: no upload_id yet, offset zero.
    assert_eq!("PUT", requests[0].method);
    assert_eq!(
        "https://content.cubby.io/1/chunked_upload?locale=en&offset=0",
        requests[0].uri
    );
    assert_eq!(MIB, requests[0].body.len());

    // Later chunks echo the session and the server-stated offset.
    assert_eq!(
        format!("https://content.cubby.io/1/chunked_upload?locale=en&offset={MIB}&upload_id=s1"),
        requests[1].uri
    );
    assert_eq!(MIB, requests[1].body.len());
    assert_eq!(
        format!(
            "https://content.cubby.io/1/chunked_upload?locale=en&offset={}&upload_id=s1",
            2 * MIB
        ),
        requests[2].uri
    );
    assert_eq!(1, requests[2].body.len());

    // The commit is a parameter-bodied POST carrying the final session id.
    assert_eq!("POST", requests[3].method);
    assert_eq!(
        "https://content.cubby.io/1/commit_chunked_upload/sandbox/big.bin",
        requests[3].uri
    );
    assert_eq!(
        "locale=en&overwrite=false&parent_rev=&upload_id=s1",
        String::from_utf8_lossy(&requests[3].body)
    );
}

#[tokio::test]
async fn server_echoed_offset_is_authoritative() {
    const MIB: usize = 1024 * 1024;

    let mock = MockHttpSend::new();
    // The server acknowledges less than was sent; the client must carry the
    // echoed offset into the next chunk without local reconciliation.
    mock.push_ok(r#"{"upload_id": "s1", "offset": 1000}"#);
    mock.push_ok(r#"{"upload_id": "s1", "offset": 2000}"#);
    mock.push_ok(r#"{"path": "/big.bin"}"#);

    let cubby = authenticated_client(&mock);
    cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(1)
        .from_bytes(vec![0u8; MIB + 1])
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(
        "https://content.cubby.io/1/chunked_upload?locale=en&offset=1000&upload_id=s1",
        requests[1].uri
    );
}

#[tokio::test]
async fn transport_error_aborts_before_commit() {
    const MIB: usize = 1024 * 1024;

    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"upload_id": "s1", "offset": 1048576}"#);
    mock.push_response(500, "internal error");

    let cubby = authenticated_client(&mock);
    let err = cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(1)
        .from_bytes(vec![0u8; 2 * MIB])
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::Unexpected, err.kind());

    // The failed second chunk ended the upload: no third chunk, no commit.
    let requests = mock.requests();
    assert_eq!(2, requests.len());
    assert!(requests.iter().all(|r| r.method == "PUT"));
}

#[tokio::test]
async fn invalid_chunk_size_is_rejected() {
    let mock = MockHttpSend::new();
    let cubby = authenticated_client(&mock);

    let err = cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(151)
        .from_bytes(&b"data"[..])
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    let err = cubby
        .chunked_upload("/big.bin")
        .with_chunk_size(0)
        .from_bytes(&b"data"[..])
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn empty_source_commits_without_chunks() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/empty.txt", "bytes": 0}"#);

    let cubby = authenticated_client(&mock);
    let entry = cubby
        .chunked_upload("/empty.txt")
        .from_bytes(&b""[..])
        .await
        .unwrap();
    assert_eq!(0, entry.bytes());

    // No chunk PUTs; the commit carries no upload_id.
    let requests = mock.requests();
    assert_eq!(1, requests.len());
    assert_eq!("POST", requests[0].method);
    assert_eq!(
        "locale=en&overwrite=false&parent_rev=",
        String::from_utf8_lossy(&requests[0].body)
    );
}

#[tokio::test]
async fn upload_from_file() {
    let mock = MockHttpSend::new();
    mock.push_ok(r#"{"path": "/notes.txt", "bytes": 5}"#);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    let cubby = authenticated_client(&mock);
    let entry = cubby.files_put("/notes.txt").from_file(&path).await.unwrap();
    assert_eq!(5, entry.bytes());
    assert_eq!(b"hello".as_slice(), &mock.requests()[0].body[..]);
}
