//! File upload support: the `FilesPut` builder and the chunked-upload
//! protocol driver.
//!
//! One builder covers both upload strategies; [`UploadMode`] selects between
//! a single PUT and the chunked protocol at call time. The chunked protocol
//! uploads the payload as a strictly sequential series of bounded PUTs, each
//! carrying the `upload_id` and `offset` echoed by the previous response,
//! and finalizes the session with one commit POST.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use cubby_core::{ChunkedReader, Error, Result};
use http::Method;
use log::debug;

use crate::client::Cubby;
use crate::constants::{CONTENT_HOST, DEFAULT_CHUNK_SIZE_MIB, MAX_CHUNK_SIZE_MIB};
use crate::entry::Entry;
use crate::json::{as_string, as_u64, parse_map};

/// How a payload travels to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// One PUT carrying the whole payload. Subject to the single-request
    /// size ceiling.
    Single,
    /// A sequence of PUTs of at most `chunk_size` bytes each, followed by a
    /// commit. Resumable server-side through the upload session.
    Chunked {
        /// Chunk size in bytes.
        chunk_size: usize,
    },
}

impl UploadMode {
    pub(crate) fn chunked_default() -> Self {
        UploadMode::Chunked {
            chunk_size: DEFAULT_CHUNK_SIZE_MIB as usize * 1024 * 1024,
        }
    }
}

/// Builder for the [`files_put`](Cubby::files_put) and
/// [`chunked_upload`](Cubby::chunked_upload) services.
#[derive(Debug)]
pub struct FilesPut<'a> {
    client: &'a Cubby,
    path: String,
    parent_rev: String,
    overwrite: bool,
    mode: UploadMode,
    error: Option<Error>,
}

impl<'a> FilesPut<'a> {
    pub(crate) fn new(client: &'a Cubby, path: &str, mode: UploadMode) -> Self {
        Self {
            client,
            path: path.to_string(),
            parent_rev: String::new(),
            overwrite: false,
            mode,
            error: None,
        }
    }

    /// Specify the revision of the file being edited (`parent_rev`). The
    /// revision may be empty; it is always transmitted.
    pub fn with_parent_rev(mut self, parent_rev: impl Into<String>) -> Self {
        self.parent_rev = parent_rev.into();
        self
    }

    /// Allow an existing file to be overwritten (`overwrite`). By default a
    /// conflicting upload is stored under a new name instead.
    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Upload in chunks of the given size in MiB (1 to 150). Selecting a
    /// chunk size switches the builder to chunked mode.
    pub fn with_chunk_size(mut self, chunk_size_mib: u32) -> Self {
        if chunk_size_mib == 0 || chunk_size_mib > MAX_CHUNK_SIZE_MIB {
            self.error.get_or_insert(Error::request_invalid(format!(
                "invalid chunk size: {chunk_size_mib} MiB"
            )));
        } else {
            self.mode = UploadMode::Chunked {
                chunk_size: chunk_size_mib as usize * 1024 * 1024,
            };
        }
        self
    }

    /// Upload the given bytes and return the resulting file entry.
    pub async fn from_bytes(mut self, data: impl Into<Bytes>) -> Result<Entry> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        let data = data.into();
        match self.mode {
            UploadMode::Single => self.single_put(data).await,
            UploadMode::Chunked { chunk_size } => self.chunked_put(data.as_ref(), chunk_size).await,
        }
    }

    /// Upload everything the reader yields and return the resulting file
    /// entry. In chunked mode the source is read one chunk at a time, so
    /// payloads of any size fit in bounded memory.
    pub async fn from_reader(mut self, mut reader: impl Read) -> Result<Entry> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        match self.mode {
            UploadMode::Single => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                self.single_put(Bytes::from(data)).await
            }
            UploadMode::Chunked { chunk_size } => self.chunked_put(reader, chunk_size).await,
        }
    }

    /// Upload a local file and return the resulting file entry.
    pub async fn from_file(self, path: impl AsRef<Path>) -> Result<Entry> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file).await
    }

    async fn single_put(&self, data: Bytes) -> Result<Entry> {
        let path = self.client.scoped_path("files_put", &self.path);
        let response = self
            .client
            .signed_request(Method::PUT, CONTENT_HOST, &path)?
            .with_parameter("overwrite", Some(self.overwrite))
            .with_parameter("parent_rev", Some(&self.parent_rev))
            .with_payload(data)
            .as_string(self.client.ctx())
            .await?;
        Entry::from_json(&parse_map(&response)?)
    }

    /// The chunked-upload protocol: repeated chunk PUTs carrying the session
    /// state, then one commit.
    ///
    /// The `upload_id` and `offset` adopted after every chunk are the ones
    /// the server echoed, never a local running total: a response stating a
    /// different offset than expected reflects partial acceptance and is
    /// honored as-is.
    async fn chunked_put(&self, source: impl Read, chunk_size: usize) -> Result<Entry> {
        let mut chunked = ChunkedReader::new(source, chunk_size);
        let mut upload_id: Option<String> = None;
        let mut offset: u64 = 0;

        while chunked.next_chunk()? {
            let mut chunk = Vec::new();
            chunked.read_to_end(&mut chunk)?;

            let response = self
                .client
                .signed_request(Method::PUT, CONTENT_HOST, "/chunked_upload")?
                .with_parameter("upload_id", upload_id.as_deref())
                .with_parameter("offset", Some(offset))
                .with_payload(chunk)
                .as_string(self.client.ctx())
                .await?;

            let json = parse_map(&response)?;
            upload_id = as_string(&json, "upload_id")?;
            offset = as_u64(&json, "offset")?;
            debug!(
                "chunk accepted, session {:?} now at offset {offset}",
                upload_id
            );
        }

        let path = self.client.scoped_path("commit_chunked_upload", &self.path);
        let response = self
            .client
            .signed_request(Method::POST, CONTENT_HOST, &path)?
            .with_parameter("upload_id", upload_id.as_deref())
            .with_parameter("parent_rev", Some(&self.parent_rev))
            .with_parameter("overwrite", Some(self.overwrite))
            .as_string(self.client.ctx())
            .await?;
        Entry::from_json(&parse_map(&response)?)
    }
}
