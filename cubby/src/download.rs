//! File download support: the `FilesGet` builder and thumbnail types.

use std::io::Write;
use std::path::Path;

use cubby_core::{Error, Result};
use http::Method;

use crate::client::Cubby;
use crate::constants::CONTENT_HOST;

/// Builder for the [`files_get`](Cubby::files_get) service.
#[derive(Debug)]
pub struct FilesGet<'a> {
    client: &'a Cubby,
    path: String,
    rev: Option<String>,
    range: Option<(u64, u64)>,
    error: Option<Error>,
}

impl<'a> FilesGet<'a> {
    pub(crate) fn new(client: &'a Cubby, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
            rev: None,
            range: None,
            error: None,
        }
    }

    /// Specify the revision of the file to retrieve (`rev`). If not
    /// specified, the most recent revision is used.
    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    /// Specify the byte range to retrieve, zero-based and inclusive on both
    /// ends. If not specified, the complete file is retrieved.
    pub fn with_range(mut self, first: u64, last: u64) -> Self {
        if first >= last {
            self.error
                .get_or_insert(Error::request_invalid(format!(
                    "'first' must be smaller than 'last': {first} >= {last}"
                )));
        } else {
            self.range = Some((first, last));
        }
        self
    }

    /// Call the service and write the file content to the given sink.
    ///
    /// Returns the number of bytes written.
    pub async fn to_writer(self, out: &mut dyn Write) -> Result<u64> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let path = self.client.scoped_path("files", &self.path);
        self.client
            .signed_request(Method::GET, CONTENT_HOST, &path)?
            .with_parameter("rev", self.rev.as_deref())
            .with_header(
                "Range",
                self.range
                    .map(|(first, last)| format!("bytes={first}-{last}"))
                    .as_deref(),
            )
            .to_writer(self.client.ctx(), out)
            .await
    }

    /// Call the service and write the file content to the given file.
    ///
    /// Returns the number of bytes written (the file size).
    pub async fn to_file(self, path: impl AsRef<Path>) -> Result<u64> {
        let mut file = std::fs::File::create(path)?;
        self.to_writer(&mut file).await
    }
}

/// Thumbnail sizes supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbSize {
    /// 32x32 pixels.
    Xs,
    /// 64x64 pixels (the service default).
    Small,
    /// 128x128 pixels.
    Medium,
    /// 640x480 pixels.
    Large,
    /// 1024x768 pixels.
    Xl,
}

impl ThumbSize {
    pub(crate) fn api_value(&self) -> &'static str {
        match self {
            ThumbSize::Xs => "xs",
            ThumbSize::Small => "s",
            ThumbSize::Medium => "m",
            ThumbSize::Large => "l",
            ThumbSize::Xl => "xl",
        }
    }
}

/// Thumbnail image formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbFormat {
    /// JPEG (the service default).
    Jpeg,
    /// PNG.
    Png,
}

impl ThumbFormat {
    pub(crate) fn api_value(&self) -> &'static str {
        match self {
            ThumbFormat::Jpeg => "jpeg",
            ThumbFormat::Png => "png",
        }
    }
}
