use chrono::{DateTime, Utc};
use cubby_core::{Error, Result};
use serde_json::Value;

use crate::json::{as_bool, as_date, as_string, as_u64, JsonMap};

/// Metadata of a file or folder.
///
/// An immutable snapshot projected from the JSON answer of the metadata,
/// upload and file-operation services.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    bytes: u64,
    hash: Option<String>,
    icon: Option<String>,
    is_dir: bool,
    modified: Option<DateTime<Utc>>,
    client_mtime: Option<String>,
    path: String,
    root: Option<String>,
    size: Option<String>,
    mime_type: Option<String>,
    rev: Option<String>,
    thumb_exists: bool,
    is_deleted: bool,
    contents: Vec<Entry>,
}

impl Entry {
    /// Project an entry from a decoded JSON object.
    pub(crate) fn from_json(map: &JsonMap) -> Result<Self> {
        let contents = match map.get("contents") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list
                .iter()
                .map(|element| match element {
                    Value::Object(child) => Entry::from_json(child),
                    other => Err(Error::response_invalid(format!(
                        "'contents' element is not an object: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::response_invalid(format!(
                    "'contents' is not a list: {other}"
                )))
            }
        };

        Ok(Entry {
            bytes: as_u64(map, "bytes")?,
            hash: as_string(map, "hash")?,
            icon: as_string(map, "icon")?,
            is_dir: as_bool(map, "is_dir")?,
            modified: as_date(map, "modified")?,
            client_mtime: as_string(map, "client_mtime")?,
            path: as_string(map, "path")?.unwrap_or_default(),
            root: as_string(map, "root")?,
            size: as_string(map, "size")?,
            mime_type: as_string(map, "mime_type")?,
            rev: as_string(map, "rev")?,
            thumb_exists: as_bool(map, "thumb_exists")?,
            is_deleted: as_bool(map, "is_deleted")?,
            contents,
        })
    }

    /// Size of the file in bytes.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// For a folder, its "current version". If the hash changes between
    /// calls, one of the folder's immediate children has changed.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Name of the icon to display for this entry.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// `true` if this entry is a folder.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Last modified date.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// The modification time set by the client when the file was uploaded.
    /// The server stores whatever the client sent, so use this for display
    /// only. Not set for folders.
    pub fn client_mtime(&self) -> Option<&str> {
        self.client_mtime.as_deref()
    }

    /// Path to the file from the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the root collection the entry lives in.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Human-readable (and possibly localized) description of the file size.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// The file's MIME type.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Full unique ID for this file's revision.
    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    /// Whether a thumbnail is available for this entry.
    pub fn thumb_exists(&self) -> bool {
        self.thumb_exists
    }

    /// Whether this entry has been deleted but not yet removed from the
    /// metadata. Most callers only want entries with `is_deleted() == false`.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Immediate children, if this is a folder listed with `with_list`.
    pub fn contents(&self) -> &[Entry] {
        &self.contents
    }

    /// The file name: the part of the path after the last slash.
    pub fn file_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(index) => &self.path[index + 1..],
            None => &self.path,
        }
    }

    /// The path of the parent folder, including the trailing slash.
    pub fn parent_path(&self) -> &str {
        if self.path == "/" {
            ""
        } else {
            match self.path.rfind('/') {
                Some(index) => &self.path[..index + 1],
                None => "",
            }
        }
    }
}
