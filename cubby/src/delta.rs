use cubby_core::{Error, Result};
use serde_json::Value;

use crate::entry::Entry;
use crate::json::{as_bool, as_string, JsonMap};

/// A page of [`DeltaEntry`]s, returned by [`Cubby::delta`](crate::Cubby::delta).
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaPage {
    cursor: Option<String>,
    reset: bool,
    has_more: bool,
    entries: Vec<DeltaEntry>,
}

impl DeltaPage {
    pub(crate) fn from_json(map: &JsonMap) -> Result<Self> {
        let entries = match map.get("entries") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list
                .iter()
                .map(DeltaEntry::from_json)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::response_invalid(format!(
                    "'entries' is not a list: {other}"
                )))
            }
        };

        Ok(DeltaPage {
            cursor: as_string(map, "cursor")?,
            reset: as_bool(map, "reset")?,
            has_more: as_bool(map, "has_more")?,
            entries,
        })
    }

    /// A string that keeps track of your current state. Pass it to the next
    /// [`delta`](crate::Cubby::delta) call to pick up where you left off.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// If `true`, reset your local state to an empty folder before
    /// processing the list of delta entries. Only `true` in rare situations.
    pub fn is_reset(&self) -> bool {
        self.reset
    }

    /// If `true`, more entries are available and you can call
    /// [`delta`](crate::Cubby::delta) again immediately; if `false`, wait a
    /// while before checking again.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Apply these entries to your local state to catch up with the
    /// server's state.
    pub fn entries(&self) -> &[DeltaEntry] {
        &self.entries
    }
}

/// A single entry in a [`DeltaPage`]: a two-element JSON list of the
/// lower-cased path and the metadata (or `null` for a deletion).
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaEntry {
    lowercased_path: String,
    metadata: Option<Entry>,
}

impl DeltaEntry {
    fn from_json(value: &Value) -> Result<Self> {
        let Value::Array(pair) = value else {
            return Err(Error::response_invalid(format!(
                "delta entry is not a list: {value}"
            )));
        };
        let lowercased_path = match pair.first() {
            Some(Value::String(path)) => path.clone(),
            other => {
                return Err(Error::response_invalid(format!(
                    "delta entry path is not a string: {other:?}"
                )))
            }
        };
        let metadata = match pair.get(1) {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(Entry::from_json(map)?),
            Some(other) => {
                return Err(Error::response_invalid(format!(
                    "delta entry metadata is not an object: {other}"
                )))
            }
        };
        Ok(DeltaEntry {
            lowercased_path,
            metadata,
        })
    }

    /// The lower-cased path of the entry. The server compares paths
    /// case-insensitively, so an entry for `/readme.txt` overwrites the
    /// entry for `/ReadMe.TXT`. The case-preserved path is in
    /// [`metadata`](Self::metadata).
    pub fn lowercased_path(&self) -> &str {
        &self.lowercased_path
    }

    /// `None` means the path no longer exists on the server: delete whatever
    /// your local state has there. Otherwise the server has a file or folder
    /// at this path with the given metadata: mirror it into your local state.
    pub fn metadata(&self) -> Option<&Entry> {
        self.metadata.as_ref()
    }
}
