use cubby_core::{Error, Result};
use serde_json::Value;

use crate::json::{as_string, as_u64, JsonMap};

/// Information about a user's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    country: Option<String>,
    display_name: Option<String>,
    quota: u64,
    quota_normal: u64,
    quota_shared: u64,
    uid: u64,
    referral_link: Option<String>,
}

impl Account {
    /// Project an account from a decoded JSON object of the shape:
    ///
    /// ```json
    /// {"country": "",
    ///  "display_name": "John Q. User",
    ///  "quota_info": {
    ///    "shared": 37378890,
    ///    "quota": 62277025792,
    ///    "normal": 263758550
    ///   },
    ///  "uid": 174}
    /// ```
    pub(crate) fn from_json(map: &JsonMap) -> Result<Self> {
        let (quota, quota_normal, quota_shared) = match map.get("quota_info") {
            None | Some(Value::Null) => (0, 0, 0),
            Some(Value::Object(quota)) => (
                as_u64(quota, "quota")?,
                as_u64(quota, "normal")?,
                as_u64(quota, "shared")?,
            ),
            Some(other) => {
                return Err(Error::response_invalid(format!(
                    "'quota_info' is not an object: {other}"
                )))
            }
        };

        Ok(Account {
            country: as_string(map, "country")?,
            display_name: as_string(map, "display_name")?,
            quota,
            quota_normal,
            quota_shared,
            uid: as_u64(map, "uid")?,
            referral_link: as_string(map, "referral_link")?,
        })
    }

    /// The user's ISO country code.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// The user's "real" name.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The user's quota, in bytes.
    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// The user's quota excluding shared files.
    pub fn quota_normal(&self) -> u64 {
        self.quota_normal
    }

    /// The user's quota of shared files.
    pub fn quota_shared(&self) -> u64 {
        self.quota_shared
    }

    /// The user's account ID.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// The url the user can give to get referral credit.
    pub fn referral_link(&self) -> Option<&str> {
        self.referral_link.as_deref()
    }
}
