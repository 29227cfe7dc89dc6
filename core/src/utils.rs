//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret when formatting debug output.
///
/// Short values are hidden entirely; longer values keep their first and last
/// two characters so different secrets remain distinguishable in logs without
/// being recoverable.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("<unset>")
        } else if self.0.len() < 8 || !self.0.is_ascii() {
            f.write_str("***")
        } else {
            write!(f, "{}***{}", &self.0[..2], &self.0[self.0.len() - 2..])
        }
    }
}
