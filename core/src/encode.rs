//! Percent- and form-encoding helpers shared by the request model and the
//! authentication flow.
//!
//! Two distinct encodings are in play and must not be mixed up:
//!
//! - URLs and form bodies use web-form encoding (`form_urlencoded`, space as
//!   `+`), the lenient encoding browsers produce.
//! - Values inside the `Authorization` header use the stricter RFC 5849 §3.6
//!   percent-encoding (space as `%20`, `~` untouched).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Escape set for RFC 5849 §3.6: everything except ALPHA / DIGIT / "-" /
/// "." / "_" / "~" is percent-encoded. Non-ASCII bytes are always escaped.
const RFC5849_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a value as specified by RFC 5849 §3.6.
pub fn percent_encode_rfc5849(value: &str) -> String {
    utf8_percent_encode(value, RFC5849_SET).to_string()
}

/// Parse an `application/x-www-form-urlencoded` body into name/value pairs,
/// percent-decoding both sides. An empty body yields no pairs.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(body.as_bytes())
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Render name/value pairs as a form-encoded string (`k=v&k=v`), using the
/// web-form rules: space becomes `+`.
pub fn encode_form<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        ser.append_pair(k, v);
    }
    ser.finish()
}
