//! Response body to text.
//!
//! Order: charset declared in `Content-Type` (when `encoding_rs` knows the
//! label and the bytes are valid under it), then UTF-8, then Latin-1. Latin-1
//! maps every byte to a char, so decoding always yields text.
//!
//! `encoding_rs` follows the WHATWG table, where `iso-8859-1` and `latin1`
//! are aliases for windows-1252. A page declaring one of those labels gets
//! true ISO-8859-1 here, so bytes 0x80..=0x9F stay C1 controls.

use std::borrow::Cow;

use encoding_rs::Encoding;

/// Extract the `charset` parameter from a `Content-Type` header value.
///
/// Parameter names are case-insensitive and the value may be quoted.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        (!value.is_empty()).then_some(value)
    })
}

/// Decode `body` to text using the declared charset, UTF-8, then Latin-1.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(text) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| decode_declared(body, label))
    {
        return text;
    }

    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    decode_latin1(body)
}

/// Labels that name ISO-8859-1 itself rather than windows-1252.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

fn is_latin1_label(label: &str) -> bool {
    LATIN1_LABELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(label.trim()))
}

fn decode_declared(body: &[u8], label: &str) -> Option<String> {
    if is_latin1_label(label) {
        return Some(decode_latin1(body));
    }
    let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
        tracing::debug!(charset = label, "unrecognized charset label; falling back");
        return None;
    };
    match encoding.decode_without_bom_handling_and_without_replacement(body) {
        Some(Cow::Borrowed(s)) => Some(s.to_string()),
        Some(Cow::Owned(s)) => Some(s),
        None => {
            tracing::debug!(
                charset = encoding.name(),
                "body is not valid in declared charset; falling back"
            );
            None
        }
    }
}

fn decode_latin1(body: &[u8]) -> String {
    body.iter().map(|&b| char::from(b)).collect()
}
