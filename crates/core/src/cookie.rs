//! Parsing of the raw `Cookie` request header.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Splits a `Cookie` header into percent-decoded name/value pairs.
///
/// Pairs are separated by `;` and split on the first `=`. Pairs with an empty
/// name or value are skipped; a repeated name keeps its last value.
#[must_use]
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        cookies.insert(decode(name), decode(value));
    }

    cookies
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
