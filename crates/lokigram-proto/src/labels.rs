//! Label string grammar.
//!
//! Stream labels arrive as one brace-delimited, comma-separated string
//! of `key="value"` pairs. Two quoting styles occur in the wild, mixed
//! freely within the same string:
//!
//! - plain: `key="value"`
//! - escaped: `key=\"value\"`, where the value may itself contain
//!   `\"` sequences
//!
//! Parsing never fails. Fragments matching neither style are dropped
//! from the resulting map; that loss is a deliberate policy for a
//! grammar that only ever feeds routing and display, not a defect.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Plain pairs: `key="value"`, value may not contain a quote.
static PLAIN_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)="([^"]*)""#).unwrap_or_else(|_| unreachable!()));

/// Escaped pairs: `key=\"value\"`, value may contain `\"` sequences
/// but no bare quote or trailing backslash.
static ESCAPED_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)=\\"([^"\\]*(?:\\.[^"\\]*)*)\\""#).unwrap_or_else(|_| unreachable!())
});

/// Parses a raw label string into a key/value map.
///
/// The outer braces are stripped, then both pair styles are scanned
/// over the remainder and their matches unioned. When the same key
/// appears more than once, the last occurrence processed wins; plain
/// pairs are processed after escaped ones. An input matching neither
/// style yields an empty map.
///
/// ```rust
/// use lokigram_proto::parse_labels;
///
/// let labels = parse_labels(r#"{container_name="app", level="error"}"#);
/// assert_eq!(labels.get("level").map(String::as_str), Some("error"));
/// ```
#[must_use]
pub fn parse_labels(raw: &str) -> HashMap<String, String> {
    let inner = raw.trim_matches(|c| c == '{' || c == '}');

    let mut labels = HashMap::new();
    for re in [&*ESCAPED_PAIR, &*PLAIN_PAIR] {
        for caps in re.captures_iter(inner) {
            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                labels.insert(key.as_str().to_string(), value.as_str().to_string());
            }
        }
    }
    labels
}
