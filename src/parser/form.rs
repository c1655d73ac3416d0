use std::collections::HashMap;

use tracing::debug;
use url::form_urlencoded;

static PAIR_SEPARATOR: char = '&';
static KEY_VALUE_SEPARATOR: char = '=';

/// Decode a `key=value&key=value` string into pairs, keeping input order.
///
/// Both sides are form-decoded (`%XX` escapes and `+` as space).
/// Fragments without `=` are skipped, never fatal.
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split(PAIR_SEPARATOR)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| {
            if !fragment.contains(KEY_VALUE_SEPARATOR) {
                debug!(fragment, "form: skipping pair without '='");
                return None;
            }
            // a single fragment yields exactly one pair, split at the first '='
            form_urlencoded::parse(fragment.as_bytes())
                .next()
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
        })
        .collect()
}

/// Decode into a map. A repeated name keeps its last value.
pub fn decode_map(encoded: &str) -> HashMap<String, String> {
    decode_pairs(encoded).into_iter().collect()
}

/// Encode a map into the `key=value&...` grammar.
///
/// Pairs are emitted in name order so equal maps encode identically.
pub fn encode_map(map: &HashMap<String, String>) -> String {
    let mut names: Vec<&String> = map.keys().collect();
    names.sort();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for name in names {
        serializer.append_pair(name, &map[name]);
    }
    serializer.finish()
}
