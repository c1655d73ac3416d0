use std::collections::HashMap;

use tracing::debug;

use crate::parser::form::{decode_map, decode_pairs};
use crate::utils::constants::{
    OAUTH_EXPIRES_IN, OAUTH_SESSION_HANDLE, OAUTH_TOKEN, OAUTH_TOKEN_ATTRIBUTES,
    OAUTH_TOKEN_DURATION, OAUTH_TOKEN_SECRET,
};

/// Fields extracted from a provider's form-encoded token response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFields {
    pub key: String,
    pub secret: String,
    pub session: Option<String>,
    pub duration: Option<u64>,
    /// every pair that is not a recognised protocol parameter
    pub attributes: HashMap<String, String>,
}

/// Parse a response body such as
/// `oauth_token=abc&oauth_token_secret=xyz&oauth_expires_in=3600&screen_name=bob`.
///
/// Unknown pairs land in `attributes`. `oauth_token_attributes` carries a nested
/// encoded attribute string and is merged into `attributes`.
pub fn parse_response_body(body: &str) -> ResponseFields {
    let mut fields = ResponseFields::default();

    for (name, value) in decode_pairs(body) {
        match name.as_str() {
            OAUTH_TOKEN => fields.key = value,
            OAUTH_TOKEN_SECRET => fields.secret = value,
            OAUTH_SESSION_HANDLE => fields.session = Some(value),
            OAUTH_EXPIRES_IN | OAUTH_TOKEN_DURATION => match parse_duration(&value) {
                Some(seconds) => fields.duration = Some(seconds),
                None => debug!(name = %name, value = %value, "response: ignoring unparsable duration"),
            },
            OAUTH_TOKEN_ATTRIBUTES => fields.attributes.extend(decode_map(&value)),
            _ => {
                fields.attributes.insert(name, value);
            }
        }
    }

    fields
}

/// Non-negative whole seconds; anything else is rejected.
pub fn parse_duration(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}
