use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::helpers::time::now;
use crate::parser::form::{decode_map, encode_map};
use crate::parser::response::{parse_duration, parse_response_body};
use crate::utils::constants::{OAUTH_SESSION_HANDLE, OAUTH_TOKEN, RESERVED_PARAMETERS};

/// OAuth credential: key/secret pair, optional renewal session and lifetime,
/// plus provider-specific attributes.
///
/// Equality ignores `created` and `for_renewal`. Serialization masks the secret.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub(crate) key: String,
    #[serde(serialize_with = "redact")]
    pub(crate) secret: String,
    pub(crate) session: Option<String>,
    /// lifetime in seconds counted from `created`; `None` or 0 never expires
    pub(crate) duration: Option<u64>,
    pub(crate) attributes: HashMap<String, String>,
    pub(crate) created: DateTime<Utc>,
    pub(crate) renewable: bool,
    /// set while this instance is used to request a renewal
    #[serde(skip)]
    pub(crate) for_renewal: bool,
}

static REDACTED: &str = "[REDACTED]";

fn redact<S: serde::Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if secret.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str(REDACTED)
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl Token {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            session: None,
            duration: None,
            attributes: HashMap::new(),
            created: now(),
            renewable: false,
            for_renewal: false,
        }
    }

    /// Build a token with every field given. The attribute map is moved in,
    /// so no caller-held map is shared with the token.
    pub fn with_fields(
        key: impl Into<String>,
        secret: impl Into<String>,
        session: Option<String>,
        duration: Option<u64>,
        attributes: HashMap<String, String>,
        created: DateTime<Utc>,
        renewable: bool,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            session,
            duration,
            attributes,
            created,
            renewable,
            for_renewal: false,
        }
    }

    /// Build from a form-encoded token response body.
    ///
    /// The token is renewable iff the body carried a non-empty session handle.
    pub fn from_response_body(body: &str) -> Self {
        let fields = parse_response_body(body);
        let renewable = fields.session.as_deref().is_some_and(|s| !s.is_empty());
        debug!(
            has_key = !fields.key.is_empty(),
            attributes = fields.attributes.len(),
            renewable,
            "token parsed from response body"
        );

        Self::with_fields(
            fields.key,
            fields.secret,
            fields.session,
            fields.duration,
            fields.attributes,
            now(),
            renewable,
        )
    }

    // -------------------------------
    // Queries
    // -------------------------------

    /// Usable for signing, or at least for obtaining a fresh token.
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty()
            && !self.secret.is_empty()
            && (!self.has_expired() || self.is_renewable())
    }

    pub fn has_expired(&self) -> bool {
        self.has_expired_at(now())
    }

    /// Expiration check against an explicit instant.
    pub fn has_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| at >= expires_at)
    }

    /// `created + duration`, or `None` for a non-expiring token.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.duration {
            None | Some(0) => None,
            Some(seconds) => {
                // an unrepresentable expiry is effectively never
                let lifetime = i64::try_from(seconds).ok().and_then(Duration::try_seconds)?;
                self.created.checked_add_signed(lifetime)
            }
        }
    }

    pub fn is_renewable(&self) -> bool {
        self.renewable && self.session.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Same credential, ignoring creation time and the renewal marker.
    pub fn is_equal_to_token(&self, other: &Token) -> bool {
        self == other
    }

    /// Parameters a request signer sends with this token.
    ///
    /// `oauth_session_handle` is included while the token is marked for
    /// renewal, or when there is no key to send in its place. Attributes never
    /// replace a reserved protocol parameter.
    pub fn parameters(&self) -> HashMap<String, String> {
        let mut params: HashMap<String, String> = self
            .attributes
            .iter()
            .filter(|(name, _)| !RESERVED_PARAMETERS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        if !self.key.is_empty() {
            params.insert(OAUTH_TOKEN.to_string(), self.key.clone());
        }
        if self.for_renewal || self.key.is_empty() {
            if let Some(session) = self.session.as_deref().filter(|s| !s.is_empty()) {
                params.insert(OAUTH_SESSION_HANDLE.to_string(), session.to_string());
            }
        }
        params
    }

    // -------------------------------
    // Accessors
    // -------------------------------

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = secret.into();
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn set_session(&mut self, session: Option<String>) {
        self.session = session;
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Option<u64>) {
        self.duration = duration;
    }

    /// The raw flag; [`Token::is_renewable`] also requires a session.
    pub fn renewable(&self) -> bool {
        self.renewable
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn is_for_renewal(&self) -> bool {
        self.for_renewal
    }

    pub fn set_for_renewal(&mut self, for_renewal: bool) {
        self.for_renewal = for_renewal;
    }

    // -------------------------------
    // Mutation & serialization
    // -------------------------------

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Replace all attributes with the pairs decoded from `encoded`.
    pub fn set_attributes_with_string(&mut self, encoded: &str) {
        self.attributes = decode_map(encoded);
    }

    /// Attributes in the `key=value&...` grammar, inverse of
    /// [`Token::set_attributes_with_string`].
    pub fn attribute_string(&self) -> String {
        encode_map(&self.attributes)
    }

    /// Set the lifetime from text. Unparsable input leaves it unchanged.
    pub fn set_duration_with_string(&mut self, text: &str) {
        match parse_duration(text) {
            Some(seconds) => self.duration = Some(seconds),
            None => debug!(value = %text, "token: keeping duration, value is not a number of seconds"),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.secret == other.secret
            && self.session == other.session
            && self.duration == other.duration
            && self.attributes == other.attributes
            && self.renewable == other.renewable
    }
}

impl Eq for Token {}
