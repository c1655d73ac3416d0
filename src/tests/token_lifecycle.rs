use std::collections::HashMap;

use chrono::{Duration, Utc};

use crate::store::MemoryStore;
use crate::token::Token;

static TWITTER_BODY: &str =
    "oauth_token=abc&oauth_token_secret=xyz&oauth_session_handle=s1&oauth_expires_in=3600&screen_name=bob";

#[test]
fn parse_store_restore_and_remove() {
    let token = Token::from_response_body(TWITTER_BODY);
    assert!(token.is_valid());
    assert!(token.is_renewable());
    assert!(!token.has_expired());

    let mut store = MemoryStore::new();
    token.store(&mut store, "twitter", "app").unwrap();

    let restored = Token::restore(&store, "twitter", "app");
    assert!(restored.is_equal_to_token(&token));
    assert_eq!(restored.attribute("screen_name"), Some("bob"));
    assert_eq!(restored.expires_at().map(|t| t.timestamp()), token.expires_at().map(|t| t.timestamp()));

    Token::remove_from_store(&mut store, "twitter", "app").unwrap();
    let gone = Token::restore(&store, "twitter", "app");
    assert!(gone.key().is_empty() && gone.secret().is_empty());
    assert!(!gone.is_valid());
}

#[test]
fn expired_token_stays_usable_only_for_renewal() {
    let created = Utc::now() - Duration::seconds(7200);

    let plain = Token::with_fields("k", "sec", None, Some(3600), HashMap::new(), created, true);
    assert!(plain.has_expired());
    assert!(!plain.is_valid());

    let mut renewable = Token::with_fields(
        "k",
        "sec",
        Some("handle".into()),
        Some(3600),
        HashMap::new(),
        created,
        true,
    );
    assert!(renewable.has_expired());
    assert!(renewable.is_valid());

    // a renewal request carries the session handle
    assert!(!renewable.parameters().contains_key("oauth_session_handle"));
    renewable.set_for_renewal(true);
    let params = renewable.parameters();
    assert_eq!(params.get("oauth_token").map(String::as_str), Some("k"));
    assert_eq!(params.get("oauth_session_handle").map(String::as_str), Some("handle"));
}

#[test]
fn renewed_token_replaces_the_stored_one() {
    let mut store = MemoryStore::new();
    Token::from_response_body(TWITTER_BODY)
        .store(&mut store, "twitter", "app")
        .unwrap();

    let fresh = Token::from_response_body("oauth_token=def&oauth_token_secret=uvw&oauth_expires_in=600");
    fresh.store(&mut store, "twitter", "app").unwrap();

    let restored = Token::restore(&store, "twitter", "app");
    assert_eq!(restored.key(), "def");
    assert_eq!(restored.duration(), Some(600));
    assert!(restored.session().is_none());
    assert!(!restored.is_renewable());
    assert!(!restored.has_attributes());
}

#[test]
fn attribute_string_survives_round_trips() {
    let encoded = "lang=en&name=J%C3%BCrgen+M%C3%BCller&note=a%26b%3Dc";
    let mut token = Token::new("k", "s");
    token.set_attributes_with_string(encoded);
    assert_eq!(token.attribute("name"), Some("Jürgen Müller"));
    assert_eq!(token.attribute("note"), Some("a&b=c"));

    let mut again = Token::new("k", "s");
    again.set_attributes_with_string(&token.attribute_string());
    assert_eq!(again.attributes(), token.attributes());
    assert_eq!(again.attribute_string(), token.attribute_string());
}
