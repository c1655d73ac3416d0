//! Shared constants and invariants

// Protocol parameter names recognised in provider responses
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";
pub const OAUTH_SESSION_HANDLE: &str = "oauth_session_handle";
pub const OAUTH_EXPIRES_IN: &str = "oauth_expires_in";
pub const OAUTH_TOKEN_DURATION: &str = "oauth_token_duration";
pub const OAUTH_TOKEN_ATTRIBUTES: &str = "oauth_token_attributes";

/// Names an attribute may never shadow in `Token::parameters`.
pub const RESERVED_PARAMETERS: [&str; 6] = [
    OAUTH_TOKEN,
    OAUTH_TOKEN_SECRET,
    OAUTH_SESSION_HANDLE,
    OAUTH_EXPIRES_IN,
    OAUTH_TOKEN_DURATION,
    OAUTH_TOKEN_ATTRIBUTES,
];

// Defaults
pub const DEFAULT_CONFIG_PATH: &str = "oauth-token.yaml";
pub const DEFAULT_STORE_PATH: &str = "oauth-token-store.yaml";
pub const DEFAULT_STORE_PREFIX: &str = "app";
pub const DEFAULT_LOG_LEVEL: &str = "info";
