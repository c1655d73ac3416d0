/// Fully qualified store keys for one `(provider, prefix)` pair:
/// `<prefix>.<provider>.<field>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub token: String,
    pub secret: String,
    pub session: String,
    pub duration: String,
    pub attributes: String,
    pub created: String,
    pub renewable: String,
}

impl StoreKeys {
    pub fn new(provider: &str, prefix: &str) -> Self {
        let key = |field: &str| format!("{prefix}.{provider}.{field}");
        Self {
            token: key("token"),
            secret: key("secret"),
            session: key("session"),
            duration: key("duration"),
            attributes: key("attributes"),
            created: key("created"),
            renewable: key("renewable"),
        }
    }

    /// Every key, in layout order.
    pub fn all(&self) -> [&str; 7] {
        [
            self.token.as_str(),
            self.secret.as_str(),
            self.session.as_str(),
            self.duration.as_str(),
            self.attributes.as_str(),
            self.created.as_str(),
            self.renewable.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let keys = StoreKeys::new("twitter", "app");
        assert_eq!(
            keys.all(),
            [
                "app.twitter.token",
                "app.twitter.secret",
                "app.twitter.session",
                "app.twitter.duration",
                "app.twitter.attributes",
                "app.twitter.created",
                "app.twitter.renewable",
            ]
        );
    }
}
