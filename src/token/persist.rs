use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::helpers::time::{from_unix_ts, now};
use crate::parser::form::decode_map;
use crate::parser::response::parse_duration;
use crate::store::layout::StoreKeys;
use crate::store::{Change, KeyValueStore};
use crate::token::token::Token;

static TRUE: &str = "true";
static FALSE: &str = "false";

impl Token {
    /// Restore a token stored under `<prefix>.<provider>.*`.
    ///
    /// Missing entries are not an error: without `token`/`secret` the result
    /// is simply not [`Token::is_valid`].
    pub fn restore(store: &impl KeyValueStore, provider: &str, prefix: &str) -> Self {
        let keys = StoreKeys::new(provider, prefix);

        let key = store.get(&keys.token).unwrap_or_default();
        let secret = store.get(&keys.secret).unwrap_or_default();
        let session = store.get(&keys.session);
        let duration = store.get(&keys.duration).and_then(|d| parse_duration(&d));
        let attributes = store
            .get(&keys.attributes)
            .map(|encoded| decode_map(&encoded))
            .unwrap_or_else(HashMap::new);
        let created = store
            .get(&keys.created)
            .and_then(|c| c.trim().parse::<i64>().ok())
            .and_then(from_unix_ts)
            .unwrap_or_else(now);
        let renewable = store.get(&keys.renewable).is_some_and(|r| r == TRUE);

        debug!(provider, prefix, found = !key.is_empty(), "token restored from store");
        Token::with_fields(key, secret, session, duration, attributes, created, renewable)
    }

    /// Write every persisted field as one batch, replacing what was stored
    /// before. If the store rejects the batch the error is returned.
    ///
    /// An absent session or duration removes its entry, so a later
    /// [`Token::restore`] sees the same absence.
    pub fn store(&self, store: &mut impl KeyValueStore, provider: &str, prefix: &str) -> Result<()> {
        let keys = StoreKeys::new(provider, prefix);

        let changes = [
            Change::set(&keys.token, &self.key),
            Change::set(&keys.secret, &self.secret),
            match &self.session {
                Some(session) => Change::set(&keys.session, session),
                None => Change::remove(&keys.session),
            },
            match self.duration {
                Some(duration) => Change::set(&keys.duration, duration.to_string()),
                None => Change::remove(&keys.duration),
            },
            Change::set(&keys.attributes, self.attribute_string()),
            Change::set(&keys.created, self.created.timestamp().to_string()),
            Change::set(&keys.renewable, if self.renewable { TRUE } else { FALSE }),
        ];
        store
            .apply(&changes)
            .with_context(|| format!("failed to store token for '{prefix}.{provider}'"))?;

        info!(provider, prefix, "token stored");
        Ok(())
    }

    /// Delete every entry of `<prefix>.<provider>.*`, present or not.
    pub fn remove_from_store(store: &mut impl KeyValueStore, provider: &str, prefix: &str) -> Result<()> {
        let changes: Vec<Change> = StoreKeys::new(provider, prefix)
            .all()
            .into_iter()
            .map(Change::remove)
            .collect();
        store
            .apply(&changes)
            .with_context(|| format!("failed to remove token for '{prefix}.{provider}'"))?;

        info!(provider, prefix, "token removed from store");
        Ok(())
    }
}
