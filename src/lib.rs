//! # OAuth Token Library
//!
//! Models an OAuth credential: key/secret pair, renewal session, lifetime and
//! provider attributes. Tokens are parsed from form-encoded provider responses,
//! checked for expiry and renewability, and persisted to a key-value store.
//!
//! Modules:
//! - `token` — the `Token` value object and its persistence
//! - `parser` — `key=value&...` grammar and response-body mapping
//! - `store` — key-value store trait, memory and YAML file stores
//! - `config` — settings file and loader

pub mod config;
pub mod helpers;
pub mod parser;
pub mod store;
#[cfg(test)]
mod tests;
pub mod token;
pub mod utils;

pub use crate::store::{Change, FileStore, KeyValueStore, MemoryStore};
pub use crate::token::Token;
