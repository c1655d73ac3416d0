//! The OAuth token value object and its persistence.

pub mod persist;
pub mod token;

pub use token::Token;
