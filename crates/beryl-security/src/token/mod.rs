//! Token issuance, verification, and type tags.

pub mod claims;
pub mod manager;

pub use claims::TokenType;
pub use manager::{Token, TokenManager};
