//! # beryl-core
//!
//! Core crate for the Beryl commons. Contains configuration schemas,
//! the security policy, logging setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Beryl crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
