//! Configuration validation
//!
//! Validates assessment specifications before any input is read.

mod error;
mod validator;


pub use error::ValidationError;
pub use validator::validate_spec;
