//! Parser error handling module
//!
//! This module provides error handling for the Java parser:
//! - Categorized error codes for filtering and documentation
//! - Suggestions/hints for common mistakes
//! - A distinguishable cancellation condition (not an error span)

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{Cancelled, Severity, SyntaxError};
