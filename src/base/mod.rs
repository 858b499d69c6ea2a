//! Foundation types for the jasper toolchain.
//!
//! This module provides fundamental types used throughout the parser:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion (UTF-8 and UTF-16)
//!
//! This module has NO dependencies on other jasper modules.

mod line_index;

pub use line_index::{LineCol, LineIndex};
pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;
