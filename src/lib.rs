//! # jasper-base
//!
//! Core library for incremental Java syntax parsing.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Logos lexer, marker-based parser, grammar modules
//!   ↓
//! base      → Primitives (TextRange, LineIndex)
//! ```
//!
//! The parser builds a lossless CST in the rust-analyzer style: a logos
//! lexer classifies tokens, a marker-based recursive-descent/Pratt parser
//! records a flat event log, and a separate build pass materializes a
//! rowan green tree on demand. All whitespace and comments are preserved,
//! so the tree always reproduces the input text exactly — including on
//! malformed input, where error spans keep the tree well-formed.

/// Foundation types: TextRange/TextSize, line index
pub mod base;

/// Parser: Logos lexer, marker protocol, grammar modules
pub mod parser;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};

// Re-export the parser surface
pub use parser::{
    Cancelled, DeclarationContext, JavaLanguageLevel, Parse, SyntaxError, SyntaxKind, SyntaxNode,
    parse_expression, parse_file, parse_module, parse_snippet_unit, parse_statement,
    parse_type_reference,
};
