//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons)
//! - E03xx: Declaration errors (members, modifiers)
//! - E04xx: Expression errors
//! - E05xx: Module/import errors
//! - E06xx: Language-level errors (syntax newer than the requested level)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Unterminated character literal
    E0104,
    /// Unterminated text block
    E0105,

    // =========================================================================
    // E02xx: Structural errors (braces, semicolons, delimiters)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Expected a specific token that was absent
    E0205,
    /// Unexpected token (skipped-token run)
    E0206,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Unexpected token in a member position
    E0302,
    /// Statement not legal in this declaration context
    E0303,
    /// Missing method/constructor body (neither `;` nor `{`)
    E0304,
    /// Varargs parameter not in last position
    E0305,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expected an expression
    E0401,
    /// Missing operand in expression
    E0402,
    /// Expected a type after `instanceof` or in a cast
    E0403,
    /// Expected a pattern
    E0404,

    // =========================================================================
    // E05xx: Module/import errors
    // =========================================================================
    /// Missing module/package name
    E0501,
    /// Unrecognized module directive
    E0502,
    /// Malformed import statement
    E0503,
    /// Snippet unit matched no production
    E0504,

    // =========================================================================
    // E06xx: Language-level errors
    // =========================================================================
    /// Syntax requires a newer language level
    E0601,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Generic syntax error
    E0901,
}

impl ErrorCode {
    /// Get the code as a string, e.g. "E0201"
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0601 => "E0601",
            Self::E0901 => "E0901",
        }
    }

    /// A short description of the error category
    pub fn description(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0104 => "unterminated character literal",
            Self::E0105 => "unterminated text block",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "expected token",
            Self::E0206 => "unexpected token",
            Self::E0301 => "missing name",
            Self::E0302 => "unexpected member",
            Self::E0303 => "misplaced statement",
            Self::E0304 => "missing body",
            Self::E0305 => "misplaced varargs",
            Self::E0401 => "expected expression",
            Self::E0402 => "missing operand",
            Self::E0403 => "expected type",
            Self::E0404 => "expected pattern",
            Self::E0501 => "missing module name",
            Self::E0502 => "unrecognized directive",
            Self::E0503 => "malformed import",
            Self::E0504 => "unclassifiable snippet",
            Self::E0601 => "language level",
            Self::E0901 => "syntax error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(ErrorCode::E0201.to_string(), "E0201");
        assert_eq!(ErrorCode::E0601.description(), "language level");
    }
}
