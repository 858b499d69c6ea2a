//! Syntax kinds for the rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the Java Language Specification grammar structure.

/// All syntax kinds (tokens and nodes) in Java
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    INT_NUMBER,         // 42, 0x2A, 0b101, 10_000, 42L
    FLOAT_NUMBER,       // 3.14, 1e9, 2.5f
    CHAR_LITERAL,       // 'c'
    STRING,             // "hello"
    TEXT_BLOCK,         // """..."""

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    SEMICOLON,          // ;
    COMMA,              // ,
    DOT,                // .
    ELLIPSIS,           // ...
    AT,                 // @
    COLON,              // :
    COLON_COLON,        // ::
    ARROW,              // ->
    QUESTION,           // ?
    EQ,                 // =
    EQ_EQ,              // ==
    BANG,               // !
    BANG_EQ,            // !=
    LT,                 // <   (always a single token; see lexer notes on `>`)
    LT_EQ,              // <=
    GT,                 // >   (>> >>> >= are glued from adjacent tokens)
    PLUS,               // +
    PLUS_PLUS,          // ++
    PLUS_EQ,            // +=
    MINUS,              // -
    MINUS_MINUS,        // --
    MINUS_EQ,           // -=
    STAR,               // *
    STAR_EQ,            // *=
    SLASH,              // /
    SLASH_EQ,           // /=
    PERCENT,            // %
    PERCENT_EQ,         // %=
    AMP,                // &
    AMP_AMP,            // &&
    AMP_EQ,             // &=
    PIPE,               // |
    PIPE_PIPE,          // ||
    PIPE_EQ,            // |=
    CARET,              // ^
    CARET_EQ,           // ^=
    TILDE,              // ~
    SHL,                // <<
    SHL_EQ,             // <<=

    // =========================================================================
    // KEYWORDS - reserved words
    // =========================================================================
    ABSTRACT_KW,
    ASSERT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    NON_SEALED_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // =========================================================================
    // KEYWORDS - contextual (lexed as IDENT, remapped at parse sites)
    // =========================================================================
    VAR_KW,
    YIELD_KW,
    RECORD_KW,
    SEALED_KW,
    PERMITS_KW,
    WHEN_KW,
    MODULE_KW,
    OPEN_KW,
    REQUIRES_KW,
    EXPORTS_KW,
    OPENS_KW,
    USES_KW,
    PROVIDES_KW,
    TO_KW,
    WITH_KW,
    TRANSITIVE_KW,

    // =========================================================================
    // NODES - top level
    // =========================================================================
    COMPILATION_UNIT,
    PACKAGE_DECLARATION,
    IMPORT_DECLARATION,
    MODULE_DECLARATION,
    SNIPPET,

    // Module directives
    REQUIRES_DIRECTIVE,
    EXPORTS_DIRECTIVE,
    OPENS_DIRECTIVE,
    USES_DIRECTIVE,
    PROVIDES_DIRECTIVE,

    // =========================================================================
    // NODES - declarations
    // =========================================================================
    CLASS_DECLARATION,
    INTERFACE_DECLARATION,
    ENUM_DECLARATION,
    RECORD_DECLARATION,
    ANNOTATION_INTERFACE_DECLARATION,

    MODIFIER_LIST,
    ANNOTATION,
    TYPE_PARAMETER_LIST,
    TYPE_PARAMETER,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    PERMITS_CLAUSE,
    CLASS_BODY,
    ENUM_CONSTANT,
    RECORD_HEADER,
    RECORD_COMPONENT,

    FIELD_DECLARATION,
    METHOD_DECLARATION,
    CONSTRUCTOR_DECLARATION,
    INITIALIZER,
    ANNOTATION_ELEMENT_DECLARATION,
    DEFAULT_VALUE_CLAUSE,
    VARIABLE_DECLARATOR,
    PARAMETER_LIST,
    PARAMETER,
    THROWS_CLAUSE,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    BLOCK,
    EMPTY_STATEMENT,
    EXPRESSION_STATEMENT,
    LOCAL_VARIABLE_DECLARATION,
    IF_STATEMENT,
    WHILE_STATEMENT,
    DO_WHILE_STATEMENT,
    FOR_STATEMENT,
    FOR_EACH_STATEMENT,
    SWITCH_STATEMENT,
    SWITCH_BLOCK,
    SWITCH_RULE,
    SWITCH_LABEL,
    TRY_STATEMENT,
    RESOURCE_LIST,
    RESOURCE,
    CATCH_CLAUSE,
    CATCH_PARAMETER,
    FINALLY_CLAUSE,
    SYNCHRONIZED_STATEMENT,
    RETURN_STATEMENT,
    THROW_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    YIELD_STATEMENT,
    ASSERT_STATEMENT,
    LABELED_STATEMENT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    LITERAL,
    NAME_REF,
    THIS_EXPR,
    SUPER_EXPR,
    CLASS_LITERAL_EXPR,
    PAREN_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    POSTFIX_EXPR,
    ASSIGNMENT_EXPR,
    CONDITIONAL_EXPR,
    CAST_EXPR,
    INSTANCEOF_EXPR,
    LAMBDA_EXPR,
    LAMBDA_PARAMETER_LIST,
    METHOD_REF_EXPR,
    NEW_EXPR,
    ARRAY_INITIALIZER,
    METHOD_CALL_EXPR,
    FIELD_ACCESS_EXPR,
    ARRAY_ACCESS_EXPR,
    ARGUMENT_LIST,
    SWITCH_EXPRESSION,

    // =========================================================================
    // NODES - types and names
    // =========================================================================
    TYPE_REFERENCE,
    TYPE_ARGUMENT_LIST,
    WILDCARD_TYPE,
    TYPE_UNION,
    TYPE_INTERSECTION,
    QUALIFIED_NAME,
    NAME,

    // =========================================================================
    // NODES - patterns
    // =========================================================================
    TYPE_PATTERN,
    RECORD_PATTERN,
    GUARD,

    // =========================================================================
    // Special
    // =========================================================================
    ERROR,
    TOMBSTONE,  // Placeholder for abandoned markers; never appears in a tree
    EOF,        // Sentinel for "no more tokens"; never appears in a tree

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a reserved keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::NULL_KW as u16)
    }

    /// Check if this is a contextual keyword (only a keyword in certain positions)
    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (Self::VAR_KW as u16) && (self as u16) <= (Self::TRANSITIVE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::SHL_EQ as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::FLOAT_NUMBER
                | Self::CHAR_LITERAL
                | Self::STRING
                | Self::TEXT_BLOCK
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this token can start a primitive type
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::BOOLEAN_KW
                | Self::BYTE_KW
                | Self::SHORT_KW
                | Self::INT_KW
                | Self::LONG_KW
                | Self::CHAR_KW
                | Self::FLOAT_KW
                | Self::DOUBLE_KW
        )
    }

    /// Check if this token is a modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PROTECTED_KW
                | Self::PRIVATE_KW
                | Self::ABSTRACT_KW
                | Self::STATIC_KW
                | Self::FINAL_KW
                | Self::STRICTFP_KW
                | Self::NATIVE_KW
                | Self::SYNCHRONIZED_KW
                | Self::TRANSIENT_KW
                | Self::VOLATILE_KW
                | Self::DEFAULT_KW
                | Self::NON_SEALED_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLanguage {}

impl rowan::Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<JavaLanguage>;
