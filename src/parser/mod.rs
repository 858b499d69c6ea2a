//! Incremental Java parser
//!
//! Entry points, one per grammar start symbol. Every entry lexes through
//! the shared [`TokenCache`], drives the grammar over the non-trivia token
//! stream, and materializes a lossless rowan tree whose text equals the
//! input byte-for-byte — on malformed input too.
//!
//! The plain entry points never fail; the `_with` variants take a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) and return
//! `Err(Cancelled)` when the parse was abandoned mid-flight. Cancellation
//! is cooperative: the parser polls the token at a fixed consumption
//! interval, so long files stop promptly without poisoning shared state.

pub mod errors;
pub mod grammar;
pub mod language_level;
pub mod lexer;
#[allow(clippy::module_inception)]
pub(crate) mod parser;
pub mod syntax_kind;
pub mod token_source;

use std::sync::OnceLock;

use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use errors::{Cancelled, ErrorCode, Severity, SyntaxError};
pub use grammar::{DeclarationContext, LegacyDeclarationContext};
pub use language_level::{Feature, JavaLanguageLevel};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{ExpressionStrategy, Parse};
pub use syntax_kind::{
    JavaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};
pub use token_source::{LexedFile, TokenCache};

/// Process-wide token cache shared by all entry points. Lexing is a pure
/// function of the text, so sharing across callers is safe.
pub fn global_token_cache() -> &'static TokenCache {
    static CACHE: OnceLock<TokenCache> = OnceLock::new();
    CACHE.get_or_init(TokenCache::new)
}

/// Parse a compilation unit (including module-info files).
pub fn parse_file(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_file_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_file`].
pub fn parse_file_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::source_file)
}

/// [`parse_file`] with an explicit expression-parsing strategy. Both
/// strategies produce structurally equivalent trees; this entry exists so
/// they can be compared against each other.
pub fn parse_file_with_strategy(
    text: &str,
    level: JavaLanguageLevel,
    strategy: ExpressionStrategy,
) -> Parse {
    infallible(run(text, level, CancellationToken::new(), strategy, grammar::source_file))
}

/// Parse a module-info compilation unit.
pub fn parse_module(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_module_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_module`].
pub fn parse_module_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::module_file)
}

/// Parse a free-standing snippet: imports, declarations, statements, and
/// bare expressions, classified per element.
pub fn parse_snippet_unit(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_snippet_unit_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_snippet_unit`].
pub fn parse_snippet_unit_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::snippet_file)
}

/// Parse a single expression fragment.
pub fn parse_expression(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_expression_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_expression`].
pub fn parse_expression_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::expression_fragment)
}

/// [`parse_expression`] with an explicit expression-parsing strategy.
pub fn parse_expression_with_strategy(
    text: &str,
    level: JavaLanguageLevel,
    strategy: ExpressionStrategy,
) -> Parse {
    infallible(run(
        text,
        level,
        CancellationToken::new(),
        strategy,
        grammar::expression_fragment,
    ))
}

/// Parse a single statement fragment.
pub fn parse_statement(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_statement_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_statement`].
pub fn parse_statement_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::statement_fragment)
}

/// Parse a single type-reference fragment.
pub fn parse_type_reference(text: &str, level: JavaLanguageLevel) -> Parse {
    infallible(parse_type_reference_with(text, level, CancellationToken::new()))
}

/// Cancellable [`parse_type_reference`].
pub fn parse_type_reference_with(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
) -> Result<Parse, Cancelled> {
    run(text, level, cancel, ExpressionStrategy::default(), grammar::type_fragment)
}

fn run(
    text: &str,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
    strategy: ExpressionStrategy,
    drive: fn(&mut parser::Parser<'_>),
) -> Result<Parse, Cancelled> {
    let lexed = global_token_cache().get_or_lex(text);
    let mut p = parser::Parser::new(text, lexed.tokens(), level, cancel);
    p.set_expression_strategy(strategy);
    drive(&mut p);
    let mut parse = p.finish()?;
    // Lexer diagnostics come first: they precede any structural error.
    parse.errors.splice(0..0, lexed.errors().iter().cloned());
    debug!(
        len = text.len(),
        errors = parse.errors.len(),
        "parse finished"
    );
    Ok(parse)
}

fn infallible(result: Result<Parse, Cancelled>) -> Parse {
    match result {
        Ok(parse) => parse,
        // A fresh token is never cancelled.
        Err(Cancelled) => unreachable!("parse cancelled without a cancellation request"),
    }
}
