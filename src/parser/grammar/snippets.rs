//! Snippet parsing
//!
//! A snippet is a free-standing fragment with no surrounding file: it may
//! be an import, a member or type declaration, a statement, or a bare
//! expression. Each form is attempted in that order; an attempt that
//! records any diagnostic is rolled back wholesale, so earlier attempts
//! never poison later ones. Content matching no form at all coalesces into
//! one ERROR node per run.

use tracing::trace;

use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

use super::{declarations, expressions, statements};

/// Parse the whole text as a sequence of snippet elements under one
/// SNIPPET root.
pub(crate) fn snippet(p: &mut Parser<'_>) {
    let m = p.start();
    while !p.at_eof() && !p.is_cancelled() {
        let before = p.pos();
        snippet_element(p);
        if p.pos() == before {
            p.err_and_bump("expected a declaration, statement, or expression", ErrorCode::E0504);
        }
    }
    m.complete(p, SyntaxKind::SNIPPET);
}

fn snippet_element(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::IMPORT_KW) {
        declarations::import_declaration(p);
        return;
    }

    // Declarations: local variables and types, then methods, fields, and
    // constructors. The dispatch rolls non-committing attempts back itself.
    if declarations::member(p, declarations::DeclarationContext::Snippet) {
        trace!("snippet element parsed as a declaration");
        return;
    }

    // Statement: control flow and expression statements with ';'.
    let attempt = p.start();
    let parsed = statements::statement(p);
    if parsed && p.hard_errors_since(&attempt) == 0 {
        trace!("snippet element parsed as a statement");
        attempt.abandon(p);
        return;
    }
    attempt.rollback(p);

    // Bare expression, with or without a trailing ';'.
    let attempt = p.start();
    let stmt = p.start();
    if expressions::expression(p).is_some() && p.hard_errors_since(&attempt) == 0 {
        trace!("snippet element parsed as a bare expression");
        p.eat(SyntaxKind::SEMICOLON);
        stmt.complete(p, SyntaxKind::EXPRESSION_STATEMENT);
        attempt.abandon(p);
        return;
    }
    attempt.rollback(p);

    // Nothing fits: one coalesced error run up to the next ';'.
    p.error_recover(
        "could not parse this as a declaration, statement, or expression",
        ErrorCode::E0504,
        &[SyntaxKind::SEMICOLON],
    );
    p.eat(SyntaxKind::SEMICOLON);
}
