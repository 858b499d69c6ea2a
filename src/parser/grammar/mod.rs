//! Java grammar
//!
//! Each submodule owns one grammar region; this module owns the root
//! drivers, one per entry point. Fragment drivers (expression, statement,
//! type) wrap their result in a SNIPPET root and coalesce anything left
//! over after the fragment into a single trailing ERROR node, so every
//! entry point upholds the same guarantees: the tree covers the whole
//! input, and the parser terminates on arbitrary bytes.

pub(crate) mod declarations;
pub(crate) mod expressions;
pub(crate) mod expressions_rd;
pub(crate) mod modules;
pub(crate) mod patterns;
pub(crate) mod snippets;
pub(crate) mod statements;
pub(crate) mod types;

pub use declarations::{DeclarationContext, LegacyDeclarationContext};

use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Root driver for an ordinary compilation unit.
pub(crate) fn source_file(p: &mut Parser<'_>) {
    declarations::compilation_unit(p);
}

/// Root driver for a module-info compilation unit.
pub(crate) fn module_file(p: &mut Parser<'_>) {
    let m = p.start();
    while p.at(SyntaxKind::IMPORT_KW) {
        declarations::import_declaration(p);
    }
    if modules::at_module_start(p) {
        modules::module_declaration(p);
    } else {
        p.error("expected a module declaration", ErrorCode::E0502);
    }
    trailing_garbage(p);
    m.complete(p, SyntaxKind::COMPILATION_UNIT);
}

/// Root driver for a free-standing snippet.
pub(crate) fn snippet_file(p: &mut Parser<'_>) {
    snippets::snippet(p);
}

/// Root driver for a single expression fragment.
pub(crate) fn expression_fragment(p: &mut Parser<'_>) {
    let m = p.start();
    if expressions::expression(p).is_none() {
        p.error("expected an expression", ErrorCode::E0401);
    }
    trailing_garbage(p);
    m.complete(p, SyntaxKind::SNIPPET);
}

/// Root driver for a single statement fragment.
pub(crate) fn statement_fragment(p: &mut Parser<'_>) {
    let m = p.start();
    let before = p.pos();
    if !statements::statement(p) && p.pos() == before {
        p.error("expected a statement", ErrorCode::E0206);
    }
    trailing_garbage(p);
    m.complete(p, SyntaxKind::SNIPPET);
}

/// Root driver for a single type-reference fragment.
pub(crate) fn type_fragment(p: &mut Parser<'_>) {
    let m = p.start();
    if types::type_reference(p).is_none() {
        p.error("expected a type", ErrorCode::E0403);
    }
    trailing_garbage(p);
    m.complete(p, SyntaxKind::SNIPPET);
}

/// Anything after a completed fragment coalesces into one ERROR node.
fn trailing_garbage(p: &mut Parser<'_>) {
    if p.at_eof() || p.is_cancelled() {
        return;
    }
    p.error_recover("unexpected content after the parsed item", ErrorCode::E0206, &[]);
}
