//! Pattern parsing
//!
//! Type patterns (`Type name`), record deconstruction patterns
//! (`Point(int x, int y)`), and `when` guards. A pattern is only committed
//! when its shape is certain; otherwise the attempt rolls back so the
//! caller can read the same tokens as a type or an expression.

use crate::parser::errors::ErrorCode;
use crate::parser::language_level::Feature;
use crate::parser::parser::{CompletedMarker, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::{declarations, expressions, types};

/// Speculatively parse a pattern. `Foo f` commits a TYPE_PATTERN,
/// `Foo(...)` a RECORD_PATTERN; a bare `Foo` rolls back and returns None
/// (it may be an enum constant or an expression).
pub(crate) fn try_pattern(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let m = p.start();
    declarations::modifier_list(p);

    let viable = matches!(types::type_reference(p), Some(info) if !info.has_errors);
    if !viable {
        m.rollback(p);
        return None;
    }

    if p.at(SyntaxKind::L_PAREN) {
        p.require_feature(Feature::RecordPatterns);
        record_component_patterns(p);
        return Some(m.complete(p, SyntaxKind::RECORD_PATTERN));
    }
    if p.at(SyntaxKind::IDENT) && !p.at_contextual_kw(SyntaxKind::WHEN_KW) {
        types::name(p);
        return Some(m.complete(p, SyntaxKind::TYPE_PATTERN));
    }

    m.rollback(p);
    None
}

fn record_component_patterns(p: &mut Parser<'_>) {
    p.bump(); // (
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        if try_pattern(p).is_none() {
            // Inside a record pattern there is no expression fallback.
            p.err_and_bump("expected a pattern", ErrorCode::E0404);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this record pattern is never closed",
        );
    }
}

/// The right-hand side of `instanceof`: a pattern when one is present,
/// otherwise a plain type.
pub(crate) fn instanceof_operand(p: &mut Parser<'_>) {
    if let Some(pat) = try_pattern(p) {
        if pat.kind(p) == SyntaxKind::TYPE_PATTERN {
            p.require_feature(Feature::InstanceofPatterns);
        }
        return;
    }
    if types::type_reference(p).is_none() {
        p.error("expected a type after 'instanceof'", ErrorCode::E0403);
    }
}

/// Guard = 'when' Expression
pub(crate) fn guard(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::WHEN_KW);
    if expressions::expression(p).is_none() {
        p.error("expected a guard condition", ErrorCode::E0401);
    }
    m.complete(p, SyntaxKind::GUARD);
}
