//! Expression parsing (recursive descent)
//!
//! One named function per precedence level, each folding its operators
//! left-to-right and delegating tighter binding to the next level. Shares
//! the operator table, unary/postfix/primary machinery, and speculation
//! helpers with the precedence-climbing implementation, and produces
//! byte-identical trees — the two are interchangeable behind the parser's
//! expression strategy and are compared against each other in tests.

use crate::parser::errors::ErrorCode;
use crate::parser::parser::{CompletedMarker, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::expressions::{self, current_binary_op};
use super::patterns;

const RELATIONAL_BP: u8 = 9;

pub(crate) fn expression(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    assignment(p)
}

/// Assignment is right-associative: `a = b = c` parses as `a = (b = c)`.
fn assignment(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = conditional(p)?;
    if let Some(op) = current_binary_op(p) {
        if op.node == SyntaxKind::ASSIGNMENT_EXPR {
            let m = lhs.precede(p);
            for _ in 0..op.n_tokens {
                p.bump();
            }
            if assignment(p).is_none() {
                p.error("expected an operand", ErrorCode::E0402);
            }
            return Some(m.complete(p, SyntaxKind::ASSIGNMENT_EXPR));
        }
    }
    Some(lhs)
}

/// Ternary is right-associative; the middle operand is a full expression,
/// the tail re-enters at this level.
fn conditional(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = logical_or(p)?;
    if !p.at(SyntaxKind::QUESTION) {
        return Some(lhs);
    }
    let m = lhs.precede(p);
    p.bump(); // ?
    if expression(p).is_none() {
        p.error("expected an expression", ErrorCode::E0401);
    }
    p.expect(SyntaxKind::COLON);
    if conditional(p).is_none() {
        p.error("expected an expression", ErrorCode::E0401);
    }
    Some(m.complete(p, SyntaxKind::CONDITIONAL_EXPR))
}

fn logical_or(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 3, logical_and)
}

fn logical_and(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 4, bitwise_or)
}

fn bitwise_or(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 5, bitwise_xor)
}

fn bitwise_xor(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 6, bitwise_and)
}

fn bitwise_and(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 7, equality)
}

fn equality(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 8, relational)
}

fn relational(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, RELATIONAL_BP, shift)
}

fn shift(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 10, additive)
}

fn additive(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 11, multiplicative)
}

fn multiplicative(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    fold_left(p, 12, expressions::unary_expr)
}

/// Fold every operator of exactly binding power `bp` left-associatively.
/// `instanceof` joins at the relational level.
fn fold_left(
    p: &mut Parser<'_>,
    bp: u8,
    next: fn(&mut Parser<'_>) -> Option<CompletedMarker>,
) -> Option<CompletedMarker> {
    let mut lhs = next(p)?;
    loop {
        if p.is_cancelled() {
            break;
        }
        if bp == RELATIONAL_BP && p.at(SyntaxKind::INSTANCEOF_KW) {
            let m = lhs.precede(p);
            p.bump();
            patterns::instanceof_operand(p);
            lhs = m.complete(p, SyntaxKind::INSTANCEOF_EXPR);
            continue;
        }
        let Some(op) = current_binary_op(p) else { break };
        if op.bp != bp || op.node == SyntaxKind::ASSIGNMENT_EXPR {
            break;
        }
        let m = lhs.precede(p);
        for _ in 0..op.n_tokens {
            p.bump();
        }
        if next(p).is_none() {
            p.error("expected an operand", ErrorCode::E0402);
        }
        lhs = m.complete(p, SyntaxKind::BINARY_EXPR);
    }
    Some(lhs)
}
