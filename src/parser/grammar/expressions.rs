//! Expression parsing (precedence climbing)
//!
//! One Pratt loop folds all binary, assignment, ternary, and `instanceof`
//! forms by comparing each operator's binding power against the caller's
//! minimum threshold — no grammar-rule recursion per precedence level.
//! The alternate recursive-descent implementation of the same grammar lives
//! in `expressions_rd` and is selected via the parser's expression strategy.
//!
//! Ambiguities are resolved by speculation, never exceptions:
//! - `(Type) expr` cast vs. `(expr)` paren vs. `(params) -> body` lambda:
//!   lambda is decided by a bounded token scan for `->` after the matching
//!   `)`; the cast attempt then parses a type and inspects the follow token,
//!   rolling back to the paren reading when it cannot be a cast.
//! - `>`-family operators are glued from adjacent single `>` tokens, so
//!   `Map<K, List<V>>` and `a >> b` coexist.
//! - `instanceof` delegates its right side to the pattern parser.

use tracing::trace;

use crate::parser::errors::ErrorCode;
use crate::parser::language_level::Feature;
use crate::parser::parser::{CompletedMarker, ExpressionStrategy, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::{expressions_rd, patterns, statements, types};

/// Binding powers, lowest binds loosest. Assignment and ternary are
/// right-associative; everything else is left-associative.
const ASSIGN_BP: u8 = 1;
const TERNARY_BP: u8 = 2;
const RELATIONAL_BP: u8 = 9;
const SHIFT_BP: u8 = 10;

/// Parse a full expression with the configured strategy.
pub(crate) fn expression(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.expression_strategy() {
        ExpressionStrategy::PrecedenceClimbing => expr_bp(p, 1),
        ExpressionStrategy::RecursiveDescent => expressions_rd::expression(p),
    }
}

/// The precedence-climbing loop.
pub(crate) fn expr_bp(p: &mut Parser<'_>, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        if p.is_cancelled() {
            break;
        }

        // Ternary folds right-associatively: the branch after ':' re-enters
        // at the ternary threshold itself.
        if p.at(SyntaxKind::QUESTION) && TERNARY_BP >= min_bp {
            let m = lhs.precede(p);
            p.bump(); // ?
            if expr_bp(p, 1).is_none() {
                p.error("expected an expression", ErrorCode::E0401);
            }
            p.expect(SyntaxKind::COLON);
            if expr_bp(p, TERNARY_BP).is_none() {
                p.error("expected an expression", ErrorCode::E0401);
            }
            lhs = m.complete(p, SyntaxKind::CONDITIONAL_EXPR);
            continue;
        }

        if p.at(SyntaxKind::INSTANCEOF_KW) {
            if RELATIONAL_BP < min_bp {
                break;
            }
            let m = lhs.precede(p);
            p.bump();
            patterns::instanceof_operand(p);
            lhs = m.complete(p, SyntaxKind::INSTANCEOF_EXPR);
            continue;
        }

        let Some(op) = current_binary_op(p) else { break };
        if op.bp < min_bp {
            break;
        }
        let m = lhs.precede(p);
        for _ in 0..op.n_tokens {
            p.bump();
        }
        let next_min = if op.right_assoc { op.bp } else { op.bp + 1 };
        if expr_bp(p, next_min).is_none() {
            p.error("expected an operand", ErrorCode::E0402);
        }
        lhs = m.complete(p, op.node);
    }

    Some(lhs)
}

pub(crate) struct BinOp {
    pub bp: u8,
    /// Number of raw tokens the operator occupies (`>` `>` glues to 2).
    pub n_tokens: u8,
    pub node: SyntaxKind,
    pub right_assoc: bool,
}

/// Classify the token(s) at the cursor as a binary/assignment operator.
///
/// The `>` family is not lexed greedily (generics need single `>`), so
/// `>> >>> >= >>= >>>=` are recognized here by gluing byte-adjacent tokens.
pub(crate) fn current_binary_op(p: &Parser<'_>) -> Option<BinOp> {
    use SyntaxKind as S;

    let left = |bp: u8| BinOp {
        bp,
        n_tokens: 1,
        node: S::BINARY_EXPR,
        right_assoc: false,
    };
    let assign = |n_tokens: u8| BinOp {
        bp: ASSIGN_BP,
        n_tokens,
        node: S::ASSIGNMENT_EXPR,
        right_assoc: true,
    };

    let op = match p.current_kind() {
        S::EQ
        | S::PLUS_EQ
        | S::MINUS_EQ
        | S::STAR_EQ
        | S::SLASH_EQ
        | S::PERCENT_EQ
        | S::AMP_EQ
        | S::PIPE_EQ
        | S::CARET_EQ
        | S::SHL_EQ => assign(1),

        S::GT => {
            if p.nth_joined(0) && p.nth_at(1, S::GT) {
                if p.nth_joined(1) && p.nth_at(2, S::GT) {
                    if p.nth_joined(2) && p.nth_at(3, S::EQ) {
                        assign(4) // >>>=
                    } else {
                        BinOp { bp: SHIFT_BP, n_tokens: 3, node: S::BINARY_EXPR, right_assoc: false }
                    }
                } else if p.nth_joined(1) && p.nth_at(2, S::EQ) {
                    assign(3) // >>=
                } else {
                    BinOp { bp: SHIFT_BP, n_tokens: 2, node: S::BINARY_EXPR, right_assoc: false }
                }
            } else if p.nth_joined(0) && p.nth_at(1, S::EQ) {
                BinOp { bp: RELATIONAL_BP, n_tokens: 2, node: S::BINARY_EXPR, right_assoc: false }
            } else {
                left(RELATIONAL_BP)
            }
        }

        S::PIPE_PIPE => left(3),
        S::AMP_AMP => left(4),
        S::PIPE => left(5),
        S::CARET => left(6),
        S::AMP => left(7),
        S::EQ_EQ | S::BANG_EQ => left(8),
        S::LT | S::LT_EQ => left(RELATIONAL_BP),
        S::SHL => left(SHIFT_BP),
        S::PLUS | S::MINUS => left(11),
        S::STAR | S::SLASH | S::PERCENT => left(12),

        _ => return None,
    };
    Some(op)
}

/// UnaryExpression = ('+' | '-' | '!' | '~' | '++' | '--') UnaryExpression
///                 | CastExpression | PostfixExpression
pub(crate) fn unary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.current_kind() {
        SyntaxKind::PLUS
        | SyntaxKind::MINUS
        | SyntaxKind::BANG
        | SyntaxKind::TILDE
        | SyntaxKind::PLUS_PLUS
        | SyntaxKind::MINUS_MINUS => {
            let m = p.start();
            p.bump();
            if unary_expr(p).is_none() {
                p.error("expected an operand", ErrorCode::E0402);
            }
            Some(m.complete(p, SyntaxKind::UNARY_EXPR))
        }
        SyntaxKind::L_PAREN if !at_lambda(p) => {
            if let Some(cast) = try_cast_expr(p) {
                Some(cast)
            } else {
                postfix_expr(p)
            }
        }
        _ => postfix_expr(p),
    }
}

/// Speculative cast parse: `( Type )` followed by a token only a cast
/// operand could start with. Primitive casts additionally accept `+ - ++ --`
/// (`(int) - 1` is a cast; `(Foo) + bar` is not).
fn try_cast_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let m = p.start();
    p.bump(); // (
    let info = match types::type_intersection(p) {
        Some(info) if !info.has_errors && p.at(SyntaxKind::R_PAREN) => info,
        _ => {
            m.rollback(p);
            return None;
        }
    };
    p.bump(); // )
    let primitive_target = info.is_primitive && !info.is_array;
    if !can_follow_cast(p, primitive_target) {
        m.rollback(p);
        return None;
    }
    trace!(primitive = primitive_target, "committed cast expression");
    if unary_expr(p).is_none() {
        p.error("expected an operand after cast", ErrorCode::E0402);
    }
    Some(m.complete(p, SyntaxKind::CAST_EXPR))
}

fn can_follow_cast(p: &Parser<'_>, primitive_target: bool) -> bool {
    let kind = p.current_kind();
    if kind.is_literal_token() || kind.is_primitive_type() {
        return true;
    }
    match kind {
        SyntaxKind::IDENT
        | SyntaxKind::L_PAREN
        | SyntaxKind::BANG
        | SyntaxKind::TILDE
        | SyntaxKind::THIS_KW
        | SyntaxKind::SUPER_KW
        | SyntaxKind::NEW_KW
        | SyntaxKind::SWITCH_KW => true,
        SyntaxKind::PLUS | SyntaxKind::MINUS | SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
            primitive_target
        }
        _ => false,
    }
}

/// PostfixExpression = Primary ( '.' ... | '(' ... | '[' ... | '::' ... | '++' | '--' )*
fn postfix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary_expr(p)?;

    loop {
        match p.current_kind() {
            SyntaxKind::DOT => {
                if p.nth_at(1, SyntaxKind::CLASS_KW) {
                    let m = lhs.precede(p);
                    p.bump(); // .
                    p.bump(); // class
                    lhs = m.complete(p, SyntaxKind::CLASS_LITERAL_EXPR);
                } else if p.nth_at(1, SyntaxKind::NEW_KW) {
                    // Qualified creation: outer.new Inner(args)
                    let m = lhs.precede(p);
                    p.bump(); // .
                    p.bump(); // new
                    if types::type_reference(p).is_none() {
                        p.error("expected a type after 'new'", ErrorCode::E0403);
                    }
                    argument_list(p);
                    if p.at(SyntaxKind::L_BRACE) {
                        super::declarations::class_body(p);
                    }
                    lhs = m.complete(p, SyntaxKind::NEW_EXPR);
                } else if p.nth_at(1, SyntaxKind::THIS_KW) || p.nth_at(1, SyntaxKind::SUPER_KW) {
                    let m = lhs.precede(p);
                    p.bump();
                    p.bump();
                    lhs = m.complete(p, SyntaxKind::FIELD_ACCESS_EXPR);
                } else if p.nth_at(1, SyntaxKind::LT) {
                    // Generic method invocation: recv.<T>method(args)
                    let m = lhs.precede(p);
                    p.bump(); // .
                    types::type_argument_list(p);
                    if !p.at(SyntaxKind::IDENT) {
                        p.error("expected a method name", ErrorCode::E0301);
                    } else {
                        p.bump();
                    }
                    argument_list(p);
                    lhs = m.complete(p, SyntaxKind::METHOD_CALL_EXPR);
                } else if p.nth_at(1, SyntaxKind::IDENT) {
                    if p.nth_at(2, SyntaxKind::L_PAREN) {
                        let m = lhs.precede(p);
                        p.bump(); // .
                        p.bump(); // name
                        argument_list(p);
                        lhs = m.complete(p, SyntaxKind::METHOD_CALL_EXPR);
                    } else {
                        let m = lhs.precede(p);
                        p.bump(); // .
                        p.bump(); // name
                        lhs = m.complete(p, SyntaxKind::FIELD_ACCESS_EXPR);
                    }
                } else {
                    p.error("expected a member name after '.'", ErrorCode::E0301);
                    break;
                }
            }
            SyntaxKind::L_PAREN => {
                // Calls only attach to things that can name a method.
                let callee = lhs.kind(p);
                if matches!(
                    callee,
                    SyntaxKind::NAME_REF | SyntaxKind::THIS_EXPR | SyntaxKind::SUPER_EXPR
                ) {
                    let m = lhs.precede(p);
                    argument_list(p);
                    lhs = m.complete(p, SyntaxKind::METHOD_CALL_EXPR);
                } else {
                    break;
                }
            }
            SyntaxKind::L_BRACKET => {
                if p.nth_at(1, SyntaxKind::R_BRACKET) {
                    // `Name[]` is type syntax, not an index expression.
                    break;
                }
                let m = lhs.precede(p);
                p.bump(); // [
                if expression(p).is_none() {
                    p.error("expected an index expression", ErrorCode::E0401);
                }
                if !p.eat(SyntaxKind::R_BRACKET) {
                    p.error_with_hint(
                        "expected ']'",
                        ErrorCode::E0204,
                        "this index expression is never closed",
                    );
                }
                lhs = m.complete(p, SyntaxKind::ARRAY_ACCESS_EXPR);
            }
            SyntaxKind::COLON_COLON => {
                let m = lhs.precede(p);
                p.bump(); // ::
                if p.at(SyntaxKind::LT) {
                    types::type_argument_list(p);
                }
                if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::NEW_KW) {
                    p.bump();
                } else {
                    p.error("expected a method name or 'new' after '::'", ErrorCode::E0301);
                }
                lhs = m.complete(p, SyntaxKind::METHOD_REF_EXPR);
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                let m = lhs.precede(p);
                p.bump();
                lhs = m.complete(p, SyntaxKind::POSTFIX_EXPR);
            }
            _ => break,
        }
    }

    Some(lhs)
}

/// Primary = Literal | NameRef | 'this' | 'super' | ParenExpr | Lambda
///         | NewExpr | SwitchExpr | PrimitiveClassLiteral
fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if at_lambda(p) {
        return Some(lambda_expr(p));
    }

    let kind = p.current_kind();
    if kind.is_literal_token() {
        let m = p.start();
        if kind == SyntaxKind::TEXT_BLOCK {
            p.require_feature(Feature::TextBlocks);
        }
        p.bump();
        return Some(m.complete(p, SyntaxKind::LITERAL));
    }
    if kind.is_primitive_type() || kind == SyntaxKind::VOID_KW {
        // int.class, long[].class, void.class
        let m = p.start();
        let _ = types::type_reference(p);
        p.expect(SyntaxKind::DOT);
        p.expect(SyntaxKind::CLASS_KW);
        return Some(m.complete(p, SyntaxKind::CLASS_LITERAL_EXPR));
    }

    match kind {
        SyntaxKind::IDENT => {
            let m = p.start();
            p.bump();
            Some(m.complete(p, SyntaxKind::NAME_REF))
        }
        SyntaxKind::THIS_KW => {
            let m = p.start();
            p.bump();
            Some(m.complete(p, SyntaxKind::THIS_EXPR))
        }
        SyntaxKind::SUPER_KW => {
            let m = p.start();
            p.bump();
            Some(m.complete(p, SyntaxKind::SUPER_EXPR))
        }
        SyntaxKind::L_PAREN => {
            let m = p.start();
            p.bump(); // (
            if expression(p).is_none() {
                p.error("expected an expression", ErrorCode::E0401);
            }
            if !p.eat(SyntaxKind::R_PAREN) {
                p.error_with_hint(
                    "expected ')'",
                    ErrorCode::E0203,
                    "this parenthesis is never closed",
                );
            }
            Some(m.complete(p, SyntaxKind::PAREN_EXPR))
        }
        SyntaxKind::NEW_KW => Some(new_expr(p)),
        SyntaxKind::SWITCH_KW => {
            let m = p.start();
            statements::switch_tail(p);
            Some(m.complete(p, SyntaxKind::SWITCH_EXPRESSION))
        }
        _ => None,
    }
}

/// Lookahead: does a lambda start here? Either `ident ->` or a balanced
/// `( ... )` whose matching close is directly followed by `->`.
pub(crate) fn at_lambda(p: &Parser<'_>) -> bool {
    if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::ARROW) {
        return true;
    }
    if !p.at(SyntaxKind::L_PAREN) {
        return false;
    }
    let mut depth = 0usize;
    let mut i = 0usize;
    loop {
        match p.nth(i) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return p.nth_at(i + 1, SyntaxKind::ARROW);
                }
            }
            SyntaxKind::EOF => return false,
            _ => {}
        }
        i += 1;
    }
}

/// Lambda = (Ident | '(' LambdaParameters ')') '->' (Expression | Block)
fn lambda_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.at(SyntaxKind::IDENT) {
        let params = p.start();
        p.bump();
        params.complete(p, SyntaxKind::LAMBDA_PARAMETER_LIST);
    } else {
        lambda_parameter_list(p);
    }
    p.expect(SyntaxKind::ARROW);
    if p.at(SyntaxKind::L_BRACE) {
        statements::block(p);
    } else if expression(p).is_none() {
        p.error("expected a lambda body", ErrorCode::E0401);
    }
    m.complete(p, SyntaxKind::LAMBDA_EXPR)
}

fn lambda_parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // (
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        lambda_parameter(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    m.complete(p, SyntaxKind::LAMBDA_PARAMETER_LIST);
}

/// Inferred (`x`), `var`, or fully typed lambda parameter.
fn lambda_parameter(p: &mut Parser<'_>) {
    let m = p.start();
    super::declarations::modifier_list(p);
    if p.at_contextual_kw(SyntaxKind::VAR_KW) && p.nth_at(1, SyntaxKind::IDENT) {
        p.require_feature(Feature::VarKeyword);
        p.bump_remap(SyntaxKind::VAR_KW);
        types::name(p);
    } else if p.at(SyntaxKind::IDENT)
        && (p.nth_at(1, SyntaxKind::COMMA) || p.nth_at(1, SyntaxKind::R_PAREN))
    {
        types::name(p);
    } else if types::type_reference_in_parameter(p).is_some() {
        types::name(p);
    } else {
        p.error("expected a lambda parameter", ErrorCode::E0301);
    }
    m.complete(p, SyntaxKind::PARAMETER);
}

/// NewExpr = 'new' TypeArguments? Type
///           ( DimExprs ArrayInitializer? | ArrayInitializer | Arguments ClassBody? )
fn new_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump(); // new
    if p.at(SyntaxKind::LT) {
        types::type_argument_list(p);
    }
    let info = types::type_reference(p);
    if info.is_none() {
        p.error("expected a type after 'new'", ErrorCode::E0403);
        return m.complete(p, SyntaxKind::NEW_EXPR);
    }
    if p.at(SyntaxKind::L_BRACKET) {
        // new int[5][2], new int[5][]
        while p.at(SyntaxKind::L_BRACKET) {
            p.bump();
            if !p.at(SyntaxKind::R_BRACKET) && expression(p).is_none() {
                p.error("expected an array dimension", ErrorCode::E0401);
            }
            if !p.eat(SyntaxKind::R_BRACKET) {
                p.error_with_hint(
                    "expected ']'",
                    ErrorCode::E0204,
                    "this array dimension is never closed",
                );
            }
        }
        if p.at(SyntaxKind::L_BRACE) {
            array_initializer(p);
        }
    } else if p.at(SyntaxKind::L_BRACE) && matches!(&info, Some(i) if i.is_array) {
        // new int[] {1, 2, 3}
        array_initializer(p);
    } else {
        argument_list(p);
        if p.at(SyntaxKind::L_BRACE) {
            super::declarations::class_body(p);
        }
    }
    m.complete(p, SyntaxKind::NEW_EXPR)
}

/// ArrayInitializer = '{' (VariableInitializer (',' VariableInitializer)* ','?)? '}'
pub(crate) fn array_initializer(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // {
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() {
        if p.at(SyntaxKind::L_BRACE) {
            array_initializer(p);
        } else if expression(p).is_none() {
            p.err_and_bump("expected an array element", ErrorCode::E0401);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this array initializer is never closed",
        );
    }
    m.complete(p, SyntaxKind::ARRAY_INITIALIZER);
}

/// Arguments = '(' (Expression (',' Expression)*)? ')'
pub(crate) fn argument_list(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '('", ErrorCode::E0205);
        m.complete(p, SyntaxKind::ARGUMENT_LIST);
        return;
    }
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        if expression(p).is_none() {
            p.err_and_bump("expected an argument", ErrorCode::E0401);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this argument list is never closed",
        );
    }
    m.complete(p, SyntaxKind::ARGUMENT_LIST);
}
