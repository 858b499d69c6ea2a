//! Statement parsing
//!
//! Blocks, control flow, and the statement-level disambiguations: local
//! variable declaration vs. expression statement, classic `for` vs.
//! for-each, and classic colon `switch` groups vs. arrow rules. All
//! ambiguity is resolved by marker speculation and rollback.

use crate::parser::errors::ErrorCode;
use crate::parser::language_level::Feature;
use crate::parser::parser::{CompletedMarker, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::{declarations, expressions, patterns, types};

/// Block = '{' Statement* '}'
pub(crate) fn block(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_BRACE) {
        p.error("expected '{'", ErrorCode::E0205);
        m.complete(p, SyntaxKind::BLOCK);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() && !p.is_cancelled() {
        let before = p.pos();
        if !statement(p) && p.pos() == before {
            p.err_and_bump("expected a statement", ErrorCode::E0206);
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this block is never closed",
        );
    }
    m.complete(p, SyntaxKind::BLOCK);
}

/// Parse one statement. Returns false without consuming anything when no
/// statement form matches.
pub(crate) fn statement(p: &mut Parser<'_>) -> bool {
    match p.current_kind() {
        SyntaxKind::SEMICOLON => {
            let m = p.start();
            p.bump();
            m.complete(p, SyntaxKind::EMPTY_STATEMENT);
        }
        SyntaxKind::L_BRACE => block(p),
        SyntaxKind::IF_KW => if_statement(p),
        SyntaxKind::WHILE_KW => while_statement(p),
        SyntaxKind::DO_KW => do_while_statement(p),
        SyntaxKind::FOR_KW => for_statement(p),
        SyntaxKind::SWITCH_KW => {
            let m = p.start();
            switch_tail(p);
            m.complete(p, SyntaxKind::SWITCH_STATEMENT);
        }
        SyntaxKind::TRY_KW => try_statement(p),
        SyntaxKind::SYNCHRONIZED_KW => synchronized_statement(p),
        SyntaxKind::RETURN_KW => return_statement(p),
        SyntaxKind::THROW_KW => throw_statement(p),
        SyntaxKind::BREAK_KW => break_or_continue(p, SyntaxKind::BREAK_STATEMENT),
        SyntaxKind::CONTINUE_KW => break_or_continue(p, SyntaxKind::CONTINUE_STATEMENT),
        SyntaxKind::ASSERT_KW => assert_statement(p),
        SyntaxKind::IDENT
            if p.at_contextual_kw(SyntaxKind::YIELD_KW) && yield_value_follows(p) =>
        {
            yield_statement(p);
        }
        SyntaxKind::IDENT if p.nth_at(1, SyntaxKind::COLON) => labeled_statement(p),
        _ => {
            if declarations::member(p, declarations::DeclarationContext::CodeBlock) {
                return true;
            }
            return expression_statement(p);
        }
    }
    true
}

/// `yield` only acts as a statement keyword when something that can start
/// an expression follows; `yield = 1;` keeps `yield` as a plain name.
fn yield_value_follows(p: &Parser<'_>) -> bool {
    let next = p.nth(1);
    next.is_literal_token()
        || matches!(
            next,
            SyntaxKind::IDENT
                | SyntaxKind::L_PAREN
                | SyntaxKind::BANG
                | SyntaxKind::TILDE
                | SyntaxKind::MINUS
                | SyntaxKind::PLUS
                | SyntaxKind::NEW_KW
                | SyntaxKind::THIS_KW
                | SyntaxKind::SUPER_KW
                | SyntaxKind::SWITCH_KW
        )
}

/// ExpressionStatement = Expression (',' Expression)* ';'
///
/// Java has no comma operator, but statement position keeps the comma
/// continuation: when a generic-looking `a<b, c>` loses its type reading,
/// the tail after the comma still parses as a comparison instead of
/// degrading to an opaque token run.
fn expression_statement(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    if expressions::expression(p).is_none() {
        m.abandon(p);
        return false;
    }
    while p.eat(SyntaxKind::COMMA) {
        if expressions::expression(p).is_none() {
            p.error("expected an expression after ','", ErrorCode::E0401);
            break;
        }
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::EXPRESSION_STATEMENT);
    true
}

fn if_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // if
    paren_condition(p);
    body_statement(p);
    if p.eat(SyntaxKind::ELSE_KW) {
        body_statement(p);
    }
    m.complete(p, SyntaxKind::IF_STATEMENT);
}

fn while_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // while
    paren_condition(p);
    body_statement(p);
    m.complete(p, SyntaxKind::WHILE_STATEMENT);
}

fn do_while_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // do
    body_statement(p);
    p.expect(SyntaxKind::WHILE_KW);
    paren_condition(p);
    expect_semicolon(p);
    m.complete(p, SyntaxKind::DO_WHILE_STATEMENT);
}

/// Classic `for` and for-each share a keyword; the for-each reading is
/// tried first (Modifier* Type Name ':') and rolled back when no colon
/// follows the declared variable.
fn for_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // for
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '(' after 'for'", ErrorCode::E0205);
    }

    if for_each_header(p) {
        if !p.eat(SyntaxKind::R_PAREN) {
            p.error_with_hint(
                "expected ')'",
                ErrorCode::E0203,
                "this for-each header is never closed",
            );
        }
        body_statement(p);
        m.complete(p, SyntaxKind::FOR_EACH_STATEMENT);
        return;
    }

    // Classic: init ';' condition ';' update
    if !p.at(SyntaxKind::SEMICOLON) {
        if !declarations::local_variable_declaration(p) {
            expression_list(p);
            expect_semicolon(p);
        }
        // local_variable_declaration consumes its own ';'
    } else {
        p.bump();
    }
    if !p.at(SyntaxKind::SEMICOLON) && expressions::expression(p).is_none() {
        p.error("expected a loop condition", ErrorCode::E0401);
    }
    expect_semicolon(p);
    if !p.at(SyntaxKind::R_PAREN) {
        expression_list(p);
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this for header is never closed",
        );
    }
    body_statement(p);
    m.complete(p, SyntaxKind::FOR_STATEMENT);
}

/// Speculative for-each header: Modifier* ('var' | Type) Name ':' Expression
fn for_each_header(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    declarations::modifier_list(p);

    let mut viable = false;
    if p.at_contextual_kw(SyntaxKind::VAR_KW) && p.nth_at(1, SyntaxKind::IDENT) {
        p.require_feature(Feature::VarKeyword);
        let t = p.start();
        p.bump_remap(SyntaxKind::VAR_KW);
        t.complete(p, SyntaxKind::TYPE_REFERENCE);
        viable = true;
    } else if matches!(types::type_reference(p), Some(info) if !info.has_errors) {
        viable = true;
    }
    if !viable || !p.at(SyntaxKind::IDENT) || !p.nth_at(1, SyntaxKind::COLON) {
        m.rollback(p);
        return false;
    }

    types::name(p);
    m.complete(p, SyntaxKind::PARAMETER);
    p.bump(); // :
    if expressions::expression(p).is_none() {
        p.error("expected an expression to iterate over", ErrorCode::E0401);
    }
    true
}

fn expression_list(p: &mut Parser<'_>) {
    loop {
        if expressions::expression(p).is_none() {
            p.error("expected an expression", ErrorCode::E0401);
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// 'switch' '(' Expression ')' SwitchBlock — shared between switch
/// statements and switch expressions; the caller supplies the node kind.
pub(crate) fn switch_tail(p: &mut Parser<'_>) {
    p.bump(); // switch
    paren_condition(p);
    switch_block(p);
}

fn switch_block(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_BRACE) {
        p.error("expected '{'", ErrorCode::E0205);
        m.complete(p, SyntaxKind::SWITCH_BLOCK);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() && !p.is_cancelled() {
        if p.at(SyntaxKind::CASE_KW) || p.at(SyntaxKind::DEFAULT_KW) {
            switch_group(p);
        } else {
            // Statements of a classic colon-labeled group.
            let before = p.pos();
            if !statement(p) && p.pos() == before {
                p.err_and_bump("expected 'case', 'default', or a statement", ErrorCode::E0206);
            }
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this switch block is never closed",
        );
    }
    m.complete(p, SyntaxKind::SWITCH_BLOCK);
}

fn switch_group(p: &mut Parser<'_>) {
    let label = switch_label(p);
    if p.at(SyntaxKind::ARROW) {
        let m = label.precede(p);
        p.require_feature(Feature::SwitchArrows);
        p.bump(); // ->
        if p.at(SyntaxKind::L_BRACE) {
            block(p);
        } else if p.at(SyntaxKind::THROW_KW) {
            throw_statement(p);
        } else {
            let body = p.start();
            if expressions::expression(p).is_none() {
                p.error("expected an expression after '->'", ErrorCode::E0401);
            }
            expect_semicolon(p);
            body.complete(p, SyntaxKind::EXPRESSION_STATEMENT);
        }
        m.complete(p, SyntaxKind::SWITCH_RULE);
    } else {
        p.expect(SyntaxKind::COLON);
    }
}

/// SwitchLabel = 'default' | 'case' CaseElement (',' CaseElement)*
/// CaseElement = 'null' | 'default' | Pattern Guard? | ConstantExpression
fn switch_label(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.eat(SyntaxKind::DEFAULT_KW) {
        return m.complete(p, SyntaxKind::SWITCH_LABEL);
    }
    p.bump(); // case
    loop {
        if p.eat(SyntaxKind::NULL_KW) || p.eat(SyntaxKind::DEFAULT_KW) {
            // `case null, default ->`
        } else if let Some(_pat) = patterns::try_pattern(p) {
            p.require_feature(Feature::PatternSwitch);
            if p.at_contextual_kw(SyntaxKind::WHEN_KW) {
                patterns::guard(p);
            }
        } else if expressions::expression(p).is_none() {
            p.error("expected a case label", ErrorCode::E0404);
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    m.complete(p, SyntaxKind::SWITCH_LABEL)
}

/// Try = 'try' ResourceList? Block Catch* Finally?
fn try_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // try
    let has_resources = p.at(SyntaxKind::L_PAREN);
    if has_resources {
        resource_list(p);
    }
    block(p);
    let mut has_handler = has_resources;
    while p.at(SyntaxKind::CATCH_KW) {
        catch_clause(p);
        has_handler = true;
    }
    if p.at(SyntaxKind::FINALLY_KW) {
        let f = p.start();
        p.bump();
        block(p);
        f.complete(p, SyntaxKind::FINALLY_CLAUSE);
        has_handler = true;
    }
    if !has_handler {
        p.error_with_hint(
            "expected 'catch' or 'finally'",
            ErrorCode::E0205,
            "a try without resources needs at least one handler",
        );
    }
    m.complete(p, SyntaxKind::TRY_STATEMENT);
}

/// Resources = '(' Resource (';' Resource)* ';'? ')'
fn resource_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // (
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        resource(p);
        if !p.eat(SyntaxKind::SEMICOLON) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this resource list is never closed",
        );
    }
    m.complete(p, SyntaxKind::RESOURCE_LIST);
}

/// Resource = Modifier* ('var' | Type) Name '=' Expression
///          | Expression  (an effectively-final variable reference)
fn resource(p: &mut Parser<'_>) {
    let m = p.start();
    let attempt = p.start();
    declarations::modifier_list(p);

    let mut declared = false;
    if p.at_contextual_kw(SyntaxKind::VAR_KW) && p.nth_at(1, SyntaxKind::IDENT) {
        p.require_feature(Feature::VarKeyword);
        let t = p.start();
        p.bump_remap(SyntaxKind::VAR_KW);
        t.complete(p, SyntaxKind::TYPE_REFERENCE);
        declared = true;
    } else if matches!(types::type_reference(p), Some(info) if !info.has_errors) {
        declared = true;
    }

    if declared && p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::EQ) {
        attempt.abandon(p);
        types::name(p);
        p.bump(); // =
        if expressions::expression(p).is_none() {
            p.error("expected a resource initializer", ErrorCode::E0401);
        }
    } else {
        attempt.rollback(p);
        if expressions::expression(p).is_none() {
            p.err_and_bump("expected a resource", ErrorCode::E0401);
        }
    }
    m.complete(p, SyntaxKind::RESOURCE);
}

fn catch_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // catch
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '(' after 'catch'", ErrorCode::E0205);
    }
    let param = p.start();
    declarations::modifier_list(p);
    if !types::type_union(p) {
        p.error("expected an exception type", ErrorCode::E0403);
    }
    types::name(p);
    param.complete(p, SyntaxKind::CATCH_PARAMETER);
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this catch parameter is never closed",
        );
    }
    block(p);
    m.complete(p, SyntaxKind::CATCH_CLAUSE);
}

fn synchronized_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // synchronized
    paren_condition(p);
    block(p);
    m.complete(p, SyntaxKind::SYNCHRONIZED_STATEMENT);
}

fn return_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // return
    if !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::R_BRACE) {
        if expressions::expression(p).is_none() {
            p.error("expected an expression or ';'", ErrorCode::E0401);
        }
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::RETURN_STATEMENT);
}

fn throw_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // throw
    if expressions::expression(p).is_none() {
        p.error("expected an expression to throw", ErrorCode::E0401);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::THROW_STATEMENT);
}

fn break_or_continue(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.bump();
    if p.at(SyntaxKind::IDENT) {
        p.bump(); // label
    }
    expect_semicolon(p);
    m.complete(p, kind);
}

fn assert_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // assert
    if expressions::expression(p).is_none() {
        p.error("expected an assertion condition", ErrorCode::E0401);
    }
    if p.eat(SyntaxKind::COLON) {
        if expressions::expression(p).is_none() {
            p.error("expected an assertion message", ErrorCode::E0401);
        }
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::ASSERT_STATEMENT);
}

fn yield_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.require_feature(Feature::SwitchArrows);
    p.bump_remap(SyntaxKind::YIELD_KW);
    if expressions::expression(p).is_none() {
        p.error("expected a value to yield", ErrorCode::E0401);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::YIELD_STATEMENT);
}

fn labeled_statement(p: &mut Parser<'_>) {
    let m = p.start();
    types::name(p);
    p.bump(); // :
    body_statement(p);
    m.complete(p, SyntaxKind::LABELED_STATEMENT);
}

/// The single-statement body of a control construct.
fn body_statement(p: &mut Parser<'_>) {
    let before = p.pos();
    if !statement(p) && p.pos() == before {
        p.err_and_bump("expected a statement", ErrorCode::E0206);
    }
}

/// '(' Expression ')'
fn paren_condition(p: &mut Parser<'_>) {
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '('", ErrorCode::E0205);
        return;
    }
    if expressions::expression(p).is_none() {
        p.error("expected a condition", ErrorCode::E0401);
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this condition is never closed",
        );
    }
}

fn expect_semicolon(p: &mut Parser<'_>) {
    if !p.eat(SyntaxKind::SEMICOLON) {
        p.error("expected ';'", ErrorCode::E0201);
    }
}
