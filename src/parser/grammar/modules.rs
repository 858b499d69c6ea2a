//! Module declaration parsing (module-info)
//!
//! `module` and its directive keywords are all contextual: they lex as
//! identifiers and are remapped here. Unrecognized content between
//! directives coalesces into a single ERROR node per garbage run, stopping
//! at the next `;`, directive keyword, or closing brace, so one bad
//! directive never takes the rest of the module with it.

use crate::parser::errors::ErrorCode;
use crate::parser::language_level::Feature;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

use super::{declarations, types};

const DIRECTIVE_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::REQUIRES_KW,
    SyntaxKind::EXPORTS_KW,
    SyntaxKind::OPENS_KW,
    SyntaxKind::USES_KW,
    SyntaxKind::PROVIDES_KW,
];

/// Lookahead: does a module declaration start here? Skips any leading
/// annotations without consuming them.
pub(crate) fn at_module_start(p: &Parser<'_>) -> bool {
    let mut i = 0usize;
    // Skip `@Name(...)` runs.
    while p.nth(i) == SyntaxKind::AT && p.nth_at(i + 1, SyntaxKind::IDENT) {
        i += 2;
        while p.nth(i) == SyntaxKind::DOT && p.nth_at(i + 1, SyntaxKind::IDENT) {
            i += 2;
        }
        if p.nth(i) == SyntaxKind::L_PAREN {
            let mut depth = 0usize;
            loop {
                match p.nth(i) {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    SyntaxKind::EOF => return false,
                    _ => {}
                }
                i += 1;
            }
        }
    }
    if p.nth_at_contextual_kw(i, SyntaxKind::OPEN_KW) {
        return p.nth_at_contextual_kw(i + 1, SyntaxKind::MODULE_KW);
    }
    p.nth_at_contextual_kw(i, SyntaxKind::MODULE_KW) && p.nth_at(i + 1, SyntaxKind::IDENT)
}

/// ModuleDeclaration = Annotation* 'open'? 'module' QualifiedName '{' Directive* '}'
pub(crate) fn module_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    while p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
        declarations::annotation(p);
    }
    p.require_feature(Feature::Modules);
    if p.at_contextual_kw(SyntaxKind::OPEN_KW) {
        p.bump_remap(SyntaxKind::OPEN_KW);
    }
    p.bump_remap(SyntaxKind::MODULE_KW);
    if !types::qualified_name(p) {
        p.error("expected a module name", ErrorCode::E0501);
    }
    if !p.eat(SyntaxKind::L_BRACE) {
        p.error("expected '{'", ErrorCode::E0205);
        m.complete(p, SyntaxKind::MODULE_DECLARATION);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() && !p.is_cancelled() {
        if at_directive_start(p) {
            directive(p);
        } else {
            garbage_run(p);
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this module body is never closed",
        );
    }
    m.complete(p, SyntaxKind::MODULE_DECLARATION);
}

fn at_directive_start(p: &Parser<'_>) -> bool {
    DIRECTIVE_KEYWORDS
        .iter()
        .any(|&kw| p.at_contextual_kw(kw))
}

fn directive(p: &mut Parser<'_>) {
    if p.at_contextual_kw(SyntaxKind::REQUIRES_KW) {
        requires_directive(p);
    } else if p.at_contextual_kw(SyntaxKind::EXPORTS_KW) {
        exports_or_opens(p, SyntaxKind::EXPORTS_KW, SyntaxKind::EXPORTS_DIRECTIVE);
    } else if p.at_contextual_kw(SyntaxKind::OPENS_KW) {
        exports_or_opens(p, SyntaxKind::OPENS_KW, SyntaxKind::OPENS_DIRECTIVE);
    } else if p.at_contextual_kw(SyntaxKind::USES_KW) {
        uses_directive(p);
    } else {
        provides_directive(p);
    }
}

/// Requires = 'requires' ('transitive' | 'static')* QualifiedName ';'
///
/// `requires transitive;` names a module called `transitive`; the word only
/// counts as a modifier when more of the directive follows it.
fn requires_directive(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::REQUIRES_KW);
    loop {
        if p.at(SyntaxKind::STATIC_KW) {
            p.bump();
        } else if p.at_contextual_kw(SyntaxKind::TRANSITIVE_KW)
            && !p.nth_at(1, SyntaxKind::SEMICOLON)
            && !p.nth_at(1, SyntaxKind::DOT)
        {
            p.bump_remap(SyntaxKind::TRANSITIVE_KW);
        } else {
            break;
        }
    }
    if !types::qualified_name(p) {
        p.error("expected a module name", ErrorCode::E0501);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::REQUIRES_DIRECTIVE);
}

/// Exports/Opens = kw PackageName ('to' ModuleName (',' ModuleName)*)? ';'
fn exports_or_opens(p: &mut Parser<'_>, kw: SyntaxKind, node: SyntaxKind) {
    let m = p.start();
    p.bump_remap(kw);
    if !types::qualified_name(p) {
        p.error("expected a package name", ErrorCode::E0501);
    }
    if p.at_contextual_kw(SyntaxKind::TO_KW) {
        p.bump_remap(SyntaxKind::TO_KW);
        loop {
            if !types::qualified_name(p) {
                p.error("expected a module name", ErrorCode::E0501);
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    expect_semicolon(p);
    m.complete(p, node);
}

/// Uses = 'uses' ServiceName ';'
fn uses_directive(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::USES_KW);
    if !types::qualified_name(p) {
        p.error("expected a service type", ErrorCode::E0501);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::USES_DIRECTIVE);
}

/// Provides = 'provides' ServiceName 'with' Provider (',' Provider)* ';'
fn provides_directive(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::PROVIDES_KW);
    if !types::qualified_name(p) {
        p.error("expected a service type", ErrorCode::E0501);
    }
    if p.at_contextual_kw(SyntaxKind::WITH_KW) {
        p.bump_remap(SyntaxKind::WITH_KW);
        loop {
            if !types::qualified_name(p) {
                p.error("expected a provider type", ErrorCode::E0501);
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    } else {
        p.error("expected 'with'", ErrorCode::E0502);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::PROVIDES_DIRECTIVE);
}

/// Coalesce a run of unrecognized tokens into one ERROR node, stopping at
/// a semicolon, a directive keyword, or the closing brace. Consumes at
/// least one token.
fn garbage_run(p: &mut Parser<'_>) {
    let m = p.start();
    p.error("unrecognized module directive", ErrorCode::E0502);
    let mut consumed = false;
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) && !p.is_cancelled() {
        if p.at(SyntaxKind::SEMICOLON) {
            p.bump();
            consumed = true;
            break;
        }
        if consumed && at_directive_start(p) {
            break;
        }
        p.bump_any();
        consumed = true;
    }
    m.complete(p, SyntaxKind::ERROR);
}

fn expect_semicolon(p: &mut Parser<'_>) {
    if !p.eat(SyntaxKind::SEMICOLON) {
        p.error("expected ';'", ErrorCode::E0201);
    }
}
