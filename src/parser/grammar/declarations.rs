//! Declaration parsing
//!
//! Compilation units, type declarations (class / interface / enum / record /
//! annotation interface), members, modifiers, annotations, and imports.
//! Member parsing is driven by a [`DeclarationContext`] so the same entry
//! serves file scope, class bodies, annotation-interface bodies, code blocks
//! (local declarations), and snippets.

use tracing::trace;

use crate::parser::errors::ErrorCode;
use crate::parser::language_level::Feature;
use crate::parser::parser::{CompletedMarker, Marker, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::{expressions, modules, statements, types};

/// Where a declaration is being parsed. The context decides which member
/// forms are legal and how recovery behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationContext {
    /// Top level of a compilation unit.
    File,
    /// Inside a class, interface, enum, or record body.
    Class,
    /// Inside a method body or block: local variables and local types.
    CodeBlock,
    /// Inside an `@interface` body: annotation elements and constants.
    AnnotationInterface,
    /// Free-standing fragment: any member form is admissible.
    Snippet,
}

/// The historical spelling of [`DeclarationContext`], kept for callers that
/// still speak it. The two enums map 1:1 in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyDeclarationContext {
    File,
    Class,
    CodeBlock,
    AnnotationInterface,
    Snippet,
}

impl From<LegacyDeclarationContext> for DeclarationContext {
    fn from(ctx: LegacyDeclarationContext) -> Self {
        match ctx {
            LegacyDeclarationContext::File => Self::File,
            LegacyDeclarationContext::Class => Self::Class,
            LegacyDeclarationContext::CodeBlock => Self::CodeBlock,
            LegacyDeclarationContext::AnnotationInterface => Self::AnnotationInterface,
            LegacyDeclarationContext::Snippet => Self::Snippet,
        }
    }
}

impl From<DeclarationContext> for LegacyDeclarationContext {
    fn from(ctx: DeclarationContext) -> Self {
        match ctx {
            DeclarationContext::File => Self::File,
            DeclarationContext::Class => Self::Class,
            DeclarationContext::CodeBlock => Self::CodeBlock,
            DeclarationContext::AnnotationInterface => Self::AnnotationInterface,
            DeclarationContext::Snippet => Self::Snippet,
        }
    }
}

const TOP_LEVEL_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::AT,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::FINAL_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
];

const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::AT,
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
];

/// CompilationUnit = Package? Import* (ModuleDeclaration | TypeDeclaration*)
///
/// The whole file parses into one COMPILATION_UNIT; garbage between
/// declarations coalesces into ERROR nodes without ever stalling.
pub(crate) fn compilation_unit(p: &mut Parser<'_>) {
    let m = p.start();

    package_declaration_opt(p);
    while p.at(SyntaxKind::IMPORT_KW) {
        import_declaration(p);
    }

    if modules::at_module_start(p) {
        modules::module_declaration(p);
        // module-info admits nothing after the module declaration.
        while !p.at_eof() && !p.is_cancelled() {
            p.error_recover(
                "expected no further content after the module declaration",
                ErrorCode::E0502,
                &[],
            );
        }
    } else {
        while !p.at_eof() && !p.is_cancelled() {
            let before = p.pos();
            member(p, DeclarationContext::File);
            if p.pos() == before {
                p.err_and_bump("expected a declaration", ErrorCode::E0302);
            }
        }
    }

    m.complete(p, SyntaxKind::COMPILATION_UNIT);
}

/// Package = Annotation* 'package' QualifiedName ';'
///
/// Leading annotations are ambiguous with an annotated type declaration, so
/// they are parsed speculatively and rolled back when no `package` follows.
fn package_declaration_opt(p: &mut Parser<'_>) {
    if !p.at(SyntaxKind::PACKAGE_KW) && !p.at(SyntaxKind::AT) {
        return;
    }
    let m = p.start();
    while p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
        annotation(p);
    }
    if !p.at(SyntaxKind::PACKAGE_KW) {
        m.rollback(p);
        return;
    }
    p.bump(); // package
    if !types::qualified_name(p) {
        p.error("expected a package name", ErrorCode::E0501);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::PACKAGE_DECLARATION);
}

/// Import = 'import' 'static'? QualifiedName ('.' '*')? ';'
pub(crate) fn import_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // import
    p.eat(SyntaxKind::STATIC_KW);
    if !types::qualified_name(p) {
        p.error_recover(
            "expected a name to import",
            ErrorCode::E0503,
            &[SyntaxKind::SEMICOLON, SyntaxKind::IMPORT_KW],
        );
    } else if p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::STAR) {
        p.bump();
        p.bump();
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::IMPORT_DECLARATION);
}

/// Parse one member appropriate for `ctx`. Returns true when anything was
/// consumed; callers guard loop progress on that.
pub(crate) fn member(p: &mut Parser<'_>, ctx: DeclarationContext) -> bool {
    match ctx {
        DeclarationContext::File => top_level_declaration(p),
        DeclarationContext::Class => class_member(p, false),
        DeclarationContext::AnnotationInterface => class_member(p, true),
        DeclarationContext::CodeBlock => local_declaration(p),
        DeclarationContext::Snippet => snippet_member(p),
    }
}

/// Snippets admit local forms first (so `int x = 1;` stays a local
/// variable), then fall back to full class-member forms (methods, fields,
/// constructors). The member attempt is strict: any diagnostic rolls it
/// back so the snippet driver can try a statement or expression instead.
fn snippet_member(p: &mut Parser<'_>) -> bool {
    if local_declaration(p) {
        return true;
    }
    let attempt = p.start();
    let parsed = class_member(p, false);
    if parsed && p.hard_errors_since(&attempt) == 0 {
        attempt.abandon(p);
        return true;
    }
    attempt.rollback(p);
    false
}

/// Legacy-context entry: identical dispatch through the 1:1 mapping.
#[allow(dead_code)] // call sites migrate to `member` as they adopt DeclarationContext
pub(crate) fn member_legacy(p: &mut Parser<'_>, ctx: LegacyDeclarationContext) -> bool {
    member(p, ctx.into())
}

fn top_level_declaration(p: &mut Parser<'_>) -> bool {
    if p.eat(SyntaxKind::SEMICOLON) {
        return true;
    }
    if p.at(SyntaxKind::IMPORT_KW) {
        // Imports after the first declaration still parse; order is a
        // semantic concern, not a syntactic one.
        import_declaration(p);
        return true;
    }
    let m = p.start();
    modifier_list(p);
    if at_type_declaration(p) {
        type_declaration_tail(p, m);
        return true;
    }
    if at_statement_keyword(p) {
        // Keep the statement in the tree so later members still parse.
        p.error_with_hint(
            "statements are not allowed at the top level",
            ErrorCode::E0303,
            "move this into a method or initializer body",
        );
        statements::statement(p);
        m.complete(p, SyntaxKind::ERROR);
        return true;
    }
    p.error("expected a class, interface, enum, record, or annotation", ErrorCode::E0302);
    skip_until(p, TOP_LEVEL_RECOVERY);
    m.complete(p, SyntaxKind::ERROR);
    true
}

fn at_statement_keyword(p: &Parser<'_>) -> bool {
    matches!(
        p.current_kind(),
        SyntaxKind::IF_KW
            | SyntaxKind::WHILE_KW
            | SyntaxKind::DO_KW
            | SyntaxKind::FOR_KW
            | SyntaxKind::TRY_KW
            | SyntaxKind::SWITCH_KW
            | SyntaxKind::RETURN_KW
            | SyntaxKind::THROW_KW
            | SyntaxKind::BREAK_KW
            | SyntaxKind::CONTINUE_KW
            | SyntaxKind::ASSERT_KW
    )
}

/// Members of a class, interface, enum, or record body. `annotation_body`
/// additionally admits annotation elements (`Type name() default ...;`).
fn class_member(p: &mut Parser<'_>, annotation_body: bool) -> bool {
    if p.eat(SyntaxKind::SEMICOLON) {
        return true;
    }

    // Static and instance initializers.
    if p.at(SyntaxKind::STATIC_KW) && p.nth_at(1, SyntaxKind::L_BRACE) {
        let m = p.start();
        if annotation_body {
            misplaced_initializer_error(p);
        }
        p.bump(); // static
        statements::block(p);
        m.complete(p, SyntaxKind::INITIALIZER);
        return true;
    }
    if p.at(SyntaxKind::L_BRACE) {
        let m = p.start();
        if annotation_body {
            misplaced_initializer_error(p);
        }
        statements::block(p);
        m.complete(p, SyntaxKind::INITIALIZER);
        return true;
    }

    let m = p.start();
    modifier_list(p);

    if at_type_declaration(p) {
        type_declaration_tail(p, m);
        return true;
    }

    if p.at(SyntaxKind::LT) {
        // Generic method (or constructor): <T> T identity(T t)
        type_parameter_list(p);
        method_or_constructor_after_type_params(p, m);
        return true;
    }

    // Constructor: bare name directly followed by a parameter list.
    if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
        if annotation_body {
            p.error_with_hint(
                "constructors are not allowed in an annotation interface",
                ErrorCode::E0302,
                "annotation interfaces admit only elements and constants",
            );
        }
        types::name(p);
        parameter_list(p);
        throws_clause_opt(p);
        method_body(p);
        m.complete(p, SyntaxKind::CONSTRUCTOR_DECLARATION);
        return true;
    }

    // Everything left starts with a type: field, method, annotation element.
    if types::type_reference(p).is_none() {
        p.error("expected a member declaration", ErrorCode::E0302);
        skip_until(p, MEMBER_RECOVERY);
        m.complete(p, SyntaxKind::ERROR);
        return true;
    }

    if annotation_body && p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
        annotation_element_tail(p, m);
        return true;
    }

    if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
        types::name(p);
        method_tail(p, m);
        return true;
    }

    field_tail(p, m);
    true
}

fn misplaced_initializer_error(p: &mut Parser<'_>) {
    p.error_with_hint(
        "initializer blocks are not allowed in an annotation interface",
        ErrorCode::E0303,
        "annotation interfaces admit only elements and constants",
    );
}

fn method_or_constructor_after_type_params(p: &mut Parser<'_>, m: Marker) {
    if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::L_PAREN) {
        types::name(p);
        parameter_list(p);
        throws_clause_opt(p);
        method_body(p);
        m.complete(p, SyntaxKind::CONSTRUCTOR_DECLARATION);
        return;
    }
    if types::type_reference(p).is_none() {
        p.error("expected a return type", ErrorCode::E0403);
    }
    if !types::name(p) {
        skip_until(p, MEMBER_RECOVERY);
        m.complete(p, SyntaxKind::ERROR);
        return;
    }
    method_tail(p, m);
}

/// The part of a method after its name: parameters, legacy array dims,
/// throws clause, and a body or `;`.
fn method_tail(p: &mut Parser<'_>, m: Marker) {
    parameter_list(p);
    while p.at(SyntaxKind::L_BRACKET) && p.nth_at(1, SyntaxKind::R_BRACKET) {
        p.bump();
        p.bump();
    }
    throws_clause_opt(p);
    method_body(p);
    m.complete(p, SyntaxKind::METHOD_DECLARATION);
}

fn method_body(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::L_BRACE) {
        statements::block(p);
    } else if !p.eat(SyntaxKind::SEMICOLON) {
        p.error_with_hint(
            "expected a method body or ';'",
            ErrorCode::E0304,
            "abstract and interface methods end with ';'",
        );
    }
}

/// AnnotationElement = Type Name '(' ')' ('default' ElementValue)? ';'
fn annotation_element_tail(p: &mut Parser<'_>, m: Marker) {
    types::name(p);
    let params = p.start();
    p.bump(); // (
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error("annotation elements take no parameters", ErrorCode::E0302);
        skip_until(p, &[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]);
        p.eat(SyntaxKind::R_PAREN);
    }
    params.complete(p, SyntaxKind::PARAMETER_LIST);
    if p.at(SyntaxKind::DEFAULT_KW) {
        let d = p.start();
        p.bump();
        element_value(p);
        d.complete(p, SyntaxKind::DEFAULT_VALUE_CLAUSE);
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::ANNOTATION_ELEMENT_DECLARATION);
}

/// Field = Type VariableDeclarator (',' VariableDeclarator)* ';'
fn field_tail(p: &mut Parser<'_>, m: Marker) {
    loop {
        variable_declarator(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::FIELD_DECLARATION);
}

/// VariableDeclarator = Name ('[' ']')* ('=' VariableInitializer)?
pub(crate) fn variable_declarator(p: &mut Parser<'_>) {
    let m = p.start();
    types::name(p);
    while p.at(SyntaxKind::L_BRACKET) && p.nth_at(1, SyntaxKind::R_BRACKET) {
        p.bump();
        p.bump();
    }
    if p.eat(SyntaxKind::EQ) {
        if p.at(SyntaxKind::L_BRACE) {
            expressions::array_initializer(p);
        } else if expressions::expression(p).is_none() {
            p.error("expected an initializer expression", ErrorCode::E0401);
        }
    }
    m.complete(p, SyntaxKind::VARIABLE_DECLARATOR);
}

/// Local declarations inside blocks and snippets: local types and local
/// variables. The local-variable attempt is speculative; on failure the
/// cursor is restored so the caller can try an expression statement.
fn local_declaration(p: &mut Parser<'_>) -> bool {
    if at_local_type_declaration(p) {
        let m = p.start();
        modifier_list(p);
        if at_type_declaration(p) {
            type_declaration_tail(p, m);
        } else {
            // Modifiers with no declaration after them.
            p.error("expected a declaration after modifiers", ErrorCode::E0302);
            m.complete(p, SyntaxKind::ERROR);
        }
        return true;
    }
    local_variable_declaration(p)
}

/// Speculative: Modifier* ('var' | Type) Declarators ';'
///
/// Commits once a declarator name follows the type; otherwise rolls the
/// whole attempt back and reports false without consuming anything.
pub(crate) fn local_variable_declaration(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    modifier_list(p);

    if p.at_contextual_kw(SyntaxKind::VAR_KW) && p.nth_at(1, SyntaxKind::IDENT) {
        p.require_feature(Feature::VarKeyword);
        let t = p.start();
        p.bump_remap(SyntaxKind::VAR_KW);
        t.complete(p, SyntaxKind::TYPE_REFERENCE);
    } else {
        let viable = match types::type_reference(p) {
            Some(info) => !info.has_errors,
            None => false,
        };
        if !viable || !p.at(SyntaxKind::IDENT) {
            m.rollback(p);
            return false;
        }
        // `a < b` parses as a type `a` followed by ident `b` only when a
        // declarator actually follows; `a < b;` falls through to expression.
        if !p.nth_at(1, SyntaxKind::EQ)
            && !p.nth_at(1, SyntaxKind::SEMICOLON)
            && !p.nth_at(1, SyntaxKind::COMMA)
            && !p.nth_at(1, SyntaxKind::L_BRACKET)
            && !p.nth_at(1, SyntaxKind::COLON)
        {
            m.rollback(p);
            return false;
        }
    }

    trace!("committed local variable declaration");
    loop {
        variable_declarator(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    expect_semicolon(p);
    m.complete(p, SyntaxKind::LOCAL_VARIABLE_DECLARATION);
    true
}

/// Does a type declaration start here (modifiers already consumed)?
pub(crate) fn at_type_declaration(p: &Parser<'_>) -> bool {
    matches!(
        p.current_kind(),
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW
    ) || (p.at(SyntaxKind::AT) && p.nth_at(1, SyntaxKind::INTERFACE_KW))
        || (p.at_contextual_kw(SyntaxKind::RECORD_KW) && p.nth_at(1, SyntaxKind::IDENT))
}

/// Does a local type declaration (with optional leading modifiers) start
/// here? Pure lookahead, consumes nothing.
fn at_local_type_declaration(p: &Parser<'_>) -> bool {
    let mut i = 0;
    loop {
        let kind = p.nth(i);
        match kind {
            SyntaxKind::ABSTRACT_KW
            | SyntaxKind::FINAL_KW
            | SyntaxKind::STATIC_KW
            | SyntaxKind::STRICTFP_KW
            | SyntaxKind::NON_SEALED_KW => i += 1,
            SyntaxKind::IDENT if p.nth_at_contextual_kw(i, SyntaxKind::SEALED_KW) => i += 1,
            SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => return true,
            SyntaxKind::IDENT
                if p.nth_at_contextual_kw(i, SyntaxKind::RECORD_KW)
                    && p.nth_at(i + 1, SyntaxKind::IDENT)
                    && p.nth_at(i + 2, SyntaxKind::L_PAREN) =>
            {
                return true;
            }
            _ => return false,
        }
    }
}

/// Shared tail for all five type-declaration forms; `m` already covers the
/// modifier list.
fn type_declaration_tail(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    match p.current_kind() {
        SyntaxKind::CLASS_KW => {
            p.bump();
            types::name(p);
            if p.at(SyntaxKind::LT) {
                type_parameter_list(p);
            }
            extends_clause_opt(p, false);
            implements_clause_opt(p);
            permits_clause_opt(p);
            class_body(p);
            m.complete(p, SyntaxKind::CLASS_DECLARATION)
        }
        SyntaxKind::INTERFACE_KW => {
            p.bump();
            types::name(p);
            if p.at(SyntaxKind::LT) {
                type_parameter_list(p);
            }
            extends_clause_opt(p, true);
            permits_clause_opt(p);
            class_body(p);
            m.complete(p, SyntaxKind::INTERFACE_DECLARATION)
        }
        SyntaxKind::ENUM_KW => {
            p.bump();
            types::name(p);
            implements_clause_opt(p);
            enum_body(p);
            m.complete(p, SyntaxKind::ENUM_DECLARATION)
        }
        SyntaxKind::AT => {
            p.bump(); // @
            p.bump(); // interface
            types::name(p);
            annotation_interface_body(p);
            m.complete(p, SyntaxKind::ANNOTATION_INTERFACE_DECLARATION)
        }
        _ => {
            // record
            p.require_feature(Feature::Records);
            p.bump_remap(SyntaxKind::RECORD_KW);
            types::name(p);
            if p.at(SyntaxKind::LT) {
                type_parameter_list(p);
            }
            record_header(p);
            implements_clause_opt(p);
            class_body(p);
            m.complete(p, SyntaxKind::RECORD_DECLARATION)
        }
    }
}

/// RecordHeader = '(' (RecordComponent (',' RecordComponent)*)? ')'
fn record_header(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '(' after the record name", ErrorCode::E0205);
        m.complete(p, SyntaxKind::RECORD_HEADER);
        return;
    }
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        let c = p.start();
        modifier_list(p);
        if types::type_reference_in_parameter(p).is_none() {
            p.error("expected a component type", ErrorCode::E0403);
        }
        types::name(p);
        c.complete(p, SyntaxKind::RECORD_COMPONENT);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this record header is never closed",
        );
    }
    m.complete(p, SyntaxKind::RECORD_HEADER);
}

/// ClassBody = '{' Member* '}'
///
/// The loop is progress-guarded: a member attempt that consumes nothing is
/// forced forward with a single-token ERROR.
pub(crate) fn class_body(p: &mut Parser<'_>) {
    body(p, false)
}

fn annotation_interface_body(p: &mut Parser<'_>) {
    body(p, true)
}

fn body(p: &mut Parser<'_>, annotation_body: bool) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_BRACE) {
        p.error("expected '{'", ErrorCode::E0205);
        m.complete(p, SyntaxKind::CLASS_BODY);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() && !p.is_cancelled() {
        let before = p.pos();
        class_member(p, annotation_body);
        if p.pos() == before {
            p.err_and_bump("expected a member", ErrorCode::E0302);
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this body is never closed",
        );
    }
    m.complete(p, SyntaxKind::CLASS_BODY);
}

/// EnumBody = '{' Constants? (';' Member*)? '}'
fn enum_body(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_BRACE) {
        p.error("expected '{'", ErrorCode::E0205);
        m.complete(p, SyntaxKind::CLASS_BODY);
        return;
    }
    // Constants section: Annotation* Name Arguments? ClassBody?
    while !p.at(SyntaxKind::R_BRACE)
        && !p.at(SyntaxKind::SEMICOLON)
        && !p.at_eof()
        && !p.is_cancelled()
    {
        let c = p.start();
        while p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
            annotation(p);
        }
        if !types::name(p) {
            c.abandon(p);
            p.err_and_bump("expected an enum constant", ErrorCode::E0301);
            continue;
        }
        if p.at(SyntaxKind::L_PAREN) {
            expressions::argument_list(p);
        }
        if p.at(SyntaxKind::L_BRACE) {
            class_body(p);
        }
        c.complete(p, SyntaxKind::ENUM_CONSTANT);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if p.eat(SyntaxKind::SEMICOLON) {
        while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() && !p.is_cancelled() {
            let before = p.pos();
            class_member(p, false);
            if p.pos() == before {
                p.err_and_bump("expected a member", ErrorCode::E0302);
            }
        }
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_hint(
            "expected '}'",
            ErrorCode::E0202,
            "this enum body is never closed",
        );
    }
    m.complete(p, SyntaxKind::CLASS_BODY);
}

/// ModifierList = (Annotation | Modifier)*
///
/// Always produces a MODIFIER_LIST node, empty when nothing matched, so
/// downstream consumers find one in a fixed position. `sealed` is contextual
/// and only counts as a modifier when more modifiers or a type-declaration
/// keyword follow.
pub(crate) fn modifier_list(p: &mut Parser<'_>) {
    let m = p.start();
    loop {
        if p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
            annotation(p);
            continue;
        }
        if p.current_kind().is_modifier() {
            if p.at(SyntaxKind::NON_SEALED_KW) {
                p.require_feature(Feature::SealedTypes);
            }
            p.bump();
            continue;
        }
        if p.at_contextual_kw(SyntaxKind::SEALED_KW) && sealed_modifier_follows(p) {
            p.require_feature(Feature::SealedTypes);
            p.bump_remap(SyntaxKind::SEALED_KW);
            continue;
        }
        break;
    }
    m.complete(p, SyntaxKind::MODIFIER_LIST);
}

fn sealed_modifier_follows(p: &Parser<'_>) -> bool {
    matches!(
        p.nth(1),
        SyntaxKind::CLASS_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::ABSTRACT_KW
            | SyntaxKind::STATIC_KW
            | SyntaxKind::PUBLIC_KW
            | SyntaxKind::PROTECTED_KW
            | SyntaxKind::PRIVATE_KW
            | SyntaxKind::FINAL_KW
            | SyntaxKind::STRICTFP_KW
    )
}

/// Annotation = '@' QualifiedName ('(' ElementValues? ')')?
pub(crate) fn annotation(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // @
    if !types::qualified_name(p) {
        p.error("expected an annotation name", ErrorCode::E0301);
        m.complete(p, SyntaxKind::ANNOTATION);
        return;
    }
    if p.eat(SyntaxKind::L_PAREN) {
        while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
            if p.at(SyntaxKind::IDENT) && p.nth_at(1, SyntaxKind::EQ) {
                p.bump(); // element name
                p.bump(); // =
            }
            element_value(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        if !p.eat(SyntaxKind::R_PAREN) {
            p.error_with_hint(
                "expected ')'",
                ErrorCode::E0203,
                "this annotation argument list is never closed",
            );
        }
    }
    m.complete(p, SyntaxKind::ANNOTATION);
}

/// ElementValue = Annotation | ArrayInitializer | Expression
fn element_value(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::AT) {
        annotation(p);
    } else if p.at(SyntaxKind::L_BRACE) {
        expressions::array_initializer(p);
    } else if expressions::expression(p).is_none() {
        p.err_and_bump("expected an annotation value", ErrorCode::E0401);
    }
}

/// TypeParameters = '<' TypeParameter (',' TypeParameter)* '>'
/// TypeParameter  = Annotation* Ident ('extends' Type ('&' Type)*)?
pub(crate) fn type_parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // <
    while !p.at(SyntaxKind::GT) && !p.at_eof() {
        let tp = p.start();
        while p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
            annotation(p);
        }
        if !types::name(p) {
            tp.abandon(p);
            break;
        }
        if p.eat(SyntaxKind::EXTENDS_KW) {
            loop {
                if types::type_reference(p).is_none() {
                    p.error("expected a bound type", ErrorCode::E0403);
                    break;
                }
                if !p.eat(SyntaxKind::AMP) {
                    break;
                }
            }
        }
        tp.complete(p, SyntaxKind::TYPE_PARAMETER);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::GT) {
        p.error("expected '>'", ErrorCode::E0205);
    }
    m.complete(p, SyntaxKind::TYPE_PARAMETER_LIST);
}

/// 'extends' clause: single supertype for classes, comma list for interfaces.
fn extends_clause_opt(p: &mut Parser<'_>, comma_list: bool) {
    if !p.at(SyntaxKind::EXTENDS_KW) {
        return;
    }
    let m = p.start();
    p.bump();
    loop {
        if types::type_reference(p).is_none() {
            p.error("expected a supertype", ErrorCode::E0403);
            break;
        }
        if !comma_list || !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    m.complete(p, SyntaxKind::EXTENDS_CLAUSE);
}

fn implements_clause_opt(p: &mut Parser<'_>) {
    if !p.at(SyntaxKind::IMPLEMENTS_KW) {
        return;
    }
    let m = p.start();
    p.bump();
    loop {
        if types::type_reference(p).is_none() {
            p.error("expected an interface type", ErrorCode::E0403);
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    m.complete(p, SyntaxKind::IMPLEMENTS_CLAUSE);
}

fn permits_clause_opt(p: &mut Parser<'_>) {
    if !p.at_contextual_kw(SyntaxKind::PERMITS_KW) {
        return;
    }
    p.require_feature(Feature::SealedTypes);
    let m = p.start();
    p.bump_remap(SyntaxKind::PERMITS_KW);
    loop {
        if types::type_reference(p).is_none() {
            p.error("expected a permitted subtype", ErrorCode::E0403);
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    m.complete(p, SyntaxKind::PERMITS_CLAUSE);
}

/// Parameters = '(' (Parameter (',' Parameter)*)? ')'
///
/// A `...` parameter anywhere but last reports E0305; the list still parses.
pub(crate) fn parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.eat(SyntaxKind::L_PAREN) {
        p.error("expected '('", ErrorCode::E0205);
        m.complete(p, SyntaxKind::PARAMETER_LIST);
        return;
    }
    let mut varargs_seen = false;
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        if varargs_seen {
            p.error_with_hint(
                "varargs parameter must be last",
                ErrorCode::E0305,
                "move the '...' parameter to the end of the list",
            );
            varargs_seen = false;
        }
        varargs_seen = parameter(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_hint(
            "expected ')'",
            ErrorCode::E0203,
            "this parameter list is never closed",
        );
    }
    m.complete(p, SyntaxKind::PARAMETER_LIST);
}

/// Parameter = Modifier* Type '...'? ('this' | Name ('[' ']')*)
///
/// Returns true when the parameter was declared varargs.
fn parameter(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    modifier_list(p);
    let varargs = match types::type_reference_in_parameter(p) {
        Some(info) => info.is_varargs,
        None => {
            p.error("expected a parameter type", ErrorCode::E0403);
            false
        }
    };
    if p.at(SyntaxKind::THIS_KW) {
        // Receiver parameter: void m(Foo this)
        p.bump();
    } else {
        types::name(p);
        while p.at(SyntaxKind::L_BRACKET) && p.nth_at(1, SyntaxKind::R_BRACKET) {
            p.bump();
            p.bump();
        }
    }
    m.complete(p, SyntaxKind::PARAMETER);
    varargs
}

fn throws_clause_opt(p: &mut Parser<'_>) {
    if !p.at(SyntaxKind::THROWS_KW) {
        return;
    }
    let m = p.start();
    p.bump();
    loop {
        if types::type_reference(p).is_none() {
            p.error("expected an exception type", ErrorCode::E0403);
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    m.complete(p, SyntaxKind::THROWS_CLAUSE);
}

fn expect_semicolon(p: &mut Parser<'_>) {
    if !p.eat(SyntaxKind::SEMICOLON) {
        p.error("expected ';'", ErrorCode::E0201);
    }
}

/// Consume tokens into the current node until a recovery point.
fn skip_until(p: &mut Parser<'_>, recovery: &[SyntaxKind]) {
    while !p.at_eof() && !p.at_any(recovery) && !p.is_cancelled() {
        p.bump_any();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::language_level::JavaLanguageLevel;
    use crate::parser::lexer::tokenize;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_legacy_context_dispatch_matches_canonical() {
        let text = "int x = 1;";
        let tokens = tokenize(text);
        let mut p = Parser::new(
            text,
            &tokens,
            JavaLanguageLevel::default(),
            CancellationToken::new(),
        );
        let root = p.start();
        assert!(member_legacy(&mut p, LegacyDeclarationContext::CodeBlock));
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        assert!(parse.ok(), "{:?}", parse.errors);
        let decl = parse.syntax().first_child().unwrap();
        assert_eq!(decl.kind(), SyntaxKind::LOCAL_VARIABLE_DECLARATION);
    }
}
