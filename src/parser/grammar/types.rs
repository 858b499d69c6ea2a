//! Reference and type parsing
//!
//! Parses qualified names, generic type arguments (including diamond),
//! wildcard bounds, array and varargs markers, and `&`/`|` type lists.
//! Every parse returns a [`TypeInfo`] so callers can make disambiguation
//! decisions (cast vs. paren, generic vs. comparison) without re-parsing.

use crate::parser::errors::ErrorCode;
use crate::parser::parser::{CompletedMarker, Parser};
use crate::parser::syntax_kind::SyntaxKind;

/// Structured result of a type parse.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeInfo {
    pub is_primitive: bool,
    pub is_parameterized: bool,
    pub is_array: bool,
    pub is_varargs: bool,
    pub has_errors: bool,
    pub marker: CompletedMarker,
}

/// The historical shape of [`TypeInfo`], kept for callers that predate it.
/// Field-for-field identical; derivable losslessly from the canonical form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LegacyTypeInfo {
    pub is_primitive: bool,
    pub is_parameterized: bool,
    pub is_array: bool,
    pub is_varargs: bool,
    pub has_errors: bool,
    pub marker: CompletedMarker,
}

impl From<TypeInfo> for LegacyTypeInfo {
    fn from(info: TypeInfo) -> Self {
        Self {
            is_primitive: info.is_primitive,
            is_parameterized: info.is_parameterized,
            is_array: info.is_array,
            is_varargs: info.is_varargs,
            has_errors: info.has_errors,
            marker: info.marker,
        }
    }
}

impl From<LegacyTypeInfo> for TypeInfo {
    fn from(info: LegacyTypeInfo) -> Self {
        Self {
            is_primitive: info.is_primitive,
            is_parameterized: info.is_parameterized,
            is_array: info.is_array,
            is_varargs: info.is_varargs,
            has_errors: info.has_errors,
            marker: info.marker,
        }
    }
}

/// Can the current token start a type?
pub(crate) fn at_type_start(p: &Parser<'_>) -> bool {
    p.current_kind().is_primitive_type()
        || p.at(SyntaxKind::IDENT)
        || p.at(SyntaxKind::VOID_KW)
        || p.at(SyntaxKind::AT)
}

/// TypeReference = Annotation* (PrimitiveType | 'void' | ClassType) Dims*
///
/// Returns `None` without consuming anything when the current token cannot
/// start a type — distinct from "matched with an error".
pub(crate) fn type_reference(p: &mut Parser<'_>) -> Option<TypeInfo> {
    type_ref_inner(p, false)
}

/// Like [`type_reference`] but accepts a trailing `...`. Only parameter
/// lists call this; the "varargs only in last position" rule is the
/// caller's to enforce since only it sees the whole list.
pub(crate) fn type_reference_in_parameter(p: &mut Parser<'_>) -> Option<TypeInfo> {
    type_ref_inner(p, true)
}

fn type_ref_inner(p: &mut Parser<'_>, allow_varargs: bool) -> Option<TypeInfo> {
    if !at_type_start(p) {
        return None;
    }

    let m = p.start();
    while p.at(SyntaxKind::AT) && !p.nth_at(1, SyntaxKind::INTERFACE_KW) {
        super::declarations::annotation(p);
    }

    let mut is_primitive = false;
    let mut is_parameterized = false;

    if p.current_kind().is_primitive_type() || p.at(SyntaxKind::VOID_KW) {
        is_primitive = true;
        p.bump();
    } else if p.at(SyntaxKind::IDENT) {
        // ClassType = Ident TypeArguments? ('.' Ident TypeArguments?)*
        p.bump();
        if p.at(SyntaxKind::LT) {
            is_parameterized = true;
            type_argument_list(p);
        }
        while p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::IDENT) {
            p.bump();
            p.bump();
            if p.at(SyntaxKind::LT) {
                is_parameterized = true;
                type_argument_list(p);
            }
        }
    } else {
        // Annotations with nothing after them
        p.error("expected a type", ErrorCode::E0403);
        let marker = m.complete(p, SyntaxKind::TYPE_REFERENCE);
        return Some(TypeInfo {
            is_primitive: false,
            is_parameterized: false,
            is_array: false,
            is_varargs: false,
            has_errors: true,
            marker,
        });
    }

    let mut is_array = false;
    while p.at(SyntaxKind::L_BRACKET) && p.nth_at(1, SyntaxKind::R_BRACKET) {
        is_array = true;
        p.bump();
        p.bump();
    }

    let mut is_varargs = false;
    if allow_varargs && p.at(SyntaxKind::ELLIPSIS) {
        is_varargs = true;
        p.bump();
    }

    let has_errors = p.errors_since(&m) > 0;
    let marker = m.complete(p, SyntaxKind::TYPE_REFERENCE);
    Some(TypeInfo {
        is_primitive,
        is_parameterized,
        is_array,
        is_varargs,
        has_errors,
        marker,
    })
}

/// TypeArguments = '<' (TypeArgument (',' TypeArgument)*)? '>'
///
/// Returns true when the list closed with `>` and parsed without errors.
/// Callers speculating on "`<` opens generics vs. `<` is an operator" wrap
/// this in a marker and roll back when it returns false.
pub(crate) fn type_argument_list(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    if !p.at(SyntaxKind::LT) {
        m.abandon(p);
        return false;
    }
    p.bump(); // <

    // Diamond: <>
    if !p.at(SyntaxKind::GT) {
        loop {
            if !type_argument(p) {
                p.error("expected a type argument", ErrorCode::E0403);
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    if !p.eat(SyntaxKind::GT) {
        p.error("expected '>'", ErrorCode::E0205);
    }
    let clean = p.errors_since(&m) == 0;
    m.complete(p, SyntaxKind::TYPE_ARGUMENT_LIST);
    clean
}

/// TypeArgument = Wildcard | TypeReference
fn type_argument(p: &mut Parser<'_>) -> bool {
    if p.at(SyntaxKind::QUESTION) {
        wildcard_type(p);
        return true;
    }
    match type_reference(p) {
        Some(info) => !info.has_errors,
        None => false,
    }
}

/// Wildcard = '?' (('extends' | 'super') TypeReference)?
fn wildcard_type(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // ?
    if p.eat(SyntaxKind::EXTENDS_KW) || p.eat(SyntaxKind::SUPER_KW) {
        if type_reference(p).is_none() {
            p.error("expected a bound type after wildcard", ErrorCode::E0403);
        }
    }
    m.complete(p, SyntaxKind::WILDCARD_TYPE);
}

/// CatchType = TypeReference ('|' TypeReference)*
///
/// Wraps the disjunction in a TYPE_UNION node only when a `|` is present.
pub(crate) fn type_union(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    if type_reference(p).is_none() {
        m.abandon(p);
        return false;
    }
    if !p.at(SyntaxKind::PIPE) {
        m.abandon(p);
        return true;
    }
    while p.eat(SyntaxKind::PIPE) {
        if type_reference(p).is_none() {
            p.error("expected a type after '|'", ErrorCode::E0403);
            break;
        }
    }
    m.complete(p, SyntaxKind::TYPE_UNION);
    true
}

/// IntersectionType = TypeReference ('&' TypeReference)*
///
/// Used in cast targets; wraps in TYPE_INTERSECTION only when `&` appears.
pub(crate) fn type_intersection(p: &mut Parser<'_>) -> Option<TypeInfo> {
    let m = p.start();
    let info = match type_reference(p) {
        Some(info) => info,
        None => {
            m.abandon(p);
            return None;
        }
    };
    if !p.at(SyntaxKind::AMP) {
        m.abandon(p);
        return Some(info);
    }
    while p.eat(SyntaxKind::AMP) {
        if type_reference(p).is_none() {
            p.error("expected a type after '&'", ErrorCode::E0403);
            break;
        }
    }
    let has_errors = info.has_errors || p.errors_since(&m) > 0;
    let marker = m.complete(p, SyntaxKind::TYPE_INTERSECTION);
    Some(TypeInfo {
        is_primitive: false,
        is_parameterized: info.is_parameterized,
        is_array: false,
        is_varargs: false,
        has_errors,
        marker,
    })
}

/// QualifiedName = Ident ('.' Ident)*
///
/// Plain dotted names: packages, imports, module references.
pub(crate) fn qualified_name(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    if !p.at(SyntaxKind::IDENT) {
        m.abandon(p);
        return false;
    }
    p.bump();
    while p.at(SyntaxKind::DOT) && p.nth_at(1, SyntaxKind::IDENT) {
        p.bump();
        p.bump();
    }
    m.complete(p, SyntaxKind::QUALIFIED_NAME);
    true
}

/// Name of a declared entity, wrapped so tooling can find it uniformly.
pub(crate) fn name(p: &mut Parser<'_>) -> bool {
    if p.at(SyntaxKind::IDENT) {
        let m = p.start();
        p.bump();
        m.complete(p, SyntaxKind::NAME);
        true
    } else {
        p.error_with_hint(
            "expected a name",
            ErrorCode::E0301,
            "declarations need an identifier here",
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::language_level::JavaLanguageLevel;
    use crate::parser::lexer::tokenize;
    use tokio_util::sync::CancellationToken;

    fn parser_over<'a>(text: &'a str, tokens: &'a [crate::parser::lexer::Token]) -> Parser<'a> {
        Parser::new(
            text,
            tokens,
            JavaLanguageLevel::default(),
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_type_info_flags() {
        let text = "int[]";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        let info = type_reference(&mut p).expect("primitive array is a type");
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        assert!(info.is_primitive);
        assert!(info.is_array);
        assert!(!info.is_parameterized);
        assert!(!info.is_varargs);
        assert!(!info.has_errors);
    }

    #[test]
    fn test_legacy_type_info_round_trips() {
        let text = "List<String>";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        let info = type_reference(&mut p).expect("generic type parses");
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let legacy = LegacyTypeInfo::from(info);
        assert!(legacy.is_parameterized);
        let back = TypeInfo::from(legacy);
        assert_eq!(back.is_primitive, info.is_primitive);
        assert_eq!(back.is_parameterized, info.is_parameterized);
        assert_eq!(back.is_array, info.is_array);
        assert_eq!(back.is_varargs, info.is_varargs);
        assert_eq!(back.has_errors, info.has_errors);
    }
}
