//! Parser Tests - Module Declarations
//!
//! module-info parsing: all five directive forms, contextual keywords used
//! as ordinary names, and per-run garbage coalescing between directives.

mod helpers;

use helpers::parse_helpers::find_node;
use jasper::{JavaLanguageLevel, SyntaxKind, parse_module};
use rstest::rstest;

fn module_parse(input: &str) -> jasper::Parse {
    parse_module(input, JavaLanguageLevel::default())
}

fn assert_module_ok(input: &str) -> jasper::parser::SyntaxNode {
    let parsed = module_parse(input);
    assert!(
        parsed.ok(),
        "expected clean parse of {input:?}, got {:?}",
        parsed.errors
    );
    assert_eq!(parsed.syntax().text().to_string(), input);
    parsed.syntax()
}

// ============================================================================
// Directive Forms
// ============================================================================

#[rstest]
#[case("module com.app {}")]
#[case("open module com.app {}")]
#[case("module m { requires java.sql; }")]
#[case("module m { requires transitive java.sql; }")]
#[case("module m { requires static java.compiler; }")]
#[case("module m { exports com.app.api; }")]
#[case("module m { exports com.app.spi to com.plugin, com.other; }")]
#[case("module m { opens com.app.internal; }")]
#[case("module m { opens com.app.internal to framework; }")]
#[case("module m { uses com.app.spi.Service; }")]
#[case("module m { provides com.app.spi.Service with com.app.impl.Default; }")]
#[case("module m { provides S with A, B; }")]
fn test_module_directives(#[case] input: &str) {
    assert_module_ok(input);
}

#[test]
fn test_directive_node_kinds() {
    let root = assert_module_ok(
        "module m { requires a; exports b; opens c; uses D; provides E with F; }",
    );
    for kind in [
        SyntaxKind::REQUIRES_DIRECTIVE,
        SyntaxKind::EXPORTS_DIRECTIVE,
        SyntaxKind::OPENS_DIRECTIVE,
        SyntaxKind::USES_DIRECTIVE,
        SyntaxKind::PROVIDES_DIRECTIVE,
    ] {
        assert!(find_node(&root, kind).is_some(), "missing {kind:?}");
    }
}

// ============================================================================
// Contextual Keywords as Names
// ============================================================================

#[rstest]
// `transitive` here is the module name, not a modifier.
#[case("module m { requires transitive; }")]
// Directive words are plain identifiers in name position.
#[case("module requires { exports module.to; }")]
fn test_contextual_keywords_as_names(#[case] input: &str) {
    assert_module_ok(input);
}

// ============================================================================
// Error Coalescing
// ============================================================================

#[test]
fn test_garbage_between_directives_coalesces_per_run() {
    let input = "module m { requires ; bogus bogus exports com.app; }";
    let parsed = module_parse(input);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().text().to_string(), input);

    let module = find_node(&parsed.syntax(), SyntaxKind::MODULE_DECLARATION).unwrap();
    let body_kinds: Vec<SyntaxKind> = module
        .children()
        .filter(|n| {
            matches!(
                n.kind(),
                SyntaxKind::REQUIRES_DIRECTIVE | SyntaxKind::EXPORTS_DIRECTIVE | SyntaxKind::ERROR
            )
        })
        .map(|n| n.kind())
        .collect();
    // One damaged requires, one coalesced garbage run, one healthy exports.
    assert_eq!(
        body_kinds,
        vec![
            SyntaxKind::REQUIRES_DIRECTIVE,
            SyntaxKind::ERROR,
            SyntaxKind::EXPORTS_DIRECTIVE,
        ]
    );
}

#[test]
fn test_later_directives_survive_earlier_damage() {
    let input = "module m { junk tokens here\nexports good.pkg; uses Good; }";
    let parsed = module_parse(input);
    assert!(!parsed.ok());
    let root = parsed.syntax();
    assert!(find_node(&root, SyntaxKind::EXPORTS_DIRECTIVE).is_some());
    assert!(find_node(&root, SyntaxKind::USES_DIRECTIVE).is_some());
}

#[test]
fn test_module_via_parse_file() {
    // Ordinary file entry recognizes module-info content too.
    let parsed = jasper::parse_file("module m { requires java.base; }", JavaLanguageLevel::default());
    assert!(parsed.ok(), "{:?}", parsed.errors);
    assert!(find_node(&parsed.syntax(), SyntaxKind::MODULE_DECLARATION).is_some());
}

#[test]
fn test_modules_gated_below_java11() {
    let parsed = parse_module("module m { requires java.base; }", JavaLanguageLevel::Java8);
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0601),
        "expected a language-level diagnostic"
    );
    // The tree is still fully structured.
    assert!(find_node(&parsed.syntax(), SyntaxKind::REQUIRES_DIRECTIVE).is_some());
}
