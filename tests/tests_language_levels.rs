//! Parser Tests - Language Levels
//!
//! Version-gated syntax always parses structurally; levels below the
//! feature's minimum add an E0601 diagnostic instead of mangling the tree.

mod helpers;

use helpers::parse_helpers::find_node;
use jasper::parser::ErrorCode;
use jasper::{JavaLanguageLevel, SyntaxKind, parse_file};
use rstest::rstest;

fn level_errors(source: &str, level: JavaLanguageLevel) -> usize {
    parse_file(source, level)
        .errors
        .iter()
        .filter(|e| e.code == ErrorCode::E0601)
        .count()
}

// ============================================================================
// Gating
// ============================================================================

#[rstest]
// var: Java 10, modeled at 11
#[case("class A { void m() { var x = 1; } }", JavaLanguageLevel::Java8, JavaLanguageLevel::Java11)]
// records: Java 16, modeled at 17
#[case("record P(int x) {}", JavaLanguageLevel::Java11, JavaLanguageLevel::Java17)]
// sealed types: Java 17
#[case(
    "sealed interface S permits A {}",
    JavaLanguageLevel::Java11,
    JavaLanguageLevel::Java17
)]
// text blocks: Java 15, modeled at 17
#[case(
    "class A { String s = \"\"\"\n hi \"\"\"; }",
    JavaLanguageLevel::Java11,
    JavaLanguageLevel::Java17
)]
// instanceof patterns: Java 16, modeled at 17
#[case(
    "class A { boolean f(Object o) { return o instanceof String s; } }",
    JavaLanguageLevel::Java11,
    JavaLanguageLevel::Java17
)]
// arrow switch: Java 14, modeled at 17
#[case(
    "class A { void m() { switch (x) { default -> done(); } } }",
    JavaLanguageLevel::Java8,
    JavaLanguageLevel::Java17
)]
// pattern switch: Java 21
#[case(
    "class A { void m() { switch (o) { case String s -> use(s); default -> skip(); } } }",
    JavaLanguageLevel::Java17,
    JavaLanguageLevel::Java21
)]
// record patterns: Java 21
#[case(
    "class A { boolean f(Object o) { return o instanceof Point(int x, int y); } }",
    JavaLanguageLevel::Java17,
    JavaLanguageLevel::Java21
)]
fn test_feature_gating(
    #[case] source: &str,
    #[case] too_old: JavaLanguageLevel,
    #[case] new_enough: JavaLanguageLevel,
) {
    assert!(
        level_errors(source, too_old) > 0,
        "expected E0601 at {too_old:?} for {source:?}"
    );
    assert_eq!(
        level_errors(source, new_enough),
        0,
        "expected no E0601 at {new_enough:?} for {source:?}"
    );
}

// ============================================================================
// Structure Survives Gating
// ============================================================================

#[test]
fn test_gated_syntax_still_builds_full_tree() {
    let parsed = parse_file("record P(int x, int y) {}", JavaLanguageLevel::Java8);
    assert!(parsed.errors.iter().any(|e| e.code == ErrorCode::E0601));
    let root = parsed.syntax();
    assert!(find_node(&root, SyntaxKind::RECORD_DECLARATION).is_some());
    assert_eq!(
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::RECORD_COMPONENT)
            .count(),
        2
    );
    assert_eq!(root.text().to_string(), "record P(int x, int y) {}");
}

// ============================================================================
// Contextual Keywords Stay Identifiers at Old Levels
// ============================================================================

#[test]
fn test_var_as_plain_name_parses_everywhere() {
    // `var` used as an ordinary identifier is fine at every level.
    let parsed = parse_file(
        "class A { void m() { int var = 1; use(var); } }",
        JavaLanguageLevel::Java8,
    );
    assert!(parsed.ok(), "{:?}", parsed.errors);
}
