//! Parser Tests - Recovery and Invariants
//!
//! The unconditional guarantees: exact round-trip on arbitrary input,
//! termination and progress on garbage, deterministic output, and
//! speculation leaving no trace in clean parses.

mod helpers;

use helpers::parse_helpers::{parse, tree_shape};
use rstest::rstest;

// ============================================================================
// Round-Trip on Arbitrary Input
// ============================================================================

#[rstest]
#[case("")]
#[case("   \n\t  ")]
#[case("// just a comment")]
#[case("?????")]
#[case("}}}}{{{{")]
#[case(")))]]];;;")]
#[case("class class class")]
#[case("\u{0} \u{1} binary-ish \u{7f}")]
#[case("int x = \"unterminated")]
#[case("/* unterminated comment")]
fn test_arbitrary_input_round_trips_and_terminates(#[case] input: &str) {
    let parsed = parse(input);
    assert_eq!(parsed.syntax().text().to_string(), input);
}

#[test]
fn test_lexer_errors_surface_in_parse() {
    let parsed = parse("class A { String s = \"oops; }");
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0102),
        "unterminated string must be reported: {:?}",
        parsed.errors
    );
}

// ============================================================================
// Determinism
// ============================================================================

#[rstest]
#[case("class A { void m() { int x = (a) + b; } }")]
#[case("class A { void m() { f(x -> x + 1); } }")]
#[case("module m { requires ; bogus exports p; }")]
#[case("}}} garbage {{{")]
fn test_repeated_parses_are_identical(#[case] input: &str) {
    let first = parse(input);
    let second = parse(input);
    assert_eq!(
        tree_shape(&first.syntax()),
        tree_shape(&second.syntax()),
        "tree must be identical across parses"
    );
    assert_eq!(first.errors, second.errors, "diagnostics must be identical");
}

// ============================================================================
// Rollback Purity
// ============================================================================

#[test]
fn test_clean_input_with_heavy_speculation_has_no_errors() {
    // Every construct here is reached through at least one speculative
    // attempt (cast vs. paren, generic vs. comparison, for-each vs. for,
    // declaration vs. expression). None may leak a rolled-back diagnostic.
    let source = "class A {
        void m() {
            int a = (b) + c;
            Map<K, V> m = make();
            boolean cmp = x < y;
            for (String s : names) use(s);
            for (int i = 0; i < n; i++) use(i);
            try (var r = open()) { read(r); }
            Object o = (Cast) value;
        }
    }";
    let parsed = parse(source);
    assert!(
        parsed.ok(),
        "speculation must not leak diagnostics: {:?}",
        parsed.errors
    );
    assert_eq!(parsed.syntax().text().to_string(), source);
}

// ============================================================================
// Recovery Keeps Later Content
// ============================================================================

#[test]
fn test_bad_member_does_not_eat_the_next_one() {
    let parsed = parse("class A { ??? ; void ok() {} }");
    assert!(!parsed.ok());
    let root = parsed.syntax();
    assert!(
        root.descendants()
            .any(|n| n.kind() == jasper::SyntaxKind::METHOD_DECLARATION),
        "the healthy method must survive recovery"
    );
}

#[test]
fn test_unclosed_index_reports_bracket_code() {
    let parsed = parse("class A { void m() { x = a[i; } }");
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0204),
        "expected an unclosed-bracket diagnostic: {:?}",
        parsed.errors
    );
    assert_eq!(
        parsed.syntax().text().to_string(),
        "class A { void m() { x = a[i; } }"
    );
}

#[test]
fn test_top_level_statement_keeps_later_declarations() {
    let parsed = parse("if (ready) go();\nclass A {}");
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0303),
        "expected a misplaced-statement diagnostic: {:?}",
        parsed.errors
    );
    assert!(
        parsed
            .syntax()
            .descendants()
            .any(|n| n.kind() == jasper::SyntaxKind::CLASS_DECLARATION),
        "the class after the stray statement must survive"
    );
}

#[test]
fn test_missing_brace_reports_hint() {
    let parsed = parse("class A { void m() {");
    let unclosed = parsed
        .errors
        .iter()
        .find(|e| e.code == jasper::parser::ErrorCode::E0202)
        .expect("expected an unclosed-brace diagnostic");
    assert!(unclosed.hint.is_some());
}
