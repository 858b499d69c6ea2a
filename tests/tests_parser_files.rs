//! Parser Tests - Compilation Units and Declarations
//!
//! Whole-file parsing: packages, imports, the five type-declaration forms,
//! members, modifiers, and generics. Every case must round-trip exactly.

mod helpers;

use helpers::parse_helpers::{assert_errors, assert_no_errors, count_nodes, find_node, parse};
use jasper::SyntaxKind;
use rstest::rstest;

// ============================================================================
// Packages and Imports
// ============================================================================

#[rstest]
#[case("package com.example.app;\n")]
#[case("@Generated package com.example.app;\n")]
#[case("package p;\nimport java.util.List;\n")]
#[case("package p;\nimport static java.util.Collections.emptyList;\n")]
#[case("package p;\nimport java.util.*;\nimport java.io.*;\n")]
fn test_package_and_imports(#[case] input: &str) {
    assert_no_errors(input);
}

// ============================================================================
// Type Declarations
// ============================================================================

#[rstest]
#[case("class A {}")]
#[case("public final class A extends B implements C, D {}")]
#[case("interface I extends A, B {}")]
#[case("enum E { A, B, C }")]
#[case("enum E { A(1), B(2); int v; E(int v) { this.v = v; } }")]
#[case("record Point(int x, int y) {}")]
#[case("record Box<T>(T value) implements Holder<T> {}")]
#[case("@interface Marker {}")]
#[case("@interface Timed { int value() default 30; }")]
#[case("public sealed interface Shape permits Circle, Square {}")]
#[case("non-sealed class Circle extends Shape {}")]
fn test_type_declarations(#[case] input: &str) {
    assert_no_errors(input);
}

#[test]
fn test_declaration_kinds() {
    let parsed = parse("class A {} interface I {} enum E {} record R(int x) {} @interface M {}");
    assert!(parsed.ok());
    let root = parsed.syntax();
    for kind in [
        SyntaxKind::CLASS_DECLARATION,
        SyntaxKind::INTERFACE_DECLARATION,
        SyntaxKind::ENUM_DECLARATION,
        SyntaxKind::RECORD_DECLARATION,
        SyntaxKind::ANNOTATION_INTERFACE_DECLARATION,
    ] {
        assert!(find_node(&root, kind).is_some(), "missing {kind:?}");
    }
}

// ============================================================================
// Members
// ============================================================================

#[rstest]
#[case("class A { int x; }")]
#[case("class A { int x = 1, y = 2; }")]
#[case("class A { int[] xs = {1, 2, 3}; }")]
#[case("class A { static final String S = \"s\"; }")]
#[case("class A { void m() {} }")]
#[case("class A { <T> T id(T t) { return t; } }")]
#[case("class A { A() { this.x = 0; } int x; }")]
#[case("class A { int m(int a, String... rest) throws E1, E2 { return a; } }")]
#[case("class A { static { init(); } { count++; } }")]
#[case("class A { class Inner {} static class Nested {} }")]
#[case("abstract class A { abstract void m(); }")]
fn test_members(#[case] input: &str) {
    assert_no_errors(input);
}

#[test]
fn test_annotation_interface_rejects_constructors_and_initializers() {
    let parsed = parse("@interface M { { setup(); } M() {} String value(); }");
    assert!(!parsed.ok());
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0303),
        "initializer block must be diagnosed: {:?}",
        parsed.errors
    );
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0302),
        "constructor must be diagnosed: {:?}",
        parsed.errors
    );
    // The healthy element after the bad members still parses.
    assert!(
        find_node(&parsed.syntax(), SyntaxKind::ANNOTATION_ELEMENT_DECLARATION).is_some()
    );
}

#[test]
fn test_varargs_must_be_last() {
    let parsed = parse("class A { void m(int... xs, int y) {} }");
    assert!(
        parsed
            .errors
            .iter()
            .any(|e| e.code == jasper::parser::ErrorCode::E0305),
        "expected a misplaced-varargs diagnostic"
    );
}

// ============================================================================
// Generics
// ============================================================================

#[rstest]
#[case("class A { Map<String, List<Integer>> m; }")]
#[case("class A { List<? extends Number> xs; }")]
#[case("class A { List<? super Integer> xs; }")]
#[case("class A<T extends Comparable<T> & Cloneable> {}")]
#[case("class A { List<String> xs = new ArrayList<>(); }")]
#[case("class A { Map<K, V>.Entry e; }")]
fn test_generics(#[case] input: &str) {
    assert_no_errors(input);
}

#[test]
fn test_nested_generic_closers_are_single_tokens() {
    // Map<String, List<Integer>> must not lex `>>` as a shift.
    let parsed = parse("class A { Map<String, List<Integer>> m; }");
    assert!(parsed.ok());
    let root = parsed.syntax();
    assert_eq!(count_nodes(&root, SyntaxKind::TYPE_ARGUMENT_LIST), 2);
}

// ============================================================================
// Trivia Round-Trip
// ============================================================================

#[rstest]
#[case("// leading\nclass A {} // trailing\n")]
#[case("/* block */ class A { /** doc */ int x; }\n")]
#[case("\n\n\tclass A {\n\n}\n\n")]
#[case("class A {}\n// dangling comment at eof")]
fn test_comment_round_trip(#[case] input: &str) {
    assert_no_errors(input);
}

// ============================================================================
// Malformed Files
// ============================================================================

#[rstest]
#[case("class A {")]
#[case("class {}")]
#[case("class A { int }")]
#[case("class A { void m( }")]
#[case("public public")]
fn test_malformed_still_round_trips(#[case] input: &str) {
    assert_errors(input);
}
