//! Parser Tests - Expressions
//!
//! Operator precedence and associativity, cast/paren/lambda disambiguation,
//! glued `>`-family operators, postfix chains, and switch expressions.

mod helpers;

use helpers::parse_helpers::{count_nodes, find_node};
use jasper::parser::ErrorCode;
use jasper::{JavaLanguageLevel, SyntaxKind, parse_expression};
use rstest::rstest;

fn expr_parse(input: &str) -> jasper::Parse {
    parse_expression(input, JavaLanguageLevel::default())
}

fn assert_expr_ok(input: &str) -> jasper::parser::SyntaxNode {
    let parsed = expr_parse(input);
    assert!(
        parsed.ok(),
        "expected clean parse of {input:?}, got {:?}",
        parsed.errors
    );
    assert_eq!(parsed.syntax().text().to_string(), input);
    parsed.syntax()
}

/// Kind of the top-most expression under the fragment root.
fn top_kind(input: &str) -> SyntaxKind {
    let root = assert_expr_ok(input);
    root.first_child().map(|n| n.kind()).unwrap_or(SyntaxKind::ERROR)
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[rstest]
#[case("a + b * c")]
#[case("a * b + c")]
#[case("a << 2 + 1")]
#[case("a | b & c ^ d")]
#[case("a && b || c && d")]
#[case("x == y != z")]
#[case("-a * ~b + !c")]
#[case("a = b = c + 1")]
#[case("a += b -= c")]
#[case("a ? b : c ? d : e")]
#[case("i++ + ++j")]
fn test_expressions_parse_cleanly(#[case] input: &str) {
    assert_expr_ok(input);
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let root = assert_expr_ok("a + b * c");
    let outer = root.first_child().unwrap();
    assert_eq!(outer.kind(), SyntaxKind::BINARY_EXPR);
    // The right child of `+` is the `b * c` product.
    let inner = outer
        .children()
        .find(|n| n.kind() == SyntaxKind::BINARY_EXPR)
        .unwrap();
    assert_eq!(inner.text().to_string(), "b * c");
}

#[test]
fn test_assignment_is_right_associative() {
    let root = assert_expr_ok("a = b = c");
    let outer = root.first_child().unwrap();
    assert_eq!(outer.kind(), SyntaxKind::ASSIGNMENT_EXPR);
    assert_eq!(outer.children().count(), 2);
    // `a = (b = c)`: the inner assignment is the right operand.
    let inner = outer.children().nth(1).unwrap();
    assert_eq!(inner.kind(), SyntaxKind::ASSIGNMENT_EXPR);
    assert_eq!(inner.text().to_string(), "b = c");
}

#[test]
fn test_left_associative_chain_nests_leftward() {
    let root = assert_expr_ok("a - b - c");
    let outer = root.first_child().unwrap();
    // `(a - b) - c`: the left operand is itself a binary expression.
    let left = outer.children().next().unwrap();
    assert_eq!(left.kind(), SyntaxKind::BINARY_EXPR);
    assert_eq!(left.text().to_string(), "a - b");
}

// ============================================================================
// Glued `>` Operators
// ============================================================================

#[rstest]
#[case("a >> 2", SyntaxKind::BINARY_EXPR)]
#[case("a >>> 2", SyntaxKind::BINARY_EXPR)]
#[case("a >= b", SyntaxKind::BINARY_EXPR)]
#[case("a >>= 2", SyntaxKind::ASSIGNMENT_EXPR)]
#[case("a >>>= 2", SyntaxKind::ASSIGNMENT_EXPR)]
#[case("a > b", SyntaxKind::BINARY_EXPR)]
fn test_glued_gt_operators(#[case] input: &str, #[case] expected: SyntaxKind) {
    assert_eq!(top_kind(input), expected, "for {input:?}");
}

#[test]
fn test_spaced_gt_tokens_do_not_glue() {
    // `a > > b` is not a shift; the second `>` is a parse error.
    let parsed = expr_parse("a > > b");
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().text().to_string(), "a > > b");
}

// ============================================================================
// Cast vs. Parenthesized Expression
// ============================================================================

#[rstest]
#[case("(Foo) bar", SyntaxKind::CAST_EXPR)]
#[case("(int) x", SyntaxKind::CAST_EXPR)]
#[case("(int) - 1", SyntaxKind::CAST_EXPR)]
#[case("(int) ++x", SyntaxKind::CAST_EXPR)]
#[case("(List<String>) xs", SyntaxKind::CAST_EXPR)]
#[case("(Runnable & Serializable) r", SyntaxKind::CAST_EXPR)]
#[case("(int[]) xs", SyntaxKind::CAST_EXPR)]
#[case("(Foo) + bar", SyntaxKind::BINARY_EXPR)]
#[case("(Foo) - bar", SyntaxKind::BINARY_EXPR)]
#[case("(a) + (b)", SyntaxKind::BINARY_EXPR)]
#[case("(x)", SyntaxKind::PAREN_EXPR)]
#[case("(x + y) * z", SyntaxKind::BINARY_EXPR)]
fn test_cast_vs_paren(#[case] input: &str, #[case] expected: SyntaxKind) {
    assert_eq!(top_kind(input), expected, "for {input:?}");
}

// ============================================================================
// Lambdas and Method References
// ============================================================================

#[rstest]
#[case("x -> x + 1")]
#[case("() -> done()")]
#[case("(a, b) -> a + b")]
#[case("(int a, int b) -> a * b")]
#[case("(var a) -> a")]
#[case("x -> { return x; }")]
#[case("String::valueOf")]
#[case("this::handle")]
#[case("ArrayList::new")]
#[case("List::<String>copyOf")]
fn test_lambdas_and_method_refs(#[case] input: &str) {
    assert_expr_ok(input);
}

#[test]
fn test_lambda_not_confused_with_paren() {
    assert_eq!(top_kind("(a, b) -> a"), SyntaxKind::LAMBDA_EXPR);
    assert_eq!(top_kind("(a)"), SyntaxKind::PAREN_EXPR);
}

// ============================================================================
// Postfix Chains
// ============================================================================

#[rstest]
#[case("foo.bar.baz", SyntaxKind::FIELD_ACCESS_EXPR)]
#[case("foo.bar()", SyntaxKind::METHOD_CALL_EXPR)]
#[case("foo()", SyntaxKind::METHOD_CALL_EXPR)]
#[case("foo.<String>bar(x)", SyntaxKind::METHOD_CALL_EXPR)]
#[case("arr[i]", SyntaxKind::ARRAY_ACCESS_EXPR)]
#[case("arr[i][j]", SyntaxKind::ARRAY_ACCESS_EXPR)]
#[case("String.class", SyntaxKind::CLASS_LITERAL_EXPR)]
#[case("int.class", SyntaxKind::CLASS_LITERAL_EXPR)]
#[case("outer.new Inner()", SyntaxKind::NEW_EXPR)]
#[case("x++", SyntaxKind::POSTFIX_EXPR)]
fn test_postfix_forms(#[case] input: &str, #[case] expected: SyntaxKind) {
    assert_eq!(top_kind(input), expected, "for {input:?}");
}

// ============================================================================
// Object and Array Creation
// ============================================================================

#[rstest]
#[case("new Foo()")]
#[case("new Foo(1, 2)")]
#[case("new ArrayList<>()")]
#[case("new int[5]")]
#[case("new int[5][2]")]
#[case("new int[] {1, 2, 3}")]
#[case("new Runnable() { public void run() {} }")]
fn test_new_expressions(#[case] input: &str) {
    assert_eq!(top_kind(input), SyntaxKind::NEW_EXPR, "for {input:?}");
}

// ============================================================================
// instanceof and Switch Expressions
// ============================================================================

#[test]
fn test_instanceof_with_pattern() {
    let root = assert_expr_ok("o instanceof String s");
    let inst = root.first_child().unwrap();
    assert_eq!(inst.kind(), SyntaxKind::INSTANCEOF_EXPR);
    assert!(find_node(&inst, SyntaxKind::TYPE_PATTERN).is_some());
}

#[test]
fn test_instanceof_plain_type() {
    let root = assert_expr_ok("o instanceof String");
    let inst = root.first_child().unwrap();
    assert_eq!(inst.kind(), SyntaxKind::INSTANCEOF_EXPR);
    assert!(find_node(&inst, SyntaxKind::TYPE_PATTERN).is_none());
}

#[test]
fn test_switch_expression() {
    let root = assert_expr_ok("switch (x) { case 1 -> \"one\"; default -> \"many\"; }");
    let sw = root.first_child().unwrap();
    assert_eq!(sw.kind(), SyntaxKind::SWITCH_EXPRESSION);
    assert_eq!(count_nodes(&sw, SyntaxKind::SWITCH_RULE), 2);
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
#[case("a +")]
#[case("a ? b")]
#[case("(a")]
#[case("foo(")]
fn test_malformed_expressions_report_errors(#[case] input: &str) {
    let parsed = expr_parse(input);
    assert!(!parsed.ok(), "expected errors for {input:?}");
    assert_eq!(parsed.syntax().text().to_string(), input);
}

#[test]
fn test_missing_operand_code() {
    let parsed = expr_parse("a +");
    assert!(parsed.errors.iter().any(|e| e.code == ErrorCode::E0402));
}
