//! Parser Tests - Expression Strategy Equivalence
//!
//! The precedence-climbing and recursive-descent expression parsers must
//! accept the same inputs and produce structurally identical trees with
//! identical diagnostics.

mod helpers;

use helpers::parse_helpers::tree_shape;
use jasper::parser::{ExpressionStrategy, parse_expression_with_strategy, parse_file_with_strategy};
use jasper::JavaLanguageLevel;
use rstest::rstest;

fn assert_strategies_agree_on_expression(input: &str) {
    let climbing = parse_expression_with_strategy(
        input,
        JavaLanguageLevel::default(),
        ExpressionStrategy::PrecedenceClimbing,
    );
    let descent = parse_expression_with_strategy(
        input,
        JavaLanguageLevel::default(),
        ExpressionStrategy::RecursiveDescent,
    );
    assert_eq!(
        tree_shape(&climbing.syntax()),
        tree_shape(&descent.syntax()),
        "strategies disagree on {input:?}"
    );
    assert_eq!(
        climbing.errors, descent.errors,
        "diagnostics disagree on {input:?}"
    );
}

#[rstest]
#[case("a + b * c - d")]
#[case("a * b + c * d")]
#[case("a = b = c")]
#[case("a += b << 2")]
#[case("a >> 1 >>> 2")]
#[case("a < b == c > d")]
#[case("a ? b : c ? d : e")]
#[case("a && b || c")]
#[case("a | b ^ c & d")]
#[case("x instanceof String s")]
#[case("o instanceof Point p && p.x() > 0")]
#[case("(int) x + 1")]
#[case("(Foo) + bar")]
#[case("(a, b) -> a + b")]
#[case("arr[i] * f(x).g")]
#[case("new Foo(a, b).method()")]
#[case("x++ + --y")]
#[case("a +")]
#[case("a ? b")]
fn test_strategies_produce_identical_trees(#[case] input: &str) {
    assert_strategies_agree_on_expression(input);
}

#[rstest]
#[case("class A { void m() { int x = a + b * c; } }")]
#[case("class A { int f() { return cond ? l : r; } }")]
#[case("class A { void m() { for (int i = 0; i < n; i += 2) use(i); } }")]
#[case("class A { void m() { var s = switch (x) { default -> a + b; }; } }")]
fn test_strategies_agree_inside_files(#[case] input: &str) {
    let climbing = parse_file_with_strategy(
        input,
        JavaLanguageLevel::default(),
        ExpressionStrategy::PrecedenceClimbing,
    );
    let descent = parse_file_with_strategy(
        input,
        JavaLanguageLevel::default(),
        ExpressionStrategy::RecursiveDescent,
    );
    assert_eq!(
        tree_shape(&climbing.syntax()),
        tree_shape(&descent.syntax()),
        "strategies disagree on {input:?}"
    );
    assert_eq!(climbing.errors, descent.errors);
}
