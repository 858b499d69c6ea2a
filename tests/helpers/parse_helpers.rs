//! Shared helpers for parser integration tests.

use jasper::parser::{Parse, SyntaxKind, SyntaxNode};
use jasper::{JavaLanguageLevel, parse_file};

/// Parse at the default (newest) language level.
pub fn parse(source: &str) -> Parse {
    parse_file(source, JavaLanguageLevel::default())
}

/// Assert the tree reproduces the input byte-for-byte.
pub fn assert_round_trip(parse: &Parse, source: &str) {
    assert_eq!(
        parse.syntax().text().to_string(),
        source,
        "tree text must equal the input exactly"
    );
}

/// Assert a source parses without any diagnostics.
pub fn assert_no_errors(source: &str) {
    let parsed = parse(source);
    assert!(
        parsed.ok(),
        "expected no errors for {source:?}, got:\n{}",
        format_errors(&parsed)
    );
    assert_round_trip(&parsed, source);
}

/// Assert a source produces at least one diagnostic but still round-trips.
pub fn assert_errors(source: &str) {
    let parsed = parse(source);
    assert!(!parsed.ok(), "expected errors for {source:?}");
    assert_round_trip(&parsed, source);
}

pub fn format_errors(parse: &Parse) -> String {
    parse
        .errors
        .iter()
        .map(|e| format!("  [{}] {} at {:?}", e.code, e.message, e.range))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First descendant of the given kind, if any.
pub fn find_node(root: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    root.descendants().find(|n| n.kind() == kind)
}

/// Count descendants of the given kind.
pub fn count_nodes(root: &SyntaxNode, kind: SyntaxKind) -> usize {
    root.descendants().filter(|n| n.kind() == kind).count()
}

/// Render the tree as an indented kind dump, ignoring trivia tokens.
/// Used to compare structures across parses.
pub fn tree_shape(node: &SyntaxNode) -> String {
    let mut out = String::new();
    shape_into(node, 0, &mut out);
    out
}

fn shape_into(node: &SyntaxNode, depth: usize, out: &mut String) {
    use std::fmt::Write;
    let _ = writeln!(out, "{}{:?}", "  ".repeat(depth), node.kind());
    for child in node.children() {
        shape_into(&child, depth + 1, out);
    }
}
