//! Parser Tests - Cancellation
//!
//! Cooperative cancellation: a cancelled token makes the fallible entry
//! points return `Err(Cancelled)` instead of a partial tree, and a live
//! token never does.

use jasper::parser::{Cancelled, parse_file_with, parse_snippet_unit_with};
use jasper::JavaLanguageLevel;
use tokio_util::sync::CancellationToken;

fn long_source() -> String {
    // Plenty of tokens, so the parser is guaranteed to hit a poll point.
    let mut source = String::from("class Generated { void fill() {\n");
    for i in 0..200 {
        source.push_str(&format!("int v{i} = {i} + {i};\n"));
    }
    source.push_str("} }\n");
    source
}

#[test]
fn test_pre_cancelled_token_aborts_the_parse() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = parse_file_with(&long_source(), JavaLanguageLevel::default(), cancel);
    assert_eq!(result.unwrap_err(), Cancelled);
}

#[test]
fn test_live_token_completes_normally() {
    let parsed = parse_file_with(
        &long_source(),
        JavaLanguageLevel::default(),
        CancellationToken::new(),
    )
    .expect("nothing requested cancellation");
    assert!(parsed.ok(), "{:?}", parsed.errors);
}

#[test]
fn test_snippet_entry_honors_cancellation() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let source = "int x = 1;\n".repeat(100);
    let result = parse_snippet_unit_with(&source, JavaLanguageLevel::default(), cancel);
    assert_eq!(result.unwrap_err(), Cancelled);
}
