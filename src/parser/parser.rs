//! Marker-based parser over a lexed token stream
//!
//! The parser never builds tree nodes directly. Grammar code records a flat
//! event log (`Start`/`Token`/`Finish`/`Error`); a separate build pass
//! replays the log into a rowan `GreenNode`. The tree is therefore a strict
//! function of the event sequence, and materialization can happen on demand.
//!
//! Backtracking is expressed exclusively through the marker protocol:
//! `start()` opens a to-be-determined node, `complete` commits it with a
//! kind, `abandon` discards the wrapper but keeps its children, and
//! `rollback` restores the token cursor and truncates every event (including
//! errors) recorded since the mark. Speculative parsing is always
//! "mark, attempt, inspect, commit-or-rollback" — never exceptions.
//!
//! Trivia (whitespace, comments) is invisible to grammar code: the parser
//! walks only non-trivia tokens, and the build pass re-interleaves trivia so
//! the tree reproduces the input text exactly.

use rowan::{GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::errors::{Cancelled, ErrorCode, SyntaxError};
use super::language_level::{Feature, JavaLanguageLevel};
use super::lexer::Token;
use super::syntax_kind::SyntaxKind;

/// How many token consumptions may pass between cancellation polls.
const CANCEL_CHECK_INTERVAL: u32 = 32;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node, materializing the tree
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One entry of the flat construction log.
#[derive(Debug)]
pub(crate) enum Event {
    /// Opens a node. `forward_parent` points (as a forward distance) at a
    /// `Start` that must be opened *around* this one; used by
    /// `CompletedMarker::precede` for left-folding binary expressions.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<u32>,
    },
    /// Consumes the next non-trivia token, emitting it as `kind`
    /// (which may differ from the lexed kind for contextual keywords).
    Token { kind: SyntaxKind },
    /// Closes the most recently opened node.
    Finish,
    /// Records a diagnostic. Lives in the log so rollback discards it.
    Error { error: SyntaxError },
}

/// The parser state
pub(crate) struct Parser<'a> {
    text: &'a str,
    tokens: &'a [Token],
    /// Indices of non-trivia tokens in `tokens`.
    non_trivia: Vec<u32>,
    /// Cursor into `non_trivia`.
    pos: usize,
    events: Vec<Event>,
    /// Stack of stopping views: token kinds that act as an artificial EOF.
    stop_sets: Vec<&'static [SyntaxKind]>,
    level: JavaLanguageLevel,
    cancel: CancellationToken,
    cancelled: bool,
    fuel: u32,
    expr_strategy: ExpressionStrategy,
}

/// Which of the two expression-parsing algorithms to run.
///
/// Both accept identical inputs and produce structurally equivalent trees;
/// the recursive-descent form is retained for behavioral comparison against
/// the precedence-climbing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpressionStrategy {
    #[default]
    PrecedenceClimbing,
    RecursiveDescent,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        text: &'a str,
        tokens: &'a [Token],
        level: JavaLanguageLevel,
        cancel: CancellationToken,
    ) -> Self {
        let non_trivia = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i as u32)
            .collect();
        Self {
            text,
            tokens,
            non_trivia,
            pos: 0,
            events: Vec::new(),
            stop_sets: Vec::new(),
            level,
            cancel,
            cancelled: false,
            fuel: CANCEL_CHECK_INTERVAL,
            expr_strategy: ExpressionStrategy::default(),
        }
    }

    pub(crate) fn expression_strategy(&self) -> ExpressionStrategy {
        self.expr_strategy
    }

    pub(crate) fn set_expression_strategy(&mut self, strategy: ExpressionStrategy) {
        self.expr_strategy = strategy;
    }

    pub(crate) fn finish(self) -> Result<Parse, Cancelled> {
        if self.cancelled {
            return Err(Cancelled);
        }
        Ok(build_tree(self.events, self.tokens, self.text))
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn token_at(&self, pos: usize) -> Option<&Token> {
        self.non_trivia.get(pos).map(|&i| &self.tokens[i as usize])
    }

    fn stopped(&self, kind: SyntaxKind) -> bool {
        self.stop_sets.iter().any(|set| set.contains(&kind))
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the nth non-trivia token ahead. Reports EOF past the end,
    /// past a stopping-view token, or after cancellation.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        if self.cancelled {
            return SyntaxKind::EOF;
        }
        for i in 0..=n {
            let kind = match self.token_at(self.pos + i) {
                Some(t) => t.kind,
                None => return SyntaxKind::EOF,
            };
            if self.stopped(kind) {
                return SyntaxKind::EOF;
            }
            if i == n {
                return kind;
            }
        }
        unreachable!()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current_kind() == SyntaxKind::EOF
    }

    pub(crate) fn current_text(&self) -> &str {
        if self.at_eof() {
            return "";
        }
        self.token_at(self.pos).map(|t| t.text(self.text)).unwrap_or("")
    }

    /// Range of the current token; an empty range at a stopping-view
    /// horizon or at the end of input.
    pub(crate) fn current_range(&self) -> TextRange {
        match self.token_at(self.pos) {
            Some(t) if self.stopped(t.kind) => TextRange::empty(t.range.start()),
            Some(t) => t.range,
            None => TextRange::empty(TextSize::new(self.text.len() as u32)),
        }
    }

    /// Offset where the previous non-trivia token ended.
    pub(crate) fn prev_token_end(&self) -> TextSize {
        if self.pos == 0 {
            return TextSize::new(0);
        }
        self.non_trivia
            .get(self.pos - 1)
            .map(|&i| self.tokens[i as usize].range.end())
            .unwrap_or_else(|| TextSize::new(self.text.len() as u32))
    }

    /// True if the nth token directly abuts the (n+1)th, with no trivia
    /// between them. Used to glue `>` `>` into shift operators.
    pub(crate) fn nth_joined(&self, n: usize) -> bool {
        match (self.non_trivia.get(self.pos + n), self.non_trivia.get(self.pos + n + 1)) {
            (Some(&a), Some(&b)) => b == a + 1,
            _ => false,
        }
    }

    // Contextual keywords are lexed as IDENT and recognized by text.

    pub(crate) fn at_contextual_kw(&self, kw: SyntaxKind) -> bool {
        self.nth_at_contextual_kw(0, kw)
    }

    pub(crate) fn nth_at_contextual_kw(&self, n: usize, kw: SyntaxKind) -> bool {
        self.nth(n) == SyntaxKind::IDENT
            && self
                .token_at(self.pos + n)
                .map(|t| t.text(self.text) == contextual_kw_text(kw))
                .unwrap_or(false)
    }

    /// Current cursor position (non-trivia token index). Used by loops to
    /// assert forward progress.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) {
        let kind = self.current_kind();
        if kind == SyntaxKind::EOF {
            return;
        }
        self.push_token(kind);
    }

    pub(crate) fn bump_any(&mut self) {
        self.bump();
    }

    /// Consume the current token but record it as `kind` (contextual
    /// keyword remapping). The token text is unchanged.
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        if self.at_eof() {
            return;
        }
        self.push_token(kind);
    }

    fn push_token(&mut self, kind: SyntaxKind) {
        self.events.push(Event::Token { kind });
        self.pos += 1;
        self.fuel = self.fuel.saturating_sub(1);
        if self.fuel == 0 {
            self.fuel = CANCEL_CHECK_INTERVAL;
            if self.cancel.is_cancelled() {
                self.cancelled = true;
            }
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_contextual_kw(&mut self, kw: SyntaxKind) -> bool {
        if self.at_contextual_kw(kw) {
            self.bump_remap(kw);
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {kind:?}"), ErrorCode::E0205);
            false
        }
    }

    // =========================================================================
    // Stopping views
    // =========================================================================

    /// Run `f` under an artificial EOF horizon: while inside, any token in
    /// `stop` makes the parser report EOF. The view is transparent — tokens
    /// consumed inside advance the same underlying cursor.
    pub(crate) fn with_stop_at<T>(
        &mut self,
        stop: &'static [SyntaxKind],
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.stop_sets.push(stop);
        let result = f(self);
        self.stop_sets.pop();
        result
    }

    // =========================================================================
    // Cancellation
    // =========================================================================

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn language_level(&self) -> JavaLanguageLevel {
        self.level
    }

    /// Record an E0601 diagnostic if `feature` is newer than the requested
    /// language level. The construct still parses structurally.
    pub(crate) fn require_feature(&mut self, feature: Feature) {
        if !self.level.supports(feature) {
            let message = format!(
                "{} require language level {} or above (current: {})",
                feature.describe(),
                feature.minimum_level().as_str(),
                self.level.as_str(),
            );
            let error = SyntaxError::new(message, self.current_range(), ErrorCode::E0601)
                .with_hint(format!("raise the language level to {}", feature.minimum_level().as_str()));
            self.events.push(Event::Error { error });
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let error = SyntaxError::new(message, self.current_range(), code);
        self.events.push(Event::Error { error });
    }

    pub(crate) fn error_with_hint(
        &mut self,
        message: impl Into<String>,
        code: ErrorCode,
        hint: impl Into<String>,
    ) {
        let error = SyntaxError::new(message, self.current_range(), code).with_hint(hint);
        self.events.push(Event::Error { error });
    }

    /// Report an error and wrap the single offending token in an ERROR node.
    pub(crate) fn err_and_bump(&mut self, message: impl Into<String>, code: ErrorCode) {
        self.error(message, code);
        if !self.at_eof() {
            let m = self.start();
            self.bump_any();
            m.complete(self, SyntaxKind::ERROR);
        }
    }

    /// Report an error and skip tokens until a recovery point, coalescing
    /// the whole garbage run into one ERROR node. Always consumes at least
    /// one token when not at EOF, so enclosing loops make progress.
    pub(crate) fn error_recover(
        &mut self,
        message: impl Into<String>,
        code: ErrorCode,
        recovery: &[SyntaxKind],
    ) {
        let start = self.current_range().start();
        let m = self.start();
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        // If we didn't consume anything and we're not at EOF, consume one token
        // to prevent infinite loops
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        let end = self.prev_token_end();
        let range = if end > start {
            TextRange::new(start, end)
        } else {
            TextRange::empty(start)
        };
        let error = SyntaxError::new(message, range, code);
        self.events.push(Event::Error { error });
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Number of diagnostics recorded since `m` was opened. Lets speculative
    /// drivers ask "did this attempt parse cleanly?".
    pub(crate) fn errors_since(&self, m: &Marker) -> usize {
        self.events[m.event_idx as usize..]
            .iter()
            .filter(|e| matches!(e, Event::Error { .. }))
            .count()
    }

    /// Like [`errors_since`](Self::errors_since), but ignores language-level
    /// diagnostics: version-gated syntax is structurally valid and must not
    /// make a speculative attempt look malformed.
    pub(crate) fn hard_errors_since(&self, m: &Marker) -> usize {
        self.events[m.event_idx as usize..]
            .iter()
            .filter(
                |e| matches!(e, Event::Error { error } if error.code != ErrorCode::E0601),
            )
            .count()
    }

    // =========================================================================
    // Marker protocol
    // =========================================================================

    /// Open a new, currently-undetermined node at the current position.
    pub(crate) fn start(&mut self) -> Marker {
        let event_idx = self.events.len() as u32;
        self.events.push(Event::Start {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        Marker {
            event_idx,
            token_pos: self.pos as u32,
        }
    }
}

/// A handle over an opened, not-yet-committed node.
///
/// Exactly one of `complete`, `abandon`, or `rollback` must be called.
#[must_use = "a marker must be completed, abandoned, or rolled back"]
pub(crate) struct Marker {
    event_idx: u32,
    token_pos: u32,
}

impl Marker {
    /// Commit the node as `kind`. Everything recorded since the mark
    /// becomes its children.
    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        match &mut p.events[self.event_idx as usize] {
            Event::Start { kind: slot, .. } => *slot = kind,
            _ => unreachable!("marker does not point at a Start event"),
        }
        p.events.push(Event::Finish);
        CompletedMarker {
            event_idx: self.event_idx,
            token_pos: self.token_pos,
        }
    }

    /// Discard the wrapper without creating a node; consumed tokens and
    /// sub-nodes become children of the enclosing node.
    pub(crate) fn abandon(self, p: &mut Parser<'_>) {
        if self.event_idx as usize == p.events.len() - 1 {
            p.events.pop();
        }
        // Otherwise the Start stays a TOMBSTONE, which the build pass skips.
    }

    /// Restore the token cursor to the mark and discard every event
    /// (nodes, tokens, errors) recorded since — as if the attempt never
    /// happened. Markers and completed markers created after this one are
    /// invalidated.
    pub(crate) fn rollback(self, p: &mut Parser<'_>) {
        trace!(
            from = p.pos,
            to = self.token_pos,
            "rolling back speculative parse"
        );
        p.events.truncate(self.event_idx as usize);
        p.pos = self.token_pos as usize;
    }
}

/// A committed node that can still be re-parented.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker {
    event_idx: u32,
    token_pos: u32,
}

impl CompletedMarker {
    /// Open a new node *around* this completed one. The standard tool for
    /// left-folding: `lhs.precede(p)` wraps the already-parsed left operand
    /// in a new binary-expression node.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new = p.start();
        match &mut p.events[self.event_idx as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new.event_idx - self.event_idx);
            }
            _ => unreachable!("completed marker does not point at a Start event"),
        }
        Marker {
            event_idx: new.event_idx,
            token_pos: self.token_pos,
        }
    }

    pub(crate) fn kind(&self, p: &Parser<'_>) -> SyntaxKind {
        match &p.events[self.event_idx as usize] {
            Event::Start { kind, .. } => *kind,
            _ => unreachable!(),
        }
    }
}

// =========================================================================
// Build pass: event log → green tree
// =========================================================================

/// Replay an event log into a rowan green tree, re-interleaving trivia.
///
/// Trivia placement is deterministic: trivia before a node's Start belongs
/// to the enclosing node; trivia before a token belongs to the node open at
/// that point; trailing trivia is flushed into the root before it closes.
fn build_tree(mut events: Vec<Event>, tokens: &[Token], text: &str) -> Parse {
    let mut builder = GreenNodeBuilder::new();
    let mut errors = Vec::new();
    let mut raw_cursor = 0usize;
    let mut depth = 0u32;

    let flush_trivia =
        |builder: &mut GreenNodeBuilder<'static>, raw_cursor: &mut usize| {
            while let Some(token) = tokens.get(*raw_cursor) {
                if !token.kind.is_trivia() {
                    break;
                }
                builder.token(token.kind.into(), token.text(text));
                *raw_cursor += 1;
            }
        };

    for i in 0..events.len() {
        match std::mem::replace(
            &mut events[i],
            Event::Start {
                kind: SyntaxKind::TOMBSTONE,
                forward_parent: None,
            },
        ) {
            Event::Start {
                kind: SyntaxKind::TOMBSTONE,
                ..
            } => {}
            Event::Start {
                kind,
                forward_parent,
            } => {
                // Collect the forward-parent chain: nodes that must open
                // around this one, outermost last.
                let mut kinds = vec![kind];
                let mut idx = i;
                let mut fp = forward_parent;
                while let Some(distance) = fp {
                    idx += distance as usize;
                    fp = match std::mem::replace(
                        &mut events[idx],
                        Event::Start {
                            kind: SyntaxKind::TOMBSTONE,
                            forward_parent: None,
                        },
                    ) {
                        Event::Start {
                            kind,
                            forward_parent,
                        } => {
                            kinds.push(kind);
                            forward_parent
                        }
                        _ => unreachable!("forward parent does not point at a Start event"),
                    };
                }
                if depth > 0 {
                    flush_trivia(&mut builder, &mut raw_cursor);
                }
                for kind in kinds.into_iter().rev() {
                    if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(kind.into());
                        depth += 1;
                    }
                }
            }
            Event::Token { kind } => {
                flush_trivia(&mut builder, &mut raw_cursor);
                // Skip to the next non-trivia raw token; it is the one this
                // event consumed.
                let token = &tokens[raw_cursor];
                debug_assert!(!token.kind.is_trivia());
                builder.token(kind.into(), token.text(text));
                raw_cursor += 1;
            }
            Event::Finish => {
                if depth == 1 {
                    flush_trivia(&mut builder, &mut raw_cursor);
                }
                builder.finish_node();
                depth -= 1;
            }
            Event::Error { error } => errors.push(error),
        }
    }

    Parse {
        green: builder.finish(),
        errors,
    }
}

fn contextual_kw_text(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::VAR_KW => "var",
        SyntaxKind::YIELD_KW => "yield",
        SyntaxKind::RECORD_KW => "record",
        SyntaxKind::SEALED_KW => "sealed",
        SyntaxKind::PERMITS_KW => "permits",
        SyntaxKind::WHEN_KW => "when",
        SyntaxKind::MODULE_KW => "module",
        SyntaxKind::OPEN_KW => "open",
        SyntaxKind::REQUIRES_KW => "requires",
        SyntaxKind::EXPORTS_KW => "exports",
        SyntaxKind::OPENS_KW => "opens",
        SyntaxKind::USES_KW => "uses",
        SyntaxKind::PROVIDES_KW => "provides",
        SyntaxKind::TO_KW => "to",
        SyntaxKind::WITH_KW => "with",
        SyntaxKind::TRANSITIVE_KW => "transitive",
        _ => unreachable!("not a contextual keyword: {kind:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parser_over<'a>(text: &'a str, tokens: &'a [Token]) -> Parser<'a> {
        Parser::new(
            text,
            tokens,
            JavaLanguageLevel::default(),
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_marker_complete_builds_node() {
        let text = "a b";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        p.bump();
        p.bump();
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        let node = parse.syntax();
        assert_eq!(node.kind(), SyntaxKind::COMPILATION_UNIT);
        assert_eq!(node.text().to_string(), text);
    }

    #[test]
    fn test_rollback_restores_cursor_and_discards_errors() {
        let text = "a b c";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        p.bump();

        let attempt = p.start();
        p.bump();
        p.error("speculative failure", ErrorCode::E0901);
        attempt.rollback(&mut p);

        assert_eq!(p.current_text(), "b");
        p.bump();
        p.bump();
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        assert!(parse.ok(), "rolled-back errors must not leak");
        assert_eq!(parse.syntax().text().to_string(), text);
    }

    #[test]
    fn test_abandon_keeps_children_in_parent() {
        let text = "a";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        let wrapper = p.start();
        p.bump();
        wrapper.abandon(&mut p);
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        let node = parse.syntax();
        // The token hangs directly off the root; no wrapper node exists.
        assert_eq!(node.children().count(), 0);
        assert_eq!(node.text().to_string(), "a");
    }

    #[test]
    fn test_precede_wraps_completed_node() {
        let text = "a + b";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        let lhs = p.start();
        p.bump();
        let lhs = lhs.complete(&mut p, SyntaxKind::NAME_REF);
        let bin = lhs.precede(&mut p);
        p.bump(); // +
        let rhs = p.start();
        p.bump();
        rhs.complete(&mut p, SyntaxKind::NAME_REF);
        bin.complete(&mut p, SyntaxKind::BINARY_EXPR);
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        let node = parse.syntax();
        let binary = node.first_child().unwrap();
        assert_eq!(binary.kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(binary.children().count(), 2);
        assert_eq!(node.text().to_string(), text);
    }

    #[test]
    fn test_stopping_view_reports_early_eof() {
        let text = "a ; b";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        p.with_stop_at(&[SyntaxKind::SEMICOLON], |p| {
            assert!(!p.at_eof());
            p.bump();
            assert!(p.at_eof(), "semicolon horizon must look like EOF");
            p.bump(); // no-op past the horizon
            assert_eq!(p.current_text(), "");
        });
        // View popped: same cursor, semicolon visible again.
        assert!(p.at(SyntaxKind::SEMICOLON));
        p.bump();
        p.bump();
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        assert_eq!(parse.syntax().text().to_string(), text);
    }

    #[test]
    fn test_cancellation_is_distinguishable() {
        let text = "a b c d e f g h";
        let tokens = tokenize(text);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut p = Parser::new(text, &tokens, JavaLanguageLevel::default(), cancel);
        // Drain enough tokens to cross a poll interval.
        let root = p.start();
        for _ in 0..64 {
            p.bump();
        }
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        assert_eq!(p.finish().unwrap_err(), Cancelled);
    }

    #[test]
    fn test_trivia_round_trip() {
        let text = "  a /* c */ b // end\n";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        let root = p.start();
        p.bump();
        p.bump();
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        assert_eq!(parse.syntax().text().to_string(), text);
    }

    #[test]
    fn test_contextual_keyword_remap() {
        let text = "record Point";
        let tokens = tokenize(text);
        let mut p = parser_over(text, &tokens);
        assert!(p.at_contextual_kw(SyntaxKind::RECORD_KW));
        let root = p.start();
        p.bump_remap(SyntaxKind::RECORD_KW);
        p.bump();
        root.complete(&mut p, SyntaxKind::COMPILATION_UNIT);
        let parse = p.finish().unwrap();
        let first = parse.syntax().first_token().unwrap();
        assert_eq!(first.kind(), SyntaxKind::RECORD_KW);
        assert_eq!(first.text(), "record");
    }

    #[test]
    fn test_nth_joined() {
        let text = ">> > >";
        let tokens = tokenize(text);
        let p = parser_over(text, &tokens);
        assert!(p.nth_joined(0), ">> is two adjacent tokens");
        assert!(!p.nth_joined(1), "space separates the rest");
    }
}
