//! Lexed-token storage and the content-keyed token cache
//!
//! Lexing is deterministic per content snapshot, so a [`LexedFile`] is
//! computed once per content version and shared read-only between parse
//! invocations. Tokens are plain value data (kind + range), which makes the
//! sharing safe.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::errors::{ErrorCode, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// The result of lexing one content snapshot: every token of the file plus
/// lexer-level diagnostics (unterminated literals and comments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedFile {
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl LexedFile {
    pub fn new(text: &str) -> Self {
        let tokens: Vec<Token> = Lexer::new(text).collect();
        let errors = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::ERROR)
            .map(|t| lex_error(t, text))
            .collect();
        Self { tokens, errors }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }
}

fn lex_error(token: &Token, text: &str) -> SyntaxError {
    let slice = token.text(text);
    let (message, code) = if slice.starts_with("\"\"\"") {
        ("unterminated text block", ErrorCode::E0105)
    } else if slice.starts_with('"') {
        ("unterminated string literal", ErrorCode::E0102)
    } else if slice.starts_with("/*") {
        ("unterminated block comment", ErrorCode::E0103)
    } else if slice.starts_with('\'') {
        ("unterminated character literal", ErrorCode::E0104)
    } else {
        ("invalid character", ErrorCode::E0101)
    };
    SyntaxError::new(message, token.range, code)
}

/// Cache of lexed files keyed by their full content. An entry is only ever
/// served for text equal to the stored key, so a hash collision can degrade
/// performance but never hand out the wrong token stream.
///
/// Population is idempotent: concurrent requests for the same content either
/// wait on the lock and reuse the stored result or store an identical one.
/// Lexing never depends on parser state, so a duplicated computation would
/// be observationally equivalent anyway.
#[derive(Debug, Default)]
pub struct TokenCache {
    map: Mutex<FxHashMap<Arc<str>, Arc<LexedFile>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lexed form of `text`, computing it at most once per content
    /// version currently in the cache. Only a miss copies the text.
    pub fn get_or_lex(&self, text: &str) -> Arc<LexedFile> {
        let mut map = self.map.lock();
        if let Some(hit) = map.get(text) {
            return Arc::clone(hit);
        }
        let lexed = Arc::new(LexedFile::new(text));
        map.insert(Arc::from(text), Arc::clone(&lexed));
        lexed
    }

    /// Drop all cached entries (e.g. after an edit burst).
    pub fn clear(&self) {
        self.map.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_shares_result() {
        let cache = TokenCache::new();
        let a = cache.get_or_lex("int x = 1;");
        let b = cache.get_or_lex("int x = 1;");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_content() {
        let cache = TokenCache::new();
        let a = cache.get_or_lex("int x;");
        let b = cache.get_or_lex("int y;");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_same_length_content_gets_its_own_entry() {
        let cache = TokenCache::new();
        let a = cache.get_or_lex("i;");
        let b = cache.get_or_lex("1;");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.tokens()[0].kind, SyntaxKind::IDENT);
        assert_eq!(b.tokens()[0].kind, SyntaxKind::INT_NUMBER);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lexed_file_reports_unterminated_string() {
        let lexed = LexedFile::new("String s = \"oops");
        assert_eq!(lexed.errors().len(), 1);
        assert_eq!(lexed.errors()[0].code, ErrorCode::E0102);
    }

    #[test]
    fn test_concurrent_population_is_idempotent() {
        let cache = Arc::new(TokenCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_lex("class A {}"))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for pair in results.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
        assert_eq!(cache.len(), 1);
    }
}
