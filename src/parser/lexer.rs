//! Logos-based lexer for Java
//!
//! Fast tokenization using the logos crate.
//!
//! One deliberate quirk: `>` is always lexed as a single token. Java's
//! nested generics (`Map<K, List<V>>`) make `>>`, `>>>`, `>=`, `>>=` and
//! `>>>=` ambiguous at the lexical level, so the parser glues adjacent `>`
//! tokens back into shift/comparison operators when they are byte-adjacent.
//! The `<` family has no such ambiguity and is lexed greedily.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind and position. Value data only, so a lexed file can
/// be cached and shared across parse invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    /// The token's text, sliced out of the source it was lexed from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { inner: LogosToken::lexer(input) }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(TextSize::new(span.start as u32), TextSize::new(span.end as u32));

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, range })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", priority = 10)]
    DocComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{XID_Start}$_][\p{XID_Continue}$]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    #[regex(r"[0-9][0-9_]*[lL]?")]
    IntNumber,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatNumber,

    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    CharLiteral,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#, priority = 10)]
    TextBlock,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("::")]
    ColonColon,

    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token("<<=")]
    ShlEq,

    #[token("<<")]
    Shl,

    #[token("++")]
    PlusPlus,

    #[token("+=")]
    PlusEq,

    #[token("--")]
    MinusMinus,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&&")]
    AmpAmp,

    #[token("&=")]
    AmpEq,

    #[token("||")]
    PipePipe,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    // `non-sealed` is the one hyphenated keyword; longest match wins over
    // `non` `-` `sealed` exactly when the three parts are adjacent.
    #[token("non-sealed")]
    NonSealedKw,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // =========================================================================
    // RESERVED KEYWORDS
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("assert")]
    AssertKw,
    #[token("boolean")]
    BooleanKw,
    #[token("break")]
    BreakKw,
    #[token("byte")]
    ByteKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("char")]
    CharKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("default")]
    DefaultKw,
    #[token("do")]
    DoKw,
    #[token("double")]
    DoubleKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("extends")]
    ExtendsKw,
    #[token("final")]
    FinalKw,
    #[token("finally")]
    FinallyKw,
    #[token("float")]
    FloatKw,
    #[token("for")]
    ForKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("implements")]
    ImplementsKw,
    #[token("import")]
    ImportKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("int")]
    IntKw,
    #[token("interface")]
    InterfaceKw,
    #[token("long")]
    LongKw,
    #[token("native")]
    NativeKw,
    #[token("new")]
    NewKw,
    #[token("package")]
    PackageKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("return")]
    ReturnKw,
    #[token("short")]
    ShortKw,
    #[token("static")]
    StaticKw,
    #[token("strictfp")]
    StrictfpKw,
    #[token("super")]
    SuperKw,
    #[token("switch")]
    SwitchKw,
    #[token("synchronized")]
    SynchronizedKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("throws")]
    ThrowsKw,
    #[token("transient")]
    TransientKw,
    #[token("try")]
    TryKw,
    #[token("void")]
    VoidKw,
    #[token("volatile")]
    VolatileKw,
    #[token("while")]
    WhileKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken as L;
        use SyntaxKind as S;
        match token {
            L::Whitespace => S::WHITESPACE,
            L::LineComment => S::LINE_COMMENT,
            L::BlockComment => S::BLOCK_COMMENT,
            L::DocComment => S::DOC_COMMENT,
            L::Ident => S::IDENT,
            L::IntNumber => S::INT_NUMBER,
            L::FloatNumber => S::FLOAT_NUMBER,
            L::CharLiteral => S::CHAR_LITERAL,
            L::String => S::STRING,
            L::TextBlock => S::TEXT_BLOCK,
            L::Ellipsis => S::ELLIPSIS,
            L::ColonColon => S::COLON_COLON,
            L::Arrow => S::ARROW,
            L::EqEq => S::EQ_EQ,
            L::BangEq => S::BANG_EQ,
            L::LtEq => S::LT_EQ,
            L::ShlEq => S::SHL_EQ,
            L::Shl => S::SHL,
            L::PlusPlus => S::PLUS_PLUS,
            L::PlusEq => S::PLUS_EQ,
            L::MinusMinus => S::MINUS_MINUS,
            L::MinusEq => S::MINUS_EQ,
            L::StarEq => S::STAR_EQ,
            L::SlashEq => S::SLASH_EQ,
            L::PercentEq => S::PERCENT_EQ,
            L::AmpAmp => S::AMP_AMP,
            L::AmpEq => S::AMP_EQ,
            L::PipePipe => S::PIPE_PIPE,
            L::PipeEq => S::PIPE_EQ,
            L::CaretEq => S::CARET_EQ,
            L::NonSealedKw => S::NON_SEALED_KW,
            L::LParen => S::L_PAREN,
            L::RParen => S::R_PAREN,
            L::LBrace => S::L_BRACE,
            L::RBrace => S::R_BRACE,
            L::LBracket => S::L_BRACKET,
            L::RBracket => S::R_BRACKET,
            L::Semicolon => S::SEMICOLON,
            L::Comma => S::COMMA,
            L::Dot => S::DOT,
            L::At => S::AT,
            L::Colon => S::COLON,
            L::Question => S::QUESTION,
            L::Eq => S::EQ,
            L::Bang => S::BANG,
            L::Lt => S::LT,
            L::Gt => S::GT,
            L::Plus => S::PLUS,
            L::Minus => S::MINUS,
            L::Star => S::STAR,
            L::Slash => S::SLASH,
            L::Percent => S::PERCENT,
            L::Amp => S::AMP,
            L::Pipe => S::PIPE,
            L::Caret => S::CARET,
            L::Tilde => S::TILDE,
            L::AbstractKw => S::ABSTRACT_KW,
            L::AssertKw => S::ASSERT_KW,
            L::BooleanKw => S::BOOLEAN_KW,
            L::BreakKw => S::BREAK_KW,
            L::ByteKw => S::BYTE_KW,
            L::CaseKw => S::CASE_KW,
            L::CatchKw => S::CATCH_KW,
            L::CharKw => S::CHAR_KW,
            L::ClassKw => S::CLASS_KW,
            L::ConstKw => S::CONST_KW,
            L::ContinueKw => S::CONTINUE_KW,
            L::DefaultKw => S::DEFAULT_KW,
            L::DoKw => S::DO_KW,
            L::DoubleKw => S::DOUBLE_KW,
            L::ElseKw => S::ELSE_KW,
            L::EnumKw => S::ENUM_KW,
            L::ExtendsKw => S::EXTENDS_KW,
            L::FinalKw => S::FINAL_KW,
            L::FinallyKw => S::FINALLY_KW,
            L::FloatKw => S::FLOAT_KW,
            L::ForKw => S::FOR_KW,
            L::GotoKw => S::GOTO_KW,
            L::IfKw => S::IF_KW,
            L::ImplementsKw => S::IMPLEMENTS_KW,
            L::ImportKw => S::IMPORT_KW,
            L::InstanceofKw => S::INSTANCEOF_KW,
            L::IntKw => S::INT_KW,
            L::InterfaceKw => S::INTERFACE_KW,
            L::LongKw => S::LONG_KW,
            L::NativeKw => S::NATIVE_KW,
            L::NewKw => S::NEW_KW,
            L::PackageKw => S::PACKAGE_KW,
            L::PrivateKw => S::PRIVATE_KW,
            L::ProtectedKw => S::PROTECTED_KW,
            L::PublicKw => S::PUBLIC_KW,
            L::ReturnKw => S::RETURN_KW,
            L::ShortKw => S::SHORT_KW,
            L::StaticKw => S::STATIC_KW,
            L::StrictfpKw => S::STRICTFP_KW,
            L::SuperKw => S::SUPER_KW,
            L::SwitchKw => S::SWITCH_KW,
            L::SynchronizedKw => S::SYNCHRONIZED_KW,
            L::ThisKw => S::THIS_KW,
            L::ThrowKw => S::THROW_KW,
            L::ThrowsKw => S::THROWS_KW,
            L::TransientKw => S::TRANSIENT_KW,
            L::TryKw => S::TRY_KW,
            L::VoidKw => S::VOID_KW,
            L::VolatileKw => S::VOLATILE_KW,
            L::WhileKw => S::WHILE_KW,
            L::TrueKw => S::TRUE_KW,
            L::FalseKw => S::FALSE_KW,
            L::NullKw => S::NULL_KW,
        }
    }
}
