//! Logos-based lexer for the identifier sub-grammar.
//!
//! Tokenizes a raw identifier string into names, integers, quoted strings,
//! dots, and brackets. Quoted strings absorb any dots they contain, which
//! is what lets the segmenter split on dots without a quote-tracking scan.

use logos::Logos;
use text_size::TextSize;

use crate::base::TextRegion;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// The region this token covers in the source string.
    pub fn region(&self) -> TextRegion {
        let start: u32 = self.offset.into();
        TextRegion::new(start, start + self.text.len() as u32)
    }
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire identifier string into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Token kinds of the identifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Int,
    String,
    Dot,
    LBracket,
    RBracket,
    At,
    /// Anything the grammar does not know (stray characters, unterminated
    /// strings). Segments containing error tokens fail resolution with a
    /// diagnostic instead of aborting the lexer.
    Error,
}

/// Logos token enum — maps to [`TokenKind`].
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token(".")]
    Dot,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("@")]
    At,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Int => TokenKind::Int,
            LogosToken::String => TokenKind::String,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::At => TokenKind::At,
        }
    }
}

/// Strip the surrounding quotes from a lexed string token and unescape
/// `\"` and `\\`.
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    result
}
