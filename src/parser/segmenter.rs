//! Text segmenter — splits an identifier string into dot-separated parts.
//!
//! Splitting happens at `.` tokens outside `[...]` brackets; dots inside a
//! bracket clause (including dots inside quoted strings, which the lexer
//! absorbs into a single token) never split. A segment keeps its trailing
//! bracket clauses attached (`name["qualifier"]`, `name[0]`); decomposing
//! a segment into its name and clauses is [`SegmentParts`]' job.

use super::lexer::{Token, TokenKind, tokenize, unquote};
use crate::base::TextRegion;

// ============================================================================
// SEGMENTER
// ============================================================================

/// A lazy, restartable cursor over the dot-separated segments of an
/// identifier string.
pub struct IdentifierSegmenter<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    /// Token index where the current segment starts.
    pos: usize,
}

impl<'a> IdentifierSegmenter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    /// The source string this segmenter iterates over.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The region of the current segment. Empty input yields the empty
    /// region `[0,0)`; a trailing dot yields an empty segment at the end.
    pub fn current_segment(&self) -> TextRegion {
        let end_idx = self.segment_end();
        if self.pos >= end_idx {
            return TextRegion::empty(self.offset_at(self.pos));
        }
        let start = self.tokens[self.pos].region();
        let end = self.tokens[end_idx - 1].region();
        start.cover(end)
    }

    /// Whether another segment follows the current one.
    pub fn has_next(&self) -> bool {
        self.segment_end() < self.tokens.len()
    }

    /// Advance past the next top-level dot.
    pub fn advance(&mut self) {
        let end_idx = self.segment_end();
        self.pos = if end_idx < self.tokens.len() {
            end_idx + 1
        } else {
            end_idx
        };
    }

    /// Reposition at the first segment.
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    /// The region from the start of the current segment to the end of the
    /// source — the position reported when nothing resolves the rest.
    pub fn remaining_region(&self) -> TextRegion {
        TextRegion::new(self.offset_at(self.pos), self.source.len() as u32)
    }

    /// Token index of the dot terminating the current segment, or the token
    /// count if the current segment is the last one. Dots inside brackets
    /// do not terminate.
    fn segment_end(&self) -> usize {
        let mut depth = 0u32;
        for (idx, token) in self.tokens.iter().enumerate().skip(self.pos) {
            match token.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::Dot if depth == 0 => return idx,
                _ => {}
            }
        }
        self.tokens.len()
    }

    fn offset_at(&self, token_idx: usize) -> u32 {
        match self.tokens.get(token_idx) {
            Some(token) => token.offset.into(),
            None => self.source.len() as u32,
        }
    }
}

// ============================================================================
// SEGMENT DECOMPOSITION
// ============================================================================

/// The classified content of one bracket clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseContent {
    /// A quoted string — a qualifier selecting by business key.
    Qualifier(String),
    /// An integer literal — an index selecting by position.
    Index(usize),
    /// Anything else (unclosed bracket, mixed tokens, non-literal content).
    Other,
}

/// One `[...]` clause of a segment, with its source region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketClause {
    pub region: TextRegion,
    pub content: ClauseContent,
}

/// A segment decomposed into its name part and its bracket clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentParts {
    /// Region of the whole segment.
    pub region: TextRegion,
    /// Region of the leading name part (empty when the segment has none).
    pub name_region: TextRegion,
    pub clauses: Vec<BracketClause>,
    /// Set when the segment contains tokens fitting neither the name nor a
    /// bracket clause; such segments never resolve.
    pub malformed: bool,
}

impl SegmentParts {
    /// Decompose the given segment region of `source`.
    pub fn split(source: &str, region: TextRegion) -> Self {
        let base = region.start();
        let tokens = tokenize(region.slice(source));

        // Leading name part: identifier text, including an @-suffix.
        let mut idx = 0;
        while idx < tokens.len()
            && matches!(tokens[idx].kind, TokenKind::Ident | TokenKind::At)
        {
            idx += 1;
        }
        let name_region = if idx == 0 {
            TextRegion::empty(base)
        } else {
            shift(tokens[0].region().cover(tokens[idx - 1].region()), base)
        };

        // Bracket clauses.
        let mut clauses = Vec::new();
        let mut malformed = false;
        while idx < tokens.len() {
            if tokens[idx].kind != TokenKind::LBracket {
                malformed = true;
                break;
            }
            let open = idx;
            let mut depth = 1u32;
            let mut close = None;
            for (j, token) in tokens.iter().enumerate().skip(open + 1) {
                match token.kind {
                    TokenKind::LBracket => depth += 1,
                    TokenKind::RBracket => {
                        depth -= 1;
                        if depth == 0 {
                            close = Some(j);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            match close {
                Some(close) => {
                    let inner = &tokens[open + 1..close];
                    let clause_region =
                        shift(tokens[open].region().cover(tokens[close].region()), base);
                    clauses.push(BracketClause {
                        region: clause_region,
                        content: classify_clause(inner),
                    });
                    idx = close + 1;
                }
                None => {
                    // Unclosed bracket: one Other clause to the end.
                    let last = tokens.last().expect("bracket token exists");
                    clauses.push(BracketClause {
                        region: shift(tokens[open].region().cover(last.region()), base),
                        content: ClauseContent::Other,
                    });
                    idx = tokens.len();
                }
            }
        }

        Self {
            region,
            name_region,
            clauses,
            malformed,
        }
    }

    /// The name part text, including any `@`-suffix.
    pub fn name_text<'a>(&self, source: &'a str) -> &'a str {
        self.name_region.slice(source)
    }

    /// A well-formed bare name without bracket clauses.
    pub fn is_plain_name(&self) -> bool {
        !self.malformed && self.clauses.is_empty() && !self.name_region.is_empty()
    }

    /// A well-formed name followed by at least one bracket clause.
    pub fn is_name_with_clauses(&self) -> bool {
        !self.malformed && !self.clauses.is_empty() && !self.name_region.is_empty()
    }
}

fn shift(region: TextRegion, base: u32) -> TextRegion {
    TextRegion::new(base + region.start(), base + region.end())
}

fn classify_clause(inner: &[Token<'_>]) -> ClauseContent {
    match inner {
        [token] if token.kind == TokenKind::String => {
            ClauseContent::Qualifier(unquote(token.text))
        }
        [token] if token.kind == TokenKind::Int => match token.text.parse::<usize>() {
            Ok(index) => ClauseContent::Index(index),
            Err(_) => ClauseContent::Other,
        },
        _ => ClauseContent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(input: &str) -> Vec<String> {
        let mut segmenter = IdentifierSegmenter::new(input);
        let mut result = vec![segmenter.current_segment().slice(input).to_string()];
        while segmenter.has_next() {
            segmenter.advance();
            result.push(segmenter.current_segment().slice(input).to_string());
        }
        result
    }

    #[test]
    fn test_simple_split() {
        assert_eq!(segments("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bracket_keeps_clause_attached() {
        assert_eq!(
            segments(r#"policy.coverages["basic"].amount"#),
            vec!["policy", r#"coverages["basic"]"#, "amount"]
        );
    }

    #[test]
    fn test_quoted_dots_do_not_split() {
        assert_eq!(
            segments(r#"policy.coverages["a.b.c"].amount"#),
            vec!["policy", r#"coverages["a.b.c"]"#, "amount"]
        );
    }

    #[test]
    fn test_empty_input_single_empty_segment() {
        let segmenter = IdentifierSegmenter::new("");
        assert_eq!(segmenter.current_segment(), TextRegion::empty(0));
        assert!(!segmenter.has_next());
    }

    #[test]
    fn test_trailing_dot_yields_empty_segment() {
        assert_eq!(segments("a."), vec!["a", ""]);
    }

    #[test]
    fn test_restart() {
        let mut segmenter = IdentifierSegmenter::new("a.b");
        segmenter.advance();
        assert_eq!(segmenter.current_segment().slice("a.b"), "b");
        segmenter.restart();
        assert_eq!(segmenter.current_segment().slice("a.b"), "a");
    }

    #[test]
    fn test_remaining_region() {
        let mut segmenter = IdentifierSegmenter::new("a.b.c");
        segmenter.advance();
        assert_eq!(segmenter.remaining_region().slice("a.b.c"), "b.c");
    }

    #[test]
    fn test_split_name_and_clauses() {
        let source = r#"coverages["basic"][0]"#;
        let parts = SegmentParts::split(source, TextRegion::of(source));
        assert_eq!(parts.name_text(source), "coverages");
        assert_eq!(parts.clauses.len(), 2);
        assert_eq!(
            parts.clauses[0].content,
            ClauseContent::Qualifier("basic".to_string())
        );
        assert_eq!(parts.clauses[1].content, ClauseContent::Index(0));
        assert!(parts.is_name_with_clauses());
        assert!(!parts.is_plain_name());
    }

    #[test]
    fn test_split_default_suffix_stays_in_name() {
        let source = "premium@default";
        let parts = SegmentParts::split(source, TextRegion::of(source));
        assert!(parts.is_plain_name());
        assert_eq!(parts.name_text(source), "premium@default");
    }

    #[test]
    fn test_split_non_literal_clause_is_other() {
        let source = "coverages[basic]";
        let parts = SegmentParts::split(source, TextRegion::of(source));
        assert_eq!(parts.clauses[0].content, ClauseContent::Other);
    }

    #[test]
    fn test_split_unclosed_bracket() {
        let source = r#"coverages["basic""#;
        let parts = SegmentParts::split(source, TextRegion::of(source));
        assert_eq!(parts.clauses.len(), 1);
        assert_eq!(parts.clauses[0].content, ClauseContent::Other);
    }

    #[test]
    fn test_split_clause_regions() {
        let source = r#"x.coverages["basic"]"#;
        let mut segmenter = IdentifierSegmenter::new(source);
        segmenter.advance();
        let parts = SegmentParts::split(source, segmenter.current_segment());
        assert_eq!(parts.clauses[0].region.slice(source), r#"["basic"]"#);
    }
}
