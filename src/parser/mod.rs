//! Identifier parsing — lexer, segmenter, resolvers, and the chain
//! orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! Identifier Text
//!     ↓
//! Lexer (logos) → Tokens with offsets
//!     ↓
//! Segmenter → dot-separated segments (bracket clauses attached)
//!     ↓
//! Resolver chain → typed IdentifierNode per segment part
//!     ↓
//! IdentifierChain → successor-linked node view
//! ```
//!
//! Resolution is context-aware: each resolver sees the predecessor node's
//! resulting datatype and list/scalar context. The first `Invalid` node
//! terminates the chain.

#[allow(clippy::module_inception)]
mod parser;

mod context;
mod diagnostics;
mod lexer;
mod nodes;
mod resolvers;
mod segmenter;

pub use context::ExpressionContext;
pub use diagnostics::{Diagnostic, Locale, Severity, codes, message_for};
pub use lexer::{Lexer, Token, TokenKind, tokenize, unquote};
pub use nodes::{IdentifierChain, IdentifierNode, NodeKind};
pub use parser::IdentifierParser;
pub use segmenter::{BracketClause, ClauseContent, IdentifierSegmenter, SegmentParts};
