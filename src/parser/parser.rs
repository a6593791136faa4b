//! Chain orchestrator — drives the segmenter and the resolver chain across
//! the whole identifier string.
//!
//! Threads successor context from node to node, stops at the first
//! `Invalid` node, and assembles the final chain. The whole identifier is
//! re-parsed on every call; identical `(input, model snapshot)` yields an
//! identical chain.

use tracing::debug;

use super::context::ExpressionContext;
use super::diagnostics::codes;
use super::nodes::{IdentifierChain, IdentifierNode};
use super::resolvers::{ResolveEnv, SegmentCursor, resolver_chain};
use super::segmenter::{IdentifierSegmenter, SegmentParts};
use crate::model::ModelStore;

/// Parser for dotted identifier expressions.
pub struct IdentifierParser<'a> {
    store: &'a ModelStore,
    context: &'a ExpressionContext<'a>,
}

impl<'a> IdentifierParser<'a> {
    pub fn new(store: &'a ModelStore, context: &'a ExpressionContext<'a>) -> Self {
        Self { store, context }
    }

    /// Parse an identifier into a chain. Always returns a rooted chain and
    /// never fails: malformed input yields a terminal `Invalid` node.
    pub fn parse(&self, identifier: &str) -> IdentifierChain {
        debug!(identifier, "parsing identifier");
        let env = ResolveEnv {
            store: self.store,
            context: self.context,
            source: identifier,
        };
        let resolvers = resolver_chain();
        let mut segmenter = IdentifierSegmenter::new(identifier);
        let mut chain: Option<IdentifierChain> = None;

        loop {
            let parts = SegmentParts::split(identifier, segmenter.current_segment());
            let mut cursor = SegmentCursor::new(parts);

            // A segment may hold several parts (name plus bracket clauses);
            // the resolver chain runs until the cursor is exhausted.
            while !cursor.exhausted() {
                let predecessor = chain.as_ref().map(IdentifierChain::tail);
                let node = resolvers
                    .iter()
                    .find_map(|r| r.try_resolve(&env, &mut cursor, predecessor));
                let node = match node {
                    Some(node) => node,
                    None => {
                        // Every resolver declined: the rest of the
                        // identifier is undefined.
                        let region = cursor.remaining_region(identifier.len() as u32);
                        IdentifierNode::invalid(
                            codes::UNDEFINED_IDENTIFIER,
                            region.slice(identifier),
                            region,
                        )
                    }
                };
                let stop = node.is_invalid();
                match chain.as_mut() {
                    Some(chain) => chain.push(node),
                    None => chain = Some(IdentifierChain::single(node)),
                }
                if stop {
                    return chain.expect("chain was just built");
                }
            }

            if !segmenter.has_next() {
                break;
            }
            segmenter.advance();
        }

        chain.expect("at least one segment is always resolved")
    }
}
