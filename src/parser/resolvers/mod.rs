//! Segment resolvers — the ordered strategy chain that turns identifier
//! segments into typed nodes.
//!
//! Each resolver inspects the current segment cursor and the predecessor
//! node and either produces a node (consuming segment content), produces an
//! `Invalid` node (applicable but erroneous — resolution stops), or
//! declines so the next resolver is tried. The order is fixed:
//! Parameter → Association → QualifierAndIndex → Attribute → EnumClass →
//! EnumValue.

mod association;
mod attribute;
mod enum_class;
mod enum_value;
mod parameter;
mod qualifier_index;

pub(crate) use association::AssociationResolver;
pub(crate) use attribute::AttributeResolver;
pub(crate) use enum_class::EnumClassResolver;
pub(crate) use enum_value::EnumValueResolver;
pub(crate) use parameter::ParameterResolver;
pub(crate) use qualifier_index::QualifierAndIndexResolver;

use smol_str::SmolStr;

use super::context::ExpressionContext;
use super::nodes::{IdentifierNode, NodeKind};
use super::segmenter::{BracketClause, SegmentParts};
use crate::base::TextRegion;
use crate::model::ModelStore;

/// Everything a resolver needs besides the segment itself.
pub(crate) struct ResolveEnv<'a> {
    pub store: &'a ModelStore,
    pub context: &'a ExpressionContext<'a>,
    pub source: &'a str,
}

// ============================================================================
// SEGMENT CURSOR
// ============================================================================

/// Consumption state over one segment: the head (name, possibly folded with
/// the first bracket clause) and any further pending clauses.
pub(crate) struct SegmentCursor {
    parts: SegmentParts,
    head_consumed: bool,
    consumed_clauses: usize,
}

impl SegmentCursor {
    pub fn new(parts: SegmentParts) -> Self {
        Self {
            parts,
            head_consumed: false,
            consumed_clauses: 0,
        }
    }

    pub fn parts(&self) -> &SegmentParts {
        &self.parts
    }

    /// Whether the segment's name part is still unconsumed.
    pub fn at_head(&self) -> bool {
        !self.head_consumed
    }

    /// The next unconsumed bracket clause, if any.
    pub fn pending_clause(&self) -> Option<&BracketClause> {
        self.parts.clauses.get(self.consumed_clauses)
    }

    /// Consume the name part only.
    pub fn consume_head(&mut self) {
        debug_assert!(!self.head_consumed);
        self.head_consumed = true;
    }

    /// Consume the name part together with the first bracket clause.
    pub fn consume_head_with_clause(&mut self) {
        debug_assert!(!self.head_consumed && !self.parts.clauses.is_empty());
        self.head_consumed = true;
        self.consumed_clauses = 1;
    }

    /// Consume one pending clause.
    pub fn consume_clause(&mut self) {
        debug_assert!(self.head_consumed);
        self.consumed_clauses += 1;
    }

    /// Whether every part of the segment has been consumed.
    pub fn exhausted(&self) -> bool {
        self.head_consumed && self.consumed_clauses >= self.parts.clauses.len()
    }

    /// The region from the first unconsumed part of this segment to
    /// `end` — the position reported when every resolver declines.
    pub fn remaining_region(&self, end: u32) -> TextRegion {
        let start = if self.at_head() {
            self.parts.region.start()
        } else {
            match self.pending_clause() {
                Some(clause) => clause.region.start(),
                None => self.parts.region.end(),
            }
        };
        TextRegion::new(start, end)
    }

    /// Region of the name part folded with the first clause.
    pub fn head_with_clause_region(&self) -> TextRegion {
        match self.parts.clauses.first() {
            Some(clause) => self.parts.name_region.cover(clause.region),
            None => self.parts.name_region,
        }
    }
}

// ============================================================================
// RESOLVER CONTRACT
// ============================================================================

/// One strategy of the resolution chain.
///
/// Implementations must consume cursor content only when returning
/// `Some(..)`; declining leaves the cursor untouched.
pub(crate) trait SegmentResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode>;
}

/// The fixed resolver order.
pub(crate) fn resolver_chain() -> [&'static dyn SegmentResolver; 6] {
    [
        &ParameterResolver,
        &AssociationResolver,
        &QualifierAndIndexResolver,
        &AttributeResolver,
        &EnumClassResolver,
        &EnumValueResolver,
    ]
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// The structural type a segment resolves against: the predecessor's
/// element model type, or the expression's declaring type for the first
/// segment. `None` when the predecessor result is not a structural type.
pub(crate) fn structural_type_name(
    env: &ResolveEnv<'_>,
    predecessor: Option<&IdentifierNode>,
) -> Option<SmolStr> {
    match predecessor {
        Some(node) => node
            .resolved_type()?
            .element()
            .model_type_name()
            .cloned(),
        None => env.context.declaring_type().cloned(),
    }
}

/// The association governing a pending bracket clause, recovered from the
/// predecessor node.
pub(crate) fn governing_association(
    node: &IdentifierNode,
) -> Option<&crate::model::Association> {
    match node.kind() {
        NodeKind::Association { association }
        | NodeKind::QualifiedAssociation { association, .. }
        | NodeKind::IndexBasedAssociation { association, .. }
        | NodeKind::Qualifier { association, .. } => Some(association),
        _ => None,
    }
}
