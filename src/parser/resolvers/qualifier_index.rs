//! Qualifier-and-index resolver — consumes bracket clauses.
//!
//! Two positions: at a segment head it resolves `name[clause]` into a
//! combined `QualifiedAssociation`/`IndexBasedAssociation` node — the name
//! is looked up as an association of the predecessor's type, so the clause
//! always attaches to an association node, never to a parameter or
//! attribute directly. Further pending clauses of the same segment become
//! standalone `Qualifier`/`Index` nodes against the governing association.
//!
//! An index over a to-one association is accepted whenever the predecessor
//! context is already list-typed (e.g. reached through a list-producing
//! qualifier). Unusual, but existing formulas rely on it; see DESIGN.md.

use smol_str::SmolStr;
use tracing::{trace, warn};

use super::{
    ResolveEnv, SegmentCursor, SegmentResolver, governing_association, structural_type_name,
};
use crate::base::TextRegion;
use crate::model::{Association, Datatype, ProductComponent, ResolvedType, TypeKind};
use crate::parser::diagnostics::codes;
use crate::parser::nodes::{IdentifierNode, NodeKind};
use crate::parser::segmenter::ClauseContent;

pub(crate) struct QualifierAndIndexResolver;

impl SegmentResolver for QualifierAndIndexResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        let predecessor = predecessor?;
        if cursor.at_head() {
            self.resolve_head(env, cursor, predecessor)
        } else {
            self.resolve_pending_clause(env, cursor, predecessor)
        }
    }
}

impl QualifierAndIndexResolver {
    /// `name[clause]` at a segment head: association lookup plus the first
    /// clause folded into one combined node.
    fn resolve_head(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: &IdentifierNode,
    ) -> Option<IdentifierNode> {
        if !cursor.parts().is_name_with_clauses() {
            return None;
        }
        let type_name = structural_type_name(env, Some(predecessor))?;
        let name = cursor.parts().name_text(env.source);
        let association = match env.store.find_association(&type_name, name) {
            Ok(Some(association)) => association.clone(),
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, r#type = %type_name, segment = name, "association lookup failed, treating as no match");
                return None;
            }
        };

        let clause = cursor.parts().clauses[0].clone();
        let region = cursor.head_with_clause_region();
        let predecessor_is_list = predecessor.is_list_of_types();
        cursor.consume_head_with_clause();

        match clause.content {
            ClauseContent::Qualifier(qualifier) => self.resolve_qualifier(
                env,
                association,
                &qualifier,
                predecessor_is_list,
                region,
                Combined::Yes,
            ),
            ClauseContent::Index(index) => {
                self.resolve_index_on_association(association, index, predecessor_is_list, region)
            }
            ClauseContent::Other => Some(IdentifierNode::invalid(
                codes::UNKNOWN_QUALIFIER,
                clause.region.slice(env.source),
                clause.region,
            )),
        }
    }

    /// A further clause of the current segment, applied to the node built
    /// from the segment head.
    fn resolve_pending_clause(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: &IdentifierNode,
    ) -> Option<IdentifierNode> {
        let clause = cursor.pending_clause()?.clone();
        cursor.consume_clause();

        match clause.content {
            ClauseContent::Qualifier(qualifier) => match governing_association(predecessor) {
                Some(association) => self.resolve_qualifier(
                    env,
                    association.clone(),
                    &qualifier,
                    predecessor.is_list_of_types(),
                    clause.region,
                    Combined::No,
                ),
                None => Some(IdentifierNode::invalid(
                    codes::UNKNOWN_QUALIFIER,
                    qualifier,
                    clause.region,
                )),
            },
            ClauseContent::Index(index) => {
                if !predecessor.is_list_of_types() {
                    let subject = governing_association(predecessor)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| SmolStr::new(clause.region.slice(env.source)));
                    return Some(IdentifierNode::invalid(
                        codes::NO_INDEX_FOR_1TO1_ASSOCIATION,
                        subject,
                        clause.region,
                    ));
                }
                let element = predecessor
                    .resolved_type()
                    .expect("association-family nodes carry a type")
                    .element()
                    .clone();
                trace!(index, "resolved index clause");
                Some(IdentifierNode::new(
                    NodeKind::Index { index },
                    ResolvedType::scalar(element),
                    clause.region,
                ))
            }
            ClauseContent::Other => Some(IdentifierNode::invalid(
                codes::UNKNOWN_QUALIFIER,
                clause.region.slice(env.source),
                clause.region,
            )),
        }
    }

    /// Qualifier lookup: search the product components reachable for the
    /// association's target product type for one whose object name equals
    /// the qualifier, and take its backing object's runtime id.
    fn resolve_qualifier(
        &self,
        env: &ResolveEnv<'_>,
        association: Association,
        qualifier: &str,
        predecessor_is_list: bool,
        region: TextRegion,
        combined: Combined,
    ) -> Option<IdentifierNode> {
        let Some(component) = self.find_component(env, &association, qualifier) else {
            return Some(IdentifierNode::invalid(
                codes::UNKNOWN_QUALIFIER,
                qualifier,
                region,
            ));
        };
        let Some(runtime_id) = component.runtime_id.clone() else {
            return Some(IdentifierNode::invalid(
                codes::UNKNOWN_QUALIFIER,
                qualifier,
                region,
            ));
        };

        // A qualifier narrows a to-many association toward a single element
        // unless multiple components may share the qualifier value; a list
        // predecessor stays a list.
        let is_list = association.is_to_many_ignoring_qualifier() || predecessor_is_list;
        let resolved = ResolvedType::with_context(
            Datatype::Model(component.policy_type.clone()),
            is_list,
        );
        let qualifier = SmolStr::new(qualifier);
        trace!(association = %association.name, %qualifier, %runtime_id, is_list, "resolved qualifier");
        let kind = match combined {
            Combined::Yes => NodeKind::QualifiedAssociation {
                association,
                qualifier,
                runtime_id,
            },
            Combined::No => NodeKind::Qualifier {
                association,
                qualifier,
                runtime_id,
            },
        };
        Some(IdentifierNode::new(kind, resolved, region))
    }

    /// Index lookup folded onto the association of the same segment.
    fn resolve_index_on_association(
        &self,
        association: Association,
        index: usize,
        predecessor_is_list: bool,
        region: TextRegion,
    ) -> Option<IdentifierNode> {
        if !association.is_to_many() && !predecessor_is_list {
            return Some(IdentifierNode::invalid(
                codes::NO_INDEX_FOR_1TO1_ASSOCIATION,
                association.name.clone(),
                region,
            ));
        }
        let resolved = ResolvedType::scalar(Datatype::Model(association.target.clone()));
        trace!(association = %association.name, index, "resolved indexed association");
        Some(IdentifierNode::new(
            NodeKind::IndexBasedAssociation { association, index },
            resolved,
            region,
        ))
    }

    /// The product component matching the qualifier, searched over the
    /// components reachable for the association's target product type.
    fn find_component<'s>(
        &self,
        env: &ResolveEnv<'s>,
        association: &Association,
        qualifier: &str,
    ) -> Option<&'s ProductComponent> {
        let target = env.store.find_target(association)?;
        let product_type = match target.kind {
            TypeKind::Product => Some(&target.name),
            TypeKind::Policy => target.configured_by.as_ref(),
        }?;
        env.store
            .product_components_for(product_type)
            .iter()
            .find(|c| c.name == qualifier)
    }
}

#[derive(Clone, Copy)]
enum Combined {
    Yes,
    No,
}
