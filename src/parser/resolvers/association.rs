//! Association resolver — matches a bare segment name against an
//! association of the predecessor's type.

use tracing::{trace, warn};

use super::{ResolveEnv, SegmentCursor, SegmentResolver, structural_type_name};
use crate::model::{Datatype, ResolvedType};
use crate::parser::nodes::{IdentifierNode, NodeKind};

pub(crate) struct AssociationResolver;

impl SegmentResolver for AssociationResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        // Never the first segment, never a segment with bracket clauses —
        // those belong to the qualifier-and-index resolver.
        let predecessor = predecessor?;
        if !cursor.at_head() || !cursor.parts().is_plain_name() {
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
        let Some(target) = env.store.find_target(&association) else {
            warn!(association = %association.name, target = %association.target, "association target not found, treating as no match");
            return None;
        };

        // A to-many association yields list context; composing from an
        // already-list predecessor stays a list, flattened one level.
        let is_list = association.is_to_many() || predecessor.is_list_of_types();
        let resolved =
            ResolvedType::with_context(Datatype::Model(target.name.clone()), is_list);
        let region = cursor.parts().name_region;
        cursor.consume_head();
        trace!(association = %association.name, is_list, "resolved association");
        Some(IdentifierNode::new(
            NodeKind::Association { association },
            resolved,
            region,
        ))
    }
}
