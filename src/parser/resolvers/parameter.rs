//! Parameter resolver — matches the first segment against the formula's
//! signature.

use tracing::trace;

use super::{ResolveEnv, SegmentCursor, SegmentResolver};
use crate::model::ResolvedType;
use crate::parser::diagnostics::codes;
use crate::parser::nodes::{IdentifierNode, NodeKind};

pub(crate) struct ParameterResolver;

impl SegmentResolver for ParameterResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        // Parameters can only head a chain.
        if predecessor.is_some() || !cursor.at_head() || !cursor.parts().is_plain_name() {
            return None;
        }
        let name = cursor.parts().name_text(env.source);
        let parameter = env.context.parameter(name)?.clone();
        let region = cursor.parts().name_region;
        cursor.consume_head();

        let datatype = parameter
            .datatype
            .as_deref()
            .and_then(|d| env.store.resolve_datatype(d));
        match datatype {
            Some(datatype) => {
                trace!(parameter = %parameter.name, "resolved parameter");
                Some(IdentifierNode::new(
                    NodeKind::Parameter { parameter },
                    ResolvedType::scalar(datatype),
                    region,
                ))
            }
            None => Some(IdentifierNode::invalid(
                codes::UNDEFINED_IDENTIFIER,
                name,
                region,
            )),
        }
    }
}
