//! Enum value resolver — matches a segment against the value identifiers of
//! the preceding enum class node.

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::trace;

use super::{ResolveEnv, SegmentCursor, SegmentResolver};
use crate::model::{Datatype, ResolvedType};
use crate::parser::diagnostics::codes;
use crate::parser::nodes::{IdentifierNode, NodeKind};

pub(crate) struct EnumValueResolver;

impl SegmentResolver for EnumValueResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        let NodeKind::EnumClass { enum_datatype } = predecessor?.kind() else {
            return None;
        };
        if !cursor.at_head() || !cursor.parts().is_plain_name() {
            return None;
        }
        let name = cursor.parts().name_text(env.source);
        let region = cursor.parts().name_region;
        cursor.consume_head();

        if !enum_datatype.contains_value(name) {
            return Some(IdentifierNode::invalid(
                codes::UNDEFINED_IDENTIFIER,
                name,
                region,
            ));
        }
        trace!(enum_class = %enum_datatype.name, value = name, "resolved enum value");
        Some(IdentifierNode::new(
            NodeKind::EnumValue {
                enum_datatype: Arc::clone(enum_datatype),
                value: SmolStr::new(name),
            },
            ResolvedType::scalar(Datatype::Enum(Arc::clone(enum_datatype))),
            region,
        ))
    }
}
