//! Enum class resolver — matches the first segment against the enumeration
//! datatypes allowed in the formula's evaluation scope.

use std::sync::Arc;

use tracing::trace;

use super::{ResolveEnv, SegmentCursor, SegmentResolver};
use crate::model::{Datatype, ResolvedType};
use crate::parser::nodes::{IdentifierNode, NodeKind};

pub(crate) struct EnumClassResolver;

impl SegmentResolver for EnumClassResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        if predecessor.is_some() || !cursor.at_head() || !cursor.parts().is_plain_name() {
            return None;
        }
        let name = cursor.parts().name_text(env.source);
        if !env.context.is_enum_allowed(name) {
            return None;
        }
        let enum_datatype = Arc::clone(env.store.find_enum(name)?);
        let region = cursor.parts().name_region;
        cursor.consume_head();
        trace!(enum_class = %enum_datatype.name, "resolved enum class");
        Some(IdentifierNode::new(
            NodeKind::EnumClass {
                enum_datatype: Arc::clone(&enum_datatype),
            },
            ResolvedType::scalar(Datatype::Enum(enum_datatype)),
            region,
        ))
    }
}
