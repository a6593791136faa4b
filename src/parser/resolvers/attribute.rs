//! Attribute resolver — matches a bare segment name against the attributes
//! of the predecessor's type (or the declaring type for the first segment).

use tracing::{trace, warn};

use super::{ResolveEnv, SegmentCursor, SegmentResolver, structural_type_name};
use crate::model::{DEFAULT_VALUE_SUFFIX, FilterKind, ResolvedType};
use crate::parser::diagnostics::codes;
use crate::parser::nodes::{IdentifierNode, NodeKind};

pub(crate) struct AttributeResolver;

impl SegmentResolver for AttributeResolver {
    fn try_resolve(
        &self,
        env: &ResolveEnv<'_>,
        cursor: &mut SegmentCursor,
        predecessor: Option<&IdentifierNode>,
    ) -> Option<IdentifierNode> {
        if !cursor.at_head() || !cursor.parts().is_plain_name() {
            return None;
        }
        let owner = structural_type_name(env, predecessor)?;
        let raw_name = cursor.parts().name_text(env.source);
        let (name, is_default_value_access) = strip_default_suffix(raw_name);

        let attributes = match env.store.find_all_attributes(&owner) {
            Ok(attributes) => attributes,
            Err(err) => {
                warn!(%err, r#type = %owner, segment = name, "attribute lookup failed, treating as no match");
                return None;
            }
        };
        let attribute = attributes.into_iter().find(|a| a.name == name)?.clone();
        let region = cursor.parts().name_region;
        cursor.consume_head();

        if !env
            .context
            .filter()
            .is_allowed(&attribute.name, FilterKind::Attribute)
        {
            trace!(attribute = %attribute.name, "attribute rejected by identifier filter");
            return Some(IdentifierNode::invalid(
                codes::UNDEFINED_IDENTIFIER,
                raw_name,
                region,
            ));
        }
        let datatype = attribute
            .datatype
            .as_deref()
            .and_then(|d| env.store.resolve_datatype(d));
        let Some(datatype) = datatype else {
            return Some(IdentifierNode::invalid(
                codes::UNDEFINED_IDENTIFIER,
                raw_name,
                region,
            ));
        };

        // Accessing a scalar attribute through a list predecessor maps the
        // attribute over the list: the result is a list of the attribute's
        // datatype.
        let is_list = predecessor.is_some_and(IdentifierNode::is_list_of_types);
        trace!(attribute = %attribute.name, owner = %owner, is_list, "resolved attribute");
        Some(IdentifierNode::new(
            NodeKind::Attribute {
                attribute,
                owner,
                is_default_value_access,
            },
            ResolvedType::with_context(datatype, is_list),
            region,
        ))
    }
}

/// Split off the reserved default-value-access suffix.
fn strip_default_suffix(name: &str) -> (&str, bool) {
    match name.strip_suffix(DEFAULT_VALUE_SUFFIX) {
        Some(base) => (base, true),
        None => (name, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_default_suffix() {
        assert_eq!(strip_default_suffix("premium@default"), ("premium", true));
        assert_eq!(strip_default_suffix("premium"), ("premium", false));
        assert_eq!(strip_default_suffix("premium@other"), ("premium@other", false));
    }
}
