//! AST node model — the successor-linked chain a resolved identifier
//! becomes.
//!
//! Node kinds are a closed variant set dispatched by exhaustive matching.
//! Chains are stored flat (a `Vec` in resolution order) and expose a
//! head/successor traversal view; `Invalid` nodes are always terminal.

use std::sync::Arc;

use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, Locale, message_for};
use crate::base::TextRegion;
use crate::model::{Association, Attribute, EnumDatatype, Parameter, ResolvedType};

// ============================================================================
// NODE KINDS
// ============================================================================

/// The closed set of identifier node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A formula-signature parameter (always the chain head).
    Parameter { parameter: Parameter },
    /// An attribute access, optionally referring to the configured default.
    Attribute {
        attribute: Attribute,
        /// Name of the model type the attribute was found on.
        owner: SmolStr,
        is_default_value_access: bool,
    },
    /// An unqualified, unindexed association step.
    Association { association: Association },
    /// An association narrowed by a qualifier in the same segment.
    QualifiedAssociation {
        association: Association,
        qualifier: SmolStr,
        runtime_id: SmolStr,
    },
    /// An association narrowed by an index in the same segment.
    IndexBasedAssociation {
        association: Association,
        index: usize,
    },
    /// An index applied directly to a list-context predecessor.
    Index { index: usize },
    /// A qualifier applied to an already-built association result.
    Qualifier {
        association: Association,
        qualifier: SmolStr,
        runtime_id: SmolStr,
    },
    /// An enumeration datatype used as the chain head.
    EnumClass { enum_datatype: Arc<EnumDatatype> },
    /// A value of the preceding enumeration datatype.
    EnumValue {
        enum_datatype: Arc<EnumDatatype>,
        value: SmolStr,
    },
    /// Terminal error node.
    Invalid {
        code: &'static str,
        /// The offending identifier text, used in the diagnostic message.
        subject: SmolStr,
    },
}

// ============================================================================
// NODES
// ============================================================================

/// One node of a resolved identifier chain.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierNode {
    kind: NodeKind,
    /// Resolved result type; `None` only for `Invalid` nodes.
    resolved: Option<ResolvedType>,
    region: TextRegion,
}

impl IdentifierNode {
    pub fn new(kind: NodeKind, resolved: ResolvedType, region: TextRegion) -> Self {
        debug_assert!(!matches!(kind, NodeKind::Invalid { .. }));
        Self {
            kind,
            resolved: Some(resolved),
            region,
        }
    }

    pub fn invalid(code: &'static str, subject: impl Into<SmolStr>, region: TextRegion) -> Self {
        Self {
            kind: NodeKind::Invalid {
                code,
                subject: subject.into(),
            },
            resolved: None,
            region,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn region(&self) -> TextRegion {
        self.region
    }

    /// The node's resolved result type; `None` for `Invalid` nodes.
    pub fn resolved_type(&self) -> Option<&ResolvedType> {
        self.resolved.as_ref()
    }

    /// Whether the node's result is a collection in formula-evaluation
    /// context.
    pub fn is_list_of_types(&self) -> bool {
        self.resolved.as_ref().is_some_and(ResolvedType::is_list)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, NodeKind::Invalid { .. })
    }

    /// The diagnostic carried by an `Invalid` node, rendered for `locale`.
    pub fn diagnostic(&self, locale: &Locale) -> Option<Diagnostic> {
        match &self.kind {
            NodeKind::Invalid { code, subject } => Some(Diagnostic::error(
                *code,
                message_for(code, subject, locale),
                self.region,
            )),
            _ => None,
        }
    }

    /// Whether this node continues its predecessor's segment (bracket
    /// clause nodes attach without a dot).
    pub fn is_clause(&self) -> bool {
        matches!(self.kind, NodeKind::Index { .. } | NodeKind::Qualifier { .. })
    }

    /// The textual form this node contributes to the identifier.
    pub fn text(&self) -> String {
        match &self.kind {
            NodeKind::Parameter { parameter } => parameter.name.to_string(),
            NodeKind::Attribute {
                attribute,
                is_default_value_access,
                ..
            } => {
                if *is_default_value_access {
                    format!("{}{}", attribute.name, crate::model::DEFAULT_VALUE_SUFFIX)
                } else {
                    attribute.name.to_string()
                }
            }
            NodeKind::Association { association } => association.name.to_string(),
            NodeKind::QualifiedAssociation {
                association,
                qualifier,
                ..
            } => format!("{}[\"{}\"]", association.name, qualifier),
            NodeKind::IndexBasedAssociation { association, index } => {
                format!("{}[{}]", association.name, index)
            }
            NodeKind::Index { index } => format!("[{index}]"),
            NodeKind::Qualifier { qualifier, .. } => format!("[\"{qualifier}\"]"),
            NodeKind::EnumClass { enum_datatype } => enum_datatype.name.to_string(),
            NodeKind::EnumValue { value, .. } => value.to_string(),
            NodeKind::Invalid { subject, .. } => subject.to_string(),
        }
    }
}

// ============================================================================
// CHAINS
// ============================================================================

/// A resolved identifier chain. Never empty; at most one `Invalid` node,
/// always at the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierChain {
    nodes: Vec<IdentifierNode>,
}

impl IdentifierChain {
    pub fn single(node: IdentifierNode) -> Self {
        Self { nodes: vec![node] }
    }

    pub(crate) fn push(&mut self, node: IdentifierNode) {
        debug_assert!(
            !self.tail().is_invalid(),
            "no successor may be appended to an invalid node"
        );
        self.nodes.push(node);
    }

    /// The chain root (first resolved segment).
    pub fn head(&self) -> &IdentifierNode {
        &self.nodes[0]
    }

    /// The node without a successor.
    pub fn tail(&self) -> &IdentifierNode {
        self.nodes.last().expect("chain is never empty")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&IdentifierNode> {
        self.nodes.get(index)
    }

    /// The successor of the node at `index`, if any.
    pub fn successor_of(&self, index: usize) -> Option<&IdentifierNode> {
        self.nodes.get(index + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdentifierNode> {
        self.nodes.iter()
    }

    /// Whether the chain resolved without an `Invalid` node.
    pub fn is_valid(&self) -> bool {
        !self.tail().is_invalid()
    }

    /// The terminal `Invalid` node, if resolution failed.
    pub fn invalid(&self) -> Option<&IdentifierNode> {
        self.nodes.iter().find(|n| n.is_invalid())
    }

    /// The resolved result type of the whole chain (the tail's type).
    pub fn resolved_type(&self) -> Option<&ResolvedType> {
        self.tail().resolved_type()
    }

    /// Reconstruct the textual identifier this chain resolves. Bracket
    /// clause nodes attach without a separating dot.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 && !node.is_clause() {
                result.push('.');
            }
            result.push_str(&node.text());
        }
        result
    }
}
