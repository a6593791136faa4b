//! Structural model elements — types, attributes, associations, parameters.
//!
//! These are the type-model elements an identifier expression resolves
//! against. The model is an immutable snapshot owned by the
//! [`ModelStore`](super::ModelStore); resolved nodes carry cloned copies of
//! the small element structs rather than borrowed references.

use smol_str::SmolStr;

/// Maximum cardinality value meaning "many" (`*`).
pub const CARDINALITY_MANY: u32 = u32::MAX;

/// Suffix referring to an attribute's configured default rather than an
/// instance's current value, e.g. `premium@default`.
pub const DEFAULT_VALUE_SUFFIX: &str = "@default";

// ============================================================================
// TYPES
// ============================================================================

/// The structural kind of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A policy type — instantiated per contract at runtime.
    Policy,
    /// A product type — configured once per product component.
    Product,
}

/// A structural model type with attributes and associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
    pub name: SmolStr,
    pub kind: TypeKind,
    /// Supertype name; attribute and association lookups walk this chain.
    pub supertype: Option<SmolStr>,
    /// For policy types: the product type configuring instances of this
    /// type. Drives the extra accessor hop in generated code.
    pub configured_by: Option<SmolStr>,
    pub attributes: Vec<Attribute>,
    pub associations: Vec<Association>,
}

impl ModelType {
    pub fn new(name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertype: None,
            configured_by: None,
            attributes: Vec::new(),
            associations: Vec::new(),
        }
    }

    pub fn with_supertype(mut self, supertype: impl Into<SmolStr>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn configured_by(mut self, product_type: impl Into<SmolStr>) -> Self {
        self.configured_by = Some(product_type.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    /// Whether instances of this type are configured by a product component.
    pub fn is_configured(&self) -> bool {
        self.configured_by.is_some()
    }

    /// The attribute declared directly on this type, if any.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The association declared directly on this type, if any.
    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == name)
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// An attribute of a model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    /// Name of the attribute's datatype in the registry. `None` models an
    /// attribute whose datatype cannot be determined — resolution reports
    /// an undefined identifier for it.
    pub datatype: Option<SmolStr>,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>, datatype: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            datatype: Some(datatype.into()),
        }
    }

    /// An attribute without a resolvable datatype.
    pub fn without_datatype(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            datatype: None,
        }
    }
}

// ============================================================================
// ASSOCIATIONS
// ============================================================================

/// An association between two model types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub name: SmolStr,
    /// Name of the target model type.
    pub target: SmolStr,
    pub min_cardinality: u32,
    /// [`CARDINALITY_MANY`] for `*`.
    pub max_cardinality: u32,
    /// Qualified associations select their target by a business key; a
    /// qualifier value narrows them toward a single element.
    pub qualified: bool,
}

impl Association {
    /// A to-one association (`0..1`).
    pub fn to_one(name: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            min_cardinality: 0,
            max_cardinality: 1,
            qualified: false,
        }
    }

    /// A to-many association (`0..*`).
    pub fn to_many(name: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            min_cardinality: 0,
            max_cardinality: CARDINALITY_MANY,
            qualified: false,
        }
    }

    pub fn with_cardinality(mut self, min: u32, max: u32) -> Self {
        self.min_cardinality = min;
        self.max_cardinality = max;
        self
    }

    pub fn qualified(mut self) -> Self {
        self.qualified = true;
        self
    }

    /// Whether the association may yield more than one target. Qualified
    /// associations always count as to-many — a qualifier is needed to
    /// narrow them.
    pub fn is_to_many(&self) -> bool {
        self.qualified || self.max_cardinality > 1
    }

    /// Whether the association is to-many even when the qualifier is taken
    /// out of consideration, i.e. multiple targets may share one qualifier
    /// value. Drives whether a qualifier clause still yields a list.
    pub fn is_to_many_ignoring_qualifier(&self) -> bool {
        self.max_cardinality > 1
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// A formula-signature parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    /// Name of the parameter's datatype in the registry; `None` models a
    /// parameter whose datatype cannot be determined.
    pub datatype: Option<SmolStr>,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, datatype: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            datatype: Some(datatype.into()),
        }
    }

    pub fn without_datatype(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            datatype: None,
        }
    }
}

// ============================================================================
// PRODUCT COMPONENTS
// ============================================================================

/// A product component backed by a source file, reachable for a product
/// type. Qualifier clauses match product components by object name and
/// resolve to the backing object's runtime id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductComponent {
    /// The component's unqualified object name — the business key a
    /// qualifier clause matches against.
    pub name: SmolStr,
    /// The stable runtime id; `None` when the backing object exposes none.
    pub runtime_id: Option<SmolStr>,
    /// The policy type configured by this component.
    pub policy_type: SmolStr,
}

impl ProductComponent {
    pub fn new(
        name: impl Into<SmolStr>,
        runtime_id: impl Into<SmolStr>,
        policy_type: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            runtime_id: Some(runtime_id.into()),
            policy_type: policy_type.into(),
        }
    }

    pub fn without_runtime_id(
        name: impl Into<SmolStr>,
        policy_type: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            runtime_id: None,
            policy_type: policy_type.into(),
        }
    }
}
