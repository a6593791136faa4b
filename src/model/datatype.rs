//! Datatypes — the semantic types flowing through a resolved identifier chain.
//!
//! A node's result is either a scalar datatype or a one-level list of a
//! datatype ("list stays list regardless of multiplicity" — composing a
//! to-many association onto an already-list context flattens, it never
//! nests).

use std::sync::Arc;

use smol_str::SmolStr;

// ============================================================================
// DATATYPE
// ============================================================================

/// A resolved semantic type.
///
/// Closed variant set: value datatypes (primitives and value classes),
/// enumeration datatypes, structural model types (referenced by name and
/// looked up in the [`ModelStore`](crate::model::ModelStore)), and a
/// one-level list wrapping of any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    /// A value datatype such as `Integer` or `GregorianCalendar`.
    Value(ValueDatatype),
    /// An enumeration datatype.
    Enum(Arc<EnumDatatype>),
    /// A structural model type (policy or product type), by name.
    Model(SmolStr),
    /// A list of an element datatype. Never nested.
    List(Box<Datatype>),
}

impl Datatype {
    /// Wrap this datatype as a list. Wrapping a list is the identity —
    /// list results flatten one level instead of nesting.
    pub fn wrap_list(self) -> Datatype {
        match self {
            Datatype::List(_) => self,
            other => Datatype::List(Box::new(other)),
        }
    }

    /// Unwrap one list level; scalars are returned unchanged.
    pub fn unwrap_list(self) -> Datatype {
        match self {
            Datatype::List(element) => *element,
            other => other,
        }
    }

    /// Whether this is a list-of-type datatype.
    pub fn is_list(&self) -> bool {
        matches!(self, Datatype::List(_))
    }

    /// The element datatype: the list element for lists, `self` otherwise.
    pub fn element(&self) -> &Datatype {
        match self {
            Datatype::List(element) => element,
            other => other,
        }
    }

    /// The name of the element datatype.
    pub fn name(&self) -> &str {
        match self.element() {
            Datatype::Value(value) => &value.name,
            Datatype::Enum(enum_datatype) => &enum_datatype.name,
            Datatype::Model(name) => name,
            Datatype::List(_) => unreachable!("lists never nest"),
        }
    }

    /// The structural model type name, if this is (a list of) a model type.
    pub fn model_type_name(&self) -> Option<&SmolStr> {
        match self.element() {
            Datatype::Model(name) => Some(name),
            _ => None,
        }
    }

    /// The enum datatype, if this is (a list of) an enumeration.
    pub fn enum_datatype(&self) -> Option<&Arc<EnumDatatype>> {
        match self.element() {
            Datatype::Enum(enum_datatype) => Some(enum_datatype),
            _ => None,
        }
    }
}

// ============================================================================
// RESOLVED TYPE
// ============================================================================

/// A node's resulting type together with its list/scalar evaluation context.
///
/// The list context propagates to the next resolver: an association that is
/// to-many yields list context for its successor unless explicitly indexed
/// or qualified away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    datatype: Datatype,
}

impl ResolvedType {
    /// A scalar result of the given datatype.
    pub fn scalar(datatype: Datatype) -> Self {
        Self {
            datatype: datatype.unwrap_list(),
        }
    }

    /// A list result over the given element datatype.
    pub fn list_of(datatype: Datatype) -> Self {
        Self {
            datatype: datatype.wrap_list(),
        }
    }

    /// A result of the given datatype, list-wrapped iff `is_list`.
    pub fn with_context(datatype: Datatype, is_list: bool) -> Self {
        if is_list {
            Self::list_of(datatype)
        } else {
            Self::scalar(datatype)
        }
    }

    /// The full datatype, including the list wrapping if present.
    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    /// Whether this result is a collection in formula-evaluation context.
    pub fn is_list(&self) -> bool {
        self.datatype.is_list()
    }

    /// The element datatype, with the list wrapping stripped.
    pub fn element(&self) -> &Datatype {
        self.datatype.element()
    }
}

// ============================================================================
// VALUE AND ENUM DATATYPES
// ============================================================================

/// A value datatype (primitive or value class) from the datatype registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDatatype {
    /// Model-facing name, e.g. `GregorianCalendar`.
    pub name: SmolStr,
    /// Fully qualified class used in generated code, e.g.
    /// `java.util.GregorianCalendar`.
    pub java_class: SmolStr,
}

impl ValueDatatype {
    pub fn new(name: impl Into<SmolStr>, java_class: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            java_class: java_class.into(),
        }
    }

    /// The unqualified class name used at the reference site.
    pub fn java_class_simple(&self) -> &str {
        simple_class_name(&self.java_class)
    }
}

/// An enumeration datatype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDatatype {
    /// Model-facing name, e.g. `Gender`.
    pub name: SmolStr,
    /// Fully qualified class used in generated code.
    pub java_class: SmolStr,
    /// Value identifiers declared by this enumeration.
    pub values: Vec<SmolStr>,
    /// Content-based enumerations are defined outside the type model and
    /// their literals must be looked up by id at runtime.
    pub extensible: bool,
}

impl EnumDatatype {
    pub fn new(name: impl Into<SmolStr>, java_class: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            java_class: java_class.into(),
            values: Vec::new(),
            extensible: false,
        }
    }

    /// Add a value identifier.
    pub fn with_value(mut self, value: impl Into<SmolStr>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Mark this enumeration as content-based (extensible).
    pub fn extensible(mut self) -> Self {
        self.extensible = true;
        self
    }

    /// Whether `value` is one of this enumeration's value identifiers.
    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// The unqualified class name used at the reference site.
    pub fn java_class_simple(&self) -> &str {
        simple_class_name(&self.java_class)
    }
}

/// Strip the package from a fully qualified class name.
pub(crate) fn simple_class_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer() -> Datatype {
        Datatype::Value(ValueDatatype::new("Integer", "java.lang.Integer"))
    }

    #[test]
    fn test_wrap_list_never_nests() {
        let list = integer().wrap_list();
        assert!(list.is_list());
        let twice = list.clone().wrap_list();
        assert_eq!(twice, list);
    }

    #[test]
    fn test_unwrap_list() {
        let list = integer().wrap_list();
        assert_eq!(list.unwrap_list(), integer());
        assert_eq!(integer().unwrap_list(), integer());
    }

    #[test]
    fn test_element_and_name() {
        let list = Datatype::Model(SmolStr::new("Coverage")).wrap_list();
        assert_eq!(list.name(), "Coverage");
        assert_eq!(
            list.model_type_name(),
            Some(&SmolStr::new("Coverage"))
        );
    }

    #[test]
    fn test_resolved_type_context() {
        let scalar = ResolvedType::scalar(integer());
        assert!(!scalar.is_list());
        let list = ResolvedType::with_context(integer(), true);
        assert!(list.is_list());
        assert_eq!(list.element(), &integer());
        // scalar() normalizes an already-wrapped datatype
        let normalized = ResolvedType::scalar(integer().wrap_list());
        assert!(!normalized.is_list());
    }

    #[test]
    fn test_simple_class_name() {
        assert_eq!(simple_class_name("java.util.GregorianCalendar"), "GregorianCalendar");
        assert_eq!(simple_class_name("Gender"), "Gender");
    }
}
