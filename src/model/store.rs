//! In-memory model store — the type-model lookup surface the resolvers
//! consume.
//!
//! All lookups are read-only over an immutable snapshot; supertype-walking
//! lookups are cycle-safe and return `Err` instead of looping or panicking.
//! Resolvers map lookup errors to "no match" per segment, so a broken
//! hierarchy degrades resolution instead of aborting the whole parse.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;

use super::datatype::{Datatype, EnumDatatype, ValueDatatype};
use super::elements::{Association, Attribute, ModelType, ProductComponent};

/// Errors from model lookups.
///
/// These signal a broken model snapshot, not malformed identifier input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The supertype hierarchy of a type contains a cycle.
    #[error("supertype cycle detected at type '{type_name}'")]
    SupertypeCycle { type_name: SmolStr },
    /// A supertype reference points at an unregistered type.
    #[error("supertype '{supertype}' of type '{type_name}' is not registered")]
    UnknownSupertype {
        type_name: SmolStr,
        supertype: SmolStr,
    },
}

// ============================================================================
// IDENTIFIER FILTER
// ============================================================================

/// The kind of element being checked by an [`IdentifierFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Parameter,
    Attribute,
    Association,
    EnumClass,
}

/// Permission filter collaborator — rejects elements the caller is not
/// allowed to reference from the current formula.
pub trait IdentifierFilter {
    fn is_allowed(&self, element_name: &str, kind: FilterKind) -> bool;
}

/// Default filter permitting every element.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl IdentifierFilter for AllowAll {
    fn is_allowed(&self, _element_name: &str, _kind: FilterKind) -> bool {
        true
    }
}

// ============================================================================
// MODEL STORE
// ============================================================================

/// Immutable registry of model types, datatypes, enumerations, and product
/// components. Insertion order of types is preserved for deterministic
/// iteration.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    types: IndexMap<SmolStr, ModelType>,
    value_datatypes: FxHashMap<SmolStr, ValueDatatype>,
    enums: FxHashMap<SmolStr, Arc<EnumDatatype>>,
    /// Product components reachable per product type name.
    product_components: FxHashMap<SmolStr, Vec<ProductComponent>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    pub fn add_type(&mut self, model_type: ModelType) -> &mut Self {
        self.types.insert(model_type.name.clone(), model_type);
        self
    }

    pub fn add_value_datatype(&mut self, datatype: ValueDatatype) -> &mut Self {
        self.value_datatypes.insert(datatype.name.clone(), datatype);
        self
    }

    pub fn add_enum(&mut self, enum_datatype: EnumDatatype) -> &mut Self {
        self.enums
            .insert(enum_datatype.name.clone(), Arc::new(enum_datatype));
        self
    }

    pub fn add_product_component(
        &mut self,
        product_type: impl Into<SmolStr>,
        component: ProductComponent,
    ) -> &mut Self {
        self.product_components
            .entry(product_type.into())
            .or_default()
            .push(component);
        self
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn find_type(&self, name: &str) -> Option<&ModelType> {
        self.types.get(name)
    }

    pub fn find_value_datatype(&self, name: &str) -> Option<&ValueDatatype> {
        self.value_datatypes.get(name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&Arc<EnumDatatype>> {
        self.enums.get(name)
    }

    /// Resolve a datatype name against the registry: value datatypes first,
    /// then enumerations, then structural model types.
    pub fn resolve_datatype(&self, name: &str) -> Option<Datatype> {
        if let Some(value) = self.value_datatypes.get(name) {
            return Some(Datatype::Value(value.clone()));
        }
        if let Some(enum_datatype) = self.enums.get(name) {
            return Some(Datatype::Enum(Arc::clone(enum_datatype)));
        }
        self.types
            .get(name)
            .map(|t| Datatype::Model(t.name.clone()))
    }

    /// Find an association by name within a type, considering the supertype
    /// hierarchy (subtype declarations shadow supertype ones).
    pub fn find_association(
        &self,
        type_name: &str,
        association_name: &str,
    ) -> Result<Option<&Association>, ModelError> {
        let mut current = self.find_type(type_name);
        let mut visited = FxHashSet::default();
        while let Some(model_type) = current {
            if !visited.insert(model_type.name.clone()) {
                return Err(ModelError::SupertypeCycle {
                    type_name: model_type.name.clone(),
                });
            }
            if let Some(association) = model_type.association(association_name) {
                return Ok(Some(association));
            }
            current = match &model_type.supertype {
                Some(supertype) => match self.find_type(supertype) {
                    Some(parent) => Some(parent),
                    None => {
                        return Err(ModelError::UnknownSupertype {
                            type_name: model_type.name.clone(),
                            supertype: supertype.clone(),
                        });
                    }
                },
                None => None,
            };
        }
        Ok(None)
    }

    /// All attributes of a type including inherited ones, subtype first.
    pub fn find_all_attributes(
        &self,
        type_name: &str,
    ) -> Result<Vec<&Attribute>, ModelError> {
        let mut attributes = Vec::new();
        let mut current = self.find_type(type_name);
        let mut visited = FxHashSet::default();
        while let Some(model_type) = current {
            if !visited.insert(model_type.name.clone()) {
                return Err(ModelError::SupertypeCycle {
                    type_name: model_type.name.clone(),
                });
            }
            attributes.extend(model_type.attributes.iter());
            current = match &model_type.supertype {
                Some(supertype) => match self.find_type(supertype) {
                    Some(parent) => Some(parent),
                    None => {
                        return Err(ModelError::UnknownSupertype {
                            type_name: model_type.name.clone(),
                            supertype: supertype.clone(),
                        });
                    }
                },
                None => None,
            };
        }
        Ok(attributes)
    }

    /// An attribute by name within a type, considering the supertype
    /// hierarchy.
    pub fn find_attribute(
        &self,
        type_name: &str,
        attribute_name: &str,
    ) -> Result<Option<&Attribute>, ModelError> {
        Ok(self
            .find_all_attributes(type_name)?
            .into_iter()
            .find(|a| a.name == attribute_name))
    }

    /// The target type of an association.
    pub fn find_target(&self, association: &Association) -> Option<&ModelType> {
        self.find_type(&association.target)
    }

    /// Product components reachable for the given product type.
    pub fn product_components_for(&self, product_type: &str) -> &[ProductComponent] {
        self.product_components
            .get(product_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::elements::TypeKind;

    fn store_with_hierarchy() -> ModelStore {
        let mut store = ModelStore::new();
        store.add_value_datatype(ValueDatatype::new("Integer", "java.lang.Integer"));
        store.add_type(
            ModelType::new("Vehicle", TypeKind::Policy)
                .with_attribute(Attribute::new("age", "Integer"))
                .with_association(Association::to_many("wheels", "Wheel")),
        );
        store.add_type(
            ModelType::new("Car", TypeKind::Policy)
                .with_supertype("Vehicle")
                .with_attribute(Attribute::new("doors", "Integer")),
        );
        store.add_type(ModelType::new("Wheel", TypeKind::Policy));
        store
    }

    #[test]
    fn test_find_association_walks_supertypes() {
        let store = store_with_hierarchy();
        let found = store.find_association("Car", "wheels").unwrap();
        assert_eq!(found.map(|a| a.target.as_str()), Some("Wheel"));
        assert!(store.find_association("Car", "missing").unwrap().is_none());
    }

    #[test]
    fn test_find_all_attributes_subtype_first() {
        let store = store_with_hierarchy();
        let attributes = store.find_all_attributes("Car").unwrap();
        let names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["doors", "age"]);
    }

    #[test]
    fn test_find_attribute_considers_inherited() {
        let store = store_with_hierarchy();
        assert!(store.find_attribute("Car", "age").unwrap().is_some());
        assert!(store.find_attribute("Car", "ghost").unwrap().is_none());
    }

    #[test]
    fn test_supertype_cycle_is_an_error() {
        let mut store = ModelStore::new();
        store.add_type(ModelType::new("A", TypeKind::Policy).with_supertype("B"));
        store.add_type(ModelType::new("B", TypeKind::Policy).with_supertype("A"));
        let err = store.find_association("A", "anything").unwrap_err();
        assert!(matches!(err, ModelError::SupertypeCycle { .. }));
    }

    #[test]
    fn test_unknown_supertype_is_an_error() {
        let mut store = ModelStore::new();
        store.add_type(ModelType::new("A", TypeKind::Policy).with_supertype("Ghost"));
        let err = store.find_all_attributes("A").unwrap_err();
        assert!(matches!(err, ModelError::UnknownSupertype { .. }));
    }

    #[test]
    fn test_resolve_datatype_precedence() {
        let store = store_with_hierarchy();
        assert!(matches!(
            store.resolve_datatype("Integer"),
            Some(Datatype::Value(_))
        ));
        assert!(matches!(
            store.resolve_datatype("Vehicle"),
            Some(Datatype::Model(_))
        ));
        assert!(store.resolve_datatype("Nope").is_none());
    }

    #[test]
    fn test_product_components_default_empty() {
        let store = store_with_hierarchy();
        assert!(store.product_components_for("VehicleProduct").is_empty());
    }
}
