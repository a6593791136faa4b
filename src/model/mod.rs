//! Type model — the collaborator surface identifier resolution consumes.
//!
//! ## Key Types
//!
//! - [`Datatype`], [`ResolvedType`] — semantic types with list/scalar context
//! - [`ModelType`], [`Attribute`], [`Association`], [`Parameter`] — structural
//!   model elements
//! - [`ModelStore`] — in-memory registry with supertype-aware lookups
//! - [`IdentifierFilter`] — permission filter seam
//!
//! The store is an immutable snapshot per compiler invocation; all lookups
//! are `&self` and safe for concurrent readers.

mod datatype;
mod elements;
mod store;

pub use datatype::{Datatype, EnumDatatype, ResolvedType, ValueDatatype};
pub(crate) use datatype::simple_class_name;
pub use elements::{
    Association, Attribute, CARDINALITY_MANY, DEFAULT_VALUE_SUFFIX, ModelType, Parameter,
    ProductComponent, TypeKind,
};
pub use store::{AllowAll, FilterKind, IdentifierFilter, ModelError, ModelStore};
