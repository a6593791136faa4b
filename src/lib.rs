//! # flident
//!
//! Identifier expression parser, resolver, and code generator for
//! business-rule formulas.
//!
//! Parses dotted, chained identifier expressions such as
//! `policy.coverages["basic"].amounts[0].value@default`, resolves each
//! segment against a type model (parameters, attributes, associations,
//! enumerations), builds a typed chain of successor-linked nodes, and
//! compiles the chain into target expression fragments.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! codegen   → Node generators, compiled results, compiler facade
//!   ↓
//! parser    → Logos lexer, segmenter, resolver chain, node model
//!   ↓
//! model     → Type model: datatypes, elements, store, filters
//!   ↓
//! base      → Primitives (TextRegion)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → parser → codegen)
// ============================================================================

/// Foundation types: TextRegion
pub mod base;

/// Type model: datatypes, structural elements, in-memory store
pub mod model;

/// Parser: logos lexer, segmenter, resolver chain, node model
pub mod parser;

/// Code generation: node generators and the compiler facade
pub mod codegen;

// Re-export foundation types
pub use base::TextRegion;

// Re-export the primary API surface
pub use codegen::{CodeFragment, CodegenError, CompiledResult, IdentifierCompiler, generate};
pub use model::{
    AllowAll, Association, Attribute, CARDINALITY_MANY, DEFAULT_VALUE_SUFFIX, Datatype,
    EnumDatatype, FilterKind, IdentifierFilter, ModelError, ModelStore, ModelType, Parameter,
    ProductComponent, ResolvedType, TypeKind, ValueDatatype,
};
pub use parser::{
    Diagnostic, ExpressionContext, IdentifierChain, IdentifierNode, IdentifierParser,
    IdentifierSegmenter, Locale, NodeKind, Severity, codes,
};
