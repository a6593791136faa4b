//! Code fragments and compiled results.
//!
//! A fragment is the accumulated target-code text plus the imports it
//! needs; generation folds one fragment per node onto its predecessor's. A
//! [`CompiledResult`] is what the compiler hands back: either a fragment
//! with its resulting datatype, or the diagnostics of a failed resolution.

use indexmap::IndexSet;
use thiserror::Error;

use crate::model::ResolvedType;
use crate::parser::Diagnostic;

// ============================================================================
// FRAGMENTS
// ============================================================================

/// A target-code fragment with its accumulated import requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFragment {
    source: String,
    imports: IndexSet<String>,
}

impl CodeFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            imports: IndexSet::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Imports in first-use order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn has_import(&self, qualified: &str) -> bool {
        self.imports.contains(qualified)
    }

    pub fn append(&mut self, text: &str) {
        self.source.push_str(text);
    }

    pub fn add_import(&mut self, qualified: impl Into<String>) {
        self.imports.insert(qualified.into());
    }

    /// Merge another fragment's imports into this one.
    pub fn merge_imports(&mut self, other: &CodeFragment) {
        for import in &other.imports {
            self.imports.insert(import.clone());
        }
    }
}

// ============================================================================
// COMPILED RESULTS
// ============================================================================

/// The outcome of compiling one identifier expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledResult {
    fragment: CodeFragment,
    /// The resulting datatype; `None` on failure.
    datatype: Option<ResolvedType>,
    messages: Vec<Diagnostic>,
}

impl CompiledResult {
    pub fn success(fragment: CodeFragment, datatype: ResolvedType) -> Self {
        Self {
            fragment,
            datatype: Some(datatype),
            messages: Vec::new(),
        }
    }

    pub fn failure(diagnostic: Diagnostic) -> Self {
        Self {
            fragment: CodeFragment::new(),
            datatype: None,
            messages: vec![diagnostic],
        }
    }

    pub fn fragment(&self) -> &CodeFragment {
        &self.fragment
    }

    pub fn source(&self) -> &str {
        self.fragment.source()
    }

    pub fn datatype(&self) -> Option<&ResolvedType> {
        self.datatype.as_ref()
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    /// Whether compilation failed.
    pub fn failed(&self) -> bool {
        self.datatype.is_none()
    }
}

// ============================================================================
// GENERATION ERRORS
// ============================================================================

/// Internal-consistency faults during generation of an already-valid chain.
///
/// These are not user input errors: parse-time resolution has already
/// guaranteed resolvability, so hitting one of these means the model
/// changed underneath the chain. They abort the enclosing build step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("datatype of attribute '{attribute}' is no longer resolvable")]
    UnresolvedAttributeDatatype { attribute: String },
    #[error("datatype '{name}' is not registered")]
    UnknownDatatype { name: String },
    #[error("model type '{name}' is not registered")]
    UnknownType { name: String },
    #[error("node '{kind}' cannot be generated in this position: {detail}")]
    InconsistentChain {
        kind: &'static str,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextRegion;
    use crate::parser::codes;

    #[test]
    fn test_fragment_imports_keep_first_use_order() {
        let mut fragment = CodeFragment::from_source("x");
        fragment.add_import("java.util.List");
        fragment.add_import("org.example.Helper");
        fragment.add_import("java.util.List");
        let imports: Vec<_> = fragment.imports().collect();
        assert_eq!(imports, vec!["java.util.List", "org.example.Helper"]);
    }

    #[test]
    fn test_failure_result() {
        let result = CompiledResult::failure(Diagnostic::error(
            codes::UNDEFINED_IDENTIFIER,
            "nope",
            TextRegion::new(0, 4),
        ));
        assert!(result.failed());
        assert!(result.datatype().is_none());
        assert_eq!(result.messages().len(), 1);
        assert_eq!(result.source(), "");
    }
}
