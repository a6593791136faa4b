//! Expression context — what a formula may legally reference.
//!
//! Holds the formula's signature parameters, the enumeration datatypes
//! admissible in its evaluation scope, the optional declaring type for
//! first-segment attribute access, and the identifier permission filter.

use smol_str::SmolStr;

use crate::model::{AllowAll, IdentifierFilter, Parameter};

/// The resolution context of one formula expression.
pub struct ExpressionContext<'a> {
    parameters: Vec<Parameter>,
    /// Names of enum datatypes allowed as chain heads in this scope.
    allowed_enums: Vec<SmolStr>,
    /// The expression's own declaring type; first-segment attribute access
    /// resolves against it.
    declaring_type: Option<SmolStr>,
    filter: &'a dyn IdentifierFilter,
}

impl Default for ExpressionContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ExpressionContext<'a> {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            allowed_enums: Vec::new(),
            declaring_type: None,
            filter: &AllowAll,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_allowed_enum(mut self, name: impl Into<SmolStr>) -> Self {
        self.allowed_enums.push(name.into());
        self
    }

    pub fn with_declaring_type(mut self, name: impl Into<SmolStr>) -> Self {
        self.declaring_type = Some(name.into());
        self
    }

    pub fn with_filter(mut self, filter: &'a dyn IdentifierFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_enum_allowed(&self, name: &str) -> bool {
        self.allowed_enums.iter().any(|e| e == name)
    }

    pub fn declaring_type(&self) -> Option<&SmolStr> {
        self.declaring_type.as_ref()
    }

    pub fn filter(&self) -> &dyn IdentifierFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterKind;

    #[test]
    fn test_parameter_lookup_is_exact() {
        let context = ExpressionContext::new()
            .with_parameter(Parameter::new("policy", "Policy"));
        assert!(context.parameter("policy").is_some());
        assert!(context.parameter("Policy").is_none());
    }

    #[test]
    fn test_allowed_enums() {
        let context = ExpressionContext::new().with_allowed_enum("Gender");
        assert!(context.is_enum_allowed("Gender"));
        assert!(!context.is_enum_allowed("Other"));
    }

    #[test]
    fn test_default_filter_allows_everything() {
        let context = ExpressionContext::new();
        assert!(context.filter().is_allowed("anything", FilterKind::Attribute));
    }
}
