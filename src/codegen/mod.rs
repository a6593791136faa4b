//! Code generation — compiling a resolved identifier chain into target
//! expressions.
//!
//! ## Key Types
//!
//! - [`IdentifierCompiler`] — parse + generate facade
//! - [`CompiledResult`] — fragment, resulting datatype, failure messages
//! - [`CodeFragment`] — accumulated source text and imports
//! - [`CodegenError`] — fatal internal-consistency faults (never user input
//!   validation)

mod fragment;
mod generators;

pub use fragment::{CodeFragment, CodegenError, CompiledResult};

use crate::model::ModelStore;
use crate::parser::{ExpressionContext, IdentifierChain, IdentifierParser, Locale};

/// Generate the compiled result for an already-parsed chain.
pub fn generate(
    chain: &IdentifierChain,
    store: &ModelStore,
    locale: &Locale,
) -> Result<CompiledResult, CodegenError> {
    generators::generate_chain(chain, store, locale)
}

/// Compiles identifier expressions: parse, then fold the chain through the
/// node generators.
pub struct IdentifierCompiler<'a> {
    store: &'a ModelStore,
    context: &'a ExpressionContext<'a>,
}

impl<'a> IdentifierCompiler<'a> {
    pub fn new(store: &'a ModelStore, context: &'a ExpressionContext<'a>) -> Self {
        Self { store, context }
    }

    /// Parse without generating.
    pub fn parse(&self, identifier: &str) -> IdentifierChain {
        IdentifierParser::new(self.store, self.context).parse(identifier)
    }

    /// Compile an identifier expression. Malformed input yields a failed
    /// [`CompiledResult`] with diagnostics localized per `locale`; an `Err`
    /// signals a model/parse inconsistency and should abort the enclosing
    /// build step.
    pub fn compile(
        &self,
        identifier: &str,
        locale: &Locale,
    ) -> Result<CompiledResult, CodegenError> {
        let chain = self.parse(identifier);
        generate(&chain, self.store, locale)
    }
}
