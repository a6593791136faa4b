//! Node generators — fold a resolved chain into a target-code fragment.
//!
//! Dispatch is an exhaustive match over the closed node kind set; each arm
//! owns the knowledge of how its kind is rendered in single-object vs.
//! list (iterated) context. List-context access is rendered through the
//! runtime's `FormulaEvaluatorUtil` helper classes, which map a
//! single-element accessor over the elements and flatten.

use tracing::debug;

use super::fragment::{CodeFragment, CodegenError, CompiledResult};
use crate::model::{Association, Datatype, ModelStore, ResolvedType, simple_class_name};
use crate::parser::{IdentifierChain, IdentifierNode, Locale, NodeKind};

const FORMULA_EVALUATOR_UTIL: &str = "org.flident.runtime.formula.FormulaEvaluatorUtil";
const JAVA_UTIL_LIST: &str = "java.util.List";

/// One folded generation step: the fragment so far and its resulting type.
struct Step {
    fragment: CodeFragment,
    resolved: ResolvedType,
}

/// Generate the compiled result for a resolved chain.
///
/// A chain ending in an `Invalid` node yields a failed [`CompiledResult`]
/// carrying the node's diagnostic. A generation fault on a *valid* chain is
/// an internal-consistency violation and is returned as `Err`.
pub(crate) fn generate_chain(
    chain: &IdentifierChain,
    store: &ModelStore,
    locale: &Locale,
) -> Result<CompiledResult, CodegenError> {
    let mut prev: Option<Step> = None;
    for node in chain.iter() {
        if node.is_invalid() {
            let diagnostic = node
                .diagnostic(locale)
                .expect("invalid nodes carry a diagnostic");
            debug!(code = diagnostic.code, "generation of invalid chain");
            return Ok(CompiledResult::failure(diagnostic));
        }
        prev = Some(generate_node(store, node, prev.as_ref())?);
    }
    let step = prev.expect("chains are never empty");
    Ok(CompiledResult::success(step.fragment, step.resolved))
}

fn generate_node(
    store: &ModelStore,
    node: &IdentifierNode,
    prev: Option<&Step>,
) -> Result<Step, CodegenError> {
    let resolved = resolved_type(node)?.clone();
    let fragment = match node.kind() {
        NodeKind::Parameter { parameter } => {
            CodeFragment::from_source(parameter.name.as_str())
        }

        NodeKind::Attribute {
            attribute,
            owner,
            is_default_value_access,
        } => {
            let datatype_name = attribute.datatype.as_ref().ok_or_else(|| {
                CodegenError::UnresolvedAttributeDatatype {
                    attribute: attribute.name.to_string(),
                }
            })?;
            let getter = if *is_default_value_access {
                format!("getDefault{}", cap(&attribute.name))
            } else {
                format!("get{}", cap(&attribute.name))
            };
            let mut fragment = CodeFragment::new();
            if let Some(prev) = prev {
                fragment.merge_imports(&prev.fragment);
            }
            if let Some(prev) = prev.filter(|p| p.resolved.is_list()) {
                // Map the accessor over the list elements.
                let source_type = source_interface(prev)?;
                let datatype = store.resolve_datatype(datatype_name).ok_or_else(|| {
                    CodegenError::UnknownDatatype {
                        name: datatype_name.to_string(),
                    }
                })?;
                let value_class = java_class_of(&datatype, &mut fragment);
                fragment.add_import(FORMULA_EVALUATOR_UTIL);
                fragment.append(&format!(
                    "new FormulaEvaluatorUtil.AttributeAccessorHelper<{source_type}, {value_class}>(){{@Override protected {value_class} getValueInternal({source_type} sourceObject){{return sourceObject.{getter}();}}}}.getAttributeValues({})",
                    prev.fragment.source()
                ));
            } else {
                // Configuration-by-product defaults live on the product
                // component generation, one accessor hop away.
                let hop = if *is_default_value_access && is_configured(store, owner)? {
                    ".getProductCmptGeneration()"
                } else {
                    ""
                };
                match prev {
                    Some(prev) => fragment.append(&format!(
                        "{}{hop}.{getter}()",
                        prev.fragment.source()
                    )),
                    // First-segment attribute access on the declaring type:
                    // implicit receiver.
                    None => fragment.append(&format!(
                        "{}{getter}()",
                        hop.strip_prefix('.')
                            .map(|h| format!("{h}."))
                            .unwrap_or_default()
                    )),
                }
            }
            fragment
        }

        NodeKind::Association { association } => {
            let prev = prev.ok_or_else(|| inconsistent("association", "no predecessor"))?;
            association_fragment(association, prev)?
        }

        NodeKind::QualifiedAssociation {
            association,
            runtime_id,
            ..
        } => {
            let prev = prev
                .ok_or_else(|| inconsistent("qualified association", "no predecessor"))?;
            let base = association_fragment(association, prev)?;
            lookup_by_id(&base, runtime_id, resolved.is_list())
        }

        NodeKind::Qualifier { runtime_id, .. } => {
            let prev = prev.ok_or_else(|| inconsistent("qualifier", "no predecessor"))?;
            lookup_by_id(&prev.fragment, runtime_id, resolved.is_list())
        }

        NodeKind::IndexBasedAssociation { association, index } => {
            let prev = prev
                .ok_or_else(|| inconsistent("indexed association", "no predecessor"))?;
            let base = association_list_fragment(association, prev)?;
            let mut fragment = CodeFragment::new();
            fragment.merge_imports(&base);
            fragment.append(&format!("{}.get({index})", base.source()));
            fragment
        }

        NodeKind::Index { index } => {
            let prev = prev.ok_or_else(|| inconsistent("index", "no predecessor"))?;
            let mut fragment = CodeFragment::new();
            fragment.merge_imports(&prev.fragment);
            fragment.append(&format!("{}.get({index})", prev.fragment.source()));
            fragment
        }

        NodeKind::EnumClass { .. } => {
            if prev.is_some() {
                return Err(inconsistent("enum class", "enum classes head a chain"));
            }
            CodeFragment::new()
        }

        NodeKind::EnumValue {
            enum_datatype,
            value,
        } => {
            let mut fragment = CodeFragment::new();
            fragment.add_import(enum_datatype.java_class.to_string());
            let simple = enum_datatype.java_class_simple();
            if enum_datatype.extensible {
                // Content-based enumerations have no literal constants;
                // their values are looked up in the runtime repository.
                fragment.append(&format!(
                    "getRepository().getEnumValue({simple}.class, \"{value}\")"
                ));
            } else {
                fragment.append(&format!("{simple}.{value}"));
            }
            fragment
        }

        NodeKind::Invalid { .. } => {
            return Err(inconsistent("invalid", "handled before dispatch"));
        }
    };
    Ok(Step { fragment, resolved })
}

// ============================================================================
// FRAGMENT BUILDING BLOCKS
// ============================================================================

/// The accessor fragment for an association step: a direct getter in
/// single-object context, a helper-class wrapper mapping the getter over
/// the elements in list context.
fn association_fragment(
    association: &Association,
    prev: &Step,
) -> Result<CodeFragment, CodegenError> {
    let mut fragment = CodeFragment::new();
    fragment.merge_imports(&prev.fragment);
    let getter = format!("get{}", cap(&association.name));
    if prev.resolved.is_list() {
        let source_type = source_interface(prev)?;
        let target_type = published_interface(&association.target);
        fragment.add_import(FORMULA_EVALUATOR_UTIL);
        if association.is_to_many() {
            fragment.add_import(JAVA_UTIL_LIST);
            fragment.append(&format!(
                "new FormulaEvaluatorUtil.AssociationToManyHelper<{source_type}, {target_type}>(){{@Override protected List<{target_type}> getTargetsInternal({source_type} sourceObject){{return sourceObject.{getter}();}}}}.getTargets({})",
                prev.fragment.source()
            ));
        } else {
            fragment.append(&format!(
                "new FormulaEvaluatorUtil.AssociationTo1Helper<{source_type}, {target_type}>(){{@Override protected {target_type} getTargetInternal({source_type} sourceObject){{return sourceObject.{getter}();}}}}.getTargets({})",
                prev.fragment.source()
            ));
        }
    } else {
        fragment.append(&format!("{}.{getter}()", prev.fragment.source()));
    }
    Ok(fragment)
}

/// Like [`association_fragment`], but guaranteeing a `List`-typed fragment
/// so an index can select from it. A to-one association reached through
/// list context already yields a list via the to-1 helper.
fn association_list_fragment(
    association: &Association,
    prev: &Step,
) -> Result<CodeFragment, CodegenError> {
    if !prev.resolved.is_list() && !association.is_to_many() {
        return Err(inconsistent(
            "indexed association",
            "to-one association without list context",
        ));
    }
    association_fragment(association, prev)
}

/// A runtime-id lookup over an association result: single element or
/// filtered list, depending on the node's list context.
fn lookup_by_id(base: &CodeFragment, runtime_id: &str, is_list: bool) -> CodeFragment {
    let mut fragment = CodeFragment::new();
    fragment.merge_imports(base);
    fragment.add_import(FORMULA_EVALUATOR_UTIL);
    let method = if is_list {
        "getListModelObjectById"
    } else {
        "getModelObjectById"
    };
    fragment.append(&format!(
        "FormulaEvaluatorUtil.{method}({}, \"{runtime_id}\")",
        base.source()
    ));
    fragment
}

// ============================================================================
// NAMING HELPERS
// ============================================================================

fn cap(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The published interface of a model type.
fn published_interface(type_name: &str) -> String {
    format!("I{type_name}")
}

/// The published interface of the predecessor's element type.
fn source_interface(prev: &Step) -> Result<String, CodegenError> {
    prev.resolved
        .element()
        .model_type_name()
        .map(|name| published_interface(name))
        .ok_or_else(|| inconsistent("list access", "predecessor is not a model type"))
}

/// The Java class a datatype is rendered as, importing it if qualified.
fn java_class_of(datatype: &Datatype, fragment: &mut CodeFragment) -> String {
    match datatype.element() {
        Datatype::Value(value) => {
            fragment.add_import(value.java_class.to_string());
            simple_class_name(&value.java_class).to_string()
        }
        Datatype::Enum(enum_datatype) => {
            fragment.add_import(enum_datatype.java_class.to_string());
            enum_datatype.java_class_simple().to_string()
        }
        Datatype::Model(name) => published_interface(name),
        Datatype::List(_) => unreachable!("element() strips the list wrapping"),
    }
}

fn resolved_type(node: &IdentifierNode) -> Result<&ResolvedType, CodegenError> {
    node.resolved_type()
        .ok_or_else(|| inconsistent("invalid", "invalid nodes carry no type"))
}

fn is_configured(store: &ModelStore, type_name: &str) -> Result<bool, CodegenError> {
    store
        .find_type(type_name)
        .map(|t| t.is_configured())
        .ok_or_else(|| CodegenError::UnknownType {
            name: type_name.to_string(),
        })
}

fn inconsistent(kind: &'static str, detail: impl Into<String>) -> CodegenError {
    CodegenError::InconsistentChain {
        kind,
        detail: detail.into(),
    }
}
