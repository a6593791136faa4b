//! Shared fixture model and assertion helpers for integration tests.

// Not every test file uses every helper.
#![allow(dead_code)]

use once_cell::sync::Lazy;

use flident::{
    Association, Attribute, EnumDatatype, ExpressionContext, IdentifierChain, ModelStore,
    ModelType, NodeKind, Parameter, ProductComponent, TypeKind, ValueDatatype,
};

/// The shared fixture model.
///
/// Insurance-flavored part:
///
/// ```text
/// Contract (policy)            contractNo: String
///   ^
/// Policy (policy, configured by PolicyProduct)
///   premium: Money, age: Integer, secret: Integer, broken: <unresolved>
///   insured      --0..1--> Person        name: String
///   coverages    --0..*--> Coverage      amount: Money
///   baseCoverage --qualified 0..1--> Coverage
/// Coverage (policy, configured by CoverageProduct)
///   adjustment   --0..1--> Adjustment    value: Decimal
///   risks        --0..*--> Risk          riskClass: String
/// ```
///
/// Plus the five-segment-scenario part: `Type --myAssociation(0..*)-->
/// Type1 --myAssociation1(qualified 0..*)--> Type2 --myAssociation2(0..*)
/// --> Type3 { myAttribute: GregorianCalendar }`.
pub static STORE: Lazy<ModelStore> = Lazy::new(fixture_store);

pub fn fixture_store() -> ModelStore {
    let mut store = ModelStore::new();

    store.add_value_datatype(ValueDatatype::new("Integer", "java.lang.Integer"));
    store.add_value_datatype(ValueDatatype::new("Decimal", "org.flident.values.Decimal"));
    store.add_value_datatype(ValueDatatype::new("Money", "org.flident.values.Money"));
    store.add_value_datatype(ValueDatatype::new("String", "java.lang.String"));
    store.add_value_datatype(ValueDatatype::new(
        "GregorianCalendar",
        "java.util.GregorianCalendar",
    ));

    store.add_enum(
        EnumDatatype::new("Gender", "org.example.model.Gender")
            .with_value("male")
            .with_value("female"),
    );
    store.add_enum(
        EnumDatatype::new("PaymentMode", "org.example.model.PaymentMode")
            .with_value("monthly")
            .with_value("annually")
            .extensible(),
    );

    // Insurance-flavored types.
    store.add_type(
        ModelType::new("Contract", TypeKind::Policy)
            .with_attribute(Attribute::new("contractNo", "String")),
    );
    store.add_type(
        ModelType::new("Policy", TypeKind::Policy)
            .with_supertype("Contract")
            .configured_by("PolicyProduct")
            .with_attribute(Attribute::new("premium", "Money"))
            .with_attribute(Attribute::new("age", "Integer"))
            .with_attribute(Attribute::new("secret", "Integer"))
            .with_attribute(Attribute::without_datatype("broken"))
            .with_association(Association::to_one("insured", "Person"))
            .with_association(Association::to_many("coverages", "Coverage"))
            .with_association(
                Association::to_one("baseCoverage", "Coverage").qualified(),
            ),
    );
    store.add_type(ModelType::new("PolicyProduct", TypeKind::Product));
    store.add_type(
        ModelType::new("Person", TypeKind::Policy)
            .with_attribute(Attribute::new("name", "String")),
    );
    store.add_type(
        ModelType::new("Coverage", TypeKind::Policy)
            .configured_by("CoverageProduct")
            .with_attribute(Attribute::new("amount", "Money"))
            .with_association(Association::to_one("adjustment", "Adjustment"))
            .with_association(Association::to_many("risks", "Risk")),
    );
    store.add_type(ModelType::new("CoverageProduct", TypeKind::Product));
    store.add_type(
        ModelType::new("Risk", TypeKind::Policy)
            .with_attribute(Attribute::new("riskClass", "String")),
    );
    store.add_type(
        ModelType::new("Adjustment", TypeKind::Policy)
            .with_attribute(Attribute::new("value", "Decimal")),
    );
    store.add_product_component(
        "CoverageProduct",
        ProductComponent::new("basic", "basic.2026", "Coverage"),
    );
    store.add_product_component(
        "CoverageProduct",
        ProductComponent::without_runtime_id("orphan", "Coverage"),
    );

    // Five-segment-scenario types.
    store.add_type(
        ModelType::new("Type", TypeKind::Policy)
            .with_association(Association::to_many("myAssociation", "Type1")),
    );
    store.add_type(
        ModelType::new("Type1", TypeKind::Policy).with_association(
            Association::to_many("myAssociation1", "Type2").qualified(),
        ),
    );
    store.add_type(
        ModelType::new("Type2", TypeKind::Policy)
            .configured_by("Type2Product")
            .with_association(Association::to_many("myAssociation2", "Type3")),
    );
    store.add_type(ModelType::new("Type2Product", TypeKind::Product));
    store.add_type(
        ModelType::new("Type3", TypeKind::Policy)
            .with_attribute(Attribute::new("myAttribute", "GregorianCalendar")),
    );
    store.add_product_component(
        "Type2Product",
        ProductComponent::new("abc123", "abc123.2026", "Type2"),
    );

    store
}

/// The standard expression context: signature parameters, allowed enums,
/// and `Policy` as the declaring type.
pub fn fixture_context() -> ExpressionContext<'static> {
    ExpressionContext::new()
        .with_parameter(Parameter::new("policy", "Policy"))
        .with_parameter(Parameter::new("person", "Person"))
        .with_parameter(Parameter::new("anyParameter", "Type"))
        .with_parameter(Parameter::without_datatype("brokenParam"))
        .with_allowed_enum("Gender")
        .with_allowed_enum("PaymentMode")
        .with_declaring_type("Policy")
}

/// The node-kind names of a chain, for sequence assertions.
pub fn kind_names(chain: &IdentifierChain) -> Vec<&'static str> {
    chain
        .iter()
        .map(|node| match node.kind() {
            NodeKind::Parameter { .. } => "Parameter",
            NodeKind::Attribute { .. } => "Attribute",
            NodeKind::Association { .. } => "Association",
            NodeKind::QualifiedAssociation { .. } => "QualifiedAssociation",
            NodeKind::IndexBasedAssociation { .. } => "IndexBasedAssociation",
            NodeKind::Index { .. } => "Index",
            NodeKind::Qualifier { .. } => "Qualifier",
            NodeKind::EnumClass { .. } => "EnumClass",
            NodeKind::EnumValue { .. } => "EnumValue",
            NodeKind::Invalid { .. } => "Invalid",
        })
        .collect()
}

/// Assert the chain ends in an `Invalid` node with the given code.
pub fn assert_invalid(chain: &IdentifierChain, code: &str) {
    let invalid = chain
        .invalid()
        .unwrap_or_else(|| panic!("expected invalid chain, got {:?}", kind_names(chain)));
    let diagnostic = invalid
        .diagnostic(&flident::Locale::english())
        .expect("invalid node carries a diagnostic");
    assert_eq!(diagnostic.code, code, "diagnostic text: {}", diagnostic.text);
}
