//! Tests for chain orchestration — segmenting, resolver ordering, and the
//! assembled node chains.

mod helpers;

use flident::{Datatype, IdentifierParser, NodeKind, codes};
use helpers::{STORE, assert_invalid, fixture_context, kind_names};

fn parse(identifier: &str) -> flident::IdentifierChain {
    let context = fixture_context();
    IdentifierParser::new(&STORE, &context).parse(identifier)
}

#[test]
fn test_single_parameter() {
    let chain = parse("policy");
    assert_eq!(kind_names(&chain), vec!["Parameter"]);
    assert!(chain.is_valid());
    let node = chain.head();
    assert!(!node.is_list_of_types());
    assert_eq!(
        node.resolved_type().unwrap().element(),
        &Datatype::Model("Policy".into())
    );
    assert!(chain.successor_of(0).is_none());
}

#[test]
fn test_unknown_first_segment_is_undefined() {
    let chain = parse("bogus");
    assert_eq!(kind_names(&chain), vec!["Invalid"]);
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
}

#[test]
fn test_parameter_without_datatype_is_undefined() {
    let chain = parse("brokenParam");
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
}

#[test]
fn test_empty_string_yields_single_invalid_node() {
    let chain = parse("");
    assert_eq!(chain.len(), 1);
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
    let region = chain.head().region();
    assert_eq!((region.start(), region.end()), (0, 0));
}

#[test]
fn test_parameter_association_attribute() {
    let chain = parse("policy.insured.name");
    assert_eq!(
        kind_names(&chain),
        vec!["Parameter", "Association", "Attribute"]
    );
    assert!(chain.is_valid());
    // to-one association: everything stays scalar
    assert!(chain.iter().all(|n| !n.is_list_of_types()));
}

#[test]
fn test_to_many_association_propagates_list_context() {
    let chain = parse("policy.coverages.amount");
    assert_eq!(
        kind_names(&chain),
        vec!["Parameter", "Association", "Attribute"]
    );
    assert!(chain.get(1).unwrap().is_list_of_types());
    // the scalar attribute is mapped over the list
    let tail = chain.tail();
    assert!(tail.is_list_of_types());
    assert_eq!(tail.resolved_type().unwrap().element().name(), "Money");
}

#[test]
fn test_resolution_stops_at_first_invalid() {
    let chain = parse("policy.bogus.name.more");
    assert_eq!(kind_names(&chain), vec!["Parameter", "Invalid"]);
    // remaining segments are not processed; the diagnostic covers the rest
    let invalid = chain.tail();
    assert_eq!(invalid.region().slice("policy.bogus.name.more"), "bogus.name.more");
}

#[test]
fn test_five_segment_scenario() {
    let source = "anyParameter.myAssociation.myAssociation1[\"abc123\"].myAssociation2[0].myAttribute";
    let chain = parse(source);
    assert_eq!(
        kind_names(&chain),
        vec![
            "Parameter",
            "Association",
            "QualifiedAssociation",
            "IndexBasedAssociation",
            "Attribute",
        ]
    );
    assert!(chain.is_valid());

    let list_flags: Vec<_> = chain.iter().map(|n| n.is_list_of_types()).collect();
    assert_eq!(list_flags, vec![false, true, true, false, false]);

    let indexed = chain.get(3).unwrap();
    assert_eq!(
        indexed.resolved_type().unwrap().element(),
        &Datatype::Model("Type3".into())
    );
    let tail = chain.tail();
    assert_eq!(tail.resolved_type().unwrap().element().name(), "GregorianCalendar");
    match tail.kind() {
        NodeKind::Attribute { attribute, .. } => assert_eq!(attribute.name, "myAttribute"),
        other => panic!("expected attribute tail, got {other:?}"),
    }
}

#[test]
fn test_reparse_of_chain_text_is_idempotent() {
    let sources = [
        "policy",
        "policy.insured.name",
        "policy.coverages[\"basic\"]",
        "anyParameter.myAssociation.myAssociation1[\"abc123\"].myAssociation2[0].myAttribute",
        "policy.premium@default",
        "Gender.male",
    ];
    for source in sources {
        let chain = parse(source);
        assert!(chain.is_valid(), "fixture identifier must resolve: {source}");
        let reparsed = parse(&chain.text());
        assert_eq!(
            kind_names(&chain),
            kind_names(&reparsed),
            "re-parsing {:?} changed the chain",
            chain.text()
        );
    }
}

#[test]
fn test_determinism() {
    let source = "policy.coverages[\"basic\"].adjustment";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn test_enum_class_and_value() {
    let chain = parse("Gender.male");
    assert_eq!(kind_names(&chain), vec!["EnumClass", "EnumValue"]);
    for node in chain.iter() {
        assert_eq!(node.resolved_type().unwrap().element().name(), "Gender");
    }
}

#[test]
fn test_unknown_enum_value_is_undefined() {
    let chain = parse("Gender.unknown");
    assert_eq!(kind_names(&chain), vec!["EnumClass", "Invalid"]);
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
}

#[test]
fn test_enum_not_in_scope_falls_through() {
    // Not allowed in the context, not a parameter either: undefined.
    let context = flident::ExpressionContext::new().with_declaring_type("Policy");
    let chain = IdentifierParser::new(&STORE, &context).parse("Gender.male");
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
}

#[test]
fn test_declaring_type_attribute_as_first_segment() {
    let chain = parse("premium");
    assert_eq!(kind_names(&chain), vec!["Attribute"]);
    assert_eq!(chain.head().resolved_type().unwrap().element().name(), "Money");
}

#[test]
fn test_trailing_dot_is_undefined() {
    let chain = parse("policy.");
    assert_eq!(kind_names(&chain), vec!["Parameter", "Invalid"]);
    assert_invalid(&chain, codes::UNDEFINED_IDENTIFIER);
}

#[test]
fn test_qualifier_with_dots_inside_quotes() {
    // The quoted qualifier may contain dots; segmentation must not split it.
    let chain = parse("policy.coverages[\"no.such.component\"]");
    assert_eq!(kind_names(&chain), vec!["Parameter", "Invalid"]);
    assert_invalid(&chain, codes::UNKNOWN_QUALIFIER);
}

#[test]
fn test_node_regions_cover_their_segments() {
    let source = "policy.coverages[\"basic\"]";
    let chain = parse(source);
    assert_eq!(chain.head().region().slice(source), "policy");
    assert_eq!(
        chain.tail().region().slice(source),
        "coverages[\"basic\"]"
    );
}
