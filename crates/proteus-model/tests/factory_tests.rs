use pretty_assertions::assert_eq;
use proteus_model::vocab::{tags, DEFAULT_TRACE_TYPE, NO_TARGETS_LIMIT, PROTEUS_ANY};
use proteus_model::{Element, Measurement, Property, PropertyFactory, PropertyKind, PropertyValue};
use proteus_test_utils::{build, create_property_element, create_trace_element, create_unit_property_element};

#[test]
fn test_unknown_tag_is_not_an_error() {
    let element = create_property_element("colorProperty", "c", "general", None, false, false);
    assert!(PropertyFactory::create(&element).unwrap().is_none());
}

#[test]
fn test_every_registered_tag_is_recognized() {
    for tag in PropertyFactory::tags() {
        assert!(PropertyFactory::is_property_tag(tag), "{tag}");
    }
    assert!(!PropertyFactory::is_property_tag(tags::PROPERTIES));
}

#[test]
fn test_unit_out_of_vocabulary_is_repaired() {
    let element = create_unit_property_element("age", "years days", "1.0", "seconds");
    let property = build(&element);
    assert_eq!(
        property.value(),
        PropertyValue::Measurement(Measurement::new(1.0, "years").unwrap())
    );
}

#[test]
fn test_unit_missing_child_is_repaired() {
    let element = create_property_element(tags::UNIT_PROPERTY, "age", "general", None, false, false)
        .with_attribute("units", "years days")
        .with_child(Element::new(tags::VALUE).with_text("5"));
    let property = build(&element);
    assert_eq!(
        property.value(),
        PropertyValue::Measurement(Measurement::new(0_i64, "years").unwrap())
    );
}

#[test]
fn test_unit_multi_word_unit_fails() {
    let element = create_unit_property_element("age", "years", "1.0", "light years");
    let err = PropertyFactory::create(&element).unwrap_err();
    assert!(err.is_invalid_value());
}

#[test]
fn test_trace_scenario() {
    let element = create_trace_element("refs", &["a", "b", "c"], &[], &[], "t", Some(2));
    let Property::Trace(trace) = build(&element) else {
        panic!("expected a trace property");
    };
    assert_eq!(trace.value(), &["a", "b"]);
    assert_eq!(trace.max_targets_number(), 2);
    assert_eq!(trace.accepted_targets(), [PROTEUS_ANY]);
}

#[test]
fn test_trace_negative_limit() {
    let element = create_trace_element("refs", &["a"], &[], &[], "", Some(-3));
    let Property::Trace(trace) = build(&element) else {
        panic!("expected a trace property");
    };
    assert_eq!(trace.max_targets_number(), NO_TARGETS_LIMIT);
    assert_eq!(trace.trace_type(), DEFAULT_TRACE_TYPE);
}

#[test]
fn test_trace_filters_split_on_whitespace() {
    let element = create_trace_element("refs", &[], &["section", "figure"], &["appendix"], "t", None);
    let Property::Trace(trace) = build(&element) else {
        panic!("expected a trace property");
    };
    assert_eq!(trace.accepted_targets(), ["section", "figure"]);
    assert_eq!(trace.excluded_targets(), ["appendix"]);
}

#[test]
fn test_parsed_document_with_comments() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- document object -->
<properties>
    <floatProperty name="ratio" category="general">  0.5  </floatProperty>
    <timeProperty name="at" category="general">25:00:00</timeProperty>
</properties>"#;
    let root = Element::parse(xml).unwrap();
    let properties: Vec<Property> = root
        .children()
        .iter()
        .filter_map(|child| PropertyFactory::create(child).unwrap())
        .collect();

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].value(), PropertyValue::Float(0.5));
    assert!(matches!(properties[1].value(), PropertyValue::Time(_)));
}
