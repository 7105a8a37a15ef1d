//! Testing utilities for the PROTEUS properties workspace
//!
//! Element fixtures built the way a document writer would lay them out, so
//! tests can compare factory output byte-for-byte.

#![allow(missing_docs)]

use proteus_model::vocab::{attributes, tags};
use proteus_model::{Element, Property, PropertyFactory};

/// Property element carrying only the common attributes
///
/// Optional attributes are written only when set, matching the canonical
/// layout.
pub fn create_property_element(
    tag: &str,
    name: &str,
    category: &str,
    tooltip: Option<&str>,
    required: bool,
    inmutable: bool,
) -> Element {
    let mut element = Element::new(tag)
        .with_attribute(attributes::NAME, name)
        .with_attribute(attributes::CATEGORY, category);
    if let Some(tooltip) = tooltip {
        element.set_attribute(attributes::TOOLTIP, tooltip);
    }
    if required {
        element.set_attribute(attributes::REQUIRED, "true");
    }
    if inmutable {
        element.set_attribute(attributes::INMUTABLE, "true");
    }
    element
}

/// Canonical `unitProperty` element
pub fn create_unit_property_element(name: &str, units: &str, value: &str, unit: &str) -> Element {
    create_property_element(tags::UNIT_PROPERTY, name, "general", None, false, false)
        .with_attribute(attributes::UNITS, units)
        .with_child(Element::new(tags::VALUE).with_text(value))
        .with_child(Element::new(tags::UNIT).with_text(unit))
}

/// Canonical `traceProperty` element
///
/// Filters and limit are written only when they differ from the defaults.
pub fn create_trace_element(
    name: &str,
    targets: &[&str],
    accepted: &[&str],
    excluded: &[&str],
    trace_type: &str,
    max_targets_number: Option<i64>,
) -> Element {
    let mut element = create_property_element(tags::TRACE_PROPERTY, name, "general", None, false, false);
    if !accepted.is_empty() {
        element.set_attribute(attributes::ACCEPTED_TARGETS, accepted.join(" "));
    }
    if !excluded.is_empty() {
        element.set_attribute(attributes::EXCLUDED_TARGETS, excluded.join(" "));
    }
    element.set_attribute(attributes::TRACE_TYPE, trace_type);
    if let Some(max) = max_targets_number {
        element.set_attribute(attributes::MAX_TARGETS_NUMBER, max.to_string());
    }
    for target in targets {
        element.push_child(
            Element::new(tags::TRACE)
                .with_attribute(attributes::TARGET, *target)
                .with_attribute(attributes::TRACE_TYPE, trace_type),
        );
    }
    element
}

/// One canonical element per property kind
pub fn canonical_elements() -> Vec<Element> {
    vec![
        create_property_element(tags::STRING_PROPERTY, "title", "general", Some("Document title"), true, false)
            .with_cdata("PROTEUS <draft>"),
        create_property_element(tags::MARKDOWN_PROPERTY, "summary", "general", None, false, false)
            .with_cdata("# Heading\n\n*text*"),
        create_property_element(tags::URL_PROPERTY, "homepage", "links", None, false, false)
            .with_cdata("https://example.org/a?b=c&d=e"),
        create_property_element(tags::FILE_PROPERTY, "logo", "assets", None, false, true)
            .with_cdata("assets/logo.png"),
        create_property_element(tags::BOOLEAN_PROPERTY, "draft", "general", None, false, false)
            .with_text("true"),
        create_property_element(tags::INTEGER_PROPERTY, "revision", "general", None, false, false)
            .with_text("-42"),
        create_property_element(tags::FLOAT_PROPERTY, "weight", "general", None, false, false)
            .with_text("2.5"),
        create_property_element(tags::DATE_PROPERTY, "created", "dates", None, true, true)
            .with_text("2024-12-17"),
        create_property_element(tags::TIME_PROPERTY, "at", "dates", None, false, false)
            .with_text("09:05:00"),
        create_property_element(tags::ENUM_PROPERTY, "status", "general", None, false, false)
            .with_attribute(attributes::CHOICES, "draft review final")
            .with_text("review"),
        create_property_element(tags::CLASS_LIST_PROPERTY, "classes", "general", None, false, false)
            .with_child(Element::new(tags::CLASS).with_text("section"))
            .with_child(Element::new(tags::CLASS).with_text("figure")),
        create_unit_property_element("age", "years days hours", "1.0", "years"),
        create_trace_element("refs", &["s1", "s2"], &["section"], &["appendix"], "cites", Some(5)),
    ]
}

/// Build a property from an element, panicking on failure or unknown tag
pub fn build(element: &Element) -> Property {
    PropertyFactory::create(element)
        .unwrap()
        .unwrap_or_else(|| panic!("<{}> is not a property tag", element.tag()))
}

/// Canonical serialization, panicking on writer failure
pub fn xml_string(element: &Element) -> String {
    element.to_xml().unwrap()
}
