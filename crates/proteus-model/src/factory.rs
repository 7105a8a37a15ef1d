//! Element -> property dispatch
//!
//! The registry is a fixed table from tag to adapter. Each adapter reads the
//! kind-specific attributes and children of an element and calls the kind's
//! constructor, so factory-built properties get exactly the same defaulting
//! and repairs as hand-built ones.

use crate::error::PropertyResult;
use crate::kinds::{
    BooleanKind, ClassListProperty, DateKind, EnumProperty, FileKind, FloatKind, IntegerKind,
    MarkdownKind, SimpleKind, SimpleProperty, StringKind, TimeKind, TraceProperty, UnitProperty,
    UrlKind,
};
use crate::model::Property;
use crate::property::{PropertyBase, TokenList};
use crate::vocab::{attributes, tags};
use crate::xml::Element;

type Adapter = fn(PropertyBase, &Element) -> PropertyResult<Property>;

const REGISTRY: &[(&str, Adapter)] = &[
    (tags::STRING_PROPERTY, simple::<StringKind>),
    (tags::MARKDOWN_PROPERTY, simple::<MarkdownKind>),
    (tags::URL_PROPERTY, simple::<UrlKind>),
    (tags::FILE_PROPERTY, simple::<FileKind>),
    (tags::BOOLEAN_PROPERTY, simple::<BooleanKind>),
    (tags::INTEGER_PROPERTY, simple::<IntegerKind>),
    (tags::FLOAT_PROPERTY, simple::<FloatKind>),
    (tags::DATE_PROPERTY, simple::<DateKind>),
    (tags::TIME_PROPERTY, simple::<TimeKind>),
    (tags::ENUM_PROPERTY, enumeration),
    (tags::CLASS_LIST_PROPERTY, class_list),
    (tags::UNIT_PROPERTY, unit),
    (tags::TRACE_PROPERTY, trace),
];

fn simple<K: SimpleKind>(base: PropertyBase, element: &Element) -> PropertyResult<Property>
where
    Property: From<SimpleProperty<K>>,
{
    Ok(SimpleProperty::<K>::from_text(base, element.text()).into())
}

fn enumeration(base: PropertyBase, element: &Element) -> PropertyResult<Property> {
    let choices = element.attribute(attributes::CHOICES).map(TokenList::from);
    let value = element.text().unwrap_or_default().trim();
    Ok(EnumProperty::new(base, value, choices)?.into())
}

fn class_list(base: PropertyBase, element: &Element) -> PropertyResult<Property> {
    Ok(ClassListProperty::from_element(base, element).into())
}

fn unit(base: PropertyBase, element: &Element) -> PropertyResult<Property> {
    Ok(UnitProperty::from_element(base, element)?.into())
}

fn trace(base: PropertyBase, element: &Element) -> PropertyResult<Property> {
    Ok(TraceProperty::from_element(base, element).into())
}

/// Builds properties from XML elements
pub struct PropertyFactory;

impl PropertyFactory {
    /// Build the property described by `element`
    ///
    /// Returns `Ok(None)` when the tag is not a property tag.
    ///
    /// # Errors
    /// Returns the kind constructor's error unchanged
    pub fn create(element: &Element) -> PropertyResult<Option<Property>> {
        let Some((tag, adapter)) = REGISTRY.iter().find(|(tag, _)| *tag == element.tag()) else {
            tracing::debug!("No property kind registered for tag '{}'", element.tag());
            return Ok(None);
        };

        let base = PropertyBase::from_element(element);
        tracing::debug!("Creating {} '{}'", tag, base.name());
        adapter(base, element).map(Some)
    }

    /// Whether `tag` names a property kind
    #[inline]
    #[must_use]
    pub fn is_property_tag(tag: &str) -> bool {
        REGISTRY.iter().any(|(registered, _)| *registered == tag)
    }

    /// Every registered tag, in registry order
    pub fn tags() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(tag, _)| *tag)
    }
}
