//! Closed sum over every property kind
//!
//! [`Property`] is what the factory produces and what a [`crate::PropertySet`]
//! stores. Kind-specific APIs stay on the concrete types; this enum offers the
//! kind-agnostic surface (tag, base, XML, comparison, dynamic clone).

use serde::Serialize;

use crate::error::{PropertyError, PropertyResult};
use crate::kinds::{
    BooleanProperty, ClassListProperty, DateProperty, EnumProperty, FileProperty, FloatProperty,
    IntegerProperty, MarkdownProperty, StringProperty, TimeProperty, TraceProperty, UnitProperty,
    UrlProperty,
};
use crate::property::{PropertyBase, PropertyKind, PropertyValue, TokenList};
use crate::xml::Element;

/// Any property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Property {
    String(StringProperty),
    Markdown(MarkdownProperty),
    Url(UrlProperty),
    File(FileProperty),
    Boolean(BooleanProperty),
    Integer(IntegerProperty),
    Float(FloatProperty),
    Date(DateProperty),
    Time(TimeProperty),
    Enum(EnumProperty),
    ClassList(ClassListProperty),
    Unit(UnitProperty),
    Trace(TraceProperty),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Property::String($p) => $body,
            Property::Markdown($p) => $body,
            Property::Url($p) => $body,
            Property::File($p) => $body,
            Property::Boolean($p) => $body,
            Property::Integer($p) => $body,
            Property::Float($p) => $body,
            Property::Date($p) => $body,
            Property::Time($p) => $body,
            Property::Enum($p) => $body,
            Property::ClassList($p) => $body,
            Property::Unit($p) => $body,
            Property::Trace($p) => $body,
        }
    };
}

fn fixed_tag<K: PropertyKind>(_: &K) -> &'static str {
    K::TAG
}

impl Property {
    /// XML tag of the wrapped kind
    #[must_use]
    pub fn tag(&self) -> &'static str {
        dispatch!(self, p => fixed_tag(p))
    }

    /// Common attributes
    #[must_use]
    pub fn base(&self) -> &PropertyBase {
        dispatch!(self, p => p.base())
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.base().name()
    }

    /// Generate the XML element for this property
    #[must_use]
    pub fn generate_xml(&self) -> Element {
        dispatch!(self, p => p.generate_xml())
    }

    /// Structural equality; properties of different kinds are never equal
    #[must_use]
    pub fn compare(&self, other: &Property) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a.compare(b),
            (Self::Markdown(a), Self::Markdown(b)) => a.compare(b),
            (Self::Url(a), Self::Url(b)) => a.compare(b),
            (Self::File(a), Self::File(b)) => a.compare(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.compare(b),
            (Self::Integer(a), Self::Integer(b)) => a.compare(b),
            (Self::Float(a), Self::Float(b)) => a.compare(b),
            (Self::Date(a), Self::Date(b)) => a.compare(b),
            (Self::Time(a), Self::Time(b)) => a.compare(b),
            (Self::Enum(a), Self::Enum(b)) => a.compare(b),
            (Self::ClassList(a), Self::ClassList(b)) => a.compare(b),
            (Self::Unit(a), Self::Unit(b)) => a.compare(b),
            (Self::Trace(a), Self::Trace(b)) => a.compare(b),
            _ => false,
        }
    }

    /// Kind-agnostic view of the payload
    #[must_use]
    pub fn value(&self) -> PropertyValue {
        match self {
            Self::String(p) => p.dynamic_value(),
            Self::Markdown(p) => p.dynamic_value(),
            Self::Url(p) => p.dynamic_value(),
            Self::File(p) => p.dynamic_value(),
            Self::Boolean(p) => p.dynamic_value(),
            Self::Integer(p) => p.dynamic_value(),
            Self::Float(p) => p.dynamic_value(),
            Self::Date(p) => p.dynamic_value(),
            Self::Time(p) => p.dynamic_value(),
            Self::Enum(p) => PropertyValue::Text(p.value().clone()),
            Self::ClassList(p) => PropertyValue::List(p.value().clone()),
            Self::Unit(p) => PropertyValue::Measurement(p.value().clone()),
            Self::Trace(p) => PropertyValue::List(p.value().clone()),
        }
    }

    /// Independent copy, optionally with a new kind-agnostic payload
    ///
    /// A unit property given something other than a measurement is repaired
    /// to its default value, like at construction.
    ///
    /// # Errors
    /// - `InvalidValue` if the payload does not fit the kind
    /// - the kind's construction error for an invalid payload
    pub fn clone_with(&self, new_value: Option<PropertyValue>) -> PropertyResult<Property> {
        let Some(value) = new_value else {
            return Ok(self.clone());
        };

        Ok(match (self, value) {
            (Self::String(p), value) => Self::String(p.clone_with_dynamic(value)?),
            (Self::Markdown(p), value) => Self::Markdown(p.clone_with_dynamic(value)?),
            (Self::Url(p), value) => Self::Url(p.clone_with_dynamic(value)?),
            (Self::File(p), value) => Self::File(p.clone_with_dynamic(value)?),
            (Self::Boolean(p), value) => Self::Boolean(p.clone_with_dynamic(value)?),
            (Self::Integer(p), value) => Self::Integer(p.clone_with_dynamic(value)?),
            (Self::Float(p), value) => Self::Float(p.clone_with_dynamic(value)?),
            (Self::Date(p), value) => Self::Date(p.clone_with_dynamic(value)?),
            (Self::Time(p), value) => Self::Time(p.clone_with_dynamic(value)?),
            (Self::Enum(p), PropertyValue::Text(text)) => Self::Enum(p.clone_with(Some(text))?),
            (Self::ClassList(p), PropertyValue::List(list)) => {
                Self::ClassList(p.clone_with(Some(list))?)
            }
            (Self::Trace(p), PropertyValue::List(list)) => Self::Trace(p.clone_with(Some(list))?),
            (Self::Unit(p), PropertyValue::Measurement(measurement)) => {
                Self::Unit(p.clone_with(Some(measurement))?)
            }
            (Self::Unit(p), _) => Self::Unit(UnitProperty::new(
                p.base().clone(),
                None,
                Some(TokenList::List(p.units().to_vec())),
            )?),
            (property, value) => {
                return Err(PropertyError::invalid_value(format!(
                    "{} '{}' cannot hold a {} value",
                    property.tag(),
                    property.name(),
                    value.type_name()
                )))
            }
        })
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident => $kind:ty),* $(,)?) => {
        $(
            impl From<$kind> for Property {
                fn from(property: $kind) -> Self {
                    Self::$variant(property)
                }
            }
        )*
    };
}

impl_from_kind! {
    String => StringProperty,
    Markdown => MarkdownProperty,
    Url => UrlProperty,
    File => FileProperty,
    Boolean => BooleanProperty,
    Integer => IntegerProperty,
    Float => FloatProperty,
    Date => DateProperty,
    Time => TimeProperty,
    Enum => EnumProperty,
    ClassList => ClassListProperty,
    Unit => UnitProperty,
    Trace => TraceProperty,
}
