//! Simple-value property kinds
//!
//! A simple property is its base attributes plus one scalar payload written as
//! the element's text. The kinds differ only in how that text is read and
//! written, so they share [`SimpleProperty<K>`] parameterized by a
//! [`SimpleKind`] marker.
//!
//! Unreadable text never fails construction: the kind's default is assigned
//! and a warning is logged.

use std::fmt::Debug;
use std::marker::PhantomData;

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{PropertyError, PropertyResult};
use crate::measurement::float_text;
use crate::property::{private, PropertyBase, PropertyKind, PropertyValue};
use crate::vocab::tags;
use crate::xml::{Element, Text};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Text codec of a simple property kind
///
/// Sealed: only the kinds in this module exist.
pub trait SimpleKind: Debug + Clone + Copy + PartialEq + Send + Sync + 'static + private::Sealed {
    /// XML tag
    const TAG: &'static str;

    /// Payload type
    type Value: Debug + Clone + PartialEq + Send + Sync + Serialize;

    /// Value assigned when the text cannot be read
    fn default_value() -> Self::Value;

    /// Read the element text; `None` when unreadable
    fn parse_text(text: &str) -> Option<Self::Value>;

    /// Element text for a value
    fn render(value: &Self::Value) -> Text;

    /// Accept a kind-agnostic value; `None` when it does not fit this kind
    fn from_dynamic(value: PropertyValue) -> Option<Self::Value>;

    /// Kind-agnostic view of a value
    fn to_dynamic(value: &Self::Value) -> PropertyValue;
}

/// Property with a single scalar payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "K::Value: Serialize"))]
pub struct SimpleProperty<K: SimpleKind> {
    #[serde(flatten)]
    base: PropertyBase,
    value: K::Value,
    #[serde(skip)]
    _kind: PhantomData<K>,
}

impl<K: SimpleKind> SimpleProperty<K> {
    /// Create from an already typed value
    #[inline]
    #[must_use]
    pub fn new(base: PropertyBase, value: K::Value) -> Self {
        Self {
            base,
            value,
            _kind: PhantomData,
        }
    }

    /// Create from element text, repairing unreadable text to the default
    #[must_use]
    pub fn from_text(base: PropertyBase, text: Option<&str>) -> Self {
        let text = text.unwrap_or_default();
        let value = K::parse_text(text).unwrap_or_else(|| {
            let value = K::default_value();
            tracing::warn!(
                "{} '{}': cannot read value '{}' -> assigning default value {:?}",
                K::TAG,
                base.name(),
                text,
                value
            );
            value
        });
        Self::new(base, value)
    }

    /// Create with the kind's default value
    #[inline]
    #[must_use]
    pub fn with_default_value(base: PropertyBase) -> Self {
        Self::new(base, K::default_value())
    }

    /// Clone with a kind-agnostic value
    ///
    /// # Errors
    /// Returns `InvalidValue` if the value does not fit this kind
    pub fn clone_with_dynamic(&self, value: PropertyValue) -> PropertyResult<Self> {
        let type_name = value.type_name();
        let value = K::from_dynamic(value).ok_or_else(|| {
            PropertyError::invalid_value(format!(
                "{} '{}' cannot hold a {type_name} value",
                K::TAG,
                self.base.name()
            ))
        })?;
        self.clone_with(Some(value))
    }

    /// Kind-agnostic view of the payload
    #[inline]
    #[must_use]
    pub fn dynamic_value(&self) -> PropertyValue {
        K::to_dynamic(&self.value)
    }
}

impl<K: SimpleKind> private::Sealed for SimpleProperty<K> {}

impl<K: SimpleKind> PropertyKind for SimpleProperty<K> {
    const TAG: &'static str = K::TAG;

    type Value = K::Value;

    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn value(&self) -> &Self::Value {
        &self.value
    }

    fn with_value(&self, value: Self::Value) -> PropertyResult<Self> {
        Ok(Self::new(self.base.clone(), value))
    }

    fn write_value(&self, element: &mut Element) {
        match K::render(&self.value) {
            Text::Plain(text) => element.set_text(text),
            Text::CData(text) => element.set_cdata(text),
        }
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

macro_rules! text_kind {
    ($(#[$doc:meta])* $kind:ident, $tag:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $kind;

        impl private::Sealed for $kind {}

        impl SimpleKind for $kind {
            const TAG: &'static str = $tag;

            type Value = String;

            fn default_value() -> String {
                String::new()
            }

            fn parse_text(text: &str) -> Option<String> {
                Some(text.to_string())
            }

            fn render(value: &String) -> Text {
                Text::CData(value.clone())
            }

            fn from_dynamic(value: PropertyValue) -> Option<String> {
                match value {
                    PropertyValue::Text(text) => Some(text),
                    _ => None,
                }
            }

            fn to_dynamic(value: &String) -> PropertyValue {
                PropertyValue::Text(value.clone())
            }
        }
    };
}

text_kind!(
    /// Plain string, stored as CDATA
    StringKind,
    tags::STRING_PROPERTY
);
text_kind!(
    /// Markdown source, stored as CDATA
    MarkdownKind,
    tags::MARKDOWN_PROPERTY
);
text_kind!(
    /// URL, stored as CDATA
    UrlKind,
    tags::URL_PROPERTY
);
text_kind!(
    /// File path, stored as CDATA
    FileKind,
    tags::FILE_PROPERTY
);

/// `true` / `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanKind;

impl private::Sealed for BooleanKind {}

impl SimpleKind for BooleanKind {
    const TAG: &'static str = tags::BOOLEAN_PROPERTY;

    type Value = bool;

    fn default_value() -> bool {
        false
    }

    fn parse_text(text: &str) -> Option<bool> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn render(value: &bool) -> Text {
        Text::Plain(value.to_string())
    }

    fn from_dynamic(value: PropertyValue) -> Option<bool> {
        match value {
            PropertyValue::Boolean(value) => Some(value),
            PropertyValue::Text(text) => Self::parse_text(&text),
            _ => None,
        }
    }

    fn to_dynamic(value: &bool) -> PropertyValue {
        PropertyValue::Boolean(*value)
    }
}

/// Signed 64-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerKind;

impl private::Sealed for IntegerKind {}

impl SimpleKind for IntegerKind {
    const TAG: &'static str = tags::INTEGER_PROPERTY;

    type Value = i64;

    fn default_value() -> i64 {
        0
    }

    fn parse_text(text: &str) -> Option<i64> {
        text.trim().parse().ok()
    }

    fn render(value: &i64) -> Text {
        Text::Plain(value.to_string())
    }

    fn from_dynamic(value: PropertyValue) -> Option<i64> {
        match value {
            PropertyValue::Integer(value) => Some(value),
            PropertyValue::Text(text) => Self::parse_text(&text),
            _ => None,
        }
    }

    fn to_dynamic(value: &i64) -> PropertyValue {
        PropertyValue::Integer(*value)
    }
}

/// 64-bit float, written in shortest round-trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatKind;

impl private::Sealed for FloatKind {}

impl SimpleKind for FloatKind {
    const TAG: &'static str = tags::FLOAT_PROPERTY;

    type Value = f64;

    fn default_value() -> f64 {
        0.0
    }

    fn parse_text(text: &str) -> Option<f64> {
        text.trim().parse().ok()
    }

    fn render(value: &f64) -> Text {
        Text::Plain(float_text(*value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_dynamic(value: PropertyValue) -> Option<f64> {
        match value {
            PropertyValue::Float(value) => Some(value),
            PropertyValue::Integer(value) => Some(value as f64),
            PropertyValue::Text(text) => Self::parse_text(&text),
            _ => None,
        }
    }

    fn to_dynamic(value: &f64) -> PropertyValue {
        PropertyValue::Float(*value)
    }
}

/// Calendar date, `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateKind;

impl private::Sealed for DateKind {}

impl SimpleKind for DateKind {
    const TAG: &'static str = tags::DATE_PROPERTY;

    type Value = NaiveDate;

    fn default_value() -> NaiveDate {
        Local::now().date_naive()
    }

    fn parse_text(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
    }

    fn render(value: &NaiveDate) -> Text {
        Text::Plain(value.format(DATE_FORMAT).to_string())
    }

    fn from_dynamic(value: PropertyValue) -> Option<NaiveDate> {
        match value {
            PropertyValue::Date(value) => Some(value),
            PropertyValue::Text(text) => Self::parse_text(&text),
            _ => None,
        }
    }

    fn to_dynamic(value: &NaiveDate) -> PropertyValue {
        PropertyValue::Date(*value)
    }
}

/// Time of day with second precision, `HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeKind;

impl private::Sealed for TimeKind {}

impl SimpleKind for TimeKind {
    const TAG: &'static str = tags::TIME_PROPERTY;

    type Value = NaiveTime;

    fn default_value() -> NaiveTime {
        let now = Local::now().time();
        now.with_nanosecond(0).unwrap_or(now)
    }

    fn parse_text(text: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok()
    }

    fn render(value: &NaiveTime) -> Text {
        Text::Plain(value.format(TIME_FORMAT).to_string())
    }

    fn from_dynamic(value: PropertyValue) -> Option<NaiveTime> {
        match value {
            PropertyValue::Time(value) => Some(value),
            PropertyValue::Text(text) => Self::parse_text(&text),
            _ => None,
        }
    }

    fn to_dynamic(value: &NaiveTime) -> PropertyValue {
        PropertyValue::Time(*value)
    }
}

pub type StringProperty = SimpleProperty<StringKind>;
pub type MarkdownProperty = SimpleProperty<MarkdownKind>;
pub type UrlProperty = SimpleProperty<UrlKind>;
pub type FileProperty = SimpleProperty<FileKind>;
pub type BooleanProperty = SimpleProperty<BooleanKind>;
pub type IntegerProperty = SimpleProperty<IntegerKind>;
pub type FloatProperty = SimpleProperty<FloatKind>;
pub type DateProperty = SimpleProperty<DateKind>;
pub type TimeProperty = SimpleProperty<TimeKind>;

impl Default for StringProperty {
    fn default() -> Self {
        Self::with_default_value(PropertyBase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_property_xml_uses_cdata() {
        let property = StringProperty::new(PropertyBase::default(), "hello".to_string());
        assert_eq!(
            property.generate_xml().to_xml().unwrap(),
            r#"<stringProperty name="unnamed" category="general"><![CDATA[hello]]></stringProperty>"#
        );
    }

    #[test]
    fn default_string_property_is_empty() {
        let property = StringProperty::default();
        assert_eq!(property.value(), "");
        assert_eq!(property.base(), &PropertyBase::default());
    }

    #[test]
    fn clone_without_value_is_equal() {
        let original = StringProperty::default();
        let cloned = original.clone_with(None).unwrap();
        assert!(original.compare(&cloned));
    }

    #[test]
    fn clone_with_value_replaces_payload_only() {
        let original = StringProperty::new(
            PropertyBase::new("n", "c").with_tooltip("t").with_required(true),
            String::new(),
        );
        let cloned = original.clone_with(Some("new_value".to_string())).unwrap();

        assert_eq!(cloned.base(), original.base());
        assert_eq!(cloned.value(), "new_value");
        assert!(!original.compare(&cloned));
    }

    #[test]
    fn compare_detects_each_base_attribute() {
        let original = StringProperty::default();
        let variants = [
            PropertyBase::new("test_name", "general"),
            PropertyBase::new("unnamed", "test_category"),
            PropertyBase::default().with_tooltip("test_tooltip"),
            PropertyBase::default().with_required(true),
            PropertyBase::default().with_inmutable(true),
        ];
        for base in variants {
            let other = StringProperty::new(base, String::new());
            assert!(!original.compare(&other), "{other:?}");
        }
    }

    #[test]
    fn boolean_reads_case_insensitive() {
        let base = PropertyBase::default();
        assert!(*BooleanProperty::from_text(base.clone(), Some("True")).value());
        assert!(!*BooleanProperty::from_text(base, Some("false")).value());
    }

    #[test]
    fn unreadable_text_repairs_to_default() {
        let base = PropertyBase::default();
        assert!(!*BooleanProperty::from_text(base.clone(), Some("dummy")).value());
        assert_eq!(*IntegerProperty::from_text(base.clone(), Some("1.5")).value(), 0);
        assert_eq!(*FloatProperty::from_text(base, None).value(), 0.0);
    }

    #[test]
    fn integer_and_float_render() {
        let base = PropertyBase::default();
        let integer = IntegerProperty::from_text(base.clone(), Some(" 42 "));
        assert_eq!(integer.generate_xml().text(), Some("42"));

        let float = FloatProperty::from_text(base, Some("3"));
        assert_eq!(float.generate_xml().text(), Some("3.0"));
    }

    #[test]
    fn float_exponent_form_survives_round_trip() {
        for text in ["1e-05", "-2.5e+16"] {
            let float = FloatProperty::from_text(PropertyBase::default(), Some(text));
            assert_eq!(float.generate_xml().text(), Some(text));
        }
    }

    #[test]
    fn date_and_time_use_fixed_formats() {
        let base = PropertyBase::default();
        let date = DateProperty::from_text(base.clone(), Some("2024-12-17"));
        assert_eq!(*date.value(), NaiveDate::from_ymd_opt(2024, 12, 17).unwrap());
        assert_eq!(date.generate_xml().text(), Some("2024-12-17"));

        let time = TimeProperty::from_text(base, Some("09:05:00"));
        assert_eq!(*time.value(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(time.generate_xml().text(), Some("09:05:00"));
    }

    #[test]
    fn bad_date_repairs_to_today() {
        let date = DateProperty::from_text(PropertyBase::default(), Some("17/12/2024"));
        assert_eq!(*date.value(), Local::now().date_naive());
    }

    #[test]
    fn dynamic_clone_coerces_text() {
        let integer = IntegerProperty::with_default_value(PropertyBase::default());
        let cloned = integer.clone_with_dynamic(PropertyValue::from("7")).unwrap();
        assert_eq!(*cloned.value(), 7);

        let float = FloatProperty::with_default_value(PropertyBase::default());
        let cloned = float.clone_with_dynamic(PropertyValue::Integer(2)).unwrap();
        assert_eq!(*cloned.value(), 2.0);
    }

    #[test]
    fn dynamic_clone_rejects_mismatched_type() {
        let string = StringProperty::default();
        let err = string.clone_with_dynamic(PropertyValue::Boolean(true)).unwrap_err();
        assert!(err.is_invalid_value());
    }
}
