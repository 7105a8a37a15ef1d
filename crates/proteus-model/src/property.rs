//! Property base contract
//!
//! Every property kind shares a [`PropertyBase`] (name, category, tooltip,
//! required, inmutable) and implements the sealed [`PropertyKind`] trait,
//! which supplies the XML template, structural comparison and
//! clone-with-substitution.
//!
//! # Invariants
//! - Properties are immutable once constructed
//! - "Mutation" is [`PropertyKind::clone_with`], which builds a new instance
//!   through the same validation as construction

use std::fmt::Debug;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::PropertyResult;
use crate::measurement::Measurement;
use crate::vocab::{attributes, DEFAULT_CATEGORY, DEFAULT_NAME};
use crate::xml::Element;

/// Sealed trait support
pub(crate) mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Attributes common to every property
///
/// Construction never fails: blank names and categories fall back to
/// [`DEFAULT_NAME`] and [`DEFAULT_CATEGORY`], absent flags to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyBase {
    name: String,
    category: String,
    tooltip: String,
    required: bool,
    inmutable: bool,
}

impl PropertyBase {
    /// Create base attributes with the given name and category
    #[must_use]
    pub fn new(name: &str, category: &str) -> Self {
        Self::from_parts(Some(name), Some(category), None, None, None)
    }

    /// Create base attributes from possibly missing inputs
    #[must_use]
    pub fn from_parts(
        name: Option<&str>,
        category: Option<&str>,
        tooltip: Option<&str>,
        required: Option<bool>,
        inmutable: Option<bool>,
    ) -> Self {
        Self {
            name: non_blank_or(name, DEFAULT_NAME),
            category: non_blank_or(category, DEFAULT_CATEGORY),
            tooltip: tooltip.unwrap_or_default().to_string(),
            required: required.unwrap_or(false),
            inmutable: inmutable.unwrap_or(false),
        }
    }

    /// Read base attributes from a property element
    ///
    /// `required` and `inmutable` are true only for the literal `true`.
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        Self::from_parts(
            element.attribute(attributes::NAME),
            element.attribute(attributes::CATEGORY),
            element.attribute(attributes::TOOLTIP),
            Some(is_true(element.attribute(attributes::REQUIRED))),
            Some(is_true(element.attribute(attributes::INMUTABLE))),
        )
    }

    /// With tooltip
    #[inline]
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// With required flag
    #[inline]
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// With inmutable flag
    #[inline]
    #[must_use]
    pub fn with_inmutable(mut self, inmutable: bool) -> Self {
        self.inmutable = inmutable;
        self
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grouping category
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Tooltip (possibly empty)
    #[inline]
    #[must_use]
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Whether a value is required
    #[inline]
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether the property may be edited
    #[inline]
    #[must_use]
    pub fn inmutable(&self) -> bool {
        self.inmutable
    }

    /// Element carrying only the common attributes
    ///
    /// `tooltip` is written only when non-empty, the flags only when true.
    #[must_use]
    pub fn to_element(&self, tag: &str) -> Element {
        let mut element = Element::new(tag)
            .with_attribute(attributes::NAME, self.name.as_str())
            .with_attribute(attributes::CATEGORY, self.category.as_str());

        if !self.tooltip.is_empty() {
            element.set_attribute(attributes::TOOLTIP, self.tooltip.as_str());
        }
        if self.required {
            element.set_attribute(attributes::REQUIRED, "true");
        }
        if self.inmutable {
            element.set_attribute(attributes::INMUTABLE, "true");
        }

        element
    }
}

impl Default for PropertyBase {
    fn default() -> Self {
        Self::from_parts(None, None, None, None, None)
    }
}

fn non_blank_or(input: Option<&str>, default: &str) -> String {
    match input {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

fn is_true(attribute: Option<&str>) -> bool {
    attribute.is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Contract implemented by every concrete property kind
///
/// The trait is sealed: the set of kinds is closed and dispatched through
/// [`crate::Property`].
pub trait PropertyKind: Debug + Clone + Send + Sync + 'static + private::Sealed {
    /// Fixed XML tag of this kind
    const TAG: &'static str;

    /// Payload type
    type Value: Debug + Clone + PartialEq;

    /// Common attributes
    fn base(&self) -> &PropertyBase;

    /// Current payload
    fn value(&self) -> &Self::Value;

    /// Rebuild with the same attributes and a new payload
    ///
    /// Runs the same validation (and repairs) as construction.
    ///
    /// # Errors
    /// Returns the kind's construction error
    fn with_value(&self, value: Self::Value) -> PropertyResult<Self>;

    /// Append the payload (attributes, text or children) to `element`
    ///
    /// Called after the common attributes are in place; never re-emits them.
    fn write_value(&self, element: &mut Element);

    /// Kind-specific equality (payload and kind-specific attributes)
    fn same_payload(&self, other: &Self) -> bool;

    /// Generate the XML element for this property
    fn generate_xml(&self) -> Element {
        let mut element = self.base().to_element(Self::TAG);
        self.write_value(&mut element);
        element
    }

    /// Independent copy, optionally with a new payload
    ///
    /// # Errors
    /// Returns the kind's construction error for an invalid new payload
    fn clone_with(&self, new_value: Option<Self::Value>) -> PropertyResult<Self> {
        match new_value {
            Some(value) => self.with_value(value),
            None => Ok(self.clone()),
        }
    }

    /// Structural equality of attributes and payload
    fn compare(&self, other: &Self) -> bool {
        self.base() == other.base() && self.same_payload(other)
    }
}

/// Payload of any property kind, used for kind-agnostic editing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// String-like kinds and enums
    Text(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Measurement(Measurement),
    /// Trace targets and class lists
    List(Vec<String>),
}

impl PropertyValue {
    /// Variant name, for diagnostics
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Measurement(_) => "measurement",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Measurement> for PropertyValue {
    fn from(value: Measurement) -> Self {
        Self::Measurement(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Token vocabulary given either joined by spaces or pre-split
///
/// Used for unit lists and enum choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenList {
    Joined(String),
    List(Vec<String>),
}

impl TokenList {
    /// Tokens in order
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            Self::Joined(joined) => joined.split_whitespace().map(str::to_string).collect(),
            Self::List(list) => list,
        }
    }
}

impl From<&str> for TokenList {
    fn from(value: &str) -> Self {
        Self::Joined(value.to_string())
    }
}

impl From<String> for TokenList {
    fn from(value: String) -> Self {
        Self::Joined(value)
    }
}

impl From<Vec<String>> for TokenList {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for TokenList {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}
