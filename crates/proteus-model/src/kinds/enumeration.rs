//! Enumerated property kind

use serde::Serialize;

use crate::error::{PropertyError, PropertyResult};
use crate::property::{private, PropertyBase, PropertyKind, TokenList};
use crate::vocab::{attributes, tags};
use crate::xml::Element;

/// Property whose value is one of a fixed list of choices
///
/// A value outside the choices is repaired to the first choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumProperty {
    #[serde(flatten)]
    base: PropertyBase,
    value: String,
    choices: Vec<String>,
}

impl EnumProperty {
    /// Create an enum property
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `choices` is absent or empty
    pub fn new(
        base: PropertyBase,
        value: impl Into<String>,
        choices: Option<TokenList>,
    ) -> PropertyResult<Self> {
        let choices = choices
            .ok_or_else(|| {
                PropertyError::invalid_configuration(format!(
                    "enum property '{}' has no choices",
                    base.name()
                ))
            })?
            .into_tokens();

        let Some(first) = choices.first() else {
            return Err(PropertyError::invalid_configuration(format!(
                "enum property '{}' choices list is empty",
                base.name()
            )));
        };

        let mut value = value.into();
        if !choices.contains(&value) {
            tracing::warn!(
                "Enum property '{}': value '{}' not in choices -> assigning first choice '{}'",
                base.name(),
                value,
                first
            );
            value = first.clone();
        }

        Ok(Self {
            base,
            value,
            choices,
        })
    }

    /// Allowed values in order
    #[inline]
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl private::Sealed for EnumProperty {}

impl PropertyKind for EnumProperty {
    const TAG: &'static str = tags::ENUM_PROPERTY;

    type Value = String;

    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn value(&self) -> &String {
        &self.value
    }

    fn with_value(&self, value: String) -> PropertyResult<Self> {
        Self::new(
            self.base.clone(),
            value,
            Some(TokenList::List(self.choices.clone())),
        )
    }

    fn write_value(&self, element: &mut Element) {
        element.set_attribute(attributes::CHOICES, self.choices.join(" "));
        element.set_text(self.value.as_str());
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.choices == other.choices && self.value == other.value
    }
}
