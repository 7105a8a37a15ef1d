//! Unit-valued property kind
//!
//! The value is a [`Measurement`] whose unit must belong to the property's
//! unit vocabulary. Out-of-contract values are repaired, not rejected:
//! - no measurement -> `Measurement(0, units[0])`
//! - unit outside the vocabulary -> same magnitude, `units[0]`

use serde::Serialize;

use crate::error::{PropertyError, PropertyResult};
use crate::measurement::{Measurement, NumericInput};
use crate::property::{private, PropertyBase, PropertyKind, TokenList};
use crate::vocab::{attributes, tags};
use crate::xml::Element;

/// Property holding a measurement restricted to a unit vocabulary
///
/// # Invariants
/// - `units` is non-empty
/// - `value.unit()` is one of `units`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitProperty {
    #[serde(flatten)]
    base: PropertyBase,
    value: Measurement,
    units: Vec<String>,
}

impl UnitProperty {
    /// Create a unit property
    ///
    /// `value` is `None` when no measurement (or something that is not a
    /// measurement) was supplied; it is repaired to the default.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if `units` is absent or normalizes to empty
    /// - `InvalidValue` if the first unit is not a single token
    pub fn new(
        base: PropertyBase,
        value: Option<Measurement>,
        units: Option<TokenList>,
    ) -> PropertyResult<Self> {
        let units = units
            .ok_or_else(|| {
                PropertyError::invalid_configuration(format!(
                    "unit property '{}' has no units list",
                    base.name()
                ))
            })?
            .into_tokens();

        let Some(first_unit) = units.first() else {
            return Err(PropertyError::invalid_configuration(format!(
                "unit property '{}' units list is empty",
                base.name()
            )));
        };

        let default = Measurement::new(0_i64, first_unit)?;

        let value = match value {
            None => {
                tracing::warn!(
                    "Unit property '{}': missing or wrong type value -> assigning default value {}",
                    base.name(),
                    default
                );
                default
            }
            Some(measurement) if !units.iter().any(|unit| unit == measurement.unit()) => {
                tracing::warn!(
                    "Unit property '{}': value unit '{}' not in units list -> assigning first unit '{}'",
                    base.name(),
                    measurement.unit(),
                    first_unit
                );
                measurement.with_unit(first_unit)?
            }
            Some(measurement) => measurement,
        };

        Ok(Self { base, value, units })
    }

    /// Read a unit property element
    ///
    /// The measurement comes from the `<value>` and `<unit>` children. If
    /// either is missing there is no measurement and the default applies.
    ///
    /// # Errors
    /// - `InvalidValue` if the `<value>` text is not a number
    /// - the errors of [`UnitProperty::new`]
    pub fn from_element(base: PropertyBase, element: &Element) -> PropertyResult<Self> {
        let units = element.attribute(attributes::UNITS).map(TokenList::from);

        let value_text = element.find_child(tags::VALUE).map(|child| child.text().unwrap_or_default());
        let unit_text = element.find_child(tags::UNIT).map(|child| child.text().unwrap_or_default());

        let value = match (value_text, unit_text) {
            (Some(value), Some(unit)) => Some(Measurement::from_parts(
                Some(NumericInput::from(value)),
                Some(unit),
            )?),
            _ => None,
        };

        Self::new(base, value, units)
    }

    /// Allowed units in order
    #[inline]
    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }
}

impl private::Sealed for UnitProperty {}

impl PropertyKind for UnitProperty {
    const TAG: &'static str = tags::UNIT_PROPERTY;

    type Value = Measurement;

    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn value(&self) -> &Measurement {
        &self.value
    }

    fn with_value(&self, value: Measurement) -> PropertyResult<Self> {
        Self::new(
            self.base.clone(),
            Some(value),
            Some(TokenList::List(self.units.clone())),
        )
    }

    // Magnitude and unit go in separate children, never one combined text node.
    fn write_value(&self, element: &mut Element) {
        element.set_attribute(attributes::UNITS, self.units.join(" "));
        element.push_child(Element::new(tags::VALUE).with_text(self.value.value_text()));
        element.push_child(Element::new(tags::UNIT).with_text(self.value.unit()));
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.units == other.units && self.value == other.value
    }
}
