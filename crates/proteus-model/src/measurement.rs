//! Measurement value type
//!
//! A validated `(value, unit)` pair used by unit properties.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PropertyError, PropertyResult};

/// Raw numeric input accepted by [`Measurement`]
///
/// Text is coerced to a float; anything that does not parse is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl NumericInput {
    #[allow(clippy::cast_precision_loss)]
    fn coerce(self) -> PropertyResult<f64> {
        match self {
            Self::Float(value) => Ok(value),
            Self::Integer(value) => Ok(value as f64),
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                PropertyError::invalid_value(format!("measurement value is not a number: '{text}'"))
            }),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Numeric value with a single-token unit
///
/// # Invariants
/// - `unit` is non-blank and contains no whitespace
/// - Immutable after construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    value: f64,
    unit: String,
}

impl Measurement {
    /// Create a measurement
    ///
    /// # Errors
    /// Returns `InvalidValue` if the value is not numeric or the unit is not a
    /// single token
    pub fn new(value: impl Into<NumericInput>, unit: &str) -> PropertyResult<Self> {
        Self::from_parts(Some(value.into()), Some(unit))
    }

    /// Create a measurement from possibly missing parts
    ///
    /// Checks run in order: value presence, value coercion, unit presence,
    /// unit non-blank, unit single token. The first failing check is reported.
    ///
    /// # Errors
    /// Returns `InvalidValue` on the first failing check
    pub fn from_parts(value: Option<NumericInput>, unit: Option<&str>) -> PropertyResult<Self> {
        let value = value
            .ok_or_else(|| PropertyError::invalid_value("measurement value is missing"))?
            .coerce()?;

        let unit = unit.ok_or_else(|| PropertyError::invalid_value("measurement unit is missing"))?;
        if unit.trim().is_empty() {
            return Err(PropertyError::invalid_value("measurement unit is empty"));
        }
        if unit.split_whitespace().ne(std::iter::once(unit)) {
            return Err(PropertyError::invalid_value(format!(
                "measurement unit must be a single word: '{unit}'"
            )));
        }

        Ok(Self {
            value,
            unit: unit.to_string(),
        })
    }

    /// Numeric magnitude
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit token
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Same magnitude with another unit
    ///
    /// # Errors
    /// Returns `InvalidValue` if `unit` is not a single token
    pub fn with_unit(&self, unit: &str) -> PropertyResult<Self> {
        Self::new(self.value, unit)
    }

    /// Magnitude as written in the `<value>` element (`1.0`, `2.5`, `1e-07`)
    #[inline]
    #[must_use]
    pub fn value_text(&self) -> String {
        float_text(self.value)
    }
}

/// Shortest round-trip text of a float as stored in documents
///
/// Integral values keep a `.0`; exponents carry a sign and at least two
/// digits (`1e-05`, `1.5e+16`).
pub(crate) fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let shortest = format!("{value:?}");
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return shortest;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for Measurement {
    type Err = PropertyError;

    /// Parse the canonical `"<value> <unit>"` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once(char::is_whitespace) {
            Some((value, unit)) => Self::new(value, unit.trim()),
            None => Self::from_parts(Some(trimmed.into()), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_coerces_numeric_inputs() {
        let cases: Vec<(NumericInput, f64)> = vec![
            (1.0_f64.into(), 1.0),
            (1_i64.into(), 1.0),
            ((-1.0_f64).into(), -1.0),
            ((-1_i64).into(), -1.0),
            ("1.0".into(), 1.0),
            ("1".into(), 1.0),
            ("-1.0".into(), -1.0),
            ("-1".into(), -1.0),
        ];

        for (input, expected) in cases {
            let measurement = Measurement::from_parts(Some(input), Some("years")).unwrap();
            assert_eq!(measurement.value(), expected);
            assert_eq!(measurement.unit(), "years");
        }
    }

    #[test]
    fn numeric_string_equals_float() {
        assert_eq!(
            Measurement::new("1", "years").unwrap(),
            Measurement::new(1.0, "years").unwrap()
        );
    }

    #[test]
    fn missing_value_fails() {
        let result = Measurement::from_parts(None, Some("years"));
        assert!(matches!(result, Err(PropertyError::InvalidValue(_))));
    }

    #[test]
    fn non_numeric_value_fails() {
        assert!(Measurement::new("abc", "years").unwrap_err().is_invalid_value());
        assert!(Measurement::new("1.0.0", "years").unwrap_err().is_invalid_value());
    }

    #[test]
    fn bad_units_fail() {
        assert!(Measurement::from_parts(Some(NumericInput::Float(1.0)), None).is_err());
        assert!(Measurement::new(1.0, "").is_err());
        assert!(Measurement::new(1.0, " ").is_err());
        assert!(Measurement::new(1.0, "years days").is_err());
        assert!(Measurement::new(1.0, " years").is_err());
    }

    #[test]
    fn value_checked_before_unit() {
        let err = Measurement::from_parts(Some("abc".into()), None).unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn display_uses_shortest_form() {
        assert_eq!(Measurement::new(1.0, "years").unwrap().to_string(), "1 years");
        assert_eq!(Measurement::new(1.5, "days").unwrap().to_string(), "1.5 days");
        assert_eq!(Measurement::new(-0.25, "m").unwrap().to_string(), "-0.25 m");
    }

    #[test]
    fn value_text_keeps_decimal_point() {
        assert_eq!(Measurement::new(1.0, "years").unwrap().value_text(), "1.0");
        assert_eq!(Measurement::new(2.5, "years").unwrap().value_text(), "2.5");
    }

    #[test]
    fn value_text_exponent_is_signed_and_padded() {
        let cases = [
            (1e-5, "1e-05"),
            (2.5e-7, "2.5e-07"),
            (1e16, "1e+16"),
            (-1.5e16, "-1.5e+16"),
            (1e100, "1e+100"),
            (1e-4, "0.0001"),
            (1e15, "1000000000000000.0"),
        ];
        for (value, expected) in cases {
            assert_eq!(Measurement::new(value, "m").unwrap().value_text(), expected);
        }
    }

    #[test]
    fn value_text_parses_back() {
        for text in ["1e-05", "1.5e+16", "0.0001", "3.0"] {
            let measurement = Measurement::new(text, "m").unwrap();
            assert_eq!(measurement.value_text(), text);
        }
    }

    #[test]
    fn from_str_parses_display_form() {
        let measurement: Measurement = "1.5 days".parse().unwrap();
        assert_eq!(measurement, Measurement::new(1.5, "days").unwrap());
        assert!("1.5".parse::<Measurement>().is_err());
        assert!("1.5 two words".parse::<Measurement>().is_err());
    }

    #[test]
    fn with_unit_keeps_magnitude() {
        let measurement = Measurement::new(3.0, "seconds").unwrap();
        let converted = measurement.with_unit("years").unwrap();
        assert_eq!(converted.value(), 3.0);
        assert_eq!(converted.unit(), "years");
    }

    #[test]
    fn equality_is_exact() {
        let a = Measurement::new(0.1 + 0.2, "m").unwrap();
        let b = Measurement::new(0.3, "m").unwrap();
        assert_ne!(a, b);
    }
}
