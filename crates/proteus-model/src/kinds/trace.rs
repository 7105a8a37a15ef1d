//! Trace property kind
//!
//! A trace is an ordered list of references (target ids) to other document
//! objects, filtered by accepted/excluded classes and capped by
//! `maxTargetsNumber`.
//!
//! Normalization order:
//! 1. drop empty target ids
//! 2. empty accepted classes -> `[PROTEUS_ANY]`
//! 3. excluded classes kept as given (empty by default)
//! 4. empty trace type -> [`DEFAULT_TRACE_TYPE`]
//! 5. non-positive limit -> [`NO_TARGETS_LIMIT`]
//! 6. truncate targets to a finite limit

use serde::Serialize;

use crate::error::PropertyResult;
use crate::property::{private, PropertyBase, PropertyKind};
use crate::vocab::{attributes, tags, DEFAULT_TRACE_TYPE, NO_TARGETS_LIMIT, PROTEUS_ANY};
use crate::xml::Element;

/// Trace configuration besides the targets
///
/// Every field is normalized by [`TraceProperty::new`]; the defaults describe
/// an unrestricted generic trace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TraceSettings {
    /// Classes a target must belong to
    pub accepted_targets: Vec<String>,
    /// Classes a target must not belong to
    pub excluded_targets: Vec<String>,
    /// Trace type label
    pub trace_type: Option<String>,
    /// Target cap; `None` or non-positive means unlimited
    pub max_targets_number: Option<i64>,
}

impl TraceSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With accepted classes
    #[inline]
    #[must_use]
    pub fn with_accepted_targets<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.accepted_targets = classes.into_iter().map(Into::into).collect();
        self
    }

    /// With excluded classes
    #[inline]
    #[must_use]
    pub fn with_excluded_targets<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.excluded_targets = classes.into_iter().map(Into::into).collect();
        self
    }

    /// With trace type
    #[inline]
    #[must_use]
    pub fn with_trace_type(mut self, trace_type: impl Into<String>) -> Self {
        self.trace_type = Some(trace_type.into());
        self
    }

    /// With target cap
    #[inline]
    #[must_use]
    pub fn with_max_targets_number(mut self, max: i64) -> Self {
        self.max_targets_number = Some(max);
        self
    }
}

/// Property holding an ordered list of trace targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceProperty {
    #[serde(flatten)]
    base: PropertyBase,
    value: Vec<String>,
    accepted_targets: Vec<String>,
    excluded_targets: Vec<String>,
    trace_type: String,
    max_targets_number: i64,
}

impl TraceProperty {
    /// Create a trace property
    ///
    /// Never fails: every out-of-range input is normalized.
    #[must_use]
    pub fn new(base: PropertyBase, targets: Vec<String>, settings: TraceSettings) -> Self {
        let mut value: Vec<String> = targets.into_iter().filter(|target| !target.is_empty()).collect();

        let accepted_targets = if settings.accepted_targets.is_empty() {
            vec![PROTEUS_ANY.to_string()]
        } else {
            settings.accepted_targets
        };

        let excluded_targets = settings.excluded_targets;

        let trace_type = match settings.trace_type {
            Some(trace_type) if !trace_type.is_empty() => trace_type,
            _ => DEFAULT_TRACE_TYPE.to_string(),
        };

        let max_targets_number = match settings.max_targets_number {
            Some(max) if max > 0 => max,
            Some(max) => {
                tracing::warn!(
                    "Trace property '{}': max targets number {} is not positive -> no targets limit",
                    base.name(),
                    max
                );
                NO_TARGETS_LIMIT
            }
            None => NO_TARGETS_LIMIT,
        };

        if let Some(limit) = usize::try_from(max_targets_number).ok().filter(|limit| value.len() > *limit) {
            tracing::warn!(
                "Trace property '{}': {} targets exceed the limit of {} -> truncating",
                base.name(),
                value.len(),
                limit
            );
            value.truncate(limit);
        }

        Self {
            base,
            value,
            accepted_targets,
            excluded_targets,
            trace_type,
            max_targets_number,
        }
    }

    /// Read a trace property element
    ///
    /// Class filters are space-separated attribute values. A limit that does
    /// not parse as an integer means unlimited. `<trace>` children without a
    /// `target` attribute are ignored.
    #[must_use]
    pub fn from_element(base: PropertyBase, element: &Element) -> Self {
        let split = |key: &str| -> Vec<String> {
            element
                .attribute(key)
                .map(|value| value.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        };

        let max_targets_number = element
            .attribute(attributes::MAX_TARGETS_NUMBER)
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        let settings = TraceSettings {
            accepted_targets: split(attributes::ACCEPTED_TARGETS),
            excluded_targets: split(attributes::EXCLUDED_TARGETS),
            trace_type: element.attribute(attributes::TRACE_TYPE).map(str::to_string),
            max_targets_number,
        };

        let targets = element
            .children_named(tags::TRACE)
            .filter_map(|trace| trace.attribute(attributes::TARGET))
            .map(str::to_string)
            .collect();

        Self::new(base, targets, settings)
    }

    /// Accepted target classes (`[PROTEUS_ANY]` when unrestricted)
    #[inline]
    #[must_use]
    pub fn accepted_targets(&self) -> &[String] {
        &self.accepted_targets
    }

    /// Excluded target classes
    #[inline]
    #[must_use]
    pub fn excluded_targets(&self) -> &[String] {
        &self.excluded_targets
    }

    /// Trace type label
    #[inline]
    #[must_use]
    pub fn trace_type(&self) -> &str {
        &self.trace_type
    }

    /// Raw limit, [`NO_TARGETS_LIMIT`] when unlimited
    #[inline]
    #[must_use]
    pub fn max_targets_number(&self) -> i64 {
        self.max_targets_number
    }

    /// Limit as a count, `None` when unlimited
    #[inline]
    #[must_use]
    pub fn target_limit(&self) -> Option<usize> {
        usize::try_from(self.max_targets_number).ok()
    }

    /// True if the accepted classes are the "any class" sentinel
    #[inline]
    #[must_use]
    pub fn accepts_any_class(&self) -> bool {
        self.accepted_targets.len() == 1 && self.accepted_targets[0] == PROTEUS_ANY
    }

    /// Whether an object of the given classes may be a target
    ///
    /// Rejected if any class is excluded; otherwise accepted if the trace
    /// accepts any class or one of the classes is accepted.
    #[must_use]
    pub fn accepts_classes(&self, classes: &[&str]) -> bool {
        if classes
            .iter()
            .any(|class| self.excluded_targets.iter().any(|excluded| excluded == class))
        {
            return false;
        }
        self.accepts_any_class()
            || classes
                .iter()
                .any(|class| self.accepted_targets.iter().any(|accepted| accepted == class))
    }

    fn settings(&self) -> TraceSettings {
        TraceSettings {
            accepted_targets: self.accepted_targets.clone(),
            excluded_targets: self.excluded_targets.clone(),
            trace_type: Some(self.trace_type.clone()),
            max_targets_number: Some(self.max_targets_number),
        }
    }
}

impl private::Sealed for TraceProperty {}

impl PropertyKind for TraceProperty {
    const TAG: &'static str = tags::TRACE_PROPERTY;

    type Value = Vec<String>;

    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn value(&self) -> &Vec<String> {
        &self.value
    }

    fn with_value(&self, value: Vec<String>) -> PropertyResult<Self> {
        Ok(Self::new(self.base.clone(), value, self.settings()))
    }

    fn write_value(&self, element: &mut Element) {
        if !self.accepts_any_class() {
            element.set_attribute(attributes::ACCEPTED_TARGETS, self.accepted_targets.join(" "));
        }
        if !self.excluded_targets.is_empty() {
            element.set_attribute(attributes::EXCLUDED_TARGETS, self.excluded_targets.join(" "));
        }
        element.set_attribute(attributes::TRACE_TYPE, self.trace_type.as_str());
        if self.max_targets_number > 0 {
            element.set_attribute(attributes::MAX_TARGETS_NUMBER, self.max_targets_number.to_string());
        }

        for target in &self.value {
            element.push_child(
                Element::new(tags::TRACE)
                    .with_attribute(attributes::TARGET, target.as_str())
                    .with_attribute(attributes::TRACE_TYPE, self.trace_type.as_str()),
            );
        }
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.value == other.value
            && self.accepted_targets == other.accepted_targets
            && self.excluded_targets == other.excluded_targets
            && self.trace_type == other.trace_type
            && self.max_targets_number == other.max_targets_number
    }
}
