//! Class list property kind

use serde::Serialize;

use crate::error::PropertyResult;
use crate::property::{private, PropertyBase, PropertyKind};
use crate::vocab::tags;
use crate::xml::Element;

/// Ordered list of class names, one `<class>` child each
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassListProperty {
    #[serde(flatten)]
    base: PropertyBase,
    value: Vec<String>,
}

impl ClassListProperty {
    /// Create a class list; blank entries are dropped
    #[must_use]
    pub fn new(base: PropertyBase, classes: Vec<String>) -> Self {
        let value = classes
            .into_iter()
            .filter(|class| !class.trim().is_empty())
            .collect();
        Self { base, value }
    }

    /// Read the `<class>` children of a property element
    #[must_use]
    pub fn from_element(base: PropertyBase, element: &Element) -> Self {
        let classes = element
            .children_named(tags::CLASS)
            .filter_map(Element::text)
            .map(str::to_string)
            .collect();
        Self::new(base, classes)
    }
}

impl private::Sealed for ClassListProperty {}

impl PropertyKind for ClassListProperty {
    const TAG: &'static str = tags::CLASS_LIST_PROPERTY;

    type Value = Vec<String>;

    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn value(&self) -> &Vec<String> {
        &self.value
    }

    fn with_value(&self, value: Vec<String>) -> PropertyResult<Self> {
        Ok(Self::new(self.base.clone(), value))
    }

    fn write_value(&self, element: &mut Element) {
        for class in &self.value {
            element.push_child(Element::new(tags::CLASS).with_text(class.as_str()));
        }
    }

    fn same_payload(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
