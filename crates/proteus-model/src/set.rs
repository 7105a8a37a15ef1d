//! Ordered property collection of a document object

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::PropertyResult;
use crate::factory::PropertyFactory;
use crate::model::Property;
use crate::vocab::tags;
use crate::xml::Element;

/// Properties keyed by name, in insertion order
///
/// Replacing a property marks the set dirty until [`PropertySet::mark_clean`]
/// is called, typically after the owning document is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertySet {
    properties: IndexMap<String, Property>,
    #[serde(skip)]
    dirty: bool,
}

impl PropertySet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `<properties>` element
    ///
    /// Children with unknown tags are skipped.
    ///
    /// # Errors
    /// Returns the first property construction error
    pub fn from_element(element: &Element) -> PropertyResult<Self> {
        if element.tag() != tags::PROPERTIES {
            tracing::warn!(
                "Reading properties from <{}> instead of <{}>",
                element.tag(),
                tags::PROPERTIES
            );
        }

        let mut set = Self::new();
        for child in element.children() {
            match PropertyFactory::create(child)? {
                Some(property) => {
                    set.insert(property);
                }
                None => tracing::warn!("Skipping unknown property tag <{}>", child.tag()),
            }
        }
        Ok(set)
    }

    /// Add a property under its own name
    ///
    /// An existing property with the same name is replaced in place and
    /// returned. Loading does not mark the set dirty; use
    /// [`PropertySet::replace`] for edits.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        let name = property.name().to_string();
        let previous = self.properties.insert(name, property);
        if let Some(previous) = &previous {
            tracing::warn!("Duplicate property '{}' replaced", previous.name());
        }
        previous
    }

    /// Replace (or add) a property and mark the set dirty
    pub fn replace(&mut self, property: Property) -> Option<Property> {
        self.dirty = true;
        self.properties.insert(property.name().to_string(), property)
    }

    /// Property by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Whether a property with this name exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Property names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether a property was replaced since the last [`PropertySet::mark_clean`]
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// `<properties>` element with each property in order
    #[must_use]
    pub fn generate_xml(&self) -> Element {
        self.iter()
            .fold(Element::new(tags::PROPERTIES), |element, property| {
                element.with_child(property.generate_xml())
            })
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = indexmap::map::Values<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.values()
    }
}
