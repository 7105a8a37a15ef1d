//! PROTEUS Property Model
//!
//! Typed, validated document properties that round-trip losslessly through
//! XML.
//!
//! # Core Concepts
//!
//! - [`PropertyBase`]: name, category, tooltip, required and inmutable flags
//! - [`PropertyKind`]: sealed contract of every concrete kind (XML template,
//!   comparison, clone-with-substitution)
//! - [`Property`]: closed sum over the thirteen kinds
//! - [`Measurement`]: magnitude plus single-token unit
//! - [`PropertyFactory`]: tag -> kind dispatch for parsed elements
//! - [`PropertySet`]: ordered, name-keyed properties of one document object
//!
//! Invalid input is either repaired (and logged with `tracing::warn!`) or
//! rejected with [`PropertyError`]; see the individual kinds.
//!
//! # Example
//!
//! ```rust
//! use proteus_model::{Element, Property, PropertyFactory, PropertyKind};
//!
//! let xml = r#"<unitProperty name="age" category="general" units="years days"><value>1.0</value><unit>seconds</unit></unitProperty>"#;
//! let element = Element::parse(xml)?;
//!
//! let Some(Property::Unit(age)) = PropertyFactory::create(&element)? else {
//!     unreachable!()
//! };
//! // Out-of-vocabulary unit repaired to the first allowed unit
//! assert_eq!(age.value().to_string(), "1 years");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod factory;
mod measurement;
mod model;
mod property;
mod set;
mod xml;

pub mod kinds;
pub mod vocab;

pub use error::{PropertyError, PropertyResult, XmlError};
pub use factory::PropertyFactory;
pub use kinds::{
    BooleanProperty, ClassListProperty, DateProperty, EnumProperty, FileProperty, FloatProperty,
    IntegerProperty, MarkdownProperty, SimpleKind, SimpleProperty, StringProperty, TimeProperty,
    TraceProperty, TraceSettings, UnitProperty, UrlProperty,
};
pub use measurement::{Measurement, NumericInput};
pub use model::Property;
pub use property::{PropertyBase, PropertyKind, PropertyValue, TokenList};
pub use set::PropertySet;
pub use xml::{Element, Text};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        Element, Measurement, Property, PropertyBase, PropertyError, PropertyFactory,
        PropertyKind, PropertyResult, PropertySet, PropertyValue,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn factory_output_regenerates_input() {
        let xml = concat!(
            r#"<traceProperty name="refs" category="links" acceptedTargets="section" traceType="cites" maxTargetsNumber="2">"#,
            r#"<trace target="s1" traceType="cites"/><trace target="s2" traceType="cites"/>"#,
            "</traceProperty>"
        );
        let element = Element::parse(xml).unwrap();
        let property = PropertyFactory::create(&element).unwrap().unwrap();
        assert_eq!(property.generate_xml().to_xml().unwrap(), xml);
    }

    #[test]
    fn edit_through_set() {
        let source = Element::parse(
            r#"<properties><enumProperty name="status" category="general" choices="draft final">draft</enumProperty></properties>"#,
        )
        .unwrap();
        let mut set = PropertySet::from_element(&source).unwrap();

        let status = set.get("status").unwrap().clone_with(Some("final".into())).unwrap();
        set.replace(status);

        assert!(set.is_dirty());
        assert_eq!(
            set.generate_xml().to_xml().unwrap(),
            r#"<properties><enumProperty name="status" category="general" choices="draft final">final</enumProperty></properties>"#
        );
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
