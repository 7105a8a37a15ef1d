//! Document checks
//!
//! Every element whose tag is a property tag is built, regenerated and
//! compared with its source in canonical form. Canonical input therefore
//! reports no mismatches; a mismatch means construction repaired or
//! defaulted something.

use std::fs;
use std::path::Path;

use proteus_model::vocab::{attributes, tags};
use proteus_model::{Element, PropertyFactory};

use crate::config::CheckConfig;
use crate::error::{CliError, CliResult};
use crate::report::{CheckReport, Failure, Mismatch, UnknownTag};

/// Read a document from disk
///
/// # Errors
/// Returns error if the file cannot be read
pub fn read_document(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Check the properties of a parsed document
///
/// # Errors
/// Returns error if a source or regenerated element cannot be serialized
pub fn check_element(root: &Element, file: &str, config: &CheckConfig) -> CliResult<CheckReport> {
    let mut report = CheckReport::new(file, config.strict);

    for element in root.descendants() {
        if element.tag() == tags::PROPERTIES {
            report.unknown_tags.extend(
                element
                    .children()
                    .iter()
                    .filter(|child| !PropertyFactory::is_property_tag(child.tag()))
                    .map(|child| UnknownTag {
                        tag: child.tag().to_string(),
                        name: child.attribute(attributes::NAME).map(str::to_string),
                    }),
            );
            continue;
        }

        let name = element.attribute(attributes::NAME).unwrap_or_default().to_string();
        let property = match PropertyFactory::create(element) {
            Ok(Some(property)) => property,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!("<{}> '{}' failed: {}", element.tag(), name, err);
                report.failures.push(Failure {
                    tag: element.tag().to_string(),
                    name,
                    error: err.to_string(),
                });
                continue;
            }
        };

        report.record(property.tag());

        let source = element.to_xml()?;
        let regenerated = property.generate_xml().to_xml()?;
        if source != regenerated {
            tracing::debug!("<{}> '{}' does not round-trip", element.tag(), name);
            report.mismatches.push(Mismatch {
                tag: element.tag().to_string(),
                name,
                source,
                regenerated,
            });
        }

        if config.include_properties {
            report.properties.push(property);
        }
    }

    tracing::info!(
        "Checked {}: {} properties, {} unknown, {} mismatches, {} failures",
        file,
        report.total,
        report.unknown_tags.len(),
        report.mismatches.len(),
        report.failures.len()
    );

    Ok(report)
}

/// Check a document given as text
///
/// # Errors
/// Returns error if the text is not well-formed XML
pub fn check_source(source: &str, file: &str, config: &CheckConfig) -> CliResult<CheckReport> {
    let root = Element::parse(source)?;
    check_element(&root, file, config)
}

/// Check a document on disk
///
/// # Errors
/// Returns error if the file cannot be read or is not well-formed XML
pub fn check_file(path: &Path, config: &CheckConfig) -> CliResult<CheckReport> {
    let source = read_document(path)?;
    check_source(&source, &path.display().to_string(), config)
}

/// Canonical XML of every property in a document, after construction
///
/// # Errors
/// Returns error on malformed XML or the first property that cannot be built
pub fn normalize_source(source: &str) -> CliResult<Vec<String>> {
    let root = Element::parse(source)?;

    let mut out = Vec::new();
    for element in root.descendants() {
        let property = PropertyFactory::create(element).map_err(|source| CliError::Property {
            tag: element.tag().to_string(),
            name: element.attribute(attributes::NAME).unwrap_or_default().to_string(),
            source,
        })?;
        if let Some(property) = property {
            out.push(property.generate_xml().to_xml()?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<object id="o1">
  <properties>
    <stringProperty name="title" category="general"><![CDATA[Intro]]></stringProperty>
    <integerProperty name="rev" category="general">7</integerProperty>
    <colorProperty name="c"/>
  </properties>
</object>"#;

    #[test]
    fn canonical_document_passes() {
        let report = check_source(DOCUMENT, "doc.xml", &CheckConfig::new()).unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.unknown_tags.len(), 1);
        assert_eq!(report.unknown_tags[0].name.as_deref(), Some("c"));
        assert!(report.mismatches.is_empty());
        assert!(report.passed());
    }

    #[test]
    fn strict_mode_fails_on_unknown_tags() {
        let config = CheckConfig::new().with_strict(true);
        let report = check_source(DOCUMENT, "doc.xml", &config).unwrap();
        assert!(!report.passed());
    }

    #[test]
    fn repaired_property_is_a_mismatch() {
        let source = r#"<properties><booleanProperty name="b" category="general">yes</booleanProperty></properties>"#;
        let report = check_source(source, "doc.xml", &CheckConfig::new()).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches[0].regenerated.contains(">false<"));
        assert!(!report.passed());
    }

    #[test]
    fn construction_failure_is_reported() {
        let source = r#"<properties><enumProperty name="e">x</enumProperty></properties>"#;
        let report = check_source(source, "doc.xml", &CheckConfig::new()).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "e");
        assert_eq!(report.total, 0);
    }

    #[test]
    fn normalize_applies_defaults() {
        let out = normalize_source("<properties><stringProperty/></properties>").unwrap();
        assert_eq!(out, vec![r#"<stringProperty name="unnamed" category="general"><![CDATA[]]></stringProperty>"#.to_string()]);
    }

    #[test]
    fn normalize_stops_on_failure() {
        let err = normalize_source("<unitProperty name=\"u\"/>").unwrap_err();
        assert!(matches!(err, CliError::Property { ref name, .. } if name == "u"));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            check_source("<properties>", "doc.xml", &CheckConfig::new()),
            Err(CliError::Xml(_))
        ));
    }
}
