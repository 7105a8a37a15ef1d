//! Check report

use std::collections::BTreeMap;

use proteus_model::Property;
use serde::Serialize;

/// Element whose tag no property kind claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownTag {
    pub tag: String,
    pub name: Option<String>,
}

/// Property whose regenerated XML differs from its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub tag: String,
    pub name: String,
    pub source: String,
    pub regenerated: String,
}

/// Property element that could not be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub tag: String,
    pub name: String,
    pub error: String,
}

/// Outcome of checking one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub file: String,
    pub strict: bool,
    pub total: usize,
    pub per_kind: BTreeMap<String, usize>,
    pub unknown_tags: Vec<UnknownTag>,
    pub mismatches: Vec<Mismatch>,
    pub failures: Vec<Failure>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl CheckReport {
    /// Create an empty report for `file`
    #[must_use]
    pub fn new(file: impl Into<String>, strict: bool) -> Self {
        Self {
            file: file.into(),
            strict,
            ..Self::default()
        }
    }

    /// Count a built property
    pub fn record(&mut self, tag: &str) {
        self.total += 1;
        *self.per_kind.entry(tag.to_string()).or_insert(0) += 1;
    }

    /// Whether the document passed
    ///
    /// Unknown tags fail only in strict mode.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
            && self.mismatches.is_empty()
            && (!self.strict || self.unknown_tags.is_empty())
    }

    /// Human-readable summary
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("Property check: {}\n", self.file));
        report.push_str(&format!("  Properties: {}\n", self.total));
        for (tag, count) in &self.per_kind {
            report.push_str(&format!("    {tag}: {count}\n"));
        }

        if !self.unknown_tags.is_empty() {
            report.push_str(&format!("  Unknown tags: {}\n", self.unknown_tags.len()));
            for unknown in &self.unknown_tags {
                report.push_str(&format!(
                    "    <{}> {}\n",
                    unknown.tag,
                    unknown.name.as_deref().unwrap_or("(no name)")
                ));
            }
        }

        if !self.mismatches.is_empty() {
            report.push_str(&format!("  Round-trip mismatches: {}\n", self.mismatches.len()));
            for mismatch in &self.mismatches {
                report.push_str(&format!("    <{}> '{}'\n", mismatch.tag, mismatch.name));
                report.push_str(&format!("      source:      {}\n", mismatch.source));
                report.push_str(&format!("      regenerated: {}\n", mismatch.regenerated));
            }
        }

        if !self.failures.is_empty() {
            report.push_str(&format!("  Failures: {}\n", self.failures.len()));
            for failure in &self.failures {
                report.push_str(&format!(
                    "    <{}> '{}': {}\n",
                    failure.tag, failure.name, failure.error
                ));
            }
        }

        report.push_str(&format!(
            "  Status: {}",
            if self.passed() { "PASSED" } else { "FAILED" }
        ));
        report
    }
}
