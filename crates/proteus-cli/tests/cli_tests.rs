use std::io::Write;
use std::process::Command;

use pretty_assertions::assert_eq;
use proteus_cli::{check_file, render_report, CheckConfig, OutputFormat};
use proteus_model::vocab::tags;
use proteus_model::Element;
use proteus_test_utils::{canonical_elements, xml_string};
use tempfile::NamedTempFile;

fn document(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{body}").unwrap();
    file
}

fn canonical_document() -> String {
    let properties = canonical_elements()
        .into_iter()
        .fold(Element::new(tags::PROPERTIES), Element::with_child);
    xml_string(&Element::new("object").with_child(properties))
}

fn proteus_props(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_proteus-props"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_canonical_document_checks_clean() {
    let file = document(&canonical_document());
    let report = check_file(file.path(), &CheckConfig::new()).unwrap();

    assert_eq!(report.total, 13);
    assert_eq!(report.per_kind.len(), 13);
    assert!(report.mismatches.is_empty(), "{:?}", report.mismatches);
    assert!(report.failures.is_empty());
    assert!(report.passed());
}

#[test]
fn test_json_report_shape() {
    let file = document(&canonical_document());
    let config = CheckConfig::new()
        .with_format(OutputFormat::Json)
        .with_properties(true);
    let report = check_file(file.path(), &config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&render_report(&report, &config).unwrap()).unwrap();

    assert_eq!(json["total"], 13);
    assert_eq!(json["per_kind"]["traceProperty"], 1);
    assert_eq!(json["properties"][0]["kind"], "string");
    assert_eq!(json["properties"][0]["name"], "title");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = check_file(&dir.path().join("absent.xml"), &CheckConfig::new());
    assert!(result.is_err());
}

#[test]
fn test_binary_check_exit_codes() {
    let clean = document(&canonical_document());
    let output = proteus_props(&["check", clean.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Status: PASSED"));

    let broken = document(r#"<properties><unitProperty name="u"/></properties>"#);
    let output = proteus_props(&["check", broken.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_strict_unknown_tags() {
    let file = document(r#"<properties><colorProperty name="c"/></properties>"#);
    let path = file.path().to_str().unwrap();

    assert!(proteus_props(&["check", path]).status.success());
    assert_eq!(proteus_props(&["check", "--strict", path]).status.code(), Some(1));
}

#[test]
fn test_binary_normalize() {
    let file = document(
        r#"<properties><traceProperty name="t" maxTargetsNumber="0"><trace target="a"/></traceProperty></properties>"#,
    );
    let output = proteus_props(&["normalize", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"<traceProperty name="t" category="general" traceType="proteus-generic"><trace target="a" traceType="proteus-generic"/></traceProperty>"#
    );
}
