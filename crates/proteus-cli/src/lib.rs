//! PROTEUS property checker
//!
//! Library side of the `proteus-props` binary: round-trip checks and
//! normalization of property XML, with a serializable report.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod check;
mod config;
mod error;
mod report;

pub use check::{check_element, check_file, check_source, normalize_source, read_document};
pub use config::{CheckConfig, OutputFormat};
pub use error::{CliError, CliResult};
pub use report::{CheckReport, Failure, Mismatch, UnknownTag};

/// Render a report in the configured format
///
/// # Errors
/// Returns error if JSON serialization fails
pub fn render_report(report: &CheckReport, config: &CheckConfig) -> CliResult<String> {
    match config.format {
        OutputFormat::Text => Ok(report.generate_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
