use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use proteus_cli::{check_file, normalize_source, read_document, render_report, CheckConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("proteus-props")
        .version(proteus_cli::VERSION)
        .about("Check and normalize PROTEUS property XML")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Raise log level (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("check")
                .about("Build every property, regenerate it and compare with the source")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("XML document to check"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail on unknown tags under <properties>"),
                )
                .arg(
                    Arg::new("with-properties")
                        .long("with-properties")
                        .action(ArgAction::SetTrue)
                        .requires("json")
                        .help("Embed the built properties in the JSON report"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the canonical XML of every property after construction")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("XML document to normalize"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: &ArgMatches) -> anyhow::Result<bool> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing file argument")?;
    let format = if args.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let config = CheckConfig::new()
        .with_strict(args.get_flag("strict"))
        .with_format(format)
        .with_properties(args.get_flag("with-properties"));

    let report = check_file(path, &config).with_context(|| format!("checking {}", path.display()))?;
    println!("{}", render_report(&report, &config)?);
    Ok(report.passed())
}

fn run_normalize(args: &ArgMatches) -> anyhow::Result<bool> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing file argument")?;
    let source = read_document(path)?;
    let properties =
        normalize_source(&source).with_context(|| format!("normalizing {}", path.display()))?;
    for xml in properties {
        println!("{xml}");
    }
    Ok(true)
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("check", args)) => run_check(args),
        Some(("normalize", args)) => run_normalize(args),
        _ => unreachable!("subcommand is required"),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn verbose_is_global_and_counted() {
        let matches = cli()
            .try_get_matches_from(["proteus-props", "check", "doc.xml", "-vv", "--strict"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert!(args.get_flag("strict"));
        assert!(!args.get_flag("json"));
    }

    #[test]
    fn with_properties_requires_json() {
        let result = cli().try_get_matches_from(["proteus-props", "check", "doc.xml", "--with-properties"]);
        assert!(result.is_err());
    }
}
