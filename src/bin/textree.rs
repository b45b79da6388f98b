//! Command-line interface for textree
//! This binary builds the nested tree for a multilevel outline document and
//! prints it in one of the registered output formats.
//!
//! Usage:
//!   textree build `<path>` [--config `<file>`] [--format `<format>`] [--output `<path>`]
//!   textree list-formats

use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use textree::textree::formats::FormatRegistry;
use textree::textree::{HeadingClassifier, LevelRegistry, ParserConfig, PlacementPolicy, Pipeline};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("textree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds nested trees from multilevel outline documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Parse a document and print the resulting tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the outline document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help(
                            "Registry configuration file (.yaml/.yml or .json); must map the \
                             classifier's level kinds (heading_1..heading_6, paragraph)",
                        ),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g. 'tag', 'treeviz', 'json')")
                        .default_value("tag"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the result to a file instead of stdout"),
                )
                .arg(
                    Arg::new("skip-bad-lines")
                        .long("skip-bad-lines")
                        .help("Skip unresolvable lines instead of aborting")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("build", build_matches)) => {
            let path = build_matches.get_one::<String>("path").unwrap();
            let config = build_matches.get_one::<String>("config");
            let format = build_matches.get_one::<String>("format").unwrap();
            let output = build_matches.get_one::<String>("output");
            let policy = if build_matches.get_flag("skip-bad-lines") {
                PlacementPolicy::SkipLine
            } else {
                PlacementPolicy::Abort
            };
            handle_build_command(path, config.map(String::as_str), format, output.map(String::as_str), policy)
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            ExitCode::SUCCESS
        }
        _ => unreachable!(),
    }
}

/// Handle the build command
fn handle_build_command(
    path: &str,
    config: Option<&str>,
    format: &str,
    output: Option<&str>,
    policy: PlacementPolicy,
) -> ExitCode {
    let classifier = HeadingClassifier::new();

    let registry = match load_registry(&classifier, config) {
        Ok(registry) => registry,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: cannot read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = Pipeline::new(&classifier, &registry)
        .with_policy(policy)
        .run_str(&source);
    let built = match outcome {
        Ok(built) => built,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for anomaly in &built.anomalies {
        eprintln!(
            "warning: line {}: '{}' placed under '{}' across a gap of {} levels",
            anomaly.line, anomaly.tag, anomaly.ancestor_tag, anomaly.gap
        );
    }
    for skipped in &built.skipped {
        eprintln!("warning: line {} skipped: {}", skipped.line, skipped.reason);
    }

    let formats = FormatRegistry::with_defaults();
    let rendered = match formats.serialize(&built.tree, format) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(out_path) => {
            if let Err(err) = fs::write(out_path, rendered) {
                eprintln!("Error: cannot write '{out_path}': {err}");
                return ExitCode::FAILURE;
            }
        }
        None => print!("{rendered}"),
    }
    ExitCode::SUCCESS
}

/// Registry from the config file when given, otherwise the classifier's own.
fn load_registry(
    classifier: &HeadingClassifier,
    config: Option<&str>,
) -> Result<LevelRegistry, String> {
    let Some(config_path) = config else {
        return classifier.registry().map_err(|err| err.to_string());
    };
    let source =
        fs::read_to_string(config_path).map_err(|err| format!("cannot read '{config_path}': {err}"))?;
    let is_yaml = matches!(
        Path::new(config_path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        ParserConfig::from_yaml(&source)
    } else {
        ParserConfig::from_json(&source)
    };
    let parsed = parsed.map_err(|err| err.to_string())?;
    parsed.registry().map_err(|err| err.to_string())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    for name in registry.list_formats() {
        match registry.get(&name) {
            Some(formatter) if !formatter.description().is_empty() => {
                println!("{name} - {}", formatter.description())
            }
            _ => println!("{name}"),
        }
    }
}
