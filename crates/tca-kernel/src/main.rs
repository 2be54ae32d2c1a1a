//! `tca` command line: analyze or validate DOT coverage trees

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tca_kernel::{logging, CoverageAnalyzer, TcaConfig, TcaError, TreeValidator};

fn main() -> Result<()> {
    let cli = Command::new("tca")
        .version(tca_kernel::VERSION)
        .about("Tree coverage analyzer for DOT graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("analyze")
                .about("Validate a graph and report the coverage of its target")
                .arg(input_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("File the verdict is written to"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Write a JSON summary instead of the verdict text"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check the graph only and print every diagnostic")
                .arg(input_arg())
                .arg(config_arg()),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("analyze", args)) => {
            let mut config = load_config(args)?;
            if let Some(output) = args.get_one::<PathBuf>("output") {
                config = config.with_output(output.clone());
            }
            logging::init(&config.log_filter);

            let input = input_path(args)?;
            let analyzer = CoverageAnalyzer::new(config);
            let outcome = analyzer
                .analyze_file(input)
                .with_context(|| format!("failed to analyze {}", input.display()))?;

            let verdict = outcome.verdict.render();
            let written = if args.get_flag("json") {
                serde_json::to_string_pretty(&outcome.summary())
                    .context("failed to serialize the summary")?
            } else {
                verdict.clone()
            };
            let output = &analyzer.config().output;
            std::fs::write(output, written)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!("{verdict}");
            Ok(())
        }
        Some(("validate", args)) => {
            let config = load_config(args)?;
            logging::init(&config.log_filter);

            let input = input_path(args)?;
            let source = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            let parsed = tca_dot::parse_dot(&source);
            let mut diagnostics = parsed.diagnostics;
            let limit = config.limits.max_nodes;
            if parsed.graph.node_count() > limit {
                anyhow::bail!(TcaError::GraphTooLarge {
                    nodes: parsed.graph.node_count(),
                    limit,
                });
            }
            if !diagnostics.has_fatal() {
                let max_visits = config.limits.max_visits;
                let report = TreeValidator::new(&parsed.graph)
                    .with_max_visits(max_visits)
                    .validate(&mut diagnostics);
                if report.exhausted {
                    anyhow::bail!(TcaError::LimitExceeded {
                        stage: "tree validation",
                        limit: max_visits,
                    });
                }
            }

            if diagnostics.is_empty() {
                println!("{} is a valid tree.", input.display());
                return Ok(());
            }
            for diagnostic in &diagnostics {
                println!("{diagnostic}");
            }
            std::process::exit(1);
        }
        _ => unreachable!("a subcommand is required"),
    }
}

fn input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("DOT file to read")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file")
}

fn input_path(args: &ArgMatches) -> Result<&Path> {
    args.get_one::<PathBuf>("input")
        .map(PathBuf::as_path)
        .context("missing input path")
}

fn load_config(args: &ArgMatches) -> Result<TcaConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => TcaConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(TcaConfig::default()),
    }
}
