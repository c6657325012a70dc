// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! cspcheck CLI
//!
//! `cspcheck <urls_file> <domains_file>` checks every URL, prints a report per
//! URL and writes `results.json`. `cspcheck convert` builds a domains file
//! from a policy string.

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use cspcheck::{
    load_urls, Checker, CheckerConfig, DuplicatePolicy, RequiredDomains, DEFAULT_DOMAINS_FILE,
};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum Command {
    Check {
        urls_file: PathBuf,
        domains_file: PathBuf,
        config: CheckerConfig,
    },
    Convert {
        policy: Option<String>,
        output: PathBuf,
    },
    Help,
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let (command, verbosity) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage();
            return ExitCode::from(1);
        }
    };

    init_logging(verbosity);

    let outcome = match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Version => {
            println!("cspcheck {}", cspcheck::VERSION);
            Ok(())
        }
        Command::Convert { policy, output } => convert(policy, output),
        Command::Check {
            urls_file,
            domains_file,
            config,
        } => check(urls_file, domains_file, config).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// `-v`/`-q` override RUST_LOG for this crate; otherwise RUST_LOG applies on
/// top of an `info` default.
fn init_logging(verbosity: Option<&str>) {
    let filter = match verbosity {
        Some(level) => {
            let filter = EnvFilter::from_default_env();
            match format!("cspcheck={}", level).parse::<Directive>() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        }
        None => match "cspcheck=info".parse::<Directive>() {
            Ok(directive) => EnvFilter::builder()
                .with_default_directive(directive)
                .from_env_lossy(),
            Err(_) => EnvFilter::from_default_env(),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> anyhow::Result<(Command, Option<&'static str>)> {
    let mut verbosity = None;

    match args.first().map(String::as_str) {
        Some("help" | "--help" | "-h") => return Ok((Command::Help, verbosity)),
        Some("version" | "--version" | "-V") => return Ok((Command::Version, verbosity)),
        Some("convert") => {
            let mut policy = None;
            let mut output = PathBuf::from(DEFAULT_DOMAINS_FILE);
            let mut iter = args[1..].iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "-o" | "--output" => output = PathBuf::from(value_for(arg, iter.next())?),
                    "-v" | "--verbose" => verbosity = Some("debug"),
                    "-q" | "--quiet" => verbosity = Some("warn"),
                    flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
                    value if policy.is_none() => policy = Some(value.to_string()),
                    _ => bail!("convert takes a single policy argument (quote it)"),
                }
            }
            return Ok((Command::Convert { policy, output }, verbosity));
        }
        _ => {}
    }

    let mut config = CheckerConfig::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => config = config.output(value_for(arg, iter.next())?),
            "-t" | "--timeout" => {
                let value = value_for(arg, iter.next())?;
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("invalid timeout '{}'", value))?;
                if secs == 0 {
                    bail!("timeout must be at least one second");
                }
                config = config.timeout(Duration::from_secs(secs));
            }
            "--duplicates" => {
                let policy: DuplicatePolicy = value_for(arg, iter.next())?.parse()?;
                config = config.duplicates(policy);
            }
            "--strict" => config = config.strict(true),
            "--report-only" => config = config.include_report_only(true),
            "-v" | "--verbose" => verbosity = Some("debug"),
            "-q" | "--quiet" => verbosity = Some("warn"),
            flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
            value => positional.push(value),
        }
    }

    let [urls_file, domains_file] = positional.as_slice() else {
        bail!(
            "expected <urls_file> <domains_file>, got {} argument(s)",
            positional.len()
        );
    };

    Ok((
        Command::Check {
            urls_file: PathBuf::from(urls_file),
            domains_file: PathBuf::from(domains_file),
            config,
        },
        verbosity,
    ))
}

fn value_for<'a>(flag: &str, value: Option<&'a String>) -> anyhow::Result<&'a str> {
    match value {
        Some(v) => Ok(v.as_str()),
        None => bail!("option '{}' needs a value", flag),
    }
}

async fn check(
    urls_file: PathBuf,
    domains_file: PathBuf,
    config: CheckerConfig,
) -> anyhow::Result<()> {
    tracing::info!(path = %domains_file.display(), "Reading required domains");
    let required = RequiredDomains::load(&domains_file)?;
    tracing::info!(directives = required.len(), "Required domains loaded");
    tracing::debug!(required = %serde_json::to_string(&required)?, "Required domains");

    let urls = load_urls(&urls_file)?;
    tracing::info!(urls = urls.len(), "URL list loaded");

    let checker = Checker::new(&config).context("could not create HTTP client")?;
    let mut stdout = io::stdout();
    let results = checker.run(&urls, &required, &mut stdout).await?;

    cspcheck::write_summary(&mut stdout, &results)?;
    results.save(&config.output)?;
    Ok(())
}

fn convert(policy: Option<String>, output: PathBuf) -> anyhow::Result<()> {
    let policy = match policy {
        Some(policy) => policy,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("could not read policy from stdin")?;
            buf
        }
    };

    let required = RequiredDomains::from_header(&policy);
    if required.is_empty() {
        bail!("no directives with sources found in the given policy");
    }

    required.save(&output)?;
    tracing::info!(
        path = %output.display(),
        directives = required.len(),
        "Domains file written"
    );
    println!("Wrote {} directives to {}", required.len(), output.display());
    Ok(())
}

fn print_usage() {
    println!(
        r#"cspcheck - Content-Security-Policy domain checker

USAGE:
    cspcheck [OPTIONS] <urls_file> <domains_file>
    cspcheck convert [<policy>] [-o <file>]

ARGUMENTS:
    <urls_file>       JSON array of URLs to check
    <domains_file>    JSON object of directive -> required domains

OPTIONS:
    -o, --output <file>          Results file (default: results.json)
    -t, --timeout <secs>         Request timeout in seconds (default: 10)
        --strict                 Match hosts exactly or as subdomains
        --duplicates <policy>    Repeated directives: last, first or merge (default: last)
        --report-only            Fall back to Content-Security-Policy-Report-Only
    -v, --verbose                Debug logging
    -q, --quiet                  Warnings and errors only
    -h, --help                   Show this help message
    -V, --version                Show version information

COMMANDS:
    convert [<policy>]    Write a domains file from a policy string (reads stdin
                          when omitted; default output: domains.json)

Logging can be tuned further with RUST_LOG.
"#
    );
}
