use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use pairdiff_diff::{DiffValue, UNAVAILABLE_FIELD};
use pairdiff_server::response::EQUAL_PAYLOADS;
use pairdiff_server::{PairdiffServer, ResponseBody, ServerConfig, ServerError};
use pairdiff_types::Side;
use pairdiff_validate::{ComparisonFailure, Transport, ValidateError, Validator};

use crate::cli::*;

/// Identifier used for the single in-process comparison of `compare`.
const COMPARE_ID: &str = "local";

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Equal,
    Different,
}

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Serve(args) => {
            cmd_serve(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare(args) => match cmd_compare(args, cli.format)? {
            Verdict::Equal => Ok(ExitCode::SUCCESS),
            Verdict::Different => Ok(ExitCode::from(1)),
        },
    }
}

fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.plain {
        config.transport = Transport::Plain;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    debug!(?config, "resolved server config");
    println!(
        "pairdiff server on {} (transport: {:?})",
        config.bind_addr.to_string().bold(),
        config.transport
    );
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(PairdiffServer::new(config).serve())?;
    info!("server stopped");
    Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Run both payloads through a fresh validator: set left, set right, diff.
fn compare_payloads(left: String, right: String) -> Result<(), ValidateError> {
    let validator = Validator::in_memory();
    validator.set_side(Side::Left, COMPARE_ID, left)?;
    validator.set_side(Side::Right, COMPARE_ID, right)?;
    validator.get_diff(COMPARE_ID)
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<Verdict> {
    let left = read_payload(&args.left)?;
    let right = read_payload(&args.right)?;

    let err = match compare_payloads(left, right) {
        Ok(()) => {
            match format {
                OutputFormat::Json => print_json(&ResponseBody::message(EQUAL_PAYLOADS))?,
                OutputFormat::Text => println!("{} {}", "✓".green().bold(), EQUAL_PAYLOADS),
            }
            return Ok(Verdict::Equal);
        }
        Err(ValidateError::Unexpected(msg)) => anyhow::bail!("comparison failed: {msg}"),
        Err(err) => err,
    };

    match format {
        OutputFormat::Json => print_json(&ServerError::from(err).body())?,
        OutputFormat::Text => print_failure(&err),
    }
    Ok(Verdict::Different)
}

fn print_json(body: &ResponseBody) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

fn print_failure(err: &ValidateError) {
    println!("{} {}", "✗".red().bold(), err);
    match err {
        ValidateError::Comparison(ComparisonFailure::ContentMismatch(diff)) => {
            for (path, entry) in diff.iter() {
                println!(
                    "  {}: {} → {}",
                    path.yellow(),
                    describe(&entry.left),
                    describe(&entry.right)
                );
            }
        }
        ValidateError::Comparison(ComparisonFailure::Deserialization { cause, .. }) => {
            println!("  {}", cause.dimmed());
        }
        _ => {}
    }
}

fn describe(value: &DiffValue) -> String {
    match value {
        DiffValue::Text(text) => text.clone(),
        DiffValue::Unavailable => UNAVAILABLE_FIELD.dimmed().to_string(),
        DiffValue::Node(node) => node.to_json().to_string().cyan().to_string(),
    }
}
