#![deny(missing_docs)]
//! vesselid command-line interface.
//!
//! Validates IMO numbers and MMSIs passed as arguments or listed in files, and
//! looks up Maritime Identification Digits.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use vesselid_core::{
    BatchReport, ImoNumberType, ImoOptions, MmsiOptions, RequestedMmsiType, StdFileSystem,
    load_identifiers, lookup_mid, mids_for_country, render_batch_markdown, render_batch_text,
    render_json, validate_imo_batch, validate_mmsi_batch,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "vesselid", version, about = "Vessel identifier validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
struct InputArgs {
    /// Identifiers to validate.
    ids: Vec<String>,
    /// File containing identifiers (one per line, `#` starts a comment).
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, env = "VESSELID_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
    /// Exit with status 0 even when some identifiers are invalid.
    #[arg(long)]
    no_fail: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate IMO ship or company numbers.
    Imo {
        #[command(flatten)]
        input: InputArgs,
        /// Number type: ship, company, or auto.
        #[arg(long, default_value = "ship")]
        number_type: ImoNumberType,
        /// Require the canonical `IMO1234567` layout.
        #[arg(long)]
        strict: bool,
        /// Reject numbers without the `IMO` prefix.
        #[arg(long)]
        require_prefix: bool,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Validate Maritime Mobile Service Identities.
    Mmsi {
        #[command(flatten)]
        input: InputArgs,
        /// Expected station type: ship, coast, group, handheld, sar, aton, or auto.
        #[arg(long, default_value = "auto")]
        mmsi_type: RequestedMmsiType,
        /// Warn when the MID resolves to a different country.
        #[arg(long)]
        expected_country: Option<String>,
        /// Accepted for parity with `imo`; MMSI validation has no lenient mode.
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Look up a MID code, or list the MIDs allocated to a country.
    Mid {
        /// Three-digit MID or country name.
        query: String,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MidMatch {
    mid: String,
    country: String,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(true) => std::process::ExitCode::SUCCESS,
        Ok(false) => std::process::ExitCode::from(1),
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            std::process::ExitCode::from(2)
        }
    }
}

#[cfg(test)]
fn main() {}

/// Run a subcommand, returning whether the process should exit cleanly.
async fn run(command: Commands) -> CliResult<bool> {
    match command {
        Commands::Imo {
            input,
            number_type,
            strict,
            require_prefix,
            report,
        } => {
            let options = ImoOptions {
                number_type,
                strict_format: strict,
                allow_without_prefix: !require_prefix,
            };
            run_imo(&input, &options, &report).await
        }
        Commands::Mmsi {
            input,
            mmsi_type,
            expected_country,
            strict,
            report,
        } => {
            let options = MmsiOptions {
                mmsi_type,
                expected_country,
                strict_format: strict,
            };
            run_mmsi(&input, &options, &report).await
        }
        Commands::Mid { query, report } => run_mid(&query, &report).await,
    }
}

async fn run_imo(input: &InputArgs, options: &ImoOptions, output: &OutputArgs) -> CliResult<bool> {
    let ids = collect_identifiers(input)?;
    if ids.is_empty() {
        println!("No identifiers to validate.");
        return Ok(true);
    }
    let report = validate_imo_batch(&ids, options);
    emit_batch_report(&report, output).await?;
    Ok(output.no_fail || report.summary.all_valid())
}

async fn run_mmsi(
    input: &InputArgs,
    options: &MmsiOptions,
    output: &OutputArgs,
) -> CliResult<bool> {
    let ids = collect_identifiers(input)?;
    if ids.is_empty() {
        println!("No identifiers to validate.");
        return Ok(true);
    }
    let report = validate_mmsi_batch(&ids, options);
    emit_batch_report(&report, output).await?;
    Ok(output.no_fail || report.summary.all_valid())
}

async fn run_mid(query: &str, output: &OutputArgs) -> CliResult<bool> {
    let matches = find_mids(query);
    let contents = match output.format {
        OutputFormat::Text => render_mid_text(query, &matches),
        OutputFormat::Markdown => render_mid_markdown(query, &matches),
        OutputFormat::Json => render_json(&matches)?,
    };
    emit_output(output, contents).await?;
    Ok(output.no_fail || !matches.is_empty())
}

/// Identifiers from positional arguments first, then the list file.
fn collect_identifiers(input: &InputArgs) -> CliResult<Vec<String>> {
    let mut ids = input.ids.clone();
    if let Some(path) = &input.file {
        ids.extend(load_identifier_file(path)?);
    }
    Ok(ids)
}

fn load_identifier_file(path: &Path) -> CliResult<Vec<String>> {
    load_identifiers(&StdFileSystem::new(), path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()).into())
}

fn find_mids(query: &str) -> Vec<MidMatch> {
    let query = query.trim();
    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        return lookup_mid(query)
            .map(|country| MidMatch {
                mid: query.to_string(),
                country: country.to_string(),
            })
            .into_iter()
            .collect();
    }
    mids_for_country(query)
        .into_iter()
        .filter_map(|mid| {
            lookup_mid(mid).map(|country| MidMatch {
                mid: mid.to_string(),
                country: country.to_string(),
            })
        })
        .collect()
}

async fn emit_batch_report(report: &BatchReport, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_batch_text(report),
        OutputFormat::Markdown => render_batch_markdown(std::slice::from_ref(report)),
        OutputFormat::Json => render_json(report)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_mid_text(query: &str, matches: &[MidMatch]) -> String {
    let mut output = String::new();
    if matches.is_empty() {
        let _ = writeln!(output, "No MID found for {query}");
        return output;
    }
    for entry in matches {
        let _ = writeln!(output, "{}: {}", entry.mid, entry.country);
    }
    output
}

fn render_mid_markdown(query: &str, matches: &[MidMatch]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# MID lookup: {query}\n");
    if matches.is_empty() {
        let _ = writeln!(output, "No MID found.");
        return output;
    }
    let _ = writeln!(output, "| MID | Country |");
    let _ = writeln!(output, "|---|---|");
    for entry in matches {
        let _ = writeln!(output, "| {} | {} |", entry.mid, entry.country);
    }
    output
}
