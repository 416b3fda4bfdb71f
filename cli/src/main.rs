//! wtext CLI - WordprocessingML text extraction tool
//!
//! Extracts the text runs of an unpacked `document.xml` into a plain-text file.

use clap::Parser;
use colored::*;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wtext::{ExtractOptions, ExtractionReport, QualifiedName};

/// Extract plain text from a WordprocessingML document.xml
#[derive(Parser)]
#[command(
    name = "wtext",
    author = "iyulab",
    version,
    about = "Extract text runs from a Word document.xml",
    long_about = "wtext - extracts the text of every w:t element of an unpacked \
                  document.xml, in document order, into a UTF-8 text file."
)]
struct Cli {
    /// Path to the document.xml part
    path_to_xml: Option<PathBuf>,

    /// Path of the text file to write
    output_txt_path: Option<PathBuf>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    extra: Vec<OsString>,

    /// Element to collect, as {namespace}local, w:local or a bare local name
    #[arg(long, value_name = "QNAME")]
    element: Option<QualifiedName>,

    /// Text inserted between fragments
    #[arg(long, default_value = "")]
    separator: String,

    /// Print the extraction report as JSON instead of the status line
    #[arg(long)]
    json: bool,

    /// Print fragment and character counts to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (Some(input), Some(output)) = (cli.path_to_xml.as_ref(), cli.output_txt_path.as_ref())
    else {
        println!("{}", usage(&program_name()));
        return ExitCode::SUCCESS;
    };

    if !cli.extra.is_empty() {
        tracing::debug!(count = cli.extra.len(), "ignoring extra arguments");
    }

    let mut options = ExtractOptions::new().with_separator(cli.separator.clone());
    if let Some(element) = cli.element.clone() {
        options = options.with_target(element);
    }

    match wtext::extract_to_file_with_options(input, output, &options) {
        Ok(report) => {
            if cli.json {
                match report.to_json(true) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        println!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", report);
            }
            if cli.stats {
                print_stats(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "extraction failed");
            println!("{}", wtext::status_line(&Err(e)));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose))
        .init();
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting to warn.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}

fn program_name() -> String {
    std::env::args()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "wtext".to_string())
}

fn usage(program: &str) -> String {
    format!("Usage: {} <path_to_xml> <output_txt_path>", program)
}

fn print_stats(report: &ExtractionReport) {
    eprintln!("{}", "Extraction Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40));
    eprintln!("{}: {}", "Fragments".bold(), report.fragments);
    eprintln!("{}: {}", "Characters".bold(), report.characters);
    eprintln!("{}: {}", "Bytes".bold(), report.bytes);
}
