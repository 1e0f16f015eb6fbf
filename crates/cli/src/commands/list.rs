use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use ftpdeploy_listing::{Entry, Listing, ListingStyle, is_empty_response, parse_listing_today};
use ftpdeploy_remote::RemoteClient;
use log::error;

use crate::commands::ConnectionArgs;
use crate::printer::{ColorChoice, ListingPrintContext, OutputFormat, PrinterConfig, make_printer};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output entries as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn config(&self) -> PrinterConfig {
        PrinterConfig {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
            color: ColorChoice::parse(&self.color),
            show_summary: !self.quiet,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Remote directory to list
    #[arg(default_value = "/")]
    pub path: String,

    /// Only show files
    #[arg(long, conflicts_with = "dirs")]
    pub files: bool,

    /// Only show directories
    #[arg(long)]
    pub dirs: bool,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// A response that carries lines but matched no known style. Empty
/// directories (`total 0` or nothing at all) do not count.
pub(crate) fn is_unrecognised(listing: &Listing, raw: &str) -> bool {
    listing.style() == ListingStyle::Unknown && !is_empty_response(raw)
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[list] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ListArgs) -> Result<ExitCode> {
    let mut client = args.connection.connect()?;
    let raw = client
        .list(&args.path)
        .with_context(|| format!("Failed to list '{}'", args.path))?;
    let listing = parse_listing_today(&raw);

    if is_unrecognised(&listing, &raw) {
        eprintln!("[list] unrecognised listing format for '{}'", args.path);
        return Ok(ExitCode::from(1));
    }

    let rows: Vec<&Entry> = if args.files {
        listing.files().collect()
    } else if args.dirs {
        listing.directories().collect()
    } else {
        listing.entries().iter().collect()
    };

    let ctx = ListingPrintContext {
        path: &args.path,
        style: listing.style(),
        total: rows.len(),
    };

    let mut printer = make_printer(args.output.config());
    printer.begin(&ctx)?;
    for entry in rows {
        printer.print_row(entry, &ctx)?;
    }
    printer.finish(&ctx)?;

    Ok(ExitCode::SUCCESS)
}
