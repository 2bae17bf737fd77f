//! ppatrace CLI entry point.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ppatrace::analyze_file;
use ppatrace::cli::{Args, ReportFormatter};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    eprintln!("Parsing packets from {}...", args.input.display());
    let report = analyze_file(&args.input, args.config())
        .with_context(|| format!("Failed to analyze trace: {}", args.input.display()))?;
    eprintln!("Found {} packets", report.total_packets);
    eprintln!("Analyzed {} PPA packets", report.decoded_packets);

    eprintln!("Generating report: {}", args.output.display());
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create report: {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);

    ReportFormatter::new(args.output_format())
        .write(&report, &args.title, &mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write report: {}", args.output.display()))?;

    eprintln!("Analysis complete!");
    Ok(())
}
