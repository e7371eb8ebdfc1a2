//! threatsort CLI - threat report tabulation tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use threatsort::detect::has_pdf_extension;
use threatsort::render::{self, JsonFormat, RenderOptions};
use threatsort::summary::TOP_COUNTRIES;
use threatsort::{
    extract_words, parse_file, ExtractOptions, PageSelection, ReadingOrder, Report, ThreatSort,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "threatsort")]
#[command(version)]
#[command(about = "Tabulate incidents from threat-intelligence PDF reports", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, env = "THREATSORT_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the six incident tables from one or more reports
    Report {
        #[command(flatten)]
        run: RunArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json", env = "THREATSORT_FORMAT")]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE", env = "THREATSORT_OUTPUT")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long, env = "THREATSORT_COMPACT")]
        compact: bool,

        /// Include the narrative summary and document list
        #[arg(long, env = "THREATSORT_SUMMARY")]
        summary: bool,
    },

    /// Show the incidents found in one report
    Parse {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Dump the extracted word stream of one report
    Words {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "1-3", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Keep content-stream order instead of layout order
        #[arg(long)]
        stream_order: bool,
    },

    /// Print the executive summary of one or more reports
    Summary {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by commands that process a set of reports.
#[derive(Args)]
struct RunArgs {
    /// PDF files or directories to search for PDF files
    #[arg(value_name = "PATH", required = true)]
    inputs: Vec<PathBuf>,

    /// Skip reports that fail instead of aborting
    #[arg(long, env = "THREATSORT_SKIP_FAILED")]
    skip_failed: bool,

    /// Process reports one at a time
    #[arg(long, env = "THREATSORT_SEQUENTIAL")]
    sequential: bool,

    /// Page range read from every report (e.g., "2-6")
    #[arg(long, env = "THREATSORT_PAGES")]
    pages: Option<String>,

    /// Keep content-stream order instead of layout order
    #[arg(long, env = "THREATSORT_STREAM_ORDER")]
    stream_order: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON object keyed by table name
    Json,
    /// Markdown with one section per table
    Markdown,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Report {
            run,
            format,
            output,
            compact,
            summary,
        } => cmd_report(&run, format, output.as_deref(), compact, summary),
        Commands::Parse { input, compact } => cmd_parse(&input, compact),
        Commands::Words {
            input,
            pages,
            stream_order,
        } => cmd_words(&input, pages.as_deref(), stream_order),
        Commands::Summary { run } => cmd_summary(&run),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn reading_order(stream_order: bool) -> ReadingOrder {
    if stream_order {
        ReadingOrder::Stream
    } else {
        ReadingOrder::Layout
    }
}

fn page_selection(pages: Option<&str>) -> CliResult<PageSelection> {
    Ok(match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    })
}

/// Expand directories into the PDF files below them.
fn collect_inputs(inputs: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry?;
                if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        return Err("no PDF files found in the given paths".into());
    }
    Ok(files)
}

fn run_reports(run: &RunArgs) -> CliResult<Report> {
    let files = collect_inputs(&run.inputs)?;

    let mut builder = ThreatSort::new()
        .with_pages(page_selection(run.pages.as_deref())?)
        .with_reading_order(reading_order(run.stream_order));
    if run.skip_failed {
        builder = builder.skip_failed();
    }
    if run.sequential {
        builder = builder.sequential();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Processing {} reports...", files.len()));
    let report = builder.run(&files);
    pb.finish_and_clear();
    let report = report?;

    for skipped in &report.skipped {
        eprintln!(
            "{} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }
    Ok(report)
}

fn cmd_report(
    run: &RunArgs,
    format: OutputFormat,
    output: Option<&Path>,
    compact: bool,
    summary: bool,
) -> CliResult {
    let report = run_reports(run)?;

    let options = RenderOptions::new()
        .with_summary(summary)
        .with_documents(summary);
    let rendered = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&report, json_format, &options)?
        }
        OutputFormat::Markdown => render::to_markdown(&report, &options)?,
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!(
            "{} {} ({} documents, {} incidents)",
            "Saved to".green(),
            path.display(),
            report.documents.len(),
            report.total_incidents()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_parse(input: &Path, compact: bool) -> CliResult {
    let result = parse_file(input)?;
    if !result.start_marker_found {
        eprintln!(
            "{} THREAT DETAIL marker not found, parsed from the first word",
            "Warning:".yellow()
        );
    }

    let json = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_words(input: &Path, pages: Option<&str>, stream_order: bool) -> CliResult {
    let options = ExtractOptions::new()
        .lenient()
        .with_pages(page_selection(pages)?)
        .with_reading_order(reading_order(stream_order));
    let doc = extract_words(input, options)?;

    for word in &doc.words {
        println!(
            "{}\t{}\t{}",
            word.text,
            word.font_name,
            if word.is_bold() { "bold" } else { "-" }
        );
    }
    eprintln!(
        "{} {} words from {} pages",
        "Done!".green().bold(),
        doc.info.word_count,
        doc.info.page_count
    );
    Ok(())
}

fn cmd_summary(run: &RunArgs) -> CliResult {
    let report = run_reports(run)?;
    let summary = report.summary();

    println!("{}", "Executive Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", summary.executive);
    if let Some(ref other) = summary.other_threats {
        println!();
        println!("{}", other);
    }

    println!();
    println!("{}", "Incidents".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (category, count) in summary.counts.iter() {
        println!("{}: {}", category.name().bold(), count);
    }
    println!("{}: {}", "Total".bold(), summary.total);

    if !summary.top_countries.is_empty() {
        println!();
        println!("{}", format!("Top {} Countries", TOP_COUNTRIES).cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, row) in summary.top_countries.iter().enumerate() {
            println!("{:>2}. {} ({})", i + 1, row.country, row.occurrences);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "threatsort".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Threat report tabulation tool");
    println!();
    println!("License: MIT");
}
