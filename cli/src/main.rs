//! pdfprobe CLI - PDF inspection tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfprobe::render::{to_json, FlatReport};
use pdfprobe::{JsonFormat, ParseReport, Processor, ProcessorConfig, Severity};

/// Upload cap applied before inspection (10 MiB).
const DEFAULT_MAX_SIZE: u64 = 10 << 20;

#[derive(Parser)]
#[command(name = "pdfprobe")]
#[command(version)]
#[command(about = "Inspect PDF files: text, metadata, tables and quality", long_about = None)]
struct Cli {
    /// Reject files larger than this many bytes
    #[arg(long, global = true, env = "PDFPROBE_MAX_SIZE", default_value_t = DEFAULT_MAX_SIZE)]
    max_size: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect one or more PDFs and print the JSON report
    Inspect {
        /// Input PDF files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output the flat string-map report shape
        #[arg(long)]
        flat: bool,

        /// Clamp the overall quality score to [0, 1]
        #[arg(long)]
        clamp: bool,

        /// Skip table detection
        #[arg(long)]
        no_tables: bool,

        /// Skip quality scoring
        #[arg(long)]
        no_quality: bool,
    },

    /// Show a human-readable summary
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List tables detected in the extracted text
    Tables {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let max_size = cli.max_size;

    let result = match cli.command {
        Commands::Inspect {
            inputs,
            output,
            compact,
            flat,
            clamp,
            no_tables,
            no_quality,
        } => {
            let mut config = ProcessorConfig::new()
                .with_tables(!no_tables)
                .with_quality(!no_quality);
            if clamp {
                config = config.clamped();
            }
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_inspect(&inputs, output.as_deref(), format, flat, config, max_size)
        }
        Commands::Info { input } => cmd_info(&input, max_size),
        Commands::Tables { input } => cmd_tables(&input, max_size),
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

/// Enforce the upload cap the way the HTTP handler does.
fn check_size(path: &Path, limit: u64) -> pdfprobe::Result<()> {
    let size = fs::metadata(path)?.len();
    if size > limit {
        return Err(pdfprobe::Error::FileTooLarge { size, limit });
    }
    Ok(())
}

fn cmd_inspect(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: JsonFormat,
    flat: bool,
    config: ProcessorConfig,
    max_size: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    for input in inputs {
        check_size(input, max_size).map_err(|e| format!("{}: {}", input.display(), e))?;
    }

    let processor = Processor::with_config(config);

    let reports = if inputs.len() > 1 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Inspecting {} files...", inputs.len()));

        let results = processor.inspect_batch(inputs);
        pb.finish_with_message("Done!");
        results.into_iter().collect::<pdfprobe::Result<Vec<_>>>()?
    } else {
        vec![processor.inspect_file(&inputs[0])?]
    };

    let json = match (flat, reports.as_slice()) {
        (true, [report]) => to_json(&FlatReport::from_report(report), format)?,
        (true, reports) => {
            let flat: Vec<FlatReport> = reports.iter().map(FlatReport::from).collect();
            to_json(&flat, format)?
        }
        (false, [report]) => to_json(report, format)?,
        (false, reports) => to_json(reports, format)?,
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    let failed = reports.iter().filter(|r| !r.success).count();
    if failed > 0 {
        eprintln!(
            "{} {} of {} file(s) could not be fully inspected",
            "Warning:".yellow().bold(),
            failed,
            reports.len()
        );
    }

    Ok(())
}

fn cmd_info(input: &Path, max_size: u64) -> Result<(), Box<dyn std::error::Error>> {
    check_size(input, max_size)?;
    let report = Processor::new().inspect_file(input)?;
    print_info(input, &report);
    Ok(())
}

fn print_info(input: &Path, report: &ParseReport) {
    let metadata = &report.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref error) = report.error {
        println!("{}: {}", "Status".bold(), error.red());
    } else {
        println!("{}: {}", "Status".bold(), "OK".green());
    }
    println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), report.pages);
    println!("{}: {} bytes", "Size".bold(), metadata.file_size);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if report.security.is_encrypted {
            format!("Yes ({})", report.security.encryption_level)
        } else {
            "No".to_string()
        }
    );

    for (name, value) in metadata.text_fields() {
        if value != pdfprobe::model::UNKNOWN {
            println!("{}: {}", capitalize(name).bold(), value);
        }
    }
    if let Some(created) = metadata.creation_date {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(modified) = metadata.mod_date {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), report.word_count);
    if let Some(pages) = metadata.pages_extracted() {
        println!("{}: {}", "Pages with text".bold(), pages);
    }
    println!("{}: {}", "Tables".bold(), report.tables.len());
    println!("{}: {}", "Bookmarks".bold(), report.structure.bookmark_count);
    println!("{}: {}", "Fonts".bold(), report.structure.fonts_used.len());
    println!(
        "{}: {}",
        "Tagged".bold(),
        if report.structure.is_tagged_pdf { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Quality".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let quality = &report.quality;
    println!("{}: {:.2}", "Overall".bold(), quality.overall_score);
    println!("{}: {:.2}", "Text".bold(), quality.text_quality);
    println!("{}: {:.2}", "Structure".bold(), quality.structure_quality);
    println!("{}: {:.2}", "Images".bold(), quality.image_quality);

    for issue in &quality.issues {
        let severity = match issue.severity {
            Severity::High => issue.severity.as_str().red(),
            Severity::Medium => issue.severity.as_str().yellow(),
            Severity::Low | Severity::Info => issue.severity.as_str().dimmed(),
        };
        println!("  [{}] {}", severity, issue.description);
    }
    for recommendation in &quality.recommendations {
        println!("  {} {}", "→".green(), recommendation);
    }
}

fn cmd_tables(input: &Path, max_size: u64) -> Result<(), Box<dyn std::error::Error>> {
    check_size(input, max_size)?;
    let config = ProcessorConfig::new().with_quality(false);
    let report = Processor::with_config(config).inspect_file(input)?;

    if report.tables.is_empty() {
        println!("{}", "No tables detected".yellow());
        return Ok(());
    }

    for (i, table) in report.tables.iter().enumerate() {
        println!(
            "{} {} (page {}, {} rows x {} columns, confidence {:.2})",
            "Table".cyan().bold(),
            i + 1,
            table.page,
            table.rows,
            table.columns,
            table.confidence
        );
        println!("{}", table.plain_text());
        println!();
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfprobe".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF inspection tool");
    println!();
    println!("License: MIT");
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
