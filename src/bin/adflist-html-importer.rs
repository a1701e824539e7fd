//! adflist-html-importer - Convert rendered HTML lists to ADF
//!
//! Usage:
//!   adflist-html-importer -f note.html -o note.json
//!   adflist-html-importer -f note.html --file-context https://wiki.example.com/space/
//!   adflist-html-importer -d ./rendered -o ./adf --report report.txt --report-format text
//!   cat note.html | adflist-html-importer > note.json

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use adflist::importer::{ConversionReport, HtmlImporter, ImportOptions};

#[derive(ValueEnum, Clone, Debug)]
enum ReportFormat {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert rendered HTML lists to ADF",
    long_about = "Converts every <ul>/<ol> of an HTML document into ADF list blocks.\n\n\
                  Checkbox and data-task items become taskList blocks; lists mixing\n\
                  tasks and plain items are split into consecutive blocks.\n\n\
                  If no input file is specified, reads from stdin.\n\
                  If no output file is specified, writes to stdout."
)]
struct Cli {
    /// Input HTML file (reads from stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Context for resolving relative links (defaults to the input path)
    #[arg(long, value_name = "CONTEXT")]
    file_context: Option<String>,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// TOML file with an [import] table
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Batch convert directory
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// File pattern for batch conversion
    #[arg(long, default_value = "*.html")]
    pattern: String,

    /// Generate conversion report
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    report_format: ReportFormat,

    /// Dry run (show what would be converted without writing)
    #[arg(long)]
    dry_run: bool,

    /// debug log file
    #[arg(long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<&Path>) -> Result<()> {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(filename) = logfile {
        let file = File::create(filename)
            .with_context(|| format!("cannot create log file {}", filename.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            simplelog::Config::default(),
            file,
        ));
    }
    simplelog::CombinedLogger::init(loggers).context("logger already initialized")?;
    Ok(())
}

fn build_options(args: &Cli) -> Result<ImportOptions> {
    let mut options = match &args.config {
        Some(path) => ImportOptions::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ImportOptions::default(),
    };
    if let Some(context) = &args.file_context {
        options = options.with_file_context(context);
    }
    if args.compact {
        options = options.with_pretty(false);
    }
    Ok(options)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.as_deref())?;

    let options = build_options(&args)?;
    log::debug!("import options: {:?}", options);
    let importer = HtmlImporter::new(options);

    // Handle batch conversion
    if let Some(ref dir) = args.directory {
        return batch_convert(&importer, dir, &args);
    }

    // Single file conversion
    let (input_content, input_name) = match &args.file {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, "stdin".to_string())
        }
    };

    let output_name = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let result = importer.import(&input_content, &input_name, &output_name)?;

    for warning in &result.report.warnings {
        log::warn!("{}", warning);
    }

    if args.dry_run {
        eprintln!("\n{}", result.report.to_text());
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
            );
            writer.write_all(result.json.as_bytes())?;
            writer.flush()?;

            eprintln!(
                "✓ Converted {} to {} ({} list(s), {} warning(s))",
                input_name,
                path.display(),
                result.report.statistics.lists,
                result.report.warnings.len()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writer.write_all(result.json.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }

    if let Some(report_path) = &args.report {
        write_report(&result.report, report_path, &args.report_format)?;
        eprintln!("✓ Report written to {}", report_path.display());
    }

    Ok(())
}

fn batch_convert(importer: &HtmlImporter, dir: &Path, args: &Cli) -> Result<()> {
    let Some(output_dir) = args.output.as_ref() else {
        bail!("Output directory required for batch conversion");
    };

    if !args.dry_run && !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let start_time = Instant::now();
    let mut total_files = 0;
    let mut failed = 0;
    let mut all_reports = Vec::new();

    let pattern = format!("{}/{}", dir.display(), args.pattern);
    let entries: Vec<_> = glob::glob(&pattern)
        .with_context(|| format!("Invalid pattern: {}", pattern))?
        .filter_map(|e| e.ok())
        .collect();

    for input_path in entries {
        total_files += 1;

        let relative = input_path
            .strip_prefix(dir)
            .unwrap_or(&input_path)
            .with_extension("json");
        let output_path = output_dir.join(relative);

        log::info!(
            "Converting {} -> {}",
            input_path.display(),
            output_path.display()
        );

        let input_content = match fs::read_to_string(&input_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("✗ Failed to read {}: {}", input_path.display(), e);
                failed += 1;
                continue;
            }
        };

        let result = match importer.import(
            &input_content,
            &input_path.display().to_string(),
            &output_path.display().to_string(),
        ) {
            Ok(r) => r,
            Err(e) => {
                log::error!("✗ Failed to convert {}: {}", input_path.display(), e);
                failed += 1;
                continue;
            }
        };

        if !args.dry_run {
            if let Some(parent) = output_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    log::error!("✗ Failed to create {}: {}", parent.display(), e);
                    failed += 1;
                    continue;
                }
            }
            if let Err(e) = fs::write(&output_path, &result.json) {
                log::error!("✗ Failed to write {}: {}", output_path.display(), e);
                failed += 1;
                continue;
            }
        }

        for warning in &result.report.warnings {
            log::warn!("{}: {}", input_path.display(), warning);
        }
        all_reports.push(result.report);
    }

    let duration = start_time.elapsed();
    let total_warnings: usize = all_reports.iter().map(|r| r.warnings.len()).sum();

    eprintln!("\nBatch Conversion Summary");
    eprintln!("========================");
    eprintln!("Files processed: {}", total_files);
    eprintln!("Succeeded:       {}", all_reports.len());
    eprintln!("Failed:          {}", failed);
    eprintln!("Total warnings:  {}", total_warnings);
    eprintln!("Duration:        {:?}", duration);

    if args.dry_run {
        eprintln!("\n(Dry run - no files were written)");
    }

    if let Some(report_path) = &args.report {
        let batch_report = create_batch_report(
            dir,
            output_dir,
            &all_reports,
            failed,
            duration.as_millis() as u64,
        );

        let report_content = match args.report_format {
            ReportFormat::Json => serde_json::to_string_pretty(&batch_report)?,
            ReportFormat::Text => format_batch_report_text(&batch_report),
        };

        fs::write(report_path, report_content)?;
        eprintln!("✓ Report written to {}", report_path.display());
    }

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn write_report(report: &ConversionReport, path: &Path, format: &ReportFormat) -> Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Text => report.to_text(),
    };
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

#[derive(serde::Serialize)]
struct BatchReport {
    input_directory: String,
    output_directory: String,
    files_processed: usize,
    files_succeeded: usize,
    files_failed: usize,
    total_warnings: usize,
    duration_ms: u64,
    files: Vec<FileReport>,
}

#[derive(serde::Serialize)]
struct FileReport {
    input: String,
    output: String,
    status: String,
    lists: usize,
    warnings: usize,
    duration_ms: u64,
}

fn create_batch_report(
    input_dir: &Path,
    output_dir: &Path,
    reports: &[ConversionReport],
    failed: usize,
    duration_ms: u64,
) -> BatchReport {
    let files: Vec<FileReport> = reports
        .iter()
        .map(|r| FileReport {
            input: r.input_file.clone(),
            output: r.output_file.clone(),
            status: if r.warnings.is_empty() {
                "success".to_string()
            } else {
                "success_with_warnings".to_string()
            },
            lists: r.statistics.lists,
            warnings: r.warnings.len(),
            duration_ms: r.duration_ms,
        })
        .collect();

    BatchReport {
        input_directory: input_dir.display().to_string(),
        output_directory: output_dir.display().to_string(),
        files_processed: reports.len() + failed,
        files_succeeded: reports.len(),
        files_failed: failed,
        total_warnings: reports.iter().map(|r| r.warnings.len()).sum(),
        duration_ms,
        files,
    }
}

fn format_batch_report_text(report: &BatchReport) -> String {
    let mut output = String::new();

    output.push_str("Batch Conversion Report\n");
    output.push_str("=======================\n");
    output.push_str(&format!("Input directory:  {}\n", report.input_directory));
    output.push_str(&format!("Output directory: {}\n", report.output_directory));
    output.push_str(&format!("Duration:         {}ms\n\n", report.duration_ms));

    output.push_str("Summary\n");
    output.push_str("-------\n");
    output.push_str(&format!("Files processed:  {}\n", report.files_processed));
    output.push_str(&format!("Succeeded:        {}\n", report.files_succeeded));
    output.push_str(&format!("Failed:           {}\n", report.files_failed));
    output.push_str(&format!("Total warnings:   {}\n\n", report.total_warnings));

    output.push_str("Files\n");
    output.push_str("-----\n");
    for file in &report.files {
        let status_icon = if file.status == "success" { "✓" } else { "⚠" };
        output.push_str(&format!(
            "{} {} -> {} ({} lists, {} warnings, {}ms)\n",
            status_icon, file.input, file.output, file.lists, file.warnings, file.duration_ms
        ));
    }

    output
}
