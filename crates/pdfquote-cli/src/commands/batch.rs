//! Batch processing command for multiple PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use pdfquote_core::{QuoteConfig, RenderModel, RenderOptions, render};

use super::{OptionArgs, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    #[command(flatten)]
    options: OptionArgs,

    /// Output directory for per-file text and JSON
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of rendering a single file.
struct FileResult {
    path: PathBuf,
    model: Option<RenderModel>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let options = args.options.to_options(&config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = render_file(&path, &options, &config).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        let result = match result {
            Ok(model) => {
                let error = model
                    .notices
                    .iter()
                    .find(|n| n.is_error())
                    .map(|n| n.message.clone());
                FileResult {
                    path,
                    model: Some(model),
                    error,
                    processing_time_ms,
                }
            }
            Err(e) => FileResult {
                path,
                model: None,
                error: Some(e.to_string()),
                processing_time_ms,
            },
        };

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }

        if let (Some(model), Some(output_dir)) = (&result.model, &args.output_dir) {
            write_outputs(output_dir, &result.path, model)?;
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| !r.succeeded()).collect();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(if failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn render_file(
    path: &Path,
    options: &RenderOptions,
    config: &QuoteConfig,
) -> anyhow::Result<RenderModel> {
    let data = tokio::fs::read(path).await?;
    Ok(render(Some(data.as_slice()), options, config))
}

fn write_outputs(output_dir: &Path, path: &Path, model: &RenderModel) -> anyhow::Result<()> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("document");

    let json_path = output_dir.join(format!("{}.json", stem));
    fs::write(&json_path, serde_json::to_string_pretty(model)?)?;
    debug!("Wrote output to {}", json_path.display());

    if let Some(download) = &model.download {
        let text_path = output_dir.join(format!("{}.txt", stem));
        fs::write(&text_path, download.contents.as_bytes())?;
        debug!("Wrote text to {}", text_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "pages",
        "word_count",
        "items",
        "total",
        "status",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let model = result.model.as_ref();
        let text = model.and_then(|m| m.extracted_text.as_deref());
        let quotation = model.and_then(|m| m.quotation.as_ref());

        wtr.write_record([
            filename,
            &model
                .and_then(|m| m.page_count)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            &text
                .map(|t| pdfquote_core::quotation::word_count(t).to_string())
                .unwrap_or_default(),
            &quotation.map(|q| q.items.len().to_string()).unwrap_or_default(),
            &quotation.map(|q| q.total.to_string()).unwrap_or_default(),
            if result.succeeded() { "success" } else { "error" },
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
