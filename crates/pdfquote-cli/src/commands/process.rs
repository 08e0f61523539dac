//! Process command - one render pass over a single PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use pdfquote_core::{RenderModel, render};

use super::screen::{ScreenHeader, render_screen};
use super::{OptionArgs, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    options: OptionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the extracted text to a file (default: the configured download name)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    save: Option<Option<PathBuf>>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// The screen as plain text
    Text,
    /// The render model as JSON
    Json,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let options = args.options.to_options(&config)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let data = tokio::fs::read(&args.input).await?;
    let model = render(Some(data.as_slice()), &options, &config);

    let source = args.input.display().to_string();
    match args.format {
        OutputFormat::Text => {
            let header = ScreenHeader {
                source: Some(source.as_str()),
                options: &options,
            };
            print!("{}", render_screen(&model, &header));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&model)?),
    }

    if let Some(save) = &args.save {
        save_download(&model, save.as_deref())?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(if model.has_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Write the download artifact, to `path` or to its own file name.
pub fn save_download(model: &RenderModel, path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let Some(download) = &model.download else {
        warn!("Nothing to save: no text was extracted");
        eprintln!("{} No extracted text to save", style("!").yellow());
        return Ok(None);
    };

    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&download.file_name));
    fs::write(&path, download.contents.as_bytes())?;

    eprintln!(
        "{} Extracted text written to {}",
        style("✓").green(),
        path.display()
    );
    Ok(Some(path))
}
