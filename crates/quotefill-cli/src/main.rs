mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use quotefill_acquire::{AcquireConfig, Acquirer, DEFAULT_DPI, OcrClient, PdfiumBackend};
use quotefill_core::template;
use quotefill_core::vehicles::vehicles_batch;
use quotefill_extract::Extraction;
use quotefill_ocr::{HttpOcrClient, TextractClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Read auto insurance quotes and fill policy explanation templates.
#[derive(Parser, Debug)]
#[command(name = "quotefill", version, about)]
struct Cli {
    /// OCR collaborator used for images and scanned PDFs.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "QUOTEFILL_OCR",
        default_value_t = OcrKind::Textract
    )]
    ocr: OcrKind,

    /// Base URL of the OCR gateway (required with `--ocr http`).
    #[arg(long, global = true, env = "QUOTEFILL_OCR_URL")]
    ocr_url: Option<String>,

    /// AWS region for Textract.
    #[arg(long, global = true, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Rasterization resolution for scanned PDFs.
    #[arg(long, global = true, env = "QUOTEFILL_DPI", default_value_t = DEFAULT_DPI)]
    dpi: u16,

    /// Append table rows from structured OCR analysis to OCR'd pages.
    #[arg(long, global = true)]
    tables: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a quote record from a PDF or image.
    Extract {
        /// Quote document (.pdf, .png, .jpg, .jpeg).
        file: PathBuf,

        /// Print the record as JSON instead of a card.
        #[arg(long)]
        json: bool,

        /// Also print the acquired transcript.
        #[arg(long)]
        show_text: bool,

        /// Print vehicles as a table.
        #[arg(long)]
        vehicles_table: bool,

        /// Also print the one-line SMS summary.
        #[arg(long)]
        sms: bool,
    },
    /// Extract a quote and fill a policy explanation template.
    Fill {
        /// Quote document (.pdf, .png, .jpg, .jpeg).
        file: PathBuf,

        /// UTF-8 text template, one paragraph per line.
        #[arg(long)]
        template: PathBuf,

        /// Write the filled document here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OcrKind {
    Textract,
    Http,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("quotefill v{}", env!("CARGO_PKG_VERSION"));

    let ocr = build_ocr(&cli).await?;
    let config = AcquireConfig {
        dpi: cli.dpi,
        include_tables: cli.tables,
    };
    let acquirer = Acquirer::new(ocr.as_ref(), &PdfiumBackend).with_config(config);

    match cli.command {
        Command::Extract {
            file,
            json,
            show_text,
            vehicles_table,
            sms,
        } => {
            let extraction = run_extract(&acquirer, &file).await?;
            let record = &extraction.record;

            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                print!("{}", display::render_quote_card(record, chrono::Local::now()));
            }

            if vehicles_table && !record.vehicles.is_empty() {
                let batch = vehicles_batch(&record.vehicles)?;
                arrow::util::pretty::print_batches(&[batch])?;
            }

            if sms {
                println!("--- SMS ---");
                println!("{}", template::sms_summary(record));
            }

            if show_text {
                println!("--- transcript ---");
                println!("{}", display::transcript_preview(&extraction.transcript));
            }
        }
        Command::Fill {
            file,
            template: template_path,
            output,
        } => {
            let extraction = run_extract(&acquirer, &file).await?;
            let template_text = std::fs::read_to_string(&template_path)
                .with_context(|| format!("reading template {}", template_path.display()))?;
            let filled = template::fill_document(&template_text, &extraction.record);

            match output {
                Some(path) => {
                    write_filled(&path, &filled)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{filled}"),
            }
        }
    }

    Ok(())
}

async fn build_ocr(cli: &Cli) -> anyhow::Result<Box<dyn OcrClient>> {
    match cli.ocr {
        OcrKind::Textract => Ok(Box::new(TextractClient::new(&cli.region).await)),
        OcrKind::Http => {
            let Some(url) = cli.ocr_url.clone() else {
                bail!("--ocr http requires --ocr-url or QUOTEFILL_OCR_URL");
            };
            Ok(Box::new(HttpOcrClient::new(url)))
        }
    }
}

async fn run_extract(acquirer: &Acquirer<'_>, file: &Path) -> anyhow::Result<Extraction> {
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    quotefill_extract::extract(&bytes, filename, acquirer)
        .await
        .with_context(|| format!("extracting {}", file.display()))
}

fn write_filled(path: &Path, filled: &str) -> anyhow::Result<()> {
    let mut contents = filled.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
