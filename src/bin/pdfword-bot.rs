//! CLI binary for pdfword-bot.
//!
//! A thin shim over the library crate: `run` starts the Telegram bot,
//! `convert` pushes a single local file through the same dispatcher.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdfword_bot::{
    convert_file, telegram, BotConfig, CloudmersiveClient, ConverterConfig, Dispatcher,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the Telegram bot (credentials from the environment or .env)
  pdfword-bot run

  # Convert a PDF to Word in the current directory (writes converted_word.docx)
  pdfword-bot convert report.pdf

  # Convert a Word document into a specific directory
  pdfword-bot convert letter.docx -o out/

  # JSON summary instead of a human-readable line
  pdfword-bot convert letter.doc -o letter.pdf --json

ROUTES:
  Extension    Result                 Output filename
  ─────────    ─────────────────────  ───────────────────
  .pdf         Word document          converted_word.docx
  .doc, .docx  PDF                    converted_pdf.pdf

  Extensions are matched case-sensitively; anything else is rejected.

ENVIRONMENT VARIABLES:
  TELEGRAM_API_TOKEN      Bot token from @BotFather (run only)
  CLOUDMERSIVE_API_KEY    Cloudmersive API key
  CLOUDMERSIVE_BASE_URL   Override the API base URL
  PDFWORD_TIMEOUT_SECS    Per-conversion timeout in seconds
  RUST_LOG                Override the log filter (e.g. pdfword_bot=debug)

  A .env file in the working directory is loaded first.
"#;

/// Convert PDF ⇄ Word through Telegram or from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "pdfword-bot",
    version,
    about = "Telegram bot converting PDF to Word and Word to PDF",
    long_about = "Telegram bot that converts PDF documents to Word and Word documents to PDF \
using the Cloudmersive document-conversion API. The same conversion can be run on a local \
file with the `convert` subcommand.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDFWORD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PDFWORD_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Telegram bot and process documents until Ctrl-C.
    Run {
        /// Telegram bot token.
        #[arg(long, env = "TELEGRAM_API_TOKEN", hide_env_values = true)]
        token: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Convert one local file.
    Convert {
        /// File to convert (.pdf, .doc or .docx).
        input: PathBuf,

        /// Output file or directory. Default: the route's output filename in
        /// the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary instead of a status line.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// Cloudmersive API key.
    #[arg(long, env = "CLOUDMERSIVE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Conversion API base URL.
    #[arg(long, env = "CLOUDMERSIVE_BASE_URL", default_value = pdfword_bot::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-conversion timeout in seconds.
    #[arg(long, env = "PDFWORD_TIMEOUT_SECS", default_value_t = pdfword_bot::config::DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

impl ApiArgs {
    fn to_config(&self) -> Result<ConverterConfig> {
        ConverterConfig::builder()
            .api_key(self.api_key.clone())
            .base_url(self.base_url.clone())
            .timeout_secs(self.timeout)
            .build()
            .context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is the normal case in production.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run { token, api } => {
            let config = BotConfig::new(token, api.to_config()?).context("Invalid configuration")?;
            telegram::run(config).await.context("Bot failed")?;
        }
        Commands::Convert {
            input,
            output,
            json,
            api,
        } => {
            let client = CloudmersiveClient::new(api.to_config()?)
                .context("Failed to create conversion client")?;
            let dispatcher = Dispatcher::new(Arc::new(client));

            let spinner = if cli.quiet || json {
                ProgressBar::hidden()
            } else {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner())
                        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
                );
                bar.set_prefix("Converting");
                bar.set_message(input.display().to_string());
                bar.enable_steady_tick(Duration::from_millis(80));
                bar
            };

            let result = convert_file(&dispatcher, &input, output.as_deref()).await;
            spinner.finish_and_clear();

            let summary = match result {
                Ok(summary) => summary,
                Err(e) => {
                    if !cli.quiet {
                        eprintln!("{} {}", red("✘"), bold(&input.display().to_string()));
                    }
                    return Err(e).context("Conversion failed");
                }
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
                );
            } else if !cli.quiet {
                eprintln!(
                    "{}  {}  {}  →  {}",
                    green("✔"),
                    summary.route,
                    dim(&format!(
                        "{} → {} bytes",
                        summary.input_bytes, summary.output_bytes
                    )),
                    bold(&summary.output.display().to_string()),
                );
            }
        }
    }

    Ok(())
}
