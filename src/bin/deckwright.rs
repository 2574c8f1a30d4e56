//! Command-line front end for the deck compiler.
//!
//! ```sh
//! deckwright render --in deck.json --out deck.pptx
//! deckwright theme --in deck.json
//! deckwright validate --in deck.json
//! ```

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use deckwright::deck::{self, GeneratorOptions, PptxWriter, SlideOutcome};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "deckwright",
    about = "Render JSON slide-deck specifications into PowerPoint files",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a specification into a .pptx file.
    Render(RenderArgs),
    /// Print the resolved theme as JSON.
    Theme(InputArgs),
    /// Print the normalized specification and a per-slide report.
    Validate(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input specification JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input specification JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output .pptx path.
    #[arg(long)]
    out: PathBuf,

    /// Lay slides out one at a time instead of on the thread pool.
    #[arg(long)]
    sequential: bool,

    /// Fixed creation timestamp (RFC 3339) for byte-reproducible output.
    #[arg(long)]
    created: Option<DateTime<Utc>>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Theme(args) => cmd_theme(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_spec(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read specification '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| "parse specification JSON")
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let raw = read_spec(&args.in_path)?;
    let options = GeneratorOptions {
        parallel_layout: !args.sequential,
        created: args.created,
        ..Default::default()
    };

    let mut compiled = deck::compile(&raw, &options)?;
    let blob = deck::render(&mut compiled, PptxWriter::new(options.canvas), &options).await?;
    fs::write(&args.out, blob.bytes())
        .with_context(|| format!("write output '{}'", args.out.display()))?;

    info!(
        path = %args.out.display(),
        bytes = blob.len(),
        slides = compiled.slides().len(),
        substituted = compiled.substituted_count(),
        "deck written"
    );
    Ok(())
}

fn cmd_theme(args: InputArgs) -> anyhow::Result<()> {
    let raw = read_spec(&args.in_path)?;
    let spec = deck::validator::validate(&raw)?;
    let theme = deck::resolve_theme(&spec.theme, spec.presentation_type.as_deref());
    println!("{}", serde_json::to_string_pretty(&theme)?);
    Ok(())
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let raw = read_spec(&args.in_path)?;
    let options = GeneratorOptions::default();
    let compiled = deck::compile(&raw, &options)?;

    println!("{}", serde_json::to_string_pretty(compiled.spec())?);
    for outcome in compiled.outcomes() {
        match outcome {
            SlideOutcome::Rendered { index } => eprintln!("slide {}: ok", index + 1),
            SlideOutcome::Substituted { index, message } => {
                eprintln!("slide {}: error slide ({message})", index + 1)
            },
        }
    }
    Ok(())
}
