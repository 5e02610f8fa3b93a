use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "foliopress", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble the current issue into a bundle JSON (plus cover PNGs).
    Assemble(AssembleArgs),
    /// Sanitize one markup file to stdout.
    Sanitize(SanitizeArgs),
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Edition rows, a JSON array of objects.
    #[arg(long)]
    editions: PathBuf,

    /// Article rows, a JSON array of objects.
    #[arg(long)]
    articles: PathBuf,

    /// Output bundle JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Cover background image; omitted means no cover files are produced.
    #[arg(long)]
    cover_background: Option<PathBuf>,

    /// Font file for the cover text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Extra directories scanned for a usable font.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Issue date as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date: Option<chrono::NaiveDate>,

    /// Fixed highlight-sampling seed, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct SanitizeArgs {
    /// Input markup file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble(args) => cmd_assemble(args),
        Command::Sanitize(args) => cmd_sanitize(args),
    }
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<foliopress::Record>> {
    let f = File::open(path).with_context(|| format!("open rows '{}'", path.display()))?;
    let r = BufReader::new(f);
    let rows: Vec<foliopress::Record> = serde_json::from_reader(r)
        .map_err(foliopress::FolioError::from)
        .with_context(|| format!("parse rows '{}'", path.display()))?;
    Ok(rows)
}

fn cmd_assemble(args: AssembleArgs) -> anyhow::Result<()> {
    let edition_rows = read_rows(&args.editions)?;
    let article_rows = read_rows(&args.articles)?;

    let mut font_search_roots = args.font_dirs.clone();
    if let Some(bg) = &args.cover_background
        && let Some(parent) = bg.parent()
    {
        font_search_roots.push(parent.to_path_buf());
    }

    let options = foliopress::AssemblyOptions {
        cover_background: args.cover_background,
        font_path: args.font,
        font_search_roots,
        issue_date: args
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        seed: args.seed,
    };

    let bundle = foliopress::assemble(&edition_rows, &article_rows, &options)?;

    let out = File::create(&args.out)
        .with_context(|| format!("create bundle '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(out, &bundle)
        .map_err(foliopress::FolioError::from)
        .context("write bundle JSON")?;

    println!(
        "assembled edition {} with {} articles -> {}",
        bundle.edition.number,
        bundle.articles.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_sanitize(args: SanitizeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read markup '{}'", args.in_path.display()))?;
    println!("{}", foliopress::sanitize_markup(&raw));
    Ok(())
}
