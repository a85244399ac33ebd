use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hearmeout::{
    ComposeOpts, DEFAULT_TITLE, EntryStore, FadeOpts, FontCandidates, FontSet, PartyError,
    PngDirSink, SlideCursor, compose, fetch_character_image,
};

#[derive(Parser, Debug)]
#[command(name = "hearmeout", version, about = "HEAR ME OUT party memes")]
struct Cli {
    /// Storage root for images and entry records.
    #[arg(long, global = true, env = "HEARMEOUT_DATA_DIR", default_value = "party_data")]
    data_dir: PathBuf,

    /// SerpAPI key; without it every image is a placeholder.
    #[arg(long, global = true, env = "SERPAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Font file tried before the built-in candidates.
    #[arg(long, global = true, env = "HEARMEOUT_FONT")]
    font: Option<PathBuf>,

    /// Skip font discovery and use the built-in bitmap font.
    #[arg(long, global = true, default_value_t = false)]
    bitmap_font: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find an image for a character, compose the meme and store it.
    Submit(SubmitArgs),
    /// List stored entries, oldest first.
    List(ListArgs),
    /// Delete every stored entry.
    Clear,
    /// Compose a meme from a local image without storing it.
    Compose(ComposeArgs),
    /// Render cross-fades between stored entries as numbered PNG frames.
    Slideshow(SlideshowArgs),
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Character name.
    character: String,

    /// Submitter name.
    #[arg(long, default_value = "")]
    guest: String,

    /// Also write the composed meme here.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Only the N most recent entries.
    #[arg(long)]
    recent: Option<usize>,

    /// Print entries as a JSON array.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption line.
    #[arg(long, default_value = "")]
    caption: String,

    /// Title line.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SlideshowArgs {
    /// Output directory for frames.
    #[arg(long)]
    out: PathBuf,

    /// Blend steps per transition.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Transition length in milliseconds.
    #[arg(long, default_value_t = 500)]
    duration_ms: u64,

    /// 1-based slide to start from.
    #[arg(long, default_value_t = 1)]
    start: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hearmeout=debug")),
        )
        .init();

    let cli = Cli::parse();
    let store = EntryStore::new(&cli.data_dir);
    match &cli.cmd {
        Command::Submit(args) => cmd_submit(&cli, &store, args),
        Command::List(args) => cmd_list(&store, args),
        Command::Clear => cmd_clear(&store),
        Command::Compose(args) => cmd_compose(&cli, args),
        Command::Slideshow(args) => cmd_slideshow(&store, args),
    }
}

fn fonts(cli: &Cli) -> FontSet {
    if cli.bitmap_font {
        return FontSet::bitmap();
    }
    let mut candidates = FontCandidates::default();
    if let Some(path) = &cli.font {
        candidates = candidates.prefer(path);
    }
    FontSet::discover(&candidates)
}

fn cmd_submit(cli: &Cli, store: &EntryStore, args: &SubmitArgs) -> anyhow::Result<()> {
    let character = args.character.as_str();
    if character.trim().is_empty() {
        return Err(PartyError::validation("character name must not be blank").into());
    }

    let fonts = fonts(cli);
    let fetched = fetch_character_image(character, cli.api_key.as_deref(), &fonts);
    let meme = compose(
        &fetched.image,
        DEFAULT_TITLE,
        character,
        &fonts,
        &ComposeOpts::default(),
    );
    let entry = store.save(character, &args.guest, &meme, &fetched.source)?;

    if let Some(out) = &args.out {
        write_png(&meme, out)?;
    }
    println!(
        "{}\t{}\t{}\t{}",
        entry.id,
        entry.guest,
        entry.source,
        entry.image_path.display()
    );
    Ok(())
}

fn cmd_list(store: &EntryStore, args: &ListArgs) -> anyhow::Result<()> {
    let all = store.load_all();
    let skip = args
        .recent
        .map(|n| all.len().saturating_sub(n))
        .unwrap_or(0);

    if args.json {
        let json = serde_json::to_string_pretty(&all[skip..]).context("encode entries")?;
        println!("{json}");
        return Ok(());
    }

    let cursor = SlideCursor::new(all.len());
    for (i, entry) in all.iter().enumerate().skip(skip) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            cursor.jump(i).position(),
            entry.timestamp,
            entry.character,
            entry.guest,
            entry.source
        );
    }
    Ok(())
}

fn cmd_clear(store: &EntryStore) -> anyhow::Result<()> {
    let report = store.clear_all();
    println!("removed {} files ({} failed)", report.removed, report.failed);
    Ok(())
}

fn cmd_compose(cli: &Cli, args: &ComposeArgs) -> anyhow::Result<()> {
    let image = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?;
    let meme = compose(
        &image,
        &args.title,
        &args.caption,
        &fonts(cli),
        &ComposeOpts::default(),
    );
    write_png(&meme, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_slideshow(store: &EntryStore, args: &SlideshowArgs) -> anyhow::Result<()> {
    let all = store.load_all();
    let cursor = SlideCursor::new(all.len()).jump(args.start.saturating_sub(1));
    if cursor.current(&all).is_none() {
        eprintln!("no entries to show");
        return Ok(());
    }

    let opts = FadeOpts {
        duration: Duration::from_millis(args.duration_ms),
        steps: args.steps,
        ..FadeOpts::default()
    };
    let mut sink = PngDirSink::new(&args.out);
    let frames = hearmeout::play(&all[cursor.index()..], &opts, &mut sink)?;
    eprintln!("wrote {frames} frames to {}", args.out.display());
    Ok(())
}

fn write_png(image: &image::RgbImage, out: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
