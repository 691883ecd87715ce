mod media;

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use dotenvy::dotenv;
use anyhow::{Context, Result};

use vocab_deck_backend::{build_deck, AnkiNotePackager, DeckWriter, ExportSettings, LayoutChoice, LessonDocument};
use vocab_deck_backend::logger::info;

use crate::media::download_assets;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a flashcard deck from a saved vocabulary lesson page", long_about = None)]
struct Cli {
    /// Saved lesson or word list page (HTML)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Deck title. Defaults to the input file name.
    #[arg(long)]
    title: Option<String>,

    /// Site origin that relative media URLs are resolved against
    #[arg(long, value_name = "URL", env = "VOCAB_DECK_ORIGIN")]
    origin: Option<String>,

    /// Page layout: auto, lesson or words
    #[arg(long)]
    layout: Option<LayoutChoice>,

    /// Where the deck files are written
    #[arg(long, value_name = "DIRECTORY_PATH", env = "VOCAB_DECK_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Where downloaded media files are saved
    #[arg(long, value_name = "DIRECTORY_PATH")]
    media_dir: Option<PathBuf>,

    /// Download the audio and image files the notes refer to
    #[arg(long, default_value_t = false)]
    download: bool,

    /// Don't write the CSV copy of the notes
    #[arg(long, default_value_t = false)]
    no_csv: bool,

    /// JSON settings file. Command line options take precedence.
    #[arg(long, value_name = "FILE_PATH")]
    config: Option<PathBuf>,
}

/// `Absolute_Beginner-Lesson-3.html` -> `Absolute Beginner Lesson 3`
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_else(|| "deck".to_string())
}

/// Defaults, then the config file, then flags and environment.
fn export_settings(cli: &Cli) -> Result<ExportSettings> {
    let mut settings = match &cli.config {
        Some(path) => ExportSettings::load_from_json(path)?,
        None => ExportSettings::default(),
    };

    if let Some(origin) = &cli.origin {
        settings.site_origin = origin.clone();
    }
    if let Some(layout) = cli.layout {
        settings.layout = layout;
    }
    if let Some(out_dir) = &cli.out_dir {
        settings.out_dir = out_dir.clone();
    }
    if let Some(media_dir) = &cli.media_dir {
        settings.media_dir = media_dir.clone();
    }
    if cli.download {
        settings.download_media = true;
    }
    if cli.no_csv {
        settings.write_csv = false;
    }

    Ok(settings)
}

fn run(cli: Cli) -> Result<()> {
    let settings = export_settings(&cli)?;
    let title = cli.title.clone().unwrap_or_else(|| title_from_path(&cli.input));

    let doc = LessonDocument::from_path(&cli.input)?;

    let report = build_deck(
        &doc,
        &title,
        settings.layout.forced_layout(),
        &settings.site_origin,
        &AnkiNotePackager,
    )
    .with_context(|| format!("Failed to build deck from {}", cli.input.display()))?;

    let written = DeckWriter::new(&settings.out_dir, settings.write_csv).write(&report.deck)?;

    if settings.download_media {
        download_assets(&report.assets, &settings.media_dir)?;
    } else {
        info(&format!("{} media files not downloaded", report.assets.len()));
    }

    println!("Records: {} produced, {} skipped", report.produced(), report.skipped_count());
    println!("Created {}", written.manifest_path.display());
    if let Some(csv_path) = written.csv_path {
        println!("Created {}", csv_path.display());
    }

    Ok(())
}

fn main() {
    // May define VOCAB_DECK_ORIGIN and VOCAB_DECK_OUT_DIR, which clap reads via `env`.
    let _ = dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}
