// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! camelot - harmonic key tools for DJ libraries
//!
//! Wheel queries (`compatible`, `lookup`, `relative`, `path`, `sequence`,
//! `distance`) need no files. Library commands scan a directory, read
//! key and tempo from tags (or a `--manifest`) and organize files or
//! write M3U playlists.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use camelot_organizer::analysis::{
    analyze_all, Analyzer, ManifestAnalyzer, TagAnalyzer, TrackAnalysis,
};
use camelot_organizer::camelot::{
    generate_sequence, harmonic_path, CamelotCode, KeyTable, Traversal,
};
use camelot_organizer::config::Settings;
use camelot_organizer::library::{
    find_audio_files, group_by_key, organize_by_key, OrganizeOptions, TransferMode,
};
use camelot_organizer::playlist::{
    compatible_playlist, sequence_playlist, transition_playlist, zone_playlist, BpmRange, Playlist,
};

#[derive(Parser)]
#[command(name = "camelot")]
#[command(about = "Camelot wheel key tools and DJ library organizer")]
#[command(version)]
struct Cli {
    /// Settings file (.yaml, .yml or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// YAML manifest with key/BPM per file, used instead of audio tags
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List audio files under a directory
    Find {
        directory: PathBuf,
    },

    /// Show key and tempo for every audio file
    Analyze {
        directory: PathBuf,
    },

    /// Copy or move files into one folder per Camelot key
    Organize {
        directory: PathBuf,
        output: PathBuf,

        /// Move instead of copy
        #[arg(long = "move")]
        move_files: bool,

        /// Append "(8A, 128 BPM)" to file names
        #[arg(long)]
        tag_names: bool,
    },

    /// Playlist of tracks compatible with a key and inside a BPM range
    Playlist {
        directory: PathBuf,
        output: PathBuf,

        /// Target key (Camelot code or key name)
        #[arg(short, long)]
        key: Option<String>,

        /// BPM range, e.g. 120-130
        #[arg(short, long)]
        bpm: Option<BpmRange>,

        #[arg(long)]
        max_songs: Option<usize>,
    },

    /// Playlist following a generated key sequence
    SequencePlaylist {
        directory: PathBuf,
        output: PathBuf,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        length: Option<usize>,

        /// forward, backward or zigzag
        #[arg(short, long)]
        traversal: Option<Traversal>,

        #[arg(long)]
        per_key: Option<usize>,
    },

    /// Playlist moving from one key to another
    TransitionPlaylist {
        directory: PathBuf,
        output: PathBuf,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(long)]
        max_steps: Option<usize>,

        #[arg(long)]
        max_songs: Option<usize>,
    },

    /// Playlist of tracks near a center key
    ZonePlaylist {
        directory: PathBuf,
        output: PathBuf,

        #[arg(short, long)]
        center: String,

        /// Wheel steps from the center (a ring change counts as one)
        #[arg(short, long)]
        radius: Option<u8>,

        #[arg(long)]
        max_songs: Option<usize>,
    },

    /// Keys that mix with a key
    Compatible {
        key: String,
    },

    /// Camelot code and key name for a code or key name
    Lookup {
        key: String,
    },

    /// Relative major/minor of a key
    Relative {
        key: String,
    },

    /// Harmonic path between two keys
    Path {
        start: String,
        end: String,

        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Generate a key sequence
    Sequence {
        start: String,

        #[arg(short, long)]
        length: Option<usize>,

        #[arg(short, long)]
        traversal: Option<Traversal>,
    },

    /// Wheel distance between two keys
    Distance {
        a: String,
        b: String,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve(table: &KeyTable, text: &str) -> Result<CamelotCode> {
    table.resolve(text).ok_or_else(|| {
        anyhow!(
            "Unrecognized key: {:?} (use a Camelot code like 8A or a name like \"A Minor\")",
            text
        )
    })
}

fn describe(table: &KeyTable, code: CamelotCode) -> String {
    match table.key_name(code) {
        Some(name) => format!("{} ({})", code, name),
        None => code.to_string(),
    }
}

fn join(codes: &[CamelotCode]) -> String {
    codes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" > ")
}

/// Scan `directory` and analyze every audio file
fn load_tracks(
    directory: &Path,
    settings: &Settings,
    analyzer: &dyn Analyzer,
) -> Vec<TrackAnalysis> {
    let files = find_audio_files(
        directory,
        &settings.library.extensions,
        settings.library.follow_links,
    );
    info!(count = files.len(), analyzer = analyzer.name(), "analyzing audio files");
    analyze_all(&files, analyzer)
}

fn write_playlist(playlist: &Playlist, output: &Path) -> Result<()> {
    playlist.write(output)?;
    println!("Wrote {} tracks to {}", playlist.len(), output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let table = Arc::new(KeyTable::standard());

    let analyzer: Box<dyn Analyzer> = match &cli.manifest {
        Some(path) => Box::new(
            ManifestAnalyzer::load(path, Arc::clone(&table))
                .with_context(|| format!("Failed to load manifest {:?}", path))?,
        ),
        None => Box::new(TagAnalyzer::new(Arc::clone(&table))),
    };
    let limits = &settings.playlist;

    match cli.command {
        Commands::Find { directory } => {
            let files = find_audio_files(
                &directory,
                &settings.library.extensions,
                settings.library.follow_links,
            );
            for file in &files {
                println!("{}", file.display());
            }
            println!("Found {} audio files", files.len());
        }
        Commands::Analyze { directory } => {
            let tracks = load_tracks(&directory, &settings, analyzer.as_ref());
            for (bin, group) in group_by_key(&tracks) {
                println!("{} ({} tracks)", bin, group.len());
                for track in group {
                    let bpm = track
                        .bpm
                        .map(|b| format!("{:.1} BPM", b))
                        .unwrap_or_else(|| "? BPM".to_string());
                    let key = track.key.map(|k| k.to_string()).unwrap_or_default();
                    println!("  {}  {}  {}", track.path.display(), key, bpm);
                }
            }
        }
        Commands::Organize {
            directory,
            output,
            move_files,
            tag_names,
        } => {
            let files = find_audio_files(
                &directory,
                &settings.library.extensions,
                settings.library.follow_links,
            );
            let options = OrganizeOptions {
                transfer: if move_files {
                    TransferMode::Move
                } else {
                    settings.organize.transfer
                },
                tag_file_names: tag_names || settings.organize.tag_file_names,
            };
            let report = organize_by_key(&files, analyzer.as_ref(), &output, options)?;

            println!("Organized {} of {} files", report.organized, report.total_files);
            for (key, names) in &report.by_key {
                println!("  {}: {} files", key, names.len());
            }
            for failure in &report.errors {
                println!("  skipped {}: {}", failure.path.display(), failure.reason);
            }
        }
        Commands::Playlist {
            directory,
            output,
            key,
            bpm,
            max_songs,
        } => {
            let target = key.as_deref().map(|k| resolve(&table, k)).transpose()?;
            let tracks = load_tracks(&directory, &settings, analyzer.as_ref());
            let playlist =
                compatible_playlist(&tracks, target, bpm, max_songs.unwrap_or(limits.max_songs));
            write_playlist(&playlist, &output)?;
        }
        Commands::SequencePlaylist {
            directory,
            output,
            start,
            length,
            traversal,
            per_key,
        } => {
            let start = resolve(&table, &start)?;
            let tracks = load_tracks(&directory, &settings, analyzer.as_ref());
            let playlist = sequence_playlist(
                &tracks,
                start,
                length.unwrap_or(limits.sequence_length),
                traversal.unwrap_or(limits.traversal),
                per_key.unwrap_or(limits.max_songs_per_key),
            );
            write_playlist(&playlist, &output)?;
        }
        Commands::TransitionPlaylist {
            directory,
            output,
            start,
            end,
            max_steps,
            max_songs,
        } => {
            let start = resolve(&table, &start)?;
            let end = resolve(&table, &end)?;
            let tracks = load_tracks(&directory, &settings, analyzer.as_ref());
            let playlist = transition_playlist(
                &tracks,
                start,
                end,
                max_steps.unwrap_or(limits.max_steps),
                max_songs.unwrap_or(limits.transition_max_songs),
            );
            write_playlist(&playlist, &output)?;
        }
        Commands::ZonePlaylist {
            directory,
            output,
            center,
            radius,
            max_songs,
        } => {
            let center = resolve(&table, &center)?;
            let tracks = load_tracks(&directory, &settings, analyzer.as_ref());
            let playlist = zone_playlist(
                &tracks,
                center,
                radius.unwrap_or(limits.zone_radius),
                max_songs.unwrap_or(limits.zone_max_songs),
            );
            write_playlist(&playlist, &output)?;
        }
        Commands::Compatible { key } => {
            let code = resolve(&table, &key)?;
            println!("Keys compatible with {}:", describe(&table, code));
            for neighbor in code.harmonic_neighbors() {
                println!("  {}", describe(&table, neighbor));
            }
        }
        Commands::Lookup { key } => {
            let code = resolve(&table, &key)?;
            println!("{}", describe(&table, code));
        }
        Commands::Relative { key } => {
            let code = resolve(&table, &key)?;
            println!("{} -> {}", describe(&table, code), describe(&table, code.relative()));
        }
        Commands::Path {
            start,
            end,
            max_steps,
        } => {
            let start = resolve(&table, &start)?;
            let end = resolve(&table, &end)?;
            let path = harmonic_path(start, end, max_steps.unwrap_or(limits.max_steps));
            println!("{}", path);
            println!("Outcome: {}", path.outcome());
        }
        Commands::Sequence {
            start,
            length,
            traversal,
        } => {
            let start = resolve(&table, &start)?;
            let sequence = generate_sequence(
                start,
                length.unwrap_or(limits.sequence_length),
                traversal.unwrap_or(limits.traversal),
            );
            println!("{}", join(&sequence));
        }
        Commands::Distance { a, b } => {
            let a = resolve(&table, &a)?;
            let b = resolve(&table, &b)?;
            println!("Wheel distance: {}", a.wheel_distance(b));
            println!("Harmonic distance: {}", a.harmonic_distance(b));
        }
    }

    Ok(())
}
