// Phonemize CLI — resolves every note of a song against a singer.
//
// Loads a singer JSON and a song JSON, binds the singer to a Japanese VCV
// phonemizer, and prints one line per note: position, lyric, phoneme, and
// the recorded alias it maps to at the note's tone (or "-" if none).
//
// Usage:
//   cargo run -p vcv_phonemizer -- <singer.json> <song.json>
//     [--vowels table.json] [--parallel]
//
// Set RUST_LOG=debug to see every raw-lyric fallback.

use std::path::Path;
use std::sync::Arc;
use vcv_kana::VowelTable;
use vcv_phonemizer::{
    JapaneseVcvPhonemizer, LoadError, Phonemizer, Singer, Song, par_resolve_track, resolve_track,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let positional: Vec<&str> = positional_args(&args);
    let (Some(singer_path), Some(song_path)) = (positional.first(), positional.get(1)) else {
        eprintln!("Usage: phonemize <singer.json> <song.json> [--vowels table.json] [--parallel]");
        std::process::exit(2);
    };
    let vowels_path: Option<String> = parse_flag(&args, "--vowels");
    let parallel = args.iter().any(|a| a == "--parallel");

    if let Err(e) = run(singer_path, song_path, vowels_path.as_deref(), parallel) {
        eprintln!("phonemize: {e}");
        std::process::exit(1);
    }
}

fn run(
    singer_path: &str,
    song_path: &str,
    vowels_path: Option<&str>,
    parallel: bool,
) -> Result<(), LoadError> {
    let singer = Arc::new(Singer::load(Path::new(singer_path))?);
    let song = Song::load(Path::new(song_path))?;

    let mut phonemizer = match vowels_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            JapaneseVcvPhonemizer::with_table(Arc::new(VowelTable::from_json(&json)?))
        }
        None => JapaneseVcvPhonemizer::new(),
    };
    phonemizer.set_voicebank(Arc::clone(&singer));

    tracing::info!(
        singer = %singer.name,
        aliases = singer.alias_count(),
        notes = song.notes.len(),
        phonemizer = phonemizer.tag(),
        "resolving"
    );

    let resolved = if parallel {
        par_resolve_track(&phonemizer, &song.notes)
    } else {
        resolve_track(&phonemizer, &song.notes)
    };

    for (note, phonemes) in song.notes.iter().zip(&resolved) {
        for phoneme in phonemes {
            let mapped = singer.mapped_alias(&phoneme.phoneme, note.tone).unwrap_or("-");
            println!(
                "{}\t{}\t{}\t{}",
                i64::from(note.position) + i64::from(phoneme.position),
                note.lyric,
                phoneme.phoneme,
                mapped
            );
        }
    }
    Ok(())
}

/// Arguments that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--vowels" {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
