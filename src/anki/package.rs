use std::{
    fs::File,
    io::{
        Read,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};

use rand::Rng;
use serde::Serialize;
use zip::{
    write::SimpleFileOptions,
    ZipWriter,
};

use super::notes::FlashcardNote;
use crate::core::SejeonError;

#[derive(Debug)]
pub struct Deck {
    pub id: u64,
    pub name: String,
    pub notes: Vec<FlashcardNote>,
}

impl Deck {
    pub fn new(name: String, notes: Vec<FlashcardNote>) -> Self {
        // Unique per chapter; note identity lives in the GUIDs, not here
        let id = rand::rng().random_range(1u64 << 30..1u64 << 31);
        Self { id, name, notes }
    }
}

#[derive(Serialize)]
struct DeckManifest<'a> {
    id: u64,
    name: &'a str,
    notes: Vec<NoteManifest<'a>>,
    media: Vec<String>,
}

#[derive(Serialize)]
struct NoteManifest<'a> {
    model: &'static str,
    guid: &'a str,
    fields: &'a [String],
    tags: &'a [String],
}

/// Writes one distributable package for a chapter: a ZIP archive holding the
/// deck manifest as `deck.json` plus every referenced media file under
/// `media/`.
pub fn write_package(
    deck: &Deck,
    media_files: &[PathBuf],
    output_file: &Path,
) -> Result<(), SejeonError> {
    let manifest = DeckManifest {
        id: deck.id,
        name: &deck.name,
        notes: deck
            .notes
            .iter()
            .map(|note| NoteManifest {
                model: note.note_type.model_name(),
                guid: &note.guid,
                fields: &note.fields,
                tags: &note.tags,
            })
            .collect(),
        media: media_files
            .iter()
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
            .map(|name| name.to_string())
            .collect(),
    };

    let file = File::create(output_file)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("deck.json", options)?;
    zip.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

    for path in media_files {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        zip.start_file(format!("media/{}", name), options)?;
        let mut media = File::open(path)?;
        let mut buffer = Vec::new();
        media.read_to_end(&mut buffer)?;
        zip.write_all(&buffer)?;
    }

    zip.finish()?;
    Ok(())
}
