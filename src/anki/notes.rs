use std::collections::HashMap;

use crate::core::{
    queries::strip_cloze_markup,
    ChapterData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    VocabForward,
    VocabReverse,
    Cloze,
    Reading,
}

impl NoteType {
    pub fn model_name(&self) -> &'static str {
        match self {
            NoteType::VocabForward | NoteType::VocabReverse => "Sejeon Vocab",
            NoteType::Cloze => "Cloze",
            NoteType::Reading => "Sejeon Reading",
        }
    }

    fn discriminator(&self) -> &'static str {
        match self {
            NoteType::VocabForward => "vocab_forward",
            NoteType::VocabReverse => "vocab_reverse",
            NoteType::Cloze => "cloze",
            NoteType::Reading => "reading",
        }
    }
}

/// One emitted flashcard. The GUID is derived from the note kind and its key
/// content only, never from audio filenames, so regenerating audio keeps
/// reimports duplicate-free.
#[derive(Debug, Clone)]
pub struct FlashcardNote {
    pub note_type: NoteType,
    pub fields: Vec<String>,
    pub guid: String,
    pub tags: Vec<String>,
}

fn make_guid(parts: &[&str]) -> String {
    format!("{:x}", md5::compute(parts.join("|")))
}

fn sound_field(audio_map: &HashMap<String, String>, query: &str) -> String {
    match audio_map.get(query) {
        Some(filename) => format!("[sound:{}]", filename),
        None => String::new(),
    }
}

fn lesson_tag(chapter: &ChapterData) -> String {
    format!("Lesson-{}", chapter.chapter_info.number)
}

// Tags are whitespace-separated in the target system
fn tag_safe(text: &str) -> String {
    text.replace(' ', "_")
}

pub fn create_vocab_notes(
    chapter: &ChapterData,
    audio_map: &HashMap<String, String>,
) -> Vec<FlashcardNote> {
    let mut forwards = Vec::new();
    let mut reverses = Vec::new();

    for item in &chapter.vocabulary {
        let sound = sound_field(audio_map, &item.audio_query);

        forwards.push(FlashcardNote {
            note_type: NoteType::VocabForward,
            fields: vec![
                item.word_kr.clone(),
                item.word_en.clone(),
                item.sentence_kr_html.clone(),
                sound.clone(),
            ],
            guid: make_guid(&[
                NoteType::VocabForward.discriminator(),
                &item.word_kr,
                &item.word_en,
            ]),
            tags: vec![
                "Korean".to_string(),
                lesson_tag(chapter),
                "Vocab".to_string(),
                tag_safe(&item.category),
            ],
        });

        // Key order is reversed on purpose so forward and reverse GUIDs
        // cannot collide
        reverses.push(FlashcardNote {
            note_type: NoteType::VocabReverse,
            fields: vec![
                item.word_en.clone(),
                item.word_kr.clone(),
                item.sentence_kr_html.clone(),
                sound,
            ],
            guid: make_guid(&[
                NoteType::VocabReverse.discriminator(),
                &item.word_en,
                &item.word_kr,
            ]),
            tags: vec![
                "Korean".to_string(),
                lesson_tag(chapter),
                "Vocab".to_string(),
                "Reverse".to_string(),
                tag_safe(&item.category),
            ],
        });
    }

    forwards.append(&mut reverses);
    forwards
}

pub fn create_cloze_notes(
    chapter: &ChapterData,
    audio_map: &HashMap<String, String>,
) -> Vec<FlashcardNote> {
    let mut notes = Vec::new();

    for item in &chapter.grammar_clozes {
        // Must match the stripping applied when queries were collected
        let audio_query = strip_cloze_markup(&item.sentence_cloze);
        let sound = sound_field(audio_map, &audio_query);

        let mut extra = format!("{}<br><br>Usage: {}", item.sentence_en, item.usage_note);
        if !sound.is_empty() {
            extra.push_str("<br>");
            extra.push_str(&sound);
        }

        notes.push(FlashcardNote {
            note_type: NoteType::Cloze,
            fields: vec![item.sentence_cloze.clone(), extra],
            guid: make_guid(&[NoteType::Cloze.discriminator(), &item.sentence_cloze]),
            tags: vec![
                "Korean".to_string(),
                lesson_tag(chapter),
                "Grammar".to_string(),
                tag_safe(&item.grammar_point),
            ],
        });
    }

    notes
}

pub fn create_reading_notes(
    chapter: &ChapterData,
    audio_map: &HashMap<String, String>,
) -> Vec<FlashcardNote> {
    let mut notes = Vec::new();

    for item in &chapter.reading_passage {
        notes.push(FlashcardNote {
            note_type: NoteType::Reading,
            fields: vec![
                item.sentence_kr.clone(),
                item.sentence_en.clone(),
                sound_field(audio_map, &item.sentence_kr),
            ],
            guid: make_guid(&[NoteType::Reading.discriminator(), &item.sentence_kr]),
            tags: vec!["Korean".to_string(), lesson_tag(chapter), "Reading".to_string()],
        });
    }

    notes
}

/// Full note list for one chapter: vocabulary forwards, vocabulary reverses,
/// cloze notes, reading notes, in that fixed order.
pub fn build_notes(
    chapter: &ChapterData,
    audio_map: &HashMap<String, String>,
) -> Vec<FlashcardNote> {
    let mut notes = create_vocab_notes(chapter, audio_map);
    notes.extend(create_cloze_notes(chapter, audio_map));
    notes.extend(create_reading_notes(chapter, audio_map));
    notes
}
