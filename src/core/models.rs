use std::{
    fs,
    path::Path,
};

use serde::Deserialize;

use super::SejeonError;

/// One lesson unit, loaded once per chapter and never mutated afterwards.
/// Absent content sections deserialize as empty lists; a missing required
/// field fails the load for that chapter.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterData {
    pub chapter_info: ChapterInfo,
    #[serde(default)]
    pub vocabulary: Vec<VocabItem>,
    #[serde(default)]
    pub grammar_clozes: Vec<ClozeItem>,
    #[serde(default)]
    pub reading_passage: Vec<ReadingItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterInfo {
    pub number: u32,
    pub title_kr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabItem {
    pub word_kr: String,
    pub word_en: String,
    pub sentence_kr_html: String,
    pub audio_query: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClozeItem {
    pub sentence_cloze: String,
    pub sentence_en: String,
    #[serde(default)]
    pub usage_note: String,
    pub grammar_point: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingItem {
    pub sentence_kr: String,
    pub sentence_en: String,
}

impl ChapterData {
    pub fn load(path: &Path) -> Result<Self, SejeonError> {
        let json = fs::read_to_string(path)?;
        let chapter = serde_json::from_str(&json)
            .map_err(|e| SejeonError::FailedToLoadFile(format!("{}: {}", path.display(), e)))?;
        Ok(chapter)
    }
}

/// Which textbook corpus the input directory holds. Decides deck naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Sejeon,
    IntegratedKorean,
}

impl Source {
    pub fn from_input_dir(path: &Path) -> Self {
        if path.to_string_lossy().contains("Sejeon") {
            Source::Sejeon
        } else {
            Source::IntegratedKorean
        }
    }

    pub fn deck_prefix(&self) -> &'static str {
        match self {
            Source::Sejeon => "Sejeon Korean",
            Source::IntegratedKorean => "Integrated Korean",
        }
    }

    pub fn deck_name(&self, chapter_num: u32, title: &str) -> String {
        format!("{} - Lesson {}: {}", self.deck_prefix(), chapter_num, title)
    }
}
