use super::ChapterData;

/// Content category an audio query came from. The variant order is the
/// iteration order of the whole audio pipeline, and `as_str` is the segment
/// baked into generated filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vocabulary,
    GrammarClozes,
    ReadingPassage,
}

impl Category {
    pub const ALL: [Category; 3] =
        [Category::Vocabulary, Category::GrammarClozes, Category::ReadingPassage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vocabulary => "vocabulary",
            Category::GrammarClozes => "grammar_clozes",
            Category::ReadingPassage => "reading_passage",
        }
    }
}

/// Per-chapter audio queries, partitioned by category. Built once from the
/// chapter data and read-only afterwards; list order matches item order in
/// the chapter.
#[derive(Debug, Clone, Default)]
pub struct AudioQueryMap {
    pub vocabulary: Vec<String>,
    pub grammar_clozes: Vec<String>,
    pub reading_passage: Vec<String>,
}

impl AudioQueryMap {
    pub fn collect(chapter: &ChapterData) -> Self {
        AudioQueryMap {
            vocabulary: chapter.vocabulary.iter().map(|item| item.audio_query.clone()).collect(),
            grammar_clozes: chapter
                .grammar_clozes
                .iter()
                .map(|item| strip_cloze_markup(&item.sentence_cloze))
                .collect(),
            reading_passage: chapter
                .reading_passage
                .iter()
                .map(|item| item.sentence_kr.clone())
                .collect(),
        }
    }

    pub fn queries(&self, category: Category) -> &[String] {
        match category {
            Category::Vocabulary => &self.vocabulary,
            Category::GrammarClozes => &self.grammar_clozes,
            Category::ReadingPassage => &self.reading_passage,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.iter().map(move |&category| (category, self.queries(category)))
    }

    pub fn total(&self) -> usize {
        self.vocabulary.len() + self.grammar_clozes.len() + self.reading_passage.len()
    }
}

/// Removes cloze markup from a sentence, leaving the plain text to
/// synthesize. Both query collection and the cloze note constructor go
/// through here so lookups into the audio result map cannot drift.
pub fn strip_cloze_markup(sentence: &str) -> String {
    sentence.replace("{{c1::", "").replace("}}", "")
}
