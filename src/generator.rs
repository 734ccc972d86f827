use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::OnceLock,
    time::Instant,
};

use regex::Regex;

use crate::{
    anki::{
        notes,
        package::{
            self,
            Deck,
        },
    },
    core::{
        AudioQueryMap,
        ChapterData,
        SejeonError,
        Source,
    },
    tts::{
        AudioPipeline,
        SpeechSynthesizer,
    },
};

pub struct GeneratorConfig {
    pub json_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub chapter_num: Option<u32>,
}

/// Chapter number embedded in a `chapter-N.json` or `lesson-N.json` stem.
pub fn chapter_number(path: &Path) -> Option<u32> {
    static STEM_RE: OnceLock<Regex> = OnceLock::new();
    let re = STEM_RE.get_or_init(|| Regex::new(r"^(?:chapter|lesson)-(\d+)$").unwrap());

    let stem = path.file_stem()?.to_str()?;
    re.captures(stem)?.get(1)?.as_str().parse().ok()
}

/// All chapter files in the input directory, sorted by chapter number.
/// Files whose stem carries no number are reported and skipped.
pub fn find_chapter_files(json_dir: &Path) -> Result<Vec<(u32, PathBuf)>, SejeonError> {
    let mut files = Vec::new();

    for pattern in ["chapter-*.json", "lesson-*.json"] {
        let full_pattern = json_dir.join(pattern);
        let entries = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| SejeonError::Custom(format!("Invalid glob pattern: {}", e)))?;

        for entry in entries {
            match entry {
                Ok(path) => match chapter_number(&path) {
                    Some(number) => files.push((number, path)),
                    None => {
                        eprintln!("Skipping file without a chapter number: {}", path.display())
                    }
                },
                Err(e) => eprintln!("Skipping unreadable path: {}", e),
            }
        }
    }

    files.sort_by_key(|(number, _)| *number);
    Ok(files)
}

/// Processes every discovered chapter in order. A chapter that fails to load
/// or write is reported and the run moves on to the next one.
pub fn run<S: SpeechSynthesizer>(
    config: &GeneratorConfig,
    pipeline: &AudioPipeline<S>,
) -> Result<(), SejeonError> {
    let mut files = find_chapter_files(&config.json_dir)?;
    if let Some(wanted) = config.chapter_num {
        files.retain(|(number, _)| *number == wanted);
    }
    if files.is_empty() {
        return Err(SejeonError::Custom(format!(
            "No chapter files found in {}",
            config.json_dir.display()
        )));
    }

    let source = Source::from_input_dir(&config.json_dir);

    for (_, path) in &files {
        if let Err(e) = process_chapter(config, pipeline, source, path) {
            eprintln!("Failed to process {}: {}", path.display(), e);
        }
    }

    Ok(())
}

fn process_chapter<S: SpeechSynthesizer>(
    config: &GeneratorConfig,
    pipeline: &AudioPipeline<S>,
    source: Source,
    path: &Path,
) -> Result<(), SejeonError> {
    let start = Instant::now();

    let chapter = ChapterData::load(path)?;
    let chapter_num = chapter.chapter_info.number;
    println!("Processing Chapter {}: {}", chapter_num, chapter.chapter_info.title_kr);

    let queries = AudioQueryMap::collect(&chapter);
    println!("  Found {} audio queries", queries.total());

    if config.dry_run {
        println!(
            "  Would create: {} vocab, {} cloze, {} reading notes",
            chapter.vocabulary.len() * 2,
            chapter.grammar_clozes.len(),
            chapter.reading_passage.len()
        );
        return Ok(());
    }

    let media_dir = config.output_dir.join("media").join(format!("lesson-{}", chapter_num));
    println!("  Generating {} audio files...", queries.total());
    let audio_map = pipeline.generate_batch(&queries, &media_dir, chapter_num)?;
    println!("  Generated {} audio files successfully", audio_map.len());

    let built_notes = notes::build_notes(&chapter, &audio_map);
    println!("  Created {} notes", built_notes.len());

    let deck = Deck::new(
        source.deck_name(chapter_num, &chapter.chapter_info.title_kr),
        built_notes,
    );
    let media_files: Vec<PathBuf> =
        audio_map.values().map(|filename| media_dir.join(filename)).collect();

    let output_file = config.output_dir.join(format!("Korean_Lesson_{}.zip", chapter_num));
    package::write_package(&deck, &media_files, &output_file)?;
    println!("  Saved to {} ({:.1}s)", output_file.display(), start.elapsed().as_secs_f32());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        fs,
    };

    use tempfile::tempdir;

    use super::*;
    use crate::tts::SynthesisError;

    struct CountingSynthesizer {
        calls: RefCell<usize>,
    }

    impl CountingSynthesizer {
        fn new() -> Self {
            Self { calls: RefCell::new(0) }
        }
    }

    impl SpeechSynthesizer for CountingSynthesizer {
        fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>, SynthesisError> {
            *self.calls.borrow_mut() += 1;
            Ok(b"RIFF".to_vec())
        }
    }

    const LESSON_JSON: &str = r#"{
        "chapter_info": { "number": 1, "title_kr": "인사" },
        "vocabulary": [
            {
                "word_kr": "안녕",
                "word_en": "hello",
                "sentence_kr_html": "안녕!",
                "audio_query": "안녕",
                "category": "Greetings"
            }
        ],
        "grammar_clozes": [
            {
                "sentence_cloze": "{{c1::안녕}}하세요",
                "sentence_en": "Hello (polite)",
                "grammar_point": "하다 verbs"
            }
        ]
    }"#;

    #[test]
    fn test_chapter_number() {
        assert_eq!(chapter_number(Path::new("data/chapter-12.json")), Some(12));
        assert_eq!(chapter_number(Path::new("lesson-3.json")), Some(3));
        assert_eq!(chapter_number(Path::new("notes.json")), None);
        assert_eq!(chapter_number(Path::new("chapter-abc.json")), None);
    }

    #[test]
    fn test_find_chapter_files_sorts_numerically() {
        let dir = tempdir().unwrap();
        for name in ["chapter-10.json", "chapter-2.json", "lesson-1.json", "README.md"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let files = find_chapter_files(dir.path()).unwrap();
        let numbers: Vec<u32> = files.iter().map(|(number, _)| *number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_dry_run_writes_nothing_and_calls_nothing() {
        let dir = tempdir().unwrap();
        let input_dir = dir.path().join("Sejeon-Lesson-JSON");
        let output_dir = dir.path().join("decks");
        fs::create_dir_all(&input_dir).unwrap();
        fs::write(input_dir.join("lesson-1.json"), LESSON_JSON).unwrap();

        let synthesizer = CountingSynthesizer::new();
        let pipeline = AudioPipeline::new(&synthesizer).with_pause(std::time::Duration::ZERO);
        let config = GeneratorConfig {
            json_dir: input_dir,
            output_dir: output_dir.clone(),
            dry_run: true,
            chapter_num: None,
        };

        run(&config, &pipeline).unwrap();

        assert_eq!(*synthesizer.calls.borrow(), 0);
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_full_run_produces_package_and_media() {
        let dir = tempdir().unwrap();
        let input_dir = dir.path().join("Sejeon-Lesson-JSON");
        let output_dir = dir.path().join("decks");
        fs::create_dir_all(&input_dir).unwrap();
        fs::write(input_dir.join("lesson-1.json"), LESSON_JSON).unwrap();

        let synthesizer = CountingSynthesizer::new();
        let pipeline = AudioPipeline::new(&synthesizer).with_pause(std::time::Duration::ZERO);
        let config = GeneratorConfig {
            json_dir: input_dir,
            output_dir: output_dir.clone(),
            dry_run: false,
            chapter_num: None,
        };

        run(&config, &pipeline).unwrap();

        // One vocab query and one cloze query
        assert_eq!(*synthesizer.calls.borrow(), 2);
        assert!(output_dir.join("Korean_Lesson_1.zip").exists());
        assert!(output_dir
            .join("media")
            .join("lesson-1")
            .join("chapter1_vocabulary_01.wav")
            .exists());
        assert!(output_dir
            .join("media")
            .join("lesson-1")
            .join("chapter1_grammar_clozes_01.wav")
            .exists());
    }

    #[test]
    fn test_chapter_filter() {
        let dir = tempdir().unwrap();
        let input_dir = dir.path().join("json");
        let output_dir = dir.path().join("decks");
        fs::create_dir_all(&input_dir).unwrap();
        fs::write(input_dir.join("lesson-1.json"), LESSON_JSON).unwrap();
        let other = LESSON_JSON.replace("\"number\": 1", "\"number\": 2");
        fs::write(input_dir.join("lesson-2.json"), other).unwrap();

        let synthesizer = CountingSynthesizer::new();
        let pipeline = AudioPipeline::new(&synthesizer).with_pause(std::time::Duration::ZERO);
        let config = GeneratorConfig {
            json_dir: input_dir,
            output_dir: output_dir.clone(),
            dry_run: false,
            chapter_num: Some(2),
        };

        run(&config, &pipeline).unwrap();

        assert!(!output_dir.join("Korean_Lesson_1.zip").exists());
        assert!(output_dir.join("Korean_Lesson_2.zip").exists());
    }

    #[test]
    fn test_malformed_chapter_does_not_abort_the_run() {
        let dir = tempdir().unwrap();
        let input_dir = dir.path().join("json");
        let output_dir = dir.path().join("decks");
        fs::create_dir_all(&input_dir).unwrap();
        // lesson-1 lacks chapter_info entirely
        fs::write(input_dir.join("lesson-1.json"), "{}").unwrap();
        let second = LESSON_JSON.replace("\"number\": 1", "\"number\": 2");
        fs::write(input_dir.join("lesson-2.json"), second).unwrap();

        let synthesizer = CountingSynthesizer::new();
        let pipeline = AudioPipeline::new(&synthesizer).with_pause(std::time::Duration::ZERO);
        let config = GeneratorConfig {
            json_dir: input_dir,
            output_dir: output_dir.clone(),
            dry_run: false,
            chapter_num: None,
        };

        run(&config, &pipeline).unwrap();

        assert!(!output_dir.join("Korean_Lesson_1.zip").exists());
        assert!(output_dir.join("Korean_Lesson_2.zip").exists());
    }
}
