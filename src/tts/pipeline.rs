use std::{
    collections::HashMap,
    fs,
    path::Path,
    thread,
    time::Duration,
};

use super::SpeechSynthesizer;
use crate::core::{
    AudioQueryMap,
    SejeonError,
};

/// Voice rotation for variety across consecutive queries.
pub const VOICES: [&str; 2] = ["marin", "cedar"];

const DEFAULT_PAUSE: Duration = Duration::from_millis(100);

/// Resolves a chapter's audio queries to on-disk filenames, synthesizing the
/// missing ones. Files that already exist are recorded without a synthesis
/// call, which is what makes interrupted runs resumable.
pub struct AudioPipeline<S> {
    synthesizer: S,
    pause: Duration,
}

impl<S: SpeechSynthesizer> AudioPipeline<S> {
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer, pause: DEFAULT_PAUSE }
    }

    /// Delay between consecutive synthesis calls. Cached skips never pause.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Iterates every (category, position) pair in category-then-position
    /// order. Filenames encode position (`chapter{N}_{category}_{pos:02}.wav`,
    /// 1-based within the category) and the voice counter advances for every
    /// pair, skipped or not, so both stay stable across reruns.
    ///
    /// Returns one entry per distinct query string; if the same text occurs
    /// in two categories, the later occurrence's filename wins. A failed
    /// query is reported and omitted, never fatal.
    pub fn generate_batch(
        &self,
        queries: &AudioQueryMap,
        output_dir: &Path,
        chapter_num: u32,
    ) -> Result<HashMap<String, String>, SejeonError> {
        fs::create_dir_all(output_dir)?;

        let mut results = HashMap::new();
        let mut voice_idx = 0usize;

        for (category, query_list) in queries.iter() {
            for (j, query) in query_list.iter().enumerate() {
                let voice = VOICES[voice_idx % VOICES.len()];
                voice_idx += 1;

                let filename =
                    format!("chapter{}_{}_{:02}.wav", chapter_num, category.as_str(), j + 1);
                let output_path = output_dir.join(&filename);

                if output_path.exists() {
                    println!("  Skipping existing audio: {}", filename);
                    results.insert(query.clone(), filename);
                    continue;
                }

                match self.synthesizer.synthesize(query, voice) {
                    Ok(bytes) => match fs::write(&output_path, bytes) {
                        Ok(()) => {
                            results.insert(query.clone(), filename);
                        }
                        Err(e) => eprintln!("  Failed to write {}: {}", filename, e),
                    },
                    Err(e) => eprintln!("  Audio generation failed for '{}': {}", query, e),
                }

                if !self.pause.is_zero() {
                    thread::sleep(self.pause);
                }
            }
        }

        Ok(results)
    }
}
