use std::{
    path::PathBuf,
    process,
};

use clap::Parser;
use sejeon::{
    generator::{
        self,
        GeneratorConfig,
    },
    tts::{
        AudioPipeline,
        OpenAiSpeech,
    },
};

/// Generate importable deck packages from Korean lesson JSON chapters.
#[derive(Parser)]
#[command(name = "sejeon", version)]
struct Args {
    /// Directory containing chapter JSON files
    #[arg(default_value = "KLEAR-Lesson-JSON")]
    json_dir: PathBuf,

    /// Output directory for deck packages
    #[arg(long, default_value = "KLEAR_Decks")]
    output_dir: PathBuf,

    /// Preview counts without generating audio or writing files
    #[arg(long)]
    dry_run: bool,

    /// Process only a specific chapter number
    #[arg(long)]
    chapter_num: Option<u32>,
}

fn main() {
    let args = Args::parse();

    let synthesizer = match OpenAiSpeech::from_env() {
        Ok(synthesizer) => synthesizer,
        Err(e) => {
            eprintln!("Failed to set up the speech client: {}", e);
            process::exit(1);
        }
    };
    let pipeline = AudioPipeline::new(synthesizer);

    let config = GeneratorConfig {
        json_dir: args.json_dir,
        output_dir: args.output_dir,
        dry_run: args.dry_run,
        chapter_num: args.chapter_num,
    };

    if let Err(e) = generator::run(&config, &pipeline) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
