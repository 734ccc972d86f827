pub mod notes;
pub mod package;

pub use notes::{ build_notes, FlashcardNote, NoteType };
pub use package::{ write_package, Deck };
