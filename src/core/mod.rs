pub mod errors;
pub mod models;
pub mod queries;

pub use errors::SejeonError;
pub use models::{ ChapterData, ChapterInfo, ClozeItem, ReadingItem, Source, VocabItem };
pub use queries::{ AudioQueryMap, Category };
