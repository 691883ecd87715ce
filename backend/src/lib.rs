pub mod types;
pub mod logger;
pub mod app_settings;

pub mod document;
pub mod parent_key;
pub mod record_store;
pub mod asset;
pub mod extractors;
pub mod schema;
pub mod sanity;
pub mod card_template;
pub mod deck;
pub mod anki_export;
pub mod engine;

pub use anki_export::{AnkiNotePackager, DeckWriter, NotePackager};
pub use app_settings::{ExportSettings, LayoutChoice};
pub use deck::{Deck, DeckReport};
pub use document::LessonDocument;
pub use engine::{build_deck, extract_records, resolve_layout, Extraction};
pub use extractors::{Layout, VocabularyExtractor};
pub use schema::Schema;
pub use types::{AssetRef, EngineError};
