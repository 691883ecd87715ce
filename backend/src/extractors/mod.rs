//! Page layouts the engine can read vocabulary from.
//!
//! Each layout is a `VocabularyExtractor`: an ordered list of field rules plus
//! the containers that tell entries and example sentences apart. The pass in
//! `crate::engine` runs any extractor the same way, so adding a layout means
//! describing its markup here and nothing else.

pub mod lesson_vocabulary;
pub mod most_frequent_words;

use std::fmt;
use std::str::FromStr;

use crate::document::{ElementMatch, LessonDocument};
use crate::parent_key::AncestorSelector;
use crate::types::FieldTarget;

pub use lesson_vocabulary::LessonVocabularyExtractor;
pub use most_frequent_words::MostFrequentWordsExtractor;

/// Whether a rule reads entry fragments or example-sentence fragments.
/// The same signature is split between the two by the example container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Entry,
    Example,
}

/// How a matched fragment becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Trimmed text content.
    Text,
    /// Trimmed text with one enclosing bracket pair removed: `(たべる)`.
    Bracketed,
    /// Audio source in the given attribute, stored as `[sound:name]`.
    Sound { attr: &'static str },
    /// Image source in the given attribute, stored as `<img src="name">`.
    Image { attr: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub target: FieldTarget,
    pub fragment: ElementMatch,
    pub placement: Placement,
    pub value: ValueKind,
    /// Fragments inside any of these are ignored.
    pub skip_inside: &'static [ElementMatch],
}

pub trait VocabularyExtractor {
    fn layout(&self) -> Layout;

    /// Field rules in extraction order: fixed fields, then examples, then media.
    fn rules(&self) -> &'static [FieldRule];

    /// Container holding an entry's example sentences.
    fn example_container(&self) -> &'static ElementMatch;

    /// Ancestor identifying the entry of a fragment outside the example container.
    fn entry_ancestor(&self) -> AncestorSelector;

    /// Ancestor identifying the entry of a fragment inside the example container.
    fn example_ancestor(&self) -> AncestorSelector;

    /// An element whose presence marks a page in this layout.
    fn marker(&self) -> &'static ElementMatch;

    fn ancestor_for(&self, placement: Placement) -> AncestorSelector {
        match placement {
            Placement::Entry => self.entry_ancestor(),
            Placement::Example => self.example_ancestor(),
        }
    }

    fn detect(&self, doc: &LessonDocument) -> bool {
        doc.contains(self.marker())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    LessonVocabulary,
    MostFrequentWords,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::LessonVocabulary, Layout::MostFrequentWords];

    pub fn extractor(self) -> &'static dyn VocabularyExtractor {
        match self {
            Layout::LessonVocabulary => &LessonVocabularyExtractor,
            Layout::MostFrequentWords => &MostFrequentWordsExtractor,
        }
    }

    /// First layout whose marker appears in the document.
    pub fn detect(doc: &LessonDocument) -> Option<Layout> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.extractor().detect(doc))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::LessonVocabulary => "lesson",
            Layout::MostFrequentWords => "words",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Invalid layout: {0} (expected lesson or words)")]
pub struct ParseLayoutError(String);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lesson" => Ok(Layout::LessonVocabulary),
            "words" => Ok(Layout::MostFrequentWords),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}
