use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Failures the engine knows how to name.
///
/// Only `FatalInput` ends a run. The other variants are logged where they
/// happen and the offending fragment or record is left out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("No {selector} ancestor for {field} fragment")]
    MissingAncestor { field: String, selector: String },

    #[error("Can't normalize asset URL '{url}': {reason}")]
    AssetUrlMalformed { url: String, reason: String },

    #[error("Record {key} rejected: {reason}")]
    RecordSerialization { key: String, reason: String },

    #[error("Unusable input document: {0}")]
    FatalInput(String),
}

/// Note fields that every record carries exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FixedField {
    Kana,
    English,
    Kanji,
    JapaneseAudio,
    EnglishAudio,
    Image,
}

impl FixedField {
    /// Canonical note field order.
    pub const ALL: [FixedField; 6] = [
        FixedField::Kana,
        FixedField::English,
        FixedField::Kanji,
        FixedField::JapaneseAudio,
        FixedField::EnglishAudio,
        FixedField::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixedField::Kana => "Kana",
            FixedField::English => "English",
            FixedField::Kanji => "Kanji",
            FixedField::JapaneseAudio => "Japanese_Audio",
            FixedField::EnglishAudio => "English_Audio",
            FixedField::Image => "Image",
        }
    }
}

/// Repeating fields, one set per example sentence slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExampleKind {
    Kanji,
    Kana,
    English,
    JapaneseAudio,
    EnglishAudio,
}

impl ExampleKind {
    /// Canonical order of the fields inside one example slot.
    pub const ALL: [ExampleKind; 5] = [
        ExampleKind::Kanji,
        ExampleKind::Kana,
        ExampleKind::English,
        ExampleKind::JapaneseAudio,
        ExampleKind::EnglishAudio,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ExampleKind::Kanji => "Example_Kanji",
            ExampleKind::Kana => "Example_Kana",
            ExampleKind::English => "Example_English",
            ExampleKind::JapaneseAudio => "Example_Japanese_Audio",
            ExampleKind::EnglishAudio => "Example_English_Audio",
        }
    }
}

/// A note field name, either fixed or an indexed example field such as
/// `Example_Kana_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Fixed(FixedField),
    Example(ExampleKind, usize),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Fixed(field) => write!(f, "{}", field.as_str()),
            FieldName::Example(kind, slot) => write!(f, "{}_{}", kind.prefix(), slot),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid field name: {0}")]
pub struct ParseFieldNameError(String);

impl FromStr for FieldName {
    type Err = ParseFieldNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(field) = FixedField::ALL.iter().find(|f| f.as_str() == s) {
            return Ok(FieldName::Fixed(*field));
        }

        for kind in ExampleKind::ALL {
            let Some(rest) = s.strip_prefix(kind.prefix()) else { continue };
            let Some(index) = rest.strip_prefix('_') else { continue };
            if let Ok(slot) = index.parse::<usize>() {
                return Ok(FieldName::Example(kind, slot));
            }
        }

        Err(ParseFieldNameError(s.to_string()))
    }
}

/// Where an extractor writes: a fixed field, or the next free slot of an
/// example kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Fixed(FixedField),
    Example(ExampleKind),
}

impl FieldTarget {
    pub fn label(&self) -> &'static str {
        match self {
            FieldTarget::Fixed(f) => f.as_str(),
            FieldTarget::Example(k) => k.prefix(),
        }
    }
}

/// A media file the deck refers to. `local_name` is the last path segment
/// of `url` and is what the note field mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub url: String,
    pub local_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_display() {
        assert_eq!(FieldName::Fixed(FixedField::JapaneseAudio).to_string(), "Japanese_Audio");
        assert_eq!(FieldName::Example(ExampleKind::Kana, 0).to_string(), "Example_Kana_0");
        assert_eq!(FieldName::Example(ExampleKind::EnglishAudio, 12).to_string(), "Example_English_Audio_12");
    }

    #[test]
    fn test_field_name_from_str() {
        assert_eq!("Kanji".parse::<FieldName>(), Ok(FieldName::Fixed(FixedField::Kanji)));
        assert_eq!("Example_Kanji_3".parse::<FieldName>(), Ok(FieldName::Example(ExampleKind::Kanji, 3)));
        assert_eq!("Example_Kana_0".parse::<FieldName>(), Ok(FieldName::Example(ExampleKind::Kana, 0)));
        assert_eq!(
            "Example_Japanese_Audio_1".parse::<FieldName>(),
            Ok(FieldName::Example(ExampleKind::JapaneseAudio, 1))
        );
        assert!("Example_Kanji".parse::<FieldName>().is_err());
        assert!("Example_Kanji_x".parse::<FieldName>().is_err());
        assert!("Romaji".parse::<FieldName>().is_err());
    }
}
