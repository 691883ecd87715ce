use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};

use crate::extractors::Layout;

pub const DEFAULT_SITE_ORIGIN: &str = "https://www.japanesepod101.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Origin relative media URLs are resolved against.
    pub site_origin: String,
    pub layout: LayoutChoice,
    pub write_csv: bool,
    pub download_media: bool,
    pub media_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            layout: LayoutChoice::Auto,
            write_csv: true,
            download_media: false,
            media_dir: PathBuf::from("media"),
            out_dir: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    /// Settings from a JSON file. Keys left out keep their defaults.
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings: ExportSettings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutChoice {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "lesson")]
    Lesson,
    #[serde(rename = "words")]
    Words,
}

impl LayoutChoice {
    /// `None` means detect the layout from the document.
    pub fn forced_layout(&self) -> Option<Layout> {
        match self {
            LayoutChoice::Auto => None,
            LayoutChoice::Lesson => Some(Layout::LessonVocabulary),
            LayoutChoice::Words => Some(Layout::MostFrequentWords),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutChoice::Auto => "auto",
            LayoutChoice::Lesson => "lesson",
            LayoutChoice::Words => "words",
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Invalid layout choice: {0} (expected auto, lesson or words)")]
pub struct ParseLayoutChoiceError(String);

impl FromStr for LayoutChoice {
    type Err = ParseLayoutChoiceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(LayoutChoice::Auto),
            "lesson" => Ok(LayoutChoice::Lesson),
            "words" => Ok(LayoutChoice::Words),
            _ => Err(ParseLayoutChoiceError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: ExportSettings = serde_json::from_str(r#"{"layout": "words", "write_csv": false}"#).unwrap();
        assert_eq!(settings.layout, LayoutChoice::Words);
        assert!(!settings.write_csv);
        assert_eq!(settings.site_origin, DEFAULT_SITE_ORIGIN);
        assert_eq!(settings.media_dir, PathBuf::from("media"));
    }

    #[test]
    fn test_layout_choice() {
        assert_eq!("Lesson".parse::<LayoutChoice>(), Ok(LayoutChoice::Lesson));
        assert!("grid".parse::<LayoutChoice>().is_err());
        assert_eq!(LayoutChoice::Auto.forced_layout(), None);
        assert_eq!(LayoutChoice::Words.forced_layout(), Some(Layout::MostFrequentWords));
    }
}
