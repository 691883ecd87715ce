use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use html_escape::encode_text;
use serde::Serialize;

use crate::card_template::{CardTemplate, CardTemplates, RE_FIELD_REF};
use crate::deck::Deck;
use crate::logger::info;
use crate::parent_key::ParentKey;
use crate::schema::Schema;
use crate::types::EngineError;

/// Anki joins a note's fields with this character when storing them.
pub const ANKI_FIELD_SEPARATOR: char = '\u{1f}';

/// Final say on whether a finalized note can be written.
pub trait NotePackager {
    fn check_note(&self, key: ParentKey, schema: &Schema, values: &[String]) -> Result<(), EngineError>;
}

/// Rejects values Anki can't store: the field separator and other control
/// characters except tab and line breaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnkiNotePackager;

impl NotePackager for AnkiNotePackager {
    fn check_note(&self, key: ParentKey, schema: &Schema, values: &[String]) -> Result<(), EngineError> {
        if values.len() != schema.width() {
            return Err(EngineError::RecordSerialization {
                key: key.to_string(),
                reason: format!("{} values for {} fields", values.len(), schema.width()),
            });
        }

        for (field, value) in schema.fields().iter().zip(values) {
            let bad = value
                .chars()
                .find(|c| *c == ANKI_FIELD_SEPARATOR || (c.is_control() && !matches!(c, '\n' | '\t' | '\r')));
            if let Some(c) = bad {
                return Err(EngineError::RecordSerialization {
                    key: key.to_string(),
                    reason: format!("field {} contains control character U+{:04X}", field, c as u32),
                });
            }
        }
        Ok(())
    }
}

pub fn escape_csv_field(field: &str) -> String {
    let escaped = field.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('\n') || escaped.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

pub fn format_csv_row<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| escape_csv_field(v.as_ref()))
        .collect::<Vec<String>>()
        .join(",")
}

/// Header row of field names, then one row per note.
pub fn notes_to_csv(deck: &Deck) -> String {
    let mut csv_lines = Vec::with_capacity(deck.notes.len() + 1);
    csv_lines.push(format_csv_row(&deck.schema.names()));
    for note in &deck.notes {
        csv_lines.push(format_csv_row(note));
    }
    csv_lines.join("\n")
}

/// Stable positive deck id from the title (64-bit FNV-1a, top bit cleared).
pub fn deck_id_for_title(title: &str) -> i64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in title.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash & (i64::MAX as u64)) as i64
}

/// File name stem for a deck: the title with all whitespace removed.
pub fn output_stem(title: &str) -> String {
    let stem: String = title.split_whitespace().collect();
    if stem.is_empty() { "deck".to_string() } else { stem }
}

#[derive(Serialize)]
struct ModelManifest<'a> {
    id: i64,
    name: &'a str,
    fields: Vec<String>,
    templates: &'a [CardTemplate],
    css: &'a str,
}

#[derive(Serialize)]
struct DeckManifest<'a> {
    title: &'a str,
    deck_id: i64,
    model: ModelManifest<'a>,
    notes: &'a [Vec<String>],
    media_files: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDeck {
    pub manifest_path: PathBuf,
    pub csv_path: Option<PathBuf>,
}

/// Writes `<Title>.deck.json` and optionally `<Title>.csv` into `out_dir`.
#[derive(Debug, Clone)]
pub struct DeckWriter {
    pub out_dir: PathBuf,
    pub write_csv: bool,
}

impl DeckWriter {
    pub fn new(out_dir: &Path, write_csv: bool) -> Self {
        DeckWriter { out_dir: out_dir.to_path_buf(), write_csv }
    }

    pub fn manifest_json(deck: &Deck) -> Result<String> {
        let manifest = DeckManifest {
            title: &deck.title,
            deck_id: deck.deck_id,
            model: ModelManifest {
                id: deck.templates.model_id,
                name: &deck.templates.model_name,
                fields: deck.schema.names(),
                templates: &deck.templates.cards,
                css: &deck.templates.css,
            },
            notes: &deck.notes,
            media_files: &deck.media_files,
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }

    pub fn write(&self, deck: &Deck) -> Result<WrittenDeck> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create output directory: {}", self.out_dir.display()))?;

        let stem = output_stem(&deck.title);

        let manifest_path = self.out_dir.join(format!("{}.deck.json", stem));
        fs::write(&manifest_path, DeckWriter::manifest_json(deck)?)
            .with_context(|| format!("Failed to write deck: {}", manifest_path.display()))?;
        info(&format!("Wrote {}", manifest_path.display()));

        let csv_path = if self.write_csv {
            let p = self.out_dir.join(format!("{}.csv", stem));
            fs::write(&p, notes_to_csv(deck))
                .with_context(|| format!("Failed to write notes CSV: {}", p.display()))?;
            info(&format!("Wrote {}", p.display()));
            Some(p)
        } else {
            None
        };

        Ok(WrittenDeck { manifest_path, csv_path })
    }
}

fn render_side(template: &str, schema: &Schema, values: &[String], front_side: &str) -> String {
    let names = schema.names();
    RE_FIELD_REF
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            if name == "FrontSide" {
                return front_side.to_string();
            }
            match names.iter().position(|n| n == name).and_then(|i| values.get(i)) {
                Some(value) if value.starts_with("[sound:") || value.starts_with("<img") => value.clone(),
                Some(value) => encode_text(value).to_string(),
                None => format!("<span style='color: red;'>Unknown field: {}</span>", encode_text(name)),
            }
        })
        .to_string()
}

/// HTML preview of every card of one note, front and back.
pub fn render_card_preview(templates: &CardTemplates, schema: &Schema, values: &[String]) -> String {
    let mut preview_html = String::new();
    for card in &templates.cards {
        let front = render_side(&card.qfmt, schema, values, "");
        let back = render_side(&card.afmt, schema, values, &front);
        preview_html.push_str(&format!(
            "<h3>{}</h3>\
             <h4>Front:</h4>\
             <div style='background: #fff; padding: 10px; border: 1px solid #ccc; margin-bottom: 10px;'>{}</div>\
             <h4>Back:</h4>\
             <div style='background: #fff; padding: 10px; border: 1px solid #ccc;'>{}</div>",
            encode_text(&card.name),
            front,
            back
        ));
    }
    preview_html
}
