use crate::anki_export::{deck_id_for_title, NotePackager};
use crate::card_template::CardTemplates;
use crate::logger::{error, info};
use crate::parent_key::ParentKey;
use crate::record_store::{Record, RecordStore};
use crate::schema::Schema;
use crate::types::{AssetRef, EngineError};

/// Output of one run: the model, one value tuple per accepted record and the
/// media file names the notes refer to.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub deck_id: i64,
    pub schema: Schema,
    pub templates: CardTemplates,
    pub notes: Vec<Vec<String>>,
    pub media_files: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub key: ParentKey,
    pub values: Vec<String>,
    pub error: EngineError,
}

#[derive(Debug, Clone)]
pub struct DeckReport {
    pub deck: Deck,
    /// Everything to download, in extraction order, duplicates kept.
    pub assets: Vec<AssetRef>,
    pub skipped: Vec<SkippedRecord>,
}

impl DeckReport {
    pub fn produced(&self) -> usize {
        self.deck.notes.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Values of `record` in schema order.
///
/// Runs after the gaps are filled, so every field is present. Anything
/// still missing comes out empty rather than being checked again.
pub fn finalize_record(record: &Record, schema: &Schema) -> Vec<String> {
    schema
        .fields()
        .iter()
        .map(|field| record.get(field).unwrap_or_default().to_string())
        .collect()
}

/// Turn filled records into a deck. A record the packager rejects is left
/// out and reported; the others are unaffected.
pub fn assemble_deck(
    title: &str,
    store: &RecordStore,
    schema: &Schema,
    assets: Vec<AssetRef>,
    packager: &dyn NotePackager,
) -> DeckReport {
    let mut notes = Vec::with_capacity(store.len());
    let mut skipped = Vec::new();

    for (key, record) in store.iter() {
        let values = finalize_record(record, schema);
        match packager.check_note(*key, schema, &values) {
            Ok(()) => notes.push(values),
            Err(e) => {
                error(&format!("Skipping record {}: {} (values: {:?})", key, e, values));
                skipped.push(SkippedRecord { key: *key, values, error: e });
            }
        }
    }

    let media_files = assets.iter().map(|a| a.local_name.clone()).collect();

    info(&format!(
        "Assembled deck '{}': {} notes, {} skipped, {} media files",
        title, notes.len(), skipped.len(), assets.len()
    ));

    DeckReport {
        deck: Deck {
            title: title.to_string(),
            deck_id: deck_id_for_title(title),
            schema: schema.clone(),
            templates: CardTemplates::for_schema(schema),
            notes,
            media_files,
        },
        assets,
        skipped,
    }
}
