//! One extraction pass over a document, and the run built around it.
//!
//! Rules are applied strictly in the order the extractor lists them. Fixed
//! fields come before examples and media because slot numbering depends on
//! what has already been written to a record.

use scraper::ElementRef;

use crate::anki_export::NotePackager;
use crate::deck::{assemble_deck, DeckReport};
use crate::document::{closest, text_of, LessonDocument};
use crate::extractors::{FieldRule, Layout, Placement, ValueKind, VocabularyExtractor};
use crate::logger::{debug, info, warn};
use crate::parent_key::ParentKeyResolver;
use crate::record_store::RecordStore;
use crate::sanity::fill_missing_fields;
use crate::schema::Schema;
use crate::types::{AssetRef, EngineError, FieldName, FieldTarget};

const BRACKET_PAIRS: &[(char, char)] = &[('(', ')'), ('（', '）'), ('[', ']'), ('【', '】')];

/// Records and media references gathered from one document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub layout: Layout,
    pub store: RecordStore,
    /// In extraction order, duplicates kept.
    pub assets: Vec<AssetRef>,
    /// Fragments left out for a missing ancestor or an unusable media URL.
    pub dropped: usize,
}

struct ExtractionPass<'o> {
    origin: &'o str,
    resolver: ParentKeyResolver,
    store: RecordStore,
    assets: Vec<AssetRef>,
    dropped: usize,
}

impl<'o> ExtractionPass<'o> {
    fn new(origin: &'o str) -> Self {
        ExtractionPass {
            origin,
            resolver: ParentKeyResolver::new(),
            store: RecordStore::new(),
            assets: Vec::new(),
            dropped: 0,
        }
    }

    fn apply_rule(&mut self, doc: &LessonDocument, extractor: &dyn VocabularyExtractor, rule: &FieldRule) {
        let container = extractor.example_container();
        let selector = extractor.ancestor_for(rule.placement);

        for fragment in doc.find_all(&rule.fragment) {
            let in_examples = closest(fragment, container).is_some();
            let wanted = match rule.placement {
                Placement::Entry => !in_examples,
                Placement::Example => in_examples,
            };
            if !wanted {
                continue;
            }
            if rule.skip_inside.iter().any(|m| closest(fragment, m).is_some()) {
                continue;
            }

            let Some(key) = self.resolver.resolve(fragment, &selector) else {
                let err = EngineError::MissingAncestor {
                    field: rule.target.label().to_string(),
                    selector: selector.describe(),
                };
                warn(&format!("Dropping fragment: {}", err));
                self.dropped += 1;
                continue;
            };

            let Some(value) = self.read_value(fragment, rule) else {
                continue;
            };

            match rule.target {
                FieldTarget::Fixed(field) => {
                    self.store.set(key, FieldName::Fixed(field), value);
                }
                FieldTarget::Example(kind) => {
                    self.store.push_example(key, kind, value);
                }
            }
        }
    }

    /// Field value of a fragment. Media fragments also record their asset.
    fn read_value(&mut self, fragment: ElementRef, rule: &FieldRule) -> Option<String> {
        match rule.value {
            ValueKind::Text => Some(text_of(fragment)),
            ValueKind::Bracketed => Some(strip_brackets(&text_of(fragment))),
            ValueKind::Sound { attr } => {
                let asset = self.media_asset(fragment, rule, attr)?;
                let value = format!("[sound:{}]", asset.local_name);
                self.assets.push(asset);
                Some(value)
            }
            ValueKind::Image { attr } => {
                let asset = self.media_asset(fragment, rule, attr)?;
                let value = format!("<img src=\"{}\">", asset.local_name);
                self.assets.push(asset);
                Some(value)
            }
        }
    }

    fn media_asset(&mut self, fragment: ElementRef, rule: &FieldRule, attr: &str) -> Option<AssetRef> {
        let Some(source) = fragment.value().attr(attr) else {
            debug(&format!("{} fragment has no {} attribute", rule.target.label(), attr));
            return None;
        };

        match AssetRef::from_source(source, self.origin) {
            Ok(asset) => Some(asset),
            Err(e) => {
                warn(&format!("Dropping {} fragment: {}", rule.target.label(), e));
                self.dropped += 1;
                None
            }
        }
    }
}

/// Reading text with one enclosing bracket pair removed: `(たべる)` -> `たべる`.
pub fn strip_brackets(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text.to_string();
    };

    if BRACKET_PAIRS.contains(&(first, last)) {
        chars.as_str().trim().to_string()
    } else {
        text.to_string()
    }
}

/// Run every rule of `extractor` over `doc` and collect the records.
pub fn extract_records(doc: &LessonDocument, extractor: &dyn VocabularyExtractor, origin: &str) -> Extraction {
    let mut pass = ExtractionPass::new(origin);
    for rule in extractor.rules() {
        pass.apply_rule(doc, extractor, rule);
    }

    info(&format!(
        "Extracted {} records ({} layout), {} media references, {} fragments dropped",
        pass.store.len(),
        extractor.layout(),
        pass.assets.len(),
        pass.dropped
    ));

    Extraction {
        layout: extractor.layout(),
        store: pass.store,
        assets: pass.assets,
        dropped: pass.dropped,
    }
}

/// The forced layout, or the detected one.
pub fn resolve_layout(doc: &LessonDocument, forced: Option<Layout>) -> Result<Layout, EngineError> {
    if let Some(layout) = forced {
        return Ok(layout);
    }
    Layout::detect(doc).ok_or_else(|| EngineError::FatalInput("no vocabulary section".to_string()))
}

/// Extract, synthesize the schema, fill the gaps and assemble the deck.
pub fn build_deck(
    doc: &LessonDocument,
    title: &str,
    layout: Option<Layout>,
    origin: &str,
    packager: &dyn NotePackager,
) -> Result<DeckReport, EngineError> {
    let layout = resolve_layout(doc, layout)?;
    let Extraction { mut store, assets, .. } = extract_records(doc, layout.extractor(), origin);

    let schema = Schema::synthesize(&store);
    let filled = fill_missing_fields(&mut store, &schema);
    info(&format!(
        "Schema has {} fields ({} example slots), filled {} empty fields",
        schema.width(),
        schema.example_count(),
        filled
    ));

    Ok(assemble_deck(title, &store, &schema, assets, packager))
}
