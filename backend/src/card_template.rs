use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::schema::Schema;
use crate::types::{ExampleKind, FieldName};

pub const MODEL_ID: i64 = 12938896;
pub const MODEL_NAME: &str = "Basic (and reversed card) (genanki)";

pub const CARD_CSS: &str = ".card {\n font-family: arial;\n font-size: 20px;\n text-align: center;\n color: black;\n background-color: white;\n}\n";

lazy_static! {
    pub static ref RE_FIELD_REF: Regex = Regex::new(r"\{\{([^{}]+)\}\}").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTemplate {
    pub name: String,
    /// Question side.
    pub qfmt: String,
    /// Answer side.
    pub afmt: String,
}

/// Note model for a deck: two cards (Japanese to English and back) and
/// the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTemplates {
    pub model_id: i64,
    pub model_name: String,
    pub example_count: usize,
    pub cards: Vec<CardTemplate>,
    pub css: String,
}

fn field_ref(field: FieldName) -> String {
    format!("{{{{{}}}}}", field)
}

fn example_blocks(example_count: usize) -> String {
    let mut out = String::new();
    for slot in 0..example_count {
        let f = |kind| field_ref(FieldName::Example(kind, slot));
        out.push_str(&format!(
            "<br>{}{}{} {}{}\n",
            f(ExampleKind::Kanji),
            f(ExampleKind::Kana),
            f(ExampleKind::JapaneseAudio),
            f(ExampleKind::English),
            f(ExampleKind::EnglishAudio),
        ));
    }
    out
}

impl CardTemplates {
    pub fn for_example_count(example_count: usize) -> Self {
        let examples = example_blocks(example_count);

        let card_1 = CardTemplate {
            name: "Card 1".to_string(),
            qfmt: "{{Image}}\n\n{{Kanji}}".to_string(),
            afmt: format!(
                "{{{{FrontSide}}}}\n\n<hr id=answer>\n\n{{{{Kana}}}}{{{{Japanese_Audio}}}}<br>{{{{English}}}}\n\n{}",
                examples
            ),
        };

        let card_2 = CardTemplate {
            name: "Card 2".to_string(),
            qfmt: "{{Image}}\n\n{{English}}{{English_Audio}}".to_string(),
            afmt: format!(
                "{{{{FrontSide}}}}\n\n<hr id=answer>\n\n{{{{Kanji}}}}<br>{{{{Kana}}}}{{{{Japanese_Audio}}}}\n\n{}",
                examples
            ),
        };

        CardTemplates {
            model_id: MODEL_ID,
            model_name: MODEL_NAME.to_string(),
            example_count,
            cards: vec![card_1, card_2],
            css: CARD_CSS.to_string(),
        }
    }

    pub fn for_schema(schema: &Schema) -> Self {
        Self::for_example_count(schema.example_count())
    }

    /// Every `{{Field}}` any card mentions, except the `FrontSide` built-in.
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        self.cards
            .iter()
            .flat_map(|card| [card.qfmt.as_str(), card.afmt.as_str()])
            .flat_map(|text| RE_FIELD_REF.captures_iter(text))
            .map(|caps| caps[1].to_string())
            .filter(|name| name != "FrontSide")
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_examples() {
        let t = CardTemplates::for_example_count(0);
        assert_eq!(t.cards.len(), 2);
        assert_eq!(t.cards[0].qfmt, "{{Image}}\n\n{{Kanji}}");
        assert_eq!(t.cards[0].afmt, "{{FrontSide}}\n\n<hr id=answer>\n\n{{Kana}}{{Japanese_Audio}}<br>{{English}}\n\n");
        assert!(!t.cards[1].afmt.contains("Example_"));
    }

    #[test]
    fn test_references_match_schema() {
        for n in [0, 1, 4] {
            let schema = Schema::with_example_count(n);
            let templates = CardTemplates::for_schema(&schema);
            let names: BTreeSet<String> = schema.names().into_iter().collect();
            assert_eq!(templates.referenced_fields(), names);
        }
    }

    #[test]
    fn test_example_block() {
        let t = CardTemplates::for_example_count(2);
        assert!(t.cards[0].afmt.contains(
            "<br>{{Example_Kanji_1}}{{Example_Kana_1}}{{Example_Japanese_Audio_1}} {{Example_English_1}}{{Example_English_Audio_1}}\n"
        ));
        assert!(!t.cards[1].afmt.contains("Example_Kanji_2"));
    }
}
