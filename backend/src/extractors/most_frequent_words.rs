//! Most-frequent-words grid: one card per word, examples inside the card.

use crate::document::{AttrRule, ElementMatch};
use crate::parent_key::AncestorSelector;
use crate::types::{ExampleKind, FieldTarget, FixedField};

use super::{FieldRule, Layout, Placement, ValueKind, VocabularyExtractor};

const ITEM: ElementMatch = ElementMatch::new("div", &[("class", AttrRule::Equals("wlv-item"))]);

const SAMPLES: ElementMatch = ElementMatch::new("div", &[("class", AttrRule::Equals("wlv-item__samples"))]);

const WORD: ElementMatch = ElementMatch::new("span", &[("class", AttrRule::Equals("wlv-item__word"))]);

const KANA: ElementMatch = ElementMatch::new("span", &[("class", AttrRule::Equals("wlv-item__kana"))]);

const ENGLISH: ElementMatch = ElementMatch::new("span", &[("class", AttrRule::Equals("wlv-item__english"))]);

const IMAGE: ElementMatch = ElementMatch::new("img", &[("class", AttrRule::Equals("wlv-item__image"))]);

const PLAY_JA: ElementMatch = ElementMatch::new(
    "button",
    &[("class", AttrRule::Equals("js-wlv-play")), ("data-lang", AttrRule::Equals("ja"))],
);

const PLAY_EN: ElementMatch = ElementMatch::new(
    "button",
    &[("class", AttrRule::Equals("js-wlv-play")), ("data-lang", AttrRule::Equals("en"))],
);

const SOUND: ValueKind = ValueKind::Sound { attr: "data-src" };

const RULES: &[FieldRule] = &[
    FieldRule { target: FieldTarget::Fixed(FixedField::Kanji), fragment: WORD, placement: Placement::Entry, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::Kana), fragment: KANA, placement: Placement::Entry, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::English), fragment: ENGLISH, placement: Placement::Entry, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::Image), fragment: IMAGE, placement: Placement::Entry, value: ValueKind::Image { attr: "src" }, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::Kanji), fragment: WORD, placement: Placement::Example, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::Kana), fragment: KANA, placement: Placement::Example, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::English), fragment: ENGLISH, placement: Placement::Example, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::JapaneseAudio), fragment: PLAY_JA, placement: Placement::Entry, value: SOUND, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::EnglishAudio), fragment: PLAY_EN, placement: Placement::Entry, value: SOUND, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::JapaneseAudio), fragment: PLAY_JA, placement: Placement::Example, value: SOUND, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::EnglishAudio), fragment: PLAY_EN, placement: Placement::Example, value: SOUND, skip_inside: &[] },
];

pub struct MostFrequentWordsExtractor;

impl VocabularyExtractor for MostFrequentWordsExtractor {
    fn layout(&self) -> Layout {
        Layout::MostFrequentWords
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn example_container(&self) -> &'static ElementMatch {
        &SAMPLES
    }

    fn entry_ancestor(&self) -> AncestorSelector {
        AncestorSelector::Nearest(ITEM)
    }

    fn example_ancestor(&self) -> AncestorSelector {
        AncestorSelector::Nearest(ITEM)
    }

    fn marker(&self) -> &'static ElementMatch {
        &ITEM
    }
}
