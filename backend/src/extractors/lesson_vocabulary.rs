//! Vocabulary table of a lesson page.
//!
//! One `<tr>` per entry. Example sentences sit in a nested table inside the
//! sample `<span>` of the entry row, so their entry is the row above the row
//! they are in.
//!
//! ```text
//! <tr>
//!   <td class="lsn3-lesson-vocabulary__td--play play"><button class="js-lsn3-play-vocabulary" data-type="audio/mp3" data-src="…">
//!   <td class="lsn3-lesson-vocabulary__td--play05 play05"><button … data-speed="0.5">   (slow copy, skipped)
//!   <td>
//!     <span lang="ja">食べる</span>
//!     <span lang="ja" class="lsn3-lesson-vocabulary__pronunciation">(たべる)</span>
//!     <span class="lsn3-lesson-vocabulary__definition" dir="ltr">to eat</span>
//!     <span class="lsn3-lesson-vocabulary__sample js-lsn3-vocabulary-examples">
//!       <table><tr>…same spans and buttons, once per example…</tr></table>
//! ```

use crate::document::{AttrRule, ElementMatch};
use crate::parent_key::AncestorSelector;
use crate::types::{ExampleKind, FieldTarget, FixedField};

use super::{FieldRule, Layout, Placement, ValueKind, VocabularyExtractor};

const ROW: ElementMatch = ElementMatch::new("tr", &[]);

const SAMPLE: ElementMatch = ElementMatch::new(
    "span",
    &[("class", AttrRule::Equals("lsn3-lesson-vocabulary__sample js-lsn3-vocabulary-examples"))],
);

const SLOW_PLAY_CELL: ElementMatch = ElementMatch::new(
    "td",
    &[("class", AttrRule::Equals("lsn3-lesson-vocabulary__td--play05 play05"))],
);

const TERM: ElementMatch = ElementMatch::new(
    "span",
    &[("lang", AttrRule::Equals("ja")), ("class", AttrRule::Absent)],
);

const READING: ElementMatch = ElementMatch::new(
    "span",
    &[("lang", AttrRule::Equals("ja")), ("class", AttrRule::Equals("lsn3-lesson-vocabulary__pronunciation"))],
);

const DEFINITION: ElementMatch = ElementMatch::new(
    "span",
    &[("class", AttrRule::Equals("lsn3-lesson-vocabulary__definition")), ("dir", AttrRule::Equals("ltr"))],
);

const PLAY_BUTTON: ElementMatch = ElementMatch::new(
    "button",
    &[
        ("class", AttrRule::Equals("js-lsn3-play-vocabulary")),
        ("data-type", AttrRule::Equals("audio/mp3")),
        ("data-speed", AttrRule::Absent),
    ],
);

const SOUND: ValueKind = ValueKind::Sound { attr: "data-src" };

const RULES: &[FieldRule] = &[
    FieldRule { target: FieldTarget::Fixed(FixedField::Kanji), fragment: TERM, placement: Placement::Entry, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::Kana), fragment: READING, placement: Placement::Entry, value: ValueKind::Bracketed, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::English), fragment: DEFINITION, placement: Placement::Entry, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::Kanji), fragment: TERM, placement: Placement::Example, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::Kana), fragment: READING, placement: Placement::Example, value: ValueKind::Bracketed, skip_inside: &[] },
    FieldRule { target: FieldTarget::Example(ExampleKind::English), fragment: DEFINITION, placement: Placement::Example, value: ValueKind::Text, skip_inside: &[] },
    FieldRule { target: FieldTarget::Fixed(FixedField::JapaneseAudio), fragment: PLAY_BUTTON, placement: Placement::Entry, value: SOUND, skip_inside: &[SLOW_PLAY_CELL] },
    FieldRule { target: FieldTarget::Example(ExampleKind::JapaneseAudio), fragment: PLAY_BUTTON, placement: Placement::Example, value: SOUND, skip_inside: &[SLOW_PLAY_CELL] },
];

pub struct LessonVocabularyExtractor;

impl VocabularyExtractor for LessonVocabularyExtractor {
    fn layout(&self) -> Layout {
        Layout::LessonVocabulary
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn example_container(&self) -> &'static ElementMatch {
        &SAMPLE
    }

    fn entry_ancestor(&self) -> AncestorSelector {
        AncestorSelector::Nearest(ROW)
    }

    fn example_ancestor(&self) -> AncestorSelector {
        AncestorSelector::NearestTwice(ROW)
    }

    fn marker(&self) -> &'static ElementMatch {
        &DEFINITION
    }
}
