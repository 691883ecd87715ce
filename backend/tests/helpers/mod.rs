use vocab_deck_backend::deck::Deck;
use vocab_deck_backend::LessonDocument;

pub const ORIGIN: &str = "https://example.com";

#[derive(Debug, Clone, Default)]
pub struct LessonExample {
    pub term: String,
    pub reading: Option<String>,
    pub english: String,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LessonEntry {
    pub term: String,
    pub reading: String,
    pub english: String,
    pub audio: Option<String>,
    /// Slow copy of the audio, in the half-speed cell.
    pub slow_audio: Option<String>,
    pub examples: Vec<LessonExample>,
}

#[allow(dead_code)]
pub fn entry(term: &str, reading: &str, english: &str) -> LessonEntry {
    LessonEntry {
        term: term.to_string(),
        reading: reading.to_string(),
        english: english.to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
impl LessonEntry {
    pub fn audio(mut self, src: &str) -> Self {
        self.audio = Some(src.to_string());
        self
    }

    pub fn slow_audio(mut self, src: &str) -> Self {
        self.slow_audio = Some(src.to_string());
        self
    }

    pub fn example(mut self, term: &str, english: &str) -> Self {
        self.examples.push(LessonExample {
            term: term.to_string(),
            english: english.to_string(),
            ..Default::default()
        });
        self
    }

    pub fn example_with(mut self, example: LessonExample) -> Self {
        self.examples.push(example);
        self
    }
}

fn play_button(src: &str) -> String {
    format!(r#"<button class="js-lsn3-play-vocabulary" data-type="audio/mp3" data-src="{}"></button>"#, src)
}

fn lesson_example_row(ex: &LessonExample) -> String {
    let mut html = String::from("<tr><td>");
    if let Some(src) = &ex.audio {
        html.push_str(&play_button(src));
    }
    html.push_str("</td><td>");
    html.push_str(&format!(r#"<span lang="ja">{}</span>"#, ex.term));
    if let Some(reading) = &ex.reading {
        html.push_str(&format!(r#"<span lang="ja" class="lsn3-lesson-vocabulary__pronunciation">({})</span>"#, reading));
    }
    html.push_str(&format!(r#"<span class="lsn3-lesson-vocabulary__definition" dir="ltr">{}</span>"#, ex.english));
    html.push_str("</td></tr>");
    html
}

fn lesson_row(e: &LessonEntry) -> String {
    let mut html = String::from(r#"<tr><td class="lsn3-lesson-vocabulary__td--play play">"#);
    if let Some(src) = &e.audio {
        html.push_str(&play_button(src));
    }
    html.push_str(r#"</td><td class="lsn3-lesson-vocabulary__td--play05 play05">"#);
    if let Some(src) = &e.slow_audio {
        html.push_str(&play_button(src));
    }
    html.push_str("</td><td>");
    html.push_str(&format!(r#"<span lang="ja">{}</span>"#, e.term));
    html.push_str(&format!(
        r#"<span lang="ja" class="lsn3-lesson-vocabulary__pronunciation">({})</span>"#,
        e.reading
    ));
    html.push_str(&format!(r#"<span class="lsn3-lesson-vocabulary__definition" dir="ltr">{}</span>"#, e.english));
    if !e.examples.is_empty() {
        html.push_str(r#"<span class="lsn3-lesson-vocabulary__sample js-lsn3-vocabulary-examples"><table>"#);
        for ex in &e.examples {
            html.push_str(&lesson_example_row(ex));
        }
        html.push_str("</table></span>");
    }
    html.push_str("</td></tr>\n");
    html
}

/// Lesson page with a vocabulary table, one row per entry.
#[allow(dead_code)]
pub fn lesson_page(entries: &[LessonEntry]) -> String {
    let rows: String = entries.iter().map(lesson_row).collect();
    format!(
        "<!DOCTYPE html><html><head><title>Lesson</title></head><body>\
         <div class=\"lsn3-lesson-vocabulary\"><table><tbody>\n{}</tbody></table></div></body></html>",
        rows
    )
}

#[derive(Debug, Clone, Default)]
pub struct WordItem {
    pub word: String,
    pub kana: String,
    pub english: String,
    pub image: Option<String>,
    pub audio_ja: Option<String>,
    pub audio_en: Option<String>,
    pub samples: Vec<WordItem>,
}

#[allow(dead_code)]
pub fn word(word: &str, kana: &str, english: &str) -> WordItem {
    WordItem {
        word: word.to_string(),
        kana: kana.to_string(),
        english: english.to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
impl WordItem {
    pub fn image(mut self, src: &str) -> Self {
        self.image = Some(src.to_string());
        self
    }

    pub fn audio(mut self, ja: &str, en: &str) -> Self {
        self.audio_ja = Some(ja.to_string());
        self.audio_en = Some(en.to_string());
        self
    }

    pub fn sample(mut self, sample: WordItem) -> Self {
        self.samples.push(sample);
        self
    }
}

fn word_fields(w: &WordItem) -> String {
    let mut html = String::new();
    html.push_str(&format!(r#"<span class="wlv-item__word">{}</span>"#, w.word));
    html.push_str(&format!(r#"<span class="wlv-item__kana">{}</span>"#, w.kana));
    html.push_str(&format!(r#"<span class="wlv-item__english">{}</span>"#, w.english));
    if let Some(src) = &w.audio_ja {
        html.push_str(&format!(r#"<button class="js-wlv-play" data-lang="ja" data-src="{}"></button>"#, src));
    }
    if let Some(src) = &w.audio_en {
        html.push_str(&format!(r#"<button class="js-wlv-play" data-lang="en" data-src="{}"></button>"#, src));
    }
    html
}

fn word_item(w: &WordItem) -> String {
    let mut html = String::from(r#"<div class="wlv-item">"#);
    if let Some(src) = &w.image {
        html.push_str(&format!(r#"<img class="wlv-item__image" src="{}">"#, src));
    }
    html.push_str(&word_fields(w));
    if !w.samples.is_empty() {
        html.push_str(r#"<div class="wlv-item__samples">"#);
        for s in &w.samples {
            html.push_str(r#"<div class="wlv-item__sample">"#);
            html.push_str(&word_fields(s));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>\n");
    html
}

/// Word list page, one item card per word.
#[allow(dead_code)]
pub fn words_page(items: &[WordItem]) -> String {
    let cards: String = items.iter().map(word_item).collect();
    format!(
        "<!DOCTYPE html><html><body><div class=\"wlv-list\">\n{}</div></body></html>",
        cards
    )
}

#[allow(dead_code)]
pub fn parse(html: &str) -> LessonDocument {
    LessonDocument::parse(html).expect("fixture should parse")
}

/// Value of `field` in note `note` of `deck`.
#[allow(dead_code)]
pub fn note_value<'a>(deck: &'a Deck, note: usize, field: &str) -> &'a str {
    let i = deck
        .schema
        .names()
        .iter()
        .position(|n| n == field)
        .unwrap_or_else(|| panic!("{} is not in the schema", field));
    &deck.notes[note][i]
}
