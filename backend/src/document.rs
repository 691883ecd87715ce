//! Read-only view over a parsed lesson page.
//!
//! The engine never walks raw markup. It asks this module for elements by
//! tag and attribute signature, and for the nearest ancestor matching another
//! signature.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::types::EngineError;

lazy_static! {
    static ref BODY_ELEMENTS: Selector = Selector::parse("body *").unwrap();
}

/// How one attribute of a candidate element is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrRule {
    /// The attribute is present with this value. For `class`, a single token
    /// matches any one of the element's classes, while a value with spaces
    /// must equal the whole class list.
    Equals(&'static str),
    /// The attribute must not be present at all.
    Absent,
}

/// Tag name plus attribute rules, e.g. `span[lang=ja]` without `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMatch {
    pub tag: &'static str,
    pub attrs: &'static [(&'static str, AttrRule)],
}

impl ElementMatch {
    pub const fn new(tag: &'static str, attrs: &'static [(&'static str, AttrRule)]) -> Self {
        ElementMatch { tag, attrs }
    }

    pub fn matches(&self, element: &ElementRef) -> bool {
        let el = element.value();
        if !el.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }

        self.attrs.iter().all(|(name, rule)| match (rule, el.attr(name)) {
            (AttrRule::Absent, value) => value.is_none(),
            (AttrRule::Equals(_), None) => false,
            (AttrRule::Equals(want), Some(have)) => attr_value_matches(name, want, have),
        })
    }

    /// Short CSS-like rendering for log messages.
    pub fn describe(&self) -> String {
        let mut out = self.tag.to_string();
        for (name, rule) in self.attrs {
            match rule {
                AttrRule::Equals(v) => out.push_str(&format!("[{}=\"{}\"]", name, v)),
                AttrRule::Absent => out.push_str(&format!("[!{}]", name)),
            }
        }
        out
    }
}

fn attr_value_matches(name: &str, want: &str, have: &str) -> bool {
    if name.eq_ignore_ascii_case("class") {
        if want.split_whitespace().count() > 1 {
            return want.split_whitespace().eq(have.split_whitespace());
        }
        return have.split_whitespace().any(|class| class == want);
    }
    have == want
}

/// Nearest ancestor of `element` (excluding itself) satisfying `m`.
pub fn closest<'a>(element: ElementRef<'a>, m: &ElementMatch) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| m.matches(ancestor))
}

/// Text content of an element with surrounding whitespace removed.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub struct LessonDocument {
    html: Html,
}

impl LessonDocument {
    /// Parse a lesson page.
    ///
    /// The HTML parser accepts anything, so "unusable" means there is nothing
    /// to extract from: empty input or a body without elements.
    pub fn parse(html_text: &str) -> Result<Self, EngineError> {
        if html_text.trim().is_empty() {
            return Err(EngineError::FatalInput("document is empty".to_string()));
        }

        let html = Html::parse_document(html_text);
        if html.select(&BODY_ELEMENTS).next().is_none() {
            return Err(EngineError::FatalInput("document has no elements in <body>".to_string()));
        }

        Ok(LessonDocument { html })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let html_text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lesson document: {}", path.display()))?;
        let doc = LessonDocument::parse(&html_text)
            .with_context(|| format!("Failed to parse lesson document: {}", path.display()))?;
        Ok(doc)
    }

    /// Every element matching `m`, in document order.
    pub fn find_all(&self, m: &ElementMatch) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| m.matches(el))
            .collect()
    }

    pub fn contains(&self, m: &ElementMatch) -> bool {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|el| m.matches(&el))
    }
}
