use std::collections::HashMap;
use std::fmt;

use ego_tree::NodeId;
use scraper::ElementRef;
use serde::Serialize;

use crate::document::{closest, ElementMatch};

/// Identity of one vocabulary entry within a single run.
///
/// Keys are handed out in the order their ancestor nodes are first seen, so
/// two fragments share a key exactly when they share the ancestor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParentKey(pub u32);

impl fmt::Display for ParentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which ancestor of a fragment identifies its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorSelector {
    /// Nearest ancestor matching.
    Nearest(ElementMatch),
    /// Nearest ancestor matching, then that ancestor's own nearest match.
    /// Example rows nested in a table inside the entry row need this.
    NearestTwice(ElementMatch),
}

impl AncestorSelector {
    pub fn locate<'a>(&self, fragment: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            AncestorSelector::Nearest(m) => closest(fragment, m),
            AncestorSelector::NearestTwice(m) => closest(fragment, m).and_then(|inner| closest(inner, m)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            AncestorSelector::Nearest(m) => m.describe(),
            AncestorSelector::NearestTwice(m) => format!("{0} > {0}", m.describe()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ParentKeyResolver {
    assigned: HashMap<NodeId, ParentKey>,
    next: u32,
}

impl ParentKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the entry `fragment` belongs to, or `None` when the selected
    /// ancestor doesn't exist.
    pub fn resolve(&mut self, fragment: ElementRef, selector: &AncestorSelector) -> Option<ParentKey> {
        let ancestor = selector.locate(fragment)?;
        let next = &mut self.next;
        let key = *self.assigned.entry(ancestor.id()).or_insert_with(|| {
            let key = ParentKey(*next);
            *next += 1;
            key
        });
        Some(key)
    }

    /// Number of distinct ancestors seen so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AttrRule, LessonDocument};

    const TR: ElementMatch = ElementMatch::new("tr", &[]);
    const WORD: ElementMatch = ElementMatch::new("span", &[("class", AttrRule::Equals("w"))]);
    const NOTE: ElementMatch = ElementMatch::new("span", &[("class", AttrRule::Equals("n"))]);

    fn doc() -> LessonDocument {
        LessonDocument::parse(r#"<body><table>
            <tr><td><span class="w">a</span><span class="n">a-note</span>
                <table><tr><td><span class="n">a-inner</span></td></tr></table></td></tr>
            <tr><td><span class="w">b</span></td></tr>
        </table><span class="w">orphan</span></body>"#).unwrap()
    }

    #[test]
    fn test_same_row_same_key() {
        let doc = doc();
        let mut resolver = ParentKeyResolver::new();
        let words = doc.find_all(&WORD);
        let notes = doc.find_all(&NOTE);

        let a = resolver.resolve(words[0], &AncestorSelector::Nearest(TR)).unwrap();
        let b = resolver.resolve(words[1], &AncestorSelector::Nearest(TR)).unwrap();
        let a_note = resolver.resolve(notes[0], &AncestorSelector::Nearest(TR)).unwrap();

        assert_eq!(a, ParentKey(0));
        assert_eq!(b, ParentKey(1));
        assert_eq!(a, a_note);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_nested_row_resolves_to_outer_row() {
        let doc = doc();
        let mut resolver = ParentKeyResolver::new();
        let words = doc.find_all(&WORD);
        let notes = doc.find_all(&NOTE);

        let outer = resolver.resolve(words[0], &AncestorSelector::Nearest(TR)).unwrap();
        let inner_direct = resolver.resolve(notes[1], &AncestorSelector::Nearest(TR)).unwrap();
        let inner_twice = resolver.resolve(notes[1], &AncestorSelector::NearestTwice(TR)).unwrap();

        assert_ne!(outer, inner_direct);
        assert_eq!(outer, inner_twice);
    }

    #[test]
    fn test_missing_ancestor() {
        let doc = doc();
        let mut resolver = ParentKeyResolver::new();
        let orphan = doc.find_all(&WORD)[2];
        assert_eq!(resolver.resolve(orphan, &AncestorSelector::Nearest(TR)), None);
        // A top-level row has no second <tr> above it.
        let b = doc.find_all(&WORD)[1];
        assert_eq!(resolver.resolve(b, &AncestorSelector::NearestTwice(TR)), None);
        assert!(resolver.is_empty());
    }
}
