use std::collections::HashMap;

use indexmap::IndexMap;

use crate::parent_key::ParentKey;
use crate::types::{ExampleKind, FieldName};

/// Field values gathered for one vocabulary entry.
///
/// Fields are kept in the order they were first written. Example slots are
/// numbered per kind from a stored counter, so a record's slots for a kind
/// are always `0..k` without gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<FieldName, String>,
    next_slot: HashMap<ExampleKind, usize>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &FieldName) -> Option<&str> {
        self.fields.get(field).map(|v| v.as_str())
    }

    pub fn contains(&self, field: &FieldName) -> bool {
        self.fields.contains_key(field)
    }

    /// Last write wins. Returns the replaced value, if any.
    pub fn set(&mut self, field: FieldName, value: String) -> Option<String> {
        self.fields.insert(field, value)
    }

    /// Store `value` in the next free slot of `kind` and return the slot index.
    pub fn push_example(&mut self, kind: ExampleKind, value: String) -> usize {
        let slot = self.next_slot.entry(kind).or_insert(0);
        let index = *slot;
        *slot += 1;
        self.fields.insert(FieldName::Example(kind, index), value);
        index
    }

    /// Number of slots of `kind` this record has used.
    pub fn slots_used(&self, kind: ExampleKind) -> usize {
        self.next_slot.get(&kind).copied().unwrap_or(0)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All records of one run, keyed by parent key in first-touch order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: IndexMap<ParentKey, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `key`, created empty on first touch.
    pub fn ensure(&mut self, key: ParentKey) -> &mut Record {
        self.records.entry(key).or_default()
    }

    pub fn set(&mut self, key: ParentKey, field: FieldName, value: String) -> Option<String> {
        self.ensure(key).set(field, value)
    }

    pub fn get(&self, key: ParentKey, field: &FieldName) -> Option<&str> {
        self.records.get(&key).and_then(|r| r.get(field))
    }

    pub fn push_example(&mut self, key: ParentKey, kind: ExampleKind, value: String) -> usize {
        self.ensure(key).push_example(kind, value)
    }

    pub fn record(&self, key: ParentKey) -> Option<&Record> {
        self.records.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParentKey, &Record)> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ParentKey, &mut Record)> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
