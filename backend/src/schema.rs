use crate::record_store::RecordStore;
use crate::types::{ExampleKind, FieldName, FixedField};

/// The ordered field list every record is normalized to.
///
/// Its width is only known after extraction: fixed fields, then one set of
/// example fields per slot used by the busiest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    example_count: usize,
    fields: Vec<FieldName>,
}

impl Schema {
    pub fn with_example_count(example_count: usize) -> Self {
        let mut fields: Vec<FieldName> = FixedField::ALL.iter().map(|f| FieldName::Fixed(*f)).collect();
        for slot in 0..example_count {
            fields.extend(ExampleKind::ALL.iter().map(|kind| FieldName::Example(*kind, slot)));
        }
        Schema { example_count, fields }
    }

    /// Scan every record's field names for the highest example slot.
    pub fn synthesize(store: &RecordStore) -> Self {
        let example_count = store
            .iter()
            .flat_map(|(_, record)| record.fields())
            .filter_map(|(field, _)| match field {
                FieldName::Example(_, slot) => Some(slot + 1),
                FieldName::Fixed(_) => None,
            })
            .max()
            .unwrap_or(0);
        Schema::with_example_count(example_count)
    }

    pub fn example_count(&self) -> usize {
        self.example_count
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.to_string()).collect()
    }

    pub fn contains(&self, field: &FieldName) -> bool {
        self.fields.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parent_key::ParentKey;

    #[test]
    fn test_empty_store_has_fixed_fields_only() {
        let schema = Schema::synthesize(&RecordStore::new());
        assert_eq!(schema.example_count(), 0);
        assert_eq!(schema.names(), vec!["Kana", "English", "Kanji", "Japanese_Audio", "English_Audio", "Image"]);
    }

    #[test]
    fn test_width_follows_busiest_record() {
        let mut store = RecordStore::new();
        store.push_example(ParentKey(0), ExampleKind::Kana, "a".into());
        store.push_example(ParentKey(1), ExampleKind::English, "b".into());
        store.push_example(ParentKey(1), ExampleKind::English, "c".into());
        store.push_example(ParentKey(1), ExampleKind::English, "d".into());

        let schema = Schema::synthesize(&store);
        assert_eq!(schema.example_count(), 3);
        assert_eq!(schema.width(), 6 + 5 * 3);
        assert_eq!(schema.names()[6..11], [
            "Example_Kanji_0",
            "Example_Kana_0",
            "Example_English_0",
            "Example_Japanese_Audio_0",
            "Example_English_Audio_0",
        ]);
        assert_eq!(schema.names().last().map(|s| s.as_str()), Some("Example_English_Audio_2"));
    }
}
