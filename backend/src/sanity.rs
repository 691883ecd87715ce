use crate::logger::debug;
use crate::record_store::RecordStore;
use crate::schema::Schema;

/// Give every record an explicit empty value for each schema field it lacks.
///
/// Extractors only write what they found, so this must run after the schema
/// is synthesized and before records are finalized. Returns the number of
/// gaps filled; a second run over the same store fills nothing.
pub fn fill_missing_fields(store: &mut RecordStore, schema: &Schema) -> usize {
    let mut filled = 0;
    for (key, record) in store.iter_mut() {
        for field in schema.fields() {
            if !record.contains(field) {
                record.set(*field, String::new());
                debug(&format!("Record {}: {} does not exist", key, field));
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parent_key::ParentKey;
    use crate::types::{ExampleKind, FieldName, FixedField};

    #[test]
    fn test_fill_and_refill() {
        let mut store = RecordStore::new();
        store.set(ParentKey(0), FieldName::Fixed(FixedField::Kanji), "猫".into());
        store.push_example(ParentKey(1), ExampleKind::Kanji, "猫がいる。".into());

        let schema = Schema::synthesize(&store);
        assert_eq!(schema.width(), 11);

        // 10 gaps in the first record, 10 in the second.
        assert_eq!(fill_missing_fields(&mut store, &schema), 20);

        for (_, record) in store.iter() {
            for field in schema.fields() {
                assert!(record.get(field).is_some());
            }
        }
        assert_eq!(store.get(ParentKey(0), &FieldName::Fixed(FixedField::Kanji)), Some("猫"));
        assert_eq!(store.get(ParentKey(0), &FieldName::Example(ExampleKind::Kanji, 0)), Some(""));

        let before = store.clone();
        assert_eq!(fill_missing_fields(&mut store, &schema), 0);
        for ((k1, r1), (k2, r2)) in before.iter().zip(store.iter()) {
            assert_eq!(k1, k2);
            assert_eq!(r1, r2);
        }
    }
}
