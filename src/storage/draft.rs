//! The single in-progress draft slot

use super::error::StorageResult;
use super::traits::KeyValueStore;
use crate::schema::{Category, FieldName, Record};
use crate::wizard::Step;
use serde_json::Value;

/// Key of the serialized draft record
pub const DRAFT_RECORD_KEY: &str = "multi-step-form-data";
/// Key of the draft's current step
pub const DRAFT_STEP_KEY: &str = "multi-step-form-current-step";

/// A restored draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub record: Record,
    pub step: Step,
}

/// Typed access to the draft slot of a [`KeyValueStore`]
pub struct DraftStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> DraftStore<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Overwrite the draft slot with `record` at `step`
    pub fn save(&mut self, record: &Record, step: Step) -> StorageResult<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(DRAFT_RECORD_KEY, &json)?;
        self.store.set(DRAFT_STEP_KEY, &step.index().to_string())?;
        tracing::debug!("Saved draft at step {}", step.index());
        Ok(())
    }

    /// Load the draft. Returns None when neither the record nor the step
    /// holds anything usable.
    pub fn load(&self) -> StorageResult<Option<Draft>> {
        let record = self
            .store
            .get(DRAFT_RECORD_KEY)?
            .and_then(|raw| parse_record(&raw));
        let step = self.store.get(DRAFT_STEP_KEY)?.and_then(|raw| parse_step(&raw));

        if record.is_none() && step.is_none() {
            return Ok(None);
        }
        Ok(Some(Draft {
            record: record.unwrap_or_default(),
            step: step.unwrap_or_default(),
        }))
    }

    /// Delete both draft entries
    pub fn clear(&mut self) -> StorageResult<()> {
        self.store.remove(DRAFT_RECORD_KEY)?;
        self.store.remove(DRAFT_STEP_KEY)?;
        tracing::debug!("Cleared draft");
        Ok(())
    }
}

fn parse_record(raw: &str) -> Option<Record> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => restore_record(&value),
        Err(e) => {
            tracing::warn!("Discarding unparsable draft record: {e}");
            None
        }
    }
}

fn parse_step(raw: &str) -> Option<Step> {
    let step = raw.trim().parse::<i64>().ok().and_then(Step::from_index);
    if step.is_none() {
        tracing::warn!("Discarding saved step {raw:?}");
    }
    step
}

/// Overlay the known fields of a saved record object onto an empty
/// record. Used for drafts and stored submissions. Fields
/// that are missing or have the wrong JSON type keep their default.
pub(crate) fn restore_record(value: &Value) -> Option<Record> {
    let Value::Object(map) = value else {
        tracing::warn!("Discarding saved record that is not an object");
        return None;
    };

    let mut record = Record::default();
    for field in FieldName::ALL {
        let Some(saved) = map.get(field.key()) else {
            continue;
        };
        match (field, saved) {
            (FieldName::Categories, Value::Array(items)) => {
                for category in items.iter().filter_map(|v| v.as_str()).filter_map(Category::from_id) {
                    if !record.has_category(category) {
                        record.categories.push(category);
                    }
                }
            }
            (field, Value::String(text)) if field.is_text() => {
                record.set_text(field, text.clone());
            }
            (field, _) => {
                tracing::warn!("Ignoring saved {} with unexpected type", field.key());
            }
        }
    }
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore, StorageError};
    use serde_json::json;

    fn full_record() -> Record {
        Record {
            name: "Ann".to_string(),
            email: "a@b.com".to_string(),
            address: "1 Rd".to_string(),
            phone: "555".to_string(),
            categories: vec![Category::Health, Category::Food],
        }
    }

    fn store_with(record: Option<&str>, step: Option<&str>) -> MemoryStore {
        let mut store = MemoryStore::new();
        if let Some(record) = record {
            store.set(DRAFT_RECORD_KEY, record).unwrap();
        }
        if let Some(step) = step {
            store.set(DRAFT_STEP_KEY, step).unwrap();
        }
        store
    }

    mod save_and_load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_store_has_no_draft() {
            let mut store = MemoryStore::new();
            assert_eq!(DraftStore::new(&mut store).load().unwrap(), None);
        }

        #[test]
        fn test_round_trip() {
            let mut store = MemoryStore::new();
            let mut drafts = DraftStore::new(&mut store);
            drafts.save(&full_record(), Step::Categories).unwrap();

            let draft = drafts.load().unwrap().unwrap();
            assert_eq!(draft.record, full_record());
            assert_eq!(draft.step, Step::Categories);
        }

        #[test]
        fn test_step_is_stored_as_integer_string() {
            let mut store = MemoryStore::new();
            DraftStore::new(&mut store)
                .save(&Record::default(), Step::Review)
                .unwrap();
            assert_eq!(store.get(DRAFT_STEP_KEY).unwrap(), Some("4".to_string()));
        }

        #[test]
        fn test_save_overwrites() {
            let mut store = MemoryStore::new();
            let mut drafts = DraftStore::new(&mut store);
            drafts.save(&full_record(), Step::Review).unwrap();
            drafts.save(&Record::default(), Step::PersonalInfo).unwrap();

            let draft = drafts.load().unwrap().unwrap();
            assert_eq!(draft.record, Record::default());
            assert_eq!(draft.step, Step::PersonalInfo);
        }

        #[test]
        fn test_clear_removes_both_keys() {
            let mut store = MemoryStore::new();
            let mut drafts = DraftStore::new(&mut store);
            drafts.save(&full_record(), Step::ContactInfo).unwrap();
            drafts.clear().unwrap();
            assert_eq!(drafts.load().unwrap(), None);
            assert!(store.is_empty());
        }

        #[test]
        fn test_save_propagates_store_failure() {
            let mut store = MockKeyValueStore::new();
            store.expect_set().returning(|_, _| {
                Err(StorageError::Io {
                    path: "storage.json".into(),
                    source: std::io::Error::other("disk full"),
                })
            });
            let result = DraftStore::new(&mut store).save(&full_record(), Step::ContactInfo);
            assert!(matches!(result, Err(StorageError::Io { .. })));
        }
    }

    mod step_restoration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_without_record_restores_step() {
            let mut store = store_with(None, Some("3"));
            let draft = DraftStore::new(&mut store).load().unwrap().unwrap();
            assert_eq!(draft.step, Step::Categories);
            assert_eq!(draft.record, Record::default());
        }

        #[test]
        fn test_out_of_range_step_falls_back_to_first() {
            for raw in ["0", "5", "-1", "99"] {
                let mut store = store_with(Some("{}"), Some(raw));
                let draft = DraftStore::new(&mut store).load().unwrap().unwrap();
                assert_eq!(draft.step, Step::PersonalInfo, "step {raw}");
            }
        }

        #[test]
        fn test_unparsable_step_is_ignored() {
            let mut store = store_with(None, Some("two"));
            assert_eq!(DraftStore::new(&mut store).load().unwrap(), None);
        }

        #[test]
        fn test_step_whitespace_is_tolerated() {
            let mut store = store_with(None, Some(" 2\n"));
            let draft = DraftStore::new(&mut store).load().unwrap().unwrap();
            assert_eq!(draft.step, Step::ContactInfo);
        }
    }

    mod record_restoration {
        use super::*;
        use pretty_assertions::assert_eq;

        fn restore(value: Value) -> Record {
            restore_record(&value).unwrap()
        }

        #[test]
        fn test_name_restores_alone() {
            assert_eq!(restore(json!({"name": "Ann"})).name, "Ann");
        }

        #[test]
        fn test_email_restores_alone() {
            let record = restore(json!({"email": "a@b.com"}));
            assert_eq!(record.email, "a@b.com");
            assert_eq!(record.name, "");
        }

        #[test]
        fn test_address_restores_alone() {
            assert_eq!(restore(json!({"address": "1 Rd"})).address, "1 Rd");
        }

        #[test]
        fn test_phone_restores_alone() {
            assert_eq!(restore(json!({"phone": "555"})).phone, "555");
        }

        #[test]
        fn test_categories_restore_alone() {
            let record = restore(json!({"categories": ["travel", "technology"]}));
            assert_eq!(
                record.categories,
                vec![Category::Travel, Category::Technology]
            );
        }

        #[test]
        fn test_wrong_types_keep_defaults() {
            let record = restore(json!({
                "name": 42,
                "email": null,
                "address": ["1 Rd"],
                "phone": 555,
                "categories": "health",
            }));
            assert_eq!(record, Record::default());
        }

        #[test]
        fn test_unknown_and_duplicate_categories_are_dropped() {
            let record = restore(json!({"categories": ["food", "gardening", 3, "food", "sports"]}));
            assert_eq!(record.categories, vec![Category::Food, Category::Sports]);
        }

        #[test]
        fn test_unknown_keys_are_ignored() {
            let record = restore(json!({"name": "Ann", "nickname": "A"}));
            assert_eq!(
                record,
                Record {
                    name: "Ann".to_string(),
                    ..Default::default()
                }
            );
        }

        #[test]
        fn test_non_object_is_rejected() {
            assert_eq!(restore_record(&json!(["name"])), None);
            assert_eq!(restore_record(&json!("Ann")), None);
        }

        #[test]
        fn test_corrupted_blob_yields_no_draft() {
            let mut store = store_with(Some("{\"name\": \"An"), None);
            assert_eq!(DraftStore::new(&mut store).load().unwrap(), None);
        }

        #[test]
        fn test_corrupted_blob_keeps_valid_step() {
            let mut store = store_with(Some("not json"), Some("2"));
            let draft = DraftStore::new(&mut store).load().unwrap().unwrap();
            assert_eq!(draft.record, Record::default());
            assert_eq!(draft.step, Step::ContactInfo);
        }
    }
}
