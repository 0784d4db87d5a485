//! Persisted list of completed submissions

use super::draft::restore_record;
use super::error::StorageResult;
use super::traits::KeyValueStore;
use crate::schema::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Key of the serialized submission list
pub const SUBMISSIONS_KEY: &str = "form-submissions";

/// A finalized record. The record fields are flattened so a stored
/// submission reads as a record object with `id` and `submitted_at` added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub record: Record,
}

impl Submission {
    pub fn new(record: Record) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Some(Utc::now()),
            record,
        }
    }
}

/// Entries read from storage
struct Loaded {
    entries: Vec<Submission>,
    /// Stored items that are not record objects, written back untouched
    skipped: Vec<Value>,
    /// Some entry was given a new id that has not been persisted yet
    needs_rewrite: bool,
}

impl Loaded {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            skipped: Vec::new(),
            needs_rewrite: false,
        }
    }
}

/// Typed access to the submission list of a [`KeyValueStore`].
///
/// Every mutation re-reads the stored list, applies the change and writes
/// the whole list back.
pub struct SubmissionStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> SubmissionStore<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// All submissions in insertion order
    pub fn list(&self) -> StorageResult<Vec<Submission>> {
        Ok(self.load()?.entries)
    }

    /// Load the list and persist the ids assigned to entries stored
    /// without one, so they stay stable across restarts
    pub fn normalize(&mut self) -> StorageResult<Vec<Submission>> {
        let loaded = self.load()?;
        if loaded.needs_rewrite {
            tracing::info!("Persisting ids for {} submissions", loaded.entries.len());
            self.write(&loaded.entries, &loaded.skipped)?;
        }
        Ok(loaded.entries)
    }

    /// Append a record as a new submission and return it
    pub fn append(&mut self, record: Record) -> StorageResult<Submission> {
        let Loaded {
            mut entries,
            skipped,
            ..
        } = self.load()?;
        let submission = Submission::new(record);
        entries.push(submission.clone());
        self.write(&entries, &skipped)?;
        tracing::info!("Stored submission {} ({} total)", submission.id, entries.len());
        Ok(submission)
    }

    /// Remove the submission with the given id
    pub fn remove(&mut self, id: Uuid) -> StorageResult<Option<Submission>> {
        let Loaded {
            mut entries,
            skipped,
            ..
        } = self.load()?;
        let Some(index) = entries.iter().position(|s| s.id == id) else {
            tracing::debug!("Submission {id} not found");
            return Ok(None);
        };
        let removed = entries.remove(index);
        self.write(&entries, &skipped)?;
        tracing::info!("Deleted submission {id}");
        Ok(Some(removed))
    }

    /// Remove the submission at a position in the list
    pub fn remove_at(&mut self, index: usize) -> StorageResult<Option<Submission>> {
        let Loaded {
            mut entries,
            skipped,
            ..
        } = self.load()?;
        if index >= entries.len() {
            return Ok(None);
        }
        let removed = entries.remove(index);
        self.write(&entries, &skipped)?;
        tracing::info!("Deleted submission {} at position {index}", removed.id);
        Ok(Some(removed))
    }

    fn write(&mut self, entries: &[Submission], skipped: &[Value]) -> StorageResult<()> {
        let mut items = Vec::with_capacity(entries.len() + skipped.len());
        for entry in entries {
            items.push(serde_json::to_value(entry)?);
        }
        items.extend(skipped.iter().cloned());
        let json = serde_json::to_string(&items)?;
        self.store.set(SUBMISSIONS_KEY, &json)
    }

    fn load(&self) -> StorageResult<Loaded> {
        let Some(raw) = self.store.get(SUBMISSIONS_KEY)? else {
            return Ok(Loaded::empty());
        };
        Ok(parse_entries(&raw))
    }
}

fn parse_entries(raw: &str) -> Loaded {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("Stored submissions are not a list; treating as empty");
            return Loaded::empty();
        }
        Err(e) => {
            tracing::warn!("Ignoring unparsable submissions: {e}");
            return Loaded::empty();
        }
    };

    let mut loaded = Loaded::empty();
    for item in items {
        let Some(record) = restore_record(&item) else {
            loaded.skipped.push(item);
            continue;
        };
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| Uuid::parse_str(id).ok());
        let submitted_at = item
            .get("submitted_at")
            .and_then(|at| serde_json::from_value::<DateTime<Utc>>(at.clone()).ok());

        loaded.needs_rewrite |= id.is_none();
        loaded.entries.push(Submission {
            id: id.unwrap_or_else(Uuid::new_v4),
            submitted_at,
            record,
        });
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Category;
    use crate::storage::MemoryStore;

    fn record(name: &str) -> Record {
        Record {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: "1 Rd".to_string(),
            phone: "555".to_string(),
            categories: vec![Category::Health],
        }
    }

    fn names(entries: &[Submission]) -> Vec<&str> {
        entries.iter().map(|s| s.record.name.as_str()).collect()
    }

    mod append {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_store_lists_nothing() {
            let mut store = MemoryStore::new();
            assert!(SubmissionStore::new(&mut store).list().unwrap().is_empty());
        }

        #[test]
        fn test_append_preserves_insertion_order() {
            let mut store = MemoryStore::new();
            let mut submissions = SubmissionStore::new(&mut store);
            submissions.append(record("Ann")).unwrap();
            submissions.append(record("Bob")).unwrap();
            submissions.append(record("Cy")).unwrap();
            assert_eq!(names(&submissions.list().unwrap()), vec!["Ann", "Bob", "Cy"]);
        }

        #[test]
        fn test_append_assigns_distinct_ids_and_timestamp() {
            let mut store = MemoryStore::new();
            let mut submissions = SubmissionStore::new(&mut store);
            let a = submissions.append(record("Ann")).unwrap();
            let b = submissions.append(record("Ann")).unwrap();
            assert_ne!(a.id, b.id);
            assert!(a.submitted_at.is_some());
            assert_eq!(submissions.list().unwrap().len(), 2);
        }

        #[test]
        fn test_stored_entry_reads_as_record_object() {
            let mut store = MemoryStore::new();
            let submission = SubmissionStore::new(&mut store)
                .append(record("Ann"))
                .unwrap();

            let raw = store.get(SUBMISSIONS_KEY).unwrap().unwrap();
            let value: Value = serde_json::from_str(&raw).unwrap();
            let entry = &value[0];
            assert_eq!(entry["name"], "Ann");
            assert_eq!(entry["categories"], serde_json::json!(["health"]));
            assert_eq!(entry["id"], submission.id.to_string());
        }
    }

    mod remove {
        use super::*;
        use pretty_assertions::assert_eq;

        fn seeded(store: &mut MemoryStore) -> Vec<Submission> {
            let mut submissions = SubmissionStore::new(store);
            for name in ["Ann", "Bob", "Cy", "Dee"] {
                submissions.append(record(name)).unwrap();
            }
            submissions.list().unwrap()
        }

        #[test]
        fn test_remove_by_id_keeps_relative_order() {
            let mut store = MemoryStore::new();
            let entries = seeded(&mut store);
            let mut submissions = SubmissionStore::new(&mut store);

            let removed = submissions.remove(entries[1].id).unwrap().unwrap();
            assert_eq!(removed.record.name, "Bob");
            assert_eq!(names(&submissions.list().unwrap()), vec!["Ann", "Cy", "Dee"]);
        }

        #[test]
        fn test_remove_unknown_id_is_noop() {
            let mut store = MemoryStore::new();
            seeded(&mut store);
            let mut submissions = SubmissionStore::new(&mut store);
            assert_eq!(submissions.remove(Uuid::new_v4()).unwrap(), None);
            assert_eq!(submissions.list().unwrap().len(), 4);
        }

        #[test]
        fn test_remove_at_each_position() {
            for index in 0..4 {
                let mut store = MemoryStore::new();
                let before = seeded(&mut store);
                let mut submissions = SubmissionStore::new(&mut store);

                submissions.remove_at(index).unwrap().unwrap();
                let after = submissions.list().unwrap();

                let mut expected = before.clone();
                expected.remove(index);
                assert_eq!(after, expected);
            }
        }

        #[test]
        fn test_remove_at_out_of_range() {
            let mut store = MemoryStore::new();
            seeded(&mut store);
            let mut submissions = SubmissionStore::new(&mut store);
            assert_eq!(submissions.remove_at(4).unwrap(), None);
            assert_eq!(submissions.list().unwrap().len(), 4);
        }
    }

    mod malformed {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_non_list_is_empty() {
            let mut store = MemoryStore::new();
            store.set(SUBMISSIONS_KEY, r#"{"name": "Ann"}"#).unwrap();
            assert!(SubmissionStore::new(&mut store).list().unwrap().is_empty());
        }

        #[test]
        fn test_unparsable_is_empty() {
            let mut store = MemoryStore::new();
            store.set(SUBMISSIONS_KEY, "[{").unwrap();
            assert!(SubmissionStore::new(&mut store).list().unwrap().is_empty());
        }

        #[test]
        fn test_entries_restore_field_by_field() {
            let mut store = MemoryStore::new();
            let raw = serde_json::json!([
                {"id": Uuid::new_v4(), "name": "Ann", "email": "a@b.com", "address": "1 Rd", "phone": "5", "categories": ["food"]},
                {"id": Uuid::new_v4(), "name": "Bob", "phone": 555, "categories": ["food", "gardening"]},
            ]);
            store.set(SUBMISSIONS_KEY, &raw.to_string()).unwrap();

            let entries = SubmissionStore::new(&mut store).list().unwrap();
            assert_eq!(names(&entries), vec!["Ann", "Bob"]);
            assert_eq!(entries[1].record.phone, "");
            assert_eq!(entries[1].record.categories, vec![Category::Food]);
        }

        #[test]
        fn test_startup_keeps_imperfect_entries_on_disk() {
            let mut store = MemoryStore::new();
            let raw = serde_json::json!([
                {"id": Uuid::new_v4(), "name": "Ann", "email": "a@b.com", "address": "1 Rd", "phone": "5", "categories": ["health"]},
                {"id": Uuid::new_v4(), "name": "Bob", "email": "b@b.com", "address": "2 Rd", "phone": "6", "categories": ["food", "gardening"]},
            ])
            .to_string();
            store.set(SUBMISSIONS_KEY, &raw).unwrap();

            let normalized = SubmissionStore::new(&mut store).normalize().unwrap();
            assert_eq!(names(&normalized), vec!["Ann", "Bob"]);
            assert_eq!(store.get(SUBMISSIONS_KEY).unwrap(), Some(raw));
        }

        #[test]
        fn test_non_object_items_survive_mutations() {
            let mut store = MemoryStore::new();
            let raw = serde_json::json!([
                {"id": Uuid::new_v4(), "name": "Ann", "email": "a@b.com", "address": "1 Rd", "phone": "5", "categories": ["food"]},
                "garbage",
            ]);
            store.set(SUBMISSIONS_KEY, &raw.to_string()).unwrap();

            let mut submissions = SubmissionStore::new(&mut store);
            assert_eq!(names(&submissions.list().unwrap()), vec!["Ann"]);
            submissions.append(record("Bob")).unwrap();

            let stored: Value =
                serde_json::from_str(&store.get(SUBMISSIONS_KEY).unwrap().unwrap()).unwrap();
            let items = stored.as_array().unwrap();
            assert_eq!(items.len(), 3);
            assert_eq!(items[1]["name"], "Bob");
            assert_eq!(items[2], "garbage");
        }

        #[test]
        fn test_normalize_does_not_overwrite_corrupted_list() {
            for raw in ["[{", r#"{"name": "Ann"}"#] {
                let mut store = MemoryStore::new();
                store.set(SUBMISSIONS_KEY, raw).unwrap();
                assert!(SubmissionStore::new(&mut store).normalize().unwrap().is_empty());
                assert_eq!(store.get(SUBMISSIONS_KEY).unwrap().as_deref(), Some(raw));
            }
        }

        #[test]
        fn test_normalize_pins_ids_of_legacy_entries() {
            let mut store = MemoryStore::new();
            let raw = serde_json::json!([
                {"name": "Ann", "email": "a@b.com", "address": "1 Rd", "phone": "5", "categories": ["food"]},
            ]);
            store.set(SUBMISSIONS_KEY, &raw.to_string()).unwrap();

            let mut submissions = SubmissionStore::new(&mut store);
            let normalized = submissions.normalize().unwrap();
            assert_eq!(normalized.len(), 1);
            assert_eq!(normalized[0].submitted_at, None);

            // The assigned id is now persisted and usable for deletion
            assert_eq!(submissions.list().unwrap(), normalized);
            assert!(submissions.remove(normalized[0].id).unwrap().is_some());
            assert!(submissions.list().unwrap().is_empty());
        }

        #[test]
        fn test_normalize_leaves_clean_list_untouched() {
            let mut store = MemoryStore::new();
            SubmissionStore::new(&mut store).append(record("Ann")).unwrap();
            let before = store.get(SUBMISSIONS_KEY).unwrap();

            SubmissionStore::new(&mut store).normalize().unwrap();
            assert_eq!(store.get(SUBMISSIONS_KEY).unwrap(), before);
        }
    }
}
