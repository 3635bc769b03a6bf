//! Record store holding every container of a report.
//!
//! The store is filled exactly once from the producer's output. Afterwards
//! records are never added or removed; only their visibility and their
//! position in the display order change.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{ContainerRecord, ProducerEntry, ReportError, ToteSummary};

/// Top-level shapes a report document may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReportDocument {
    List(Vec<Value>),
    Wrapped { containers: Vec<Value> },
}

/// Ordered collection of container records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<ContainerRecord>,
}

impl RecordStore {
    /// Builds a store from producer entries, keeping their order.
    ///
    /// When an id occurs more than once only the first entry is kept.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ProducerEntry>) -> Self {
        Self::from_records(entries.into_iter().map(ContainerRecord::from_entry))
    }

    /// Builds a store from already parsed records, keeping their order.
    pub fn from_records(records: impl IntoIterator<Item = ContainerRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for record in records {
            if seen.insert(record.id().to_owned()) {
                kept.push(record);
            } else {
                warn!(id = record.id(), "duplicate container id, keeping first entry");
            }
        }
        debug!(count = kept.len(), "record store populated");
        Self { records: kept }
    }

    /// Parses a report document.
    ///
    /// Accepts a bare array or an object with a `containers` array. Entries
    /// carrying an `items` list are read as raw simulation summaries.
    pub fn from_json_str(raw: &str) -> Result<Self, ReportError> {
        let values = match serde_json::from_str::<ReportDocument>(raw)? {
            ReportDocument::List(values) => values,
            ReportDocument::Wrapped { containers } => containers,
        };

        let mut entries = Vec::with_capacity(values.len());
        for value in values {
            let entry = if value.get("items").is_some_and(Value::is_array) {
                serde_json::from_value::<ToteSummary>(value)?.into_entry()
            } else {
                serde_json::from_value::<ProducerEntry>(value)?
            };
            entries.push(entry);
        }
        Ok(Self::from_entries(&entries))
    }

    /// Reads and parses a report document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// All records in current display order.
    pub fn all(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ContainerRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_visible()).count()
    }

    /// Ids in current display order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id().to_owned()).collect()
    }

    /// Moves records into the given order without touching their fields.
    ///
    /// Unknown ids are ignored. Records not named in `new_order` keep their
    /// relative order and follow the named ones.
    pub fn reorder<S: AsRef<str>>(&mut self, new_order: &[S]) {
        let rank: HashMap<&str, usize> = new_order
            .iter()
            .enumerate()
            .rev()
            .map(|(pos, id)| (id.as_ref(), pos))
            .collect();
        self.records
            .sort_by_key(|r| rank.get(r.id()).copied().unwrap_or(usize::MAX));
    }

    /// Overwrites every visibility flag, in display order.
    pub(crate) fn set_visibility(&mut self, flags: &[bool]) {
        for (record, &visible) in self.records.iter_mut().zip(flags) {
            record.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str) -> ContainerRecord {
        ContainerRecord::new(id, Some(1), Some(10.0), vec!["X".to_string()])
    }

    #[test]
    fn keeps_input_order() {
        let store = RecordStore::from_records(vec![record("B"), record("A"), record("C")]);
        assert_eq!(store.ids(), ["B", "A", "C"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.visible_count(), 3);
    }

    #[test]
    fn skips_duplicate_ids() {
        let mut second = ContainerRecord::new("A", Some(9), None, vec![]);
        second.visible = false;
        let store = RecordStore::from_records(vec![record("A"), second, record("B")]);
        assert_eq!(store.ids(), ["A", "B"]);
        assert_eq!(store.get("A").and_then(|r| r.item_count()), Some(1));
    }

    #[test]
    fn reorder_relocates_without_mutation() {
        let mut store = RecordStore::from_records(vec![record("A"), record("B"), record("C")]);
        let before = store.get("B").cloned();
        store.reorder(&["C", "A", "B"]);
        assert_eq!(store.ids(), ["C", "A", "B"]);
        assert_eq!(store.get("B").cloned(), before);
    }

    #[test]
    fn reorder_tolerates_unknown_and_missing_ids() {
        let mut store = RecordStore::from_records(vec![
            record("A"),
            record("B"),
            record("C"),
            record("D"),
        ]);
        store.reorder(&["ZZ", "C", "A"]);
        assert_eq!(store.ids(), ["C", "A", "B", "D"]);
    }

    #[test]
    fn parses_bare_array() {
        let store = RecordStore::from_json_str(
            r#"[
                {"id": "A_1", "item_count": 5, "volume_utilization": 80.0, "skus": "X,Y"},
                {"id": "A_2", "item_count": "2", "volume_utilization": "95.5"},
                {"id": "A_10", "item_count": 8, "volume_utilization": "n/a", "skus": "X"}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.ids(), ["A_1", "A_2", "A_10"]);
        assert_eq!(store.get("A_2").unwrap().item_count(), Some(2));
        assert!(store.get("A_2").unwrap().skus().is_empty());
        assert_eq!(store.get("A_10").unwrap().volume_utilization(), None);
    }

    #[test]
    fn parses_wrapped_simulation_summaries() {
        let store = RecordStore::from_json_str(
            r#"{"containers": [
                {"id": 1, "items": [{"sku": "SKU001"}, {"sku": "SKU002"}], "utilization_percent": 61.3},
                {"id": 2, "items": [], "utilization_percent": 0.0}
            ]}"#,
        )
        .unwrap();

        assert_eq!(store.ids(), ["Tote_1", "Tote_2"]);
        assert_eq!(store.get("Tote_1").unwrap().item_count(), Some(2));
        assert_eq!(store.get("Tote_2").unwrap().item_count(), Some(0));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = RecordStore::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "T1", "item_count": 1, "skus": "A"}}]"#).unwrap();

        let store = RecordStore::load(file.path()).unwrap();
        assert_eq!(store.ids(), ["T1"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match RecordStore::load(&path) {
            Err(ReportError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
