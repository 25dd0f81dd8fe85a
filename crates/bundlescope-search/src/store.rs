use std::sync::Arc;

use parking_lot::RwLock;

use bundlescope_types::LogRecord;

/// Thread-safe store for the records extracted in this session
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<Vec<LogRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of records, keeping extraction order
    pub fn extend(&self, records: Vec<LogRecord>) {
        self.records.write().extend(records);
    }

    /// Get all records (cloned for rendering)
    pub fn all(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<LogRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// Record at a list position
    pub fn at(&self, index: usize) -> Option<LogRecord> {
        self.records.read().get(index).cloned()
    }

    /// Total record count
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Sum of raw extracted byte counts across all records
    pub fn total_bytes(&self) -> usize {
        self.records.read().iter().map(|r| r.size).sum()
    }

    /// Clear all records
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> LogRecord {
        LogRecord::new(
            id.to_string(),
            name.to_string(),
            "content\n".to_string(),
            8,
            "bundle.tar.gz".to_string(),
        )
    }

    #[test]
    fn test_extend_preserves_order() {
        let store = RecordStore::new();
        store.extend(vec![record("1", "a.log"), record("2", "b.log")]);
        store.extend(vec![record("3", "c.log")]);

        let names: Vec<String> = store.all().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }

    #[test]
    fn test_get_by_id() {
        let store = RecordStore::new();
        store.extend(vec![record("1", "a.log"), record("2", "b.log")]);

        assert_eq!(store.get("2").unwrap().name, "b.log");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_total_bytes() {
        let store = RecordStore::new();
        store.extend(vec![record("1", "a.log"), record("2", "b.log")]);
        assert_eq!(store.total_bytes(), 16);
    }

    #[test]
    fn test_clear() {
        let store = RecordStore::new();
        store.extend(vec![record("1", "a.log")]);
        store.clear();
        assert!(store.is_empty());
    }
}
