//! In-memory record store backed by RwLock. Records live for the lifetime of
//! the process; durable persistence is out of scope for the service.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

use crate::models::FormRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(Uuid),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub struct RecordStore {
    records: RwLock<HashMap<Uuid, FormRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a record under its own id.
    pub fn insert(&self, record: FormRecord) -> Result<Uuid, StoreError> {
        let id = record.id;
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(id, record);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Result<FormRecord, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// All records, newest first.
    pub fn list(&self) -> Result<Vec<FormRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<FormRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    /// Apply a mutation to an existing record, bumping its updated timestamp.
    pub fn update<F>(&self, id: Uuid, mutate: F) -> Result<FormRecord, StoreError>
    where
        F: FnOnce(&mut FormRecord),
    {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        mutate(record);
        record.touch();
        Ok(record.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate::tests::sample_entity_record;

    #[test]
    fn insert_then_get_round_trips() {
        let store = RecordStore::new();
        let record = sample_entity_record();
        let id = store.insert(record.clone()).unwrap();
        let fetched = store.get(id).unwrap();
        assert_eq!(fetched.use_case_name, record.use_case_name);
    }

    #[test]
    fn missing_record_is_not_found() {
        let store = RecordStore::new();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_mutates_and_touches() {
        let store = RecordStore::new();
        let id = store.insert(sample_entity_record()).unwrap();

        let updated = store
            .update(id, |r| r.generated_content = Some("contenido".into()))
            .unwrap();
        assert_eq!(updated.generated_content.as_deref(), Some("contenido"));
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn list_returns_every_record() {
        let store = RecordStore::new();
        store.insert(sample_entity_record()).unwrap();
        let mut second = sample_entity_record();
        second.id = Uuid::new_v4();
        store.insert(second).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.len().unwrap(), 2);
    }
}
