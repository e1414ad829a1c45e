use std::collections::HashMap;

use anyhow::Result;
use parking_lot::RwLock;
use serde_json::Value;

use crate::model::{now_millis, record_id, Id, Record, ResourceKind};
use crate::store::traits::{ReadStore, Store, WriteStore};

/// In-memory storage collaborator. Collections keep insertion order and
/// ids come from one counter shared across every kind, so the first
/// seeded record gets id 101 no matter which collection it lands in.
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

struct Collections {
    records: HashMap<ResourceKind, Vec<Record>>,
    next_id: Id,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut records = HashMap::new();
        for kind in ResourceKind::ALL {
            records.insert(kind, Vec::new());
        }
        Self {
            inner: RwLock::new(Collections {
                records,
                next_id: 101,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReadStore for MemoryStore {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        let inner = self.inner.read();
        Ok(inner.records.get(&kind).cloned().unwrap_or_default())
    }

    async fn get(&self, kind: ResourceKind, id: Id) -> Result<Option<Record>> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .get(&kind)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }
}

#[async_trait::async_trait]
impl WriteStore for MemoryStore {
    async fn insert(&self, kind: ResourceKind, mut record: Record) -> Result<Record> {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        record.insert("id".to_string(), Value::from(id));
        record.insert("timestamp".to_string(), Value::from(now_millis()));
        inner.records.entry(kind).or_default().push(record.clone());
        log::debug!("inserted {} record with id {}", kind, id);
        Ok(record)
    }

    async fn replace(&self, kind: ResourceKind, id: Id, mut record: Record) -> Result<Option<Record>> {
        let mut inner = self.inner.write();
        let records = inner.records.entry(kind).or_default();
        match records.iter_mut().find(|r| record_id(r) == Some(id)) {
            Some(existing) => {
                record.insert("id".to_string(), Value::from(id));
                record.insert("timestamp".to_string(), Value::from(now_millis()));
                *existing = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, kind: ResourceKind, id: Id) -> Result<bool> {
        let mut inner = self.inner.write();
        let records = inner.records.entry(kind).or_default();
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        Ok(records.len() < before)
    }
}

impl Store for MemoryStore {}
