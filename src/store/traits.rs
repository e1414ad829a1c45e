use crate::model::{Id, Record, ResourceKind};
use anyhow::Result;

#[async_trait::async_trait]
pub trait ReadStore: Send + Sync {
    /// Snapshot of a whole collection in storage order.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Record>>;
    /// The record with the given id, if any.
    async fn get(&self, kind: ResourceKind, id: Id) -> Result<Option<Record>>;
}

#[async_trait::async_trait]
pub trait WriteStore: Send + Sync {
    /// Assigns the next id and a fresh timestamp, stores the record and
    /// returns it as stored.
    async fn insert(&self, kind: ResourceKind, record: Record) -> Result<Record>;
    /// Replaces the record with the given id, keeping the id and
    /// refreshing the timestamp. Returns `None` when no such record
    /// exists.
    async fn replace(&self, kind: ResourceKind, id: Id, record: Record) -> Result<Option<Record>>;
    /// Removes the record with the given id. Returns whether one existed.
    async fn remove(&self, kind: ResourceKind, id: Id) -> Result<bool>;
}

pub trait Store: ReadStore + WriteStore + Send + Sync {}
