use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use wellness_domain::shared::{
    ContainerSpec, DocumentQuery, DocumentStore, SortOrder, StoreError,
};

use super::document_key;

type Partition = BTreeMap<String, Value>;
type Container = BTreeMap<String, Partition>;

/// Process-local document store with the same semantics as
/// [`super::SqliteDocumentStore`].
#[derive(Default)]
pub struct InMemoryDocumentStore {
    containers: RwLock<HashMap<&'static str, Container>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, container: &ContainerSpec) -> usize {
        let guard = self.containers.read().await;
        guard
            .get(container.id)
            .map(|c| c.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }
}

fn unique_key_taken(container: &ContainerSpec, partition: &Partition, id: &str, doc: &Value) -> Option<String> {
    container.unique_key_paths.iter().find_map(|path| {
        let value = doc.pointer(path)?;
        partition
            .iter()
            .any(|(other_id, other)| other_id != id && other.pointer(path) == Some(value))
            .then(|| format!("{}: unique key {} already taken", container.id, path))
    })
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, StoreError> {
        let guard = self.containers.read().await;
        guard
            .get(container.id)
            .and_then(|c| c.get(partition_key))
            .and_then(|p| p.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", container.id, id)))
    }

    async fn create(&self, container: &ContainerSpec, doc: Value) -> Result<Value, StoreError> {
        let (id, partition_key) = document_key(container, &doc)?;
        let mut guard = self.containers.write().await;
        let partition = guard
            .entry(container.id)
            .or_default()
            .entry(partition_key)
            .or_default();

        if partition.contains_key(&id) {
            return Err(StoreError::Conflict(format!("{}/{}", container.id, id)));
        }
        if let Some(msg) = unique_key_taken(container, partition, &id, &doc) {
            return Err(StoreError::Conflict(msg));
        }

        partition.insert(id, doc.clone());
        Ok(doc)
    }

    async fn replace(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
        doc: Value,
    ) -> Result<Value, StoreError> {
        let mut guard = self.containers.write().await;
        let partition = guard
            .get_mut(container.id)
            .and_then(|c| c.get_mut(partition_key))
            .filter(|p| p.contains_key(id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", container.id, id)))?;

        if let Some(msg) = unique_key_taken(container, partition, id, &doc) {
            return Err(StoreError::Conflict(msg));
        }

        partition.insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn query(
        &self,
        container: &ContainerSpec,
        query: &DocumentQuery,
    ) -> Result<Vec<Value>, StoreError> {
        let guard = self.containers.read().await;
        let Some(partitions) = guard.get(container.id) else {
            return Ok(Vec::new());
        };

        let mut docs: Vec<Value> = partitions
            .iter()
            .filter(|(pk, _)| query.partition_key.as_deref().is_none_or(|want| want == pk.as_str()))
            .flat_map(|(_, p)| p.values())
            .filter(|doc| query.matches(doc))
            .cloned()
            .collect();

        if let Some((field, order)) = &query.order_by {
            docs.sort_by(|a, b| {
                let ord = compare_field(a, b, field);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit as usize);
        }

        Ok(docs)
    }
}
