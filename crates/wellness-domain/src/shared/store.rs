use async_trait::async_trait;
use serde_json::Value;

use super::DomainError;

/// Description of a document container: its id, the JSON path holding the
/// partition key, and any paths that must be unique across the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerSpec {
    pub id: &'static str,
    pub partition_key_path: &'static str,
    pub unique_key_paths: &'static [&'static str],
}

impl ContainerSpec {
    pub const fn new(id: &'static str, partition_key_path: &'static str) -> Self {
        Self {
            id,
            partition_key_path,
            unique_key_paths: &[],
        }
    }

    pub const fn with_unique_keys(mut self, paths: &'static [&'static str]) -> Self {
        self.unique_key_paths = paths;
        self
    }

    /// Read the partition key out of a document, e.g. `/userId` -> `doc["userId"]`.
    pub fn partition_key_of(&self, doc: &Value) -> Option<String> {
        doc.pointer(self.partition_key_path)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl FilterValue {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FilterValue::Str(s) => value.as_str() == Some(s.as_str()),
            FilterValue::Bool(b) => value.as_bool() == Some(*b),
            FilterValue::Int(i) => value.as_i64() == Some(*i),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Str(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

/// Predicate on a top-level document field.
///
/// `Gte`/`Lte` compare strings lexically, which is correct for date keys and
/// RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Eq(String, FilterValue),
    /// A missing field counts as "not equal".
    NotEq(String, FilterValue),
    Gte(String, String),
    Lte(String, String),
}

impl FieldFilter {
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            FieldFilter::Eq(field, expected) => {
                doc.get(field).is_some_and(|v| expected.matches(v))
            }
            FieldFilter::NotEq(field, expected) => {
                !doc.get(field).is_some_and(|v| expected.matches(v))
            }
            FieldFilter::Gte(field, bound) => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| v >= bound.as_str()),
            FieldFilter::Lte(field, bound) => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| v <= bound.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter passed to [`DocumentStore::query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub partition_key: Option<String>,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<u32>,
}

impl DocumentQuery {
    pub fn in_partition(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: Some(partition_key.into()),
            ..Self::default()
        }
    }

    pub fn eq(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.filters
            .push(FieldFilter::Eq(field.to_string(), value.into()));
        self
    }

    pub fn not_eq(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.filters
            .push(FieldFilter::NotEq(field.to_string(), value.into()));
        self
    }

    pub fn between(mut self, field: &str, start: &str, end: &str) -> Self {
        self.filters
            .push(FieldFilter::Gte(field.to_string(), start.to_string()));
        self.filters
            .push(FieldFilter::Lte(field.to_string(), end.to_string()));
        self
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by = Some((field.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document: {0}")]
    Serialization(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => DomainError::NotFound(msg),
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::Unavailable(msg) => DomainError::StoreUnavailable(msg),
            StoreError::Serialization(msg) => DomainError::Deserialization(msg),
        }
    }
}

/// Keyed JSON document store.
///
/// Every operation is atomic per document key. There are no multi-document
/// transactions; callers build read-modify-write sequences on top.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document. Missing documents are `StoreError::NotFound`.
    async fn get(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, StoreError>;

    /// Insert a new document. Fails with `StoreError::Conflict` if the id or a
    /// unique key is already taken.
    async fn create(&self, container: &ContainerSpec, doc: Value) -> Result<Value, StoreError>;

    /// Overwrite an existing document. Fails with `StoreError::NotFound` if it
    /// does not exist yet.
    async fn replace(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
        doc: Value,
    ) -> Result<Value, StoreError>;

    async fn query(
        &self,
        container: &ContainerSpec,
        query: &DocumentQuery,
    ) -> Result<Vec<Value>, StoreError>;
}
