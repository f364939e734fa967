mod memory;
mod sqlite;

pub use memory::InMemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use serde_json::Value;
use wellness_domain::shared::{ContainerSpec, StoreError};

/// Id and partition key a document will be stored under.
pub(crate) fn document_key(
    container: &ContainerSpec,
    doc: &Value,
) -> Result<(String, String), StoreError> {
    let id = doc
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Serialization(format!("{}: document has no id", container.id)))?;
    let partition_key = container.partition_key_of(doc).ok_or_else(|| {
        StoreError::Serialization(format!(
            "{}: document has no partition key at {}",
            container.id, container.partition_key_path
        ))
    })?;
    Ok((id.to_string(), partition_key))
}

/// `/name` -> `$.name`, the form `json_extract` expects.
pub(crate) fn json_path(pointer: &str) -> String {
    format!("${}", pointer.replace('/', "."))
}

fn field_path(field: &str) -> String {
    format!("$.{}", field)
}
