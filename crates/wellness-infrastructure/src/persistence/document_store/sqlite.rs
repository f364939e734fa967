use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashSet;
use tokio::sync::RwLock;
use wellness_domain::shared::{
    ContainerSpec, DocumentQuery, DocumentStore, FieldFilter, FilterValue, SortOrder, StoreError,
};

use super::{document_key, field_path, json_path};
use crate::persistence::timestamp;

/// Document store over a single SQLite `documents` table.
///
/// Containers are registered in the `containers` table on first use; the set
/// of already provisioned containers is cached per store instance.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    provisioned: RwLock<HashSet<&'static str>>,
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            provisioned: RwLock::new(HashSet::new()),
        }
    }

    async fn ensure_container(&self, container: &ContainerSpec) -> Result<(), StoreError> {
        if self.provisioned.read().await.contains(container.id) {
            return Ok(());
        }

        let unique_keys = serde_json::to_string(container.unique_key_paths)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO containers (id, partition_key_path, unique_key_paths, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                partition_key_path = excluded.partition_key_path,
                unique_key_paths = excluded.unique_key_paths
            "#,
        )
        .bind(container.id)
        .bind(container.partition_key_path)
        .bind(unique_keys)
        .bind(timestamp::format(&Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        self.provisioned.write().await.insert(container.id);
        tracing::debug!(container = container.id, "[store] container provisioned");
        Ok(())
    }
}

/// Fails with `Conflict` when another document in the same partition already
/// holds one of the container's unique key values.
async fn check_unique_keys(
    conn: &mut SqliteConnection,
    container: &ContainerSpec,
    partition_key: &str,
    id: &str,
    doc: &Value,
) -> Result<(), StoreError> {
    for path in container.unique_key_paths {
        let Some(value) = doc.pointer(path) else {
            continue;
        };
        let encoded =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let taken: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM documents
            WHERE container_id = ?1 AND partition_key = ?2 AND id <> ?3
              AND json_quote(json_extract(body, ?4)) = ?5
            LIMIT 1
            "#,
        )
        .bind(container.id)
        .bind(partition_key)
        .bind(id)
        .bind(json_path(path))
        .bind(encoded)
        .fetch_optional(&mut *conn)
        .await
        .map_err(unavailable)?;

        if taken.is_some() {
            return Err(StoreError::Conflict(format!(
                "{}: unique key {} already taken",
                container.id, path
            )));
        }
    }
    Ok(())
}

fn push_eq(qb: &mut QueryBuilder<'_, Sqlite>, field: &str, value: &FilterValue) {
    let path = field_path(field);
    match value {
        FilterValue::Str(s) => {
            qb.push("(json_type(body, ")
                .push_bind(path.clone())
                .push(") = 'text' AND json_extract(body, ")
                .push_bind(path)
                .push(") = ")
                .push_bind(s.clone())
                .push(")");
        }
        FilterValue::Bool(b) => {
            qb.push("json_type(body, ")
                .push_bind(path)
                .push(") = ")
                .push_bind(if *b { "true" } else { "false" });
        }
        FilterValue::Int(i) => {
            qb.push("(json_type(body, ")
                .push_bind(path.clone())
                .push(") = 'integer' AND json_extract(body, ")
                .push_bind(path)
                .push(") = ")
                .push_bind(*i)
                .push(")");
        }
    }
}

fn push_text_bound(qb: &mut QueryBuilder<'_, Sqlite>, field: &str, op: &str, bound: &str) {
    let path = field_path(field);
    qb.push("(json_type(body, ")
        .push_bind(path.clone())
        .push(") = 'text' AND json_extract(body, ")
        .push_bind(path)
        .push(format!(") {} ", op))
        .push_bind(bound.to_string())
        .push(")");
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &FieldFilter) {
    match filter {
        FieldFilter::Eq(field, value) => push_eq(qb, field, value),
        FieldFilter::NotEq(field, value) => {
            // json_type is NULL for a missing field; treat that as "not equal"
            qb.push("NOT COALESCE(");
            push_eq(qb, field, value);
            qb.push(", 0)");
        }
        FieldFilter::Gte(field, bound) => push_text_bound(qb, field, ">=", bound),
        FieldFilter::Lte(field, bound) => push_text_bound(qb, field, "<=", bound),
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, StoreError> {
        self.ensure_container(container).await?;

        let body: Option<String> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE container_id = ?1 AND partition_key = ?2 AND id = ?3",
        )
        .bind(container.id)
        .bind(partition_key)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        let body = body.ok_or_else(|| StoreError::NotFound(format!("{}/{}", container.id, id)))?;
        serde_json::from_str(&body).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn create(&self, container: &ContainerSpec, doc: Value) -> Result<Value, StoreError> {
        let (id, partition_key) = document_key(container, &doc)?;
        self.ensure_container(container).await?;

        let body =
            serde_json::to_string(&doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = timestamp::format(&Utc::now());

        let mut tx = self.pool.begin().await.map_err(unavailable)?;
        check_unique_keys(&mut tx, container, &partition_key, &id, &doc).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO documents (container_id, partition_key, id, body, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(container.id)
        .bind(&partition_key)
        .bind(&id)
        .bind(body)
        .bind(now)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                tracing::debug!(container = container.id, id = %id, "[store] create conflict");
                return Err(StoreError::Conflict(format!("{}/{}", container.id, id)));
            }
            Err(e) => return Err(unavailable(e)),
        }

        tx.commit().await.map_err(unavailable)?;
        Ok(doc)
    }

    async fn replace(
        &self,
        container: &ContainerSpec,
        id: &str,
        partition_key: &str,
        doc: Value,
    ) -> Result<Value, StoreError> {
        self.ensure_container(container).await?;

        let body =
            serde_json::to_string(&doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = timestamp::format(&Utc::now());

        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        let updated = sqlx::query(
            r#"
            UPDATE documents SET body = ?1, updated_at = ?2
            WHERE container_id = ?3 AND partition_key = ?4 AND id = ?5
            "#,
        )
        .bind(body)
        .bind(now)
        .bind(container.id)
        .bind(partition_key)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{}/{}", container.id, id)));
        }
        check_unique_keys(&mut tx, container, partition_key, id, &doc).await?;

        tx.commit().await.map_err(unavailable)?;
        Ok(doc)
    }

    async fn query(
        &self,
        container: &ContainerSpec,
        query: &DocumentQuery,
    ) -> Result<Vec<Value>, StoreError> {
        self.ensure_container(container).await?;

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT body FROM documents WHERE container_id = ");
        qb.push_bind(container.id);

        if let Some(partition_key) = &query.partition_key {
            qb.push(" AND partition_key = ").push_bind(partition_key.clone());
        }
        for filter in &query.filters {
            qb.push(" AND ");
            push_filter(&mut qb, filter);
        }
        if let Some((field, order)) = &query.order_by {
            qb.push(" ORDER BY json_extract(body, ")
                .push_bind(field_path(field))
                .push(match order {
                    SortOrder::Asc => ") ASC",
                    SortOrder::Desc => ") DESC",
                });
        }
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let bodies: Vec<String> = qb
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        bodies
            .iter()
            .map(|b| serde_json::from_str(b).map_err(|e| StoreError::Serialization(e.to_string())))
            .collect()
    }
}
