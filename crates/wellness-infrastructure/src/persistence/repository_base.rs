use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use wellness_domain::shared::{
    ContainerSpec, DocumentQuery, DocumentStore, DomainError, StoreError,
};

use super::ResultExt;

/// Shared plumbing for repositories backed by one document container.
pub struct DocumentRepositoryBase {
    store: Arc<dyn DocumentStore>,
    container: ContainerSpec,
}

impl DocumentRepositoryBase {
    pub fn new(store: Arc<dyn DocumentStore>, container: ContainerSpec) -> Self {
        Self { store, container }
    }

    /// Point read; a missing document is `Ok(None)`.
    pub async fn find<T: DeserializeOwned>(
        &self,
        id: &str,
        partition_key: &str,
        context: &str,
    ) -> Result<Option<T>, DomainError> {
        match self.store.get(&self.container, id, partition_key).await {
            Ok(doc) => Ok(Some(serde_json::from_value(doc).map_repo_error(context)?)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e).map_repo_error(context),
        }
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &DocumentQuery,
        context: &str,
    ) -> Result<Vec<T>, DomainError> {
        let docs = self
            .store
            .query(&self.container, query)
            .await
            .map_repo_error(context)?;

        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_repo_error(context))
            .collect()
    }

    /// Insert a new document; an id or unique-key clash is `DomainError::Conflict`.
    pub async fn create<T: Serialize>(&self, doc: &T, context: &str) -> Result<(), DomainError> {
        let value = serde_json::to_value(doc).map_infra_error(context)?;
        self.store
            .create(&self.container, value)
            .await
            .map_repo_error(context)?;
        Ok(())
    }

    /// Replace the document, creating it when absent. If a concurrent writer
    /// creates it between the two calls the replace is retried once, so the
    /// last writer wins.
    pub async fn upsert<T: Serialize>(
        &self,
        id: &str,
        partition_key: &str,
        doc: &T,
        context: &str,
    ) -> Result<(), DomainError> {
        let value = serde_json::to_value(doc).map_infra_error(context)?;

        match self
            .store
            .replace(&self.container, id, partition_key, value.clone())
            .await
        {
            Ok(_) => return Ok(()),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e).map_repo_error(context),
        }

        tracing::debug!(container = self.container.id, id = %id, "[store] replace missed, creating");
        match self.store.create(&self.container, value.clone()).await {
            Ok(_) => Ok(()),
            Err(StoreError::Conflict(_)) => {
                tracing::debug!(container = self.container.id, id = %id, "[store] create raced, replacing");
                self.store
                    .replace(&self.container, id, partition_key, value)
                    .await
                    .map_repo_error(context)?;
                Ok(())
            }
            Err(e) => Err(e).map_repo_error(context),
        }
    }
}
