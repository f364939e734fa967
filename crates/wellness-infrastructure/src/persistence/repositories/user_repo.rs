use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::persistence::containers::USERS;
use crate::persistence::{timestamp, DocumentRepositoryBase};
use wellness_domain::shared::{DocumentQuery, DocumentStore, DomainError, UserId};
use wellness_domain::user::{UserRecord, UserRepository};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    id: String,
    name: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl UserDocument {
    fn from_user(user: &UserRecord) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }

    fn into_user(self) -> UserRecord {
        UserRecord::restore(
            UserId::from_string(&self.id),
            self.name,
            self.created_at,
            self.updated_at,
        )
    }
}

/// Users are partitioned by name, which is also a unique key.
pub struct DocumentUserRepository {
    base: DocumentRepositoryBase,
}

impl DocumentUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            base: DocumentRepositoryBase::new(store, USERS),
        }
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, DomainError> {
        let query = DocumentQuery::in_partition(name).eq("name", name).limit(1);
        let docs: Vec<UserDocument> = self.base.query(&query, "Find user by name").await?;
        Ok(docs.into_iter().next().map(UserDocument::into_user))
    }

    async fn create(&self, user: &UserRecord) -> Result<UserRecord, DomainError> {
        self.base
            .create(&UserDocument::from_user(user), "Create user")
            .await?;
        Ok(user.clone())
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, DomainError> {
        self.base
            .upsert(user.id().as_str(), user.name(), &UserDocument::from_user(user), "Save user")
            .await?;
        Ok(user.clone())
    }
}
