use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId, UserRef};

pub const MAX_USER_NAME_LEN: usize = 100;

/// A user known only by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = Self::normalize_name(name)?;
        Ok(Self {
            id: UserId::new(),
            name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(
        id: UserId,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    /// Trim and validate a raw display name.
    pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if name.chars().count() > MAX_USER_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "name must be {} characters or fewer",
                MAX_USER_NAME_LEN
            )));
        }
        Ok(name.to_string())
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn to_user_ref(&self) -> UserRef {
        UserRef::new(self.id.clone(), self.name.clone())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Insert a new user. A name that is already taken yields
    /// `DomainError::Conflict`.
    async fn create(&self, user: &UserRecord) -> Result<UserRecord, DomainError>;

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, DomainError>;
}

/// Maps a display name to a stable user identity.
#[async_trait]
pub trait UserIdentityResolver: Send + Sync {
    async fn resolve(&self, display_name: &str) -> Result<UserRef, DomainError>;
}
