use wellness_domain::shared::{DomainError, StoreError};

/// Attach an operation name to foreign errors while mapping them into the
/// domain taxonomy.
pub trait ResultExt<T> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
    fn map_infra_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T> ResultExt<T> for Result<T, StoreError> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| {
            let e = match e {
                StoreError::NotFound(m) => StoreError::NotFound(format!("{}: {}", context, m)),
                StoreError::Conflict(m) => StoreError::Conflict(format!("{}: {}", context, m)),
                StoreError::Unavailable(m) => {
                    StoreError::Unavailable(format!("{}: {}", context, m))
                }
                StoreError::Serialization(m) => {
                    StoreError::Serialization(format!("{}: {}", context, m))
                }
            };
            DomainError::from(e)
        })
    }

    fn map_infra_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", context, e)))
    }
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }

    fn map_infra_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", context, e)))
    }
}

impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Deserialization(format!("{}: {}", context, e)))
    }

    fn map_infra_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(format!("{}: {}", context, e)))
    }
}
