use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub mod date_key;
pub mod store;

pub use date_key::DateKey;
pub use store::{
    ContainerSpec, DocumentQuery, DocumentStore, FieldFilter, FilterValue, SortOrder, StoreError,
};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(PlanId);
define_id!(ScoreId);

/// A resolved user: stable id plus the display name it was resolved from.
///
/// Every tracking operation takes one of these; the name is denormalized
/// onto the records it writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

impl UserRef {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    NotFound = 2001,

    // Business Logic (3xxx)
    InsufficientCredit = 3001,
    IneligibleRepair = 3002,
    Conflict = 3003,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    StoreUnavailable = 5002,
    ExternalServiceError = 5004,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::NotFound | ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::InsufficientCredit
            | ErrorCode::IneligibleRepair
            | ErrorCode::Conflict
            | ErrorCode::StoreUnavailable
            | ErrorCode::ExternalServiceError => ErrorSeverity::Warning,

            ErrorCode::RepositoryError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable.
    ///
    /// Nothing in this crate retries; the flag is advisory for callers that
    /// own a retry policy.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::StoreUnavailable | ErrorCode::ExternalServiceError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient credit: {0}")]
    InsufficientCredit(String),

    #[error("Ineligible repair: {0}")]
    IneligibleRepair(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::NotFound(_) => ErrorCode::NotFound,
            DomainError::InsufficientCredit(_) => ErrorCode::InsufficientCredit,
            DomainError::IneligibleRepair(_) => ErrorCode::IneligibleRepair,
            DomainError::Conflict(_) => ErrorCode::Conflict,
            DomainError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
            DomainError::ExternalService(_) => ErrorCode::ExternalServiceError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
        }
    }

    /// Get the bare user-facing message, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::NotFound(msg)
            | DomainError::InsufficientCredit(msg)
            | DomainError::IneligibleRepair(msg)
            | DomainError::Conflict(msg)
            | DomainError::StoreUnavailable(msg)
            | DomainError::Repository(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg)
            | DomainError::ExternalService(msg)
            | DomainError::Infrastructure(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }
}
