#![allow(dead_code)]

use std::sync::Arc;

use wellness_domain::shared::{DocumentStore, UserId, UserRef};
use wellness_infrastructure::persistence::{Database, SqliteDocumentStore};

/// Fresh in-memory SQLite database with migrations applied.
pub async fn setup_in_memory_db() -> Database {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db
}

pub async fn sqlite_store() -> Arc<dyn DocumentStore> {
    let db = setup_in_memory_db().await;
    Arc::new(SqliteDocumentStore::new(db.pool().clone()))
}

pub fn alice() -> UserRef {
    UserRef::new(UserId::from_string("u-alice"), "Alice")
}
