pub mod containers;
pub mod document_store;
pub mod repositories;

mod database;
mod repository_base;
mod result_ext;
pub(crate) mod timestamp;

pub use database::Database;
pub use document_store::{InMemoryDocumentStore, SqliteDocumentStore};
pub use repository_base::DocumentRepositoryBase;
pub use result_ext::ResultExt;
