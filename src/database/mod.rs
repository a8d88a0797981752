pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoDB;

use crate::models::{Todo, TodoChanges, TodoId, User};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Connection-string scheme that selects the in-memory store
pub const MEMORY_URI_SCHEME: &str = "memory://";

#[derive(Debug)]
pub enum StoreError {
    /// Insert rejected by a uniqueness constraint
    Duplicate,
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate => write!(f, "duplicate key"),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        if mongo::is_duplicate_key(&e) {
            StoreError::Duplicate
        } else {
            StoreError::Backend(e.to_string())
        }
    }
}

/// Persistence access for the two collections (users, todos).
///
/// One instance is built at startup and shared by every request; all shared
/// state lives behind this trait.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `StoreError::Duplicate` when the email is already taken
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Removes every user, returns the number deleted
    async fn clear_users(&self) -> Result<u64, StoreError>;

    /// Every todo, or those whose email equals `email` exactly
    async fn list_todos(&self, email: Option<&str>) -> Result<Vec<Todo>, StoreError>;

    /// Persists `todo` and returns it with its generated id
    async fn insert_todo(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Writes the supplied fields and returns the post-update document,
    /// `None` if no todo has this id
    async fn update_todo(&self, id: TodoId, changes: &TodoChanges) -> Result<Option<Todo>, StoreError>;

    async fn delete_todo(&self, id: TodoId) -> Result<u64, StoreError>;

    /// Removes every todo, or those whose email equals `email` exactly
    async fn clear_todos(&self, email: Option<&str>) -> Result<u64, StoreError>;
}

/// Builds the store selected by the connection string
pub async fn connect(uri: &str, database: &str) -> Result<Arc<dyn Store>, StoreError> {
    if uri.starts_with(MEMORY_URI_SCHEME) {
        log::info!("🧠 Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db = MongoDB::new(uri, database).await?;
    Ok(Arc::new(db))
}
