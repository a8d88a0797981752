use super::{Store, StoreError};
use crate::models::{Todo, TodoChanges, TodoId, User};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    todos: Vec<Todo>,
}

/// Process-local store selected with `memory://`. Writes are serialized by
/// the lock; data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

fn matches_email(todo: &Todo, email: Option<&str>) -> bool {
    email.map_or(true, |e| todo.email == e)
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut data = self.write()?;
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate);
        }
        data.users.push(user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.clone())
    }

    async fn clear_users(&self) -> Result<u64, StoreError> {
        let mut data = self.write()?;
        let removed = data.users.len() as u64;
        data.users.clear();
        Ok(removed)
    }

    async fn list_todos(&self, email: Option<&str>) -> Result<Vec<Todo>, StoreError> {
        Ok(self
            .read()?
            .todos
            .iter()
            .filter(|t| matches_email(t, email))
            .cloned()
            .collect())
    }

    async fn insert_todo(&self, mut todo: Todo) -> Result<Todo, StoreError> {
        todo.id = Some(TodoId::generate().object_id());
        self.write()?.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, changes: &TodoChanges) -> Result<Option<Todo>, StoreError> {
        let mut data = self.write()?;
        let updated = data
            .todos
            .iter_mut()
            .find(|t| t.todo_id() == Some(id))
            .map(|todo| {
                changes.apply(todo);
                todo.clone()
            });
        Ok(updated)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<u64, StoreError> {
        let mut data = self.write()?;
        let before = data.todos.len();
        data.todos.retain(|t| t.todo_id() != Some(id));
        Ok((before - data.todos.len()) as u64)
    }

    async fn clear_todos(&self, email: Option<&str>) -> Result<u64, StoreError> {
        let mut data = self.write()?;
        let before = data.todos.len();
        data.todos.retain(|t| !matches_email(t, email));
        Ok((before - data.todos.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User { email: email.to_string(), password: "hash".to_string() }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate() {
        let store = MemoryStore::new();
        store.insert_user(&user("u@x.com")).await.unwrap();

        let err = store.insert_user(&user("u@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_todo_generates_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert_todo(Todo::new("a@b.com".into(), "one".into())).await.unwrap();
        let b = store.insert_todo(Todo::new("a@b.com".into(), "two".into())).await.unwrap();

        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_missing_todo_returns_none() {
        let store = MemoryStore::new();
        let changes = TodoChanges { title: Some("x".into()), completed: None };

        let result = store.update_todo(TodoId::generate(), &changes).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clear_todos_by_exact_email() {
        let store = MemoryStore::new();
        store.insert_todo(Todo::new("a@b.com".into(), "one".into())).await.unwrap();
        store.insert_todo(Todo::new("c@d.com".into(), "two".into())).await.unwrap();

        // Exact match only: no normalization happens at this layer
        assert_eq!(store.clear_todos(Some("A@B.COM")).await.unwrap(), 0);
        assert_eq!(store.clear_todos(Some("a@b.com")).await.unwrap(), 1);

        let remaining = store.list_todos(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email, "c@d.com");

        assert_eq!(store.clear_todos(None).await.unwrap(), 1);
        assert!(store.list_todos(None).await.unwrap().is_empty());
    }
}
