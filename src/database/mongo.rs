use super::{Store, StoreError};
use crate::models::{Todo, TodoChanges, TodoId, User};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use std::time::Duration;

const USERS: &str = "users";
const TODOS: &str = "todos";

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

pub(crate) fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE
    )
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = mongodb::Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        log::info!("✅ Connected to MongoDB database: {}", db_name);

        Ok(mongodb)
    }

    /// Unique email on users closes the duplicate-registration race
    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        log::info!("🔧 Creating database indexes...");

        let users_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users().create_index(users_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create unique index users(email): {}", e),
        }

        let todos_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .build();

        match self.todos().create_index(todos_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: todos(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn todos(&self) -> Collection<Todo> {
        self.db.collection(TODOS)
    }
}

fn email_filter(email: Option<&str>) -> Document {
    match email {
        Some(email) => doc! { "email": email },
        None => doc! {},
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users().insert_one(user).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.users().find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn clear_users(&self) -> Result<u64, StoreError> {
        Ok(self.users().delete_many(doc! {}).await?.deleted_count)
    }

    async fn list_todos(&self, email: Option<&str>) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.todos().find(email_filter(email)).await?;
        let todos: Vec<Todo> = cursor.try_collect().await?;
        Ok(todos)
    }

    async fn insert_todo(&self, mut todo: Todo) -> Result<Todo, StoreError> {
        let result = self.todos().insert_one(&todo).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("inserted id is not an ObjectId".to_string()))?;
        todo.id = Some(id);
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, changes: &TodoChanges) -> Result<Option<Todo>, StoreError> {
        let filter = doc! { "_id": id.object_id() };

        let mut set = Document::new();
        if let Some(title) = &changes.title {
            set.insert("title", title.as_str());
        }
        if let Some(completed) = changes.completed {
            set.insert("completed", completed);
        }

        // An empty $set is rejected by the server
        if set.is_empty() {
            return Ok(self.todos().find_one(filter).await?);
        }

        let updated = self
            .todos()
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<u64, StoreError> {
        let result = self.todos().delete_one(doc! { "_id": id.object_id() }).await?;
        Ok(result.deleted_count)
    }

    async fn clear_todos(&self, email: Option<&str>) -> Result<u64, StoreError> {
        Ok(self.todos().delete_many(email_filter(email)).await?.deleted_count)
    }
}
