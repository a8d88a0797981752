use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a todo, generated by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    pub fn generate() -> Self {
        TodoId(ObjectId::new())
    }

    /// Returns `None` when `raw` is not a valid key shape for the store
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(TodoId)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TodoId {
    fn from(id: ObjectId) -> Self {
        TodoId(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Document stored in the "todos" collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owner, normalized email
    pub email: String,

    pub title: String,

    #[serde(default)]
    pub completed: bool,

    /// Set once at creation
    #[serde(rename = "createdAt")]
    pub created_at: BsonDateTime,
}

impl Todo {
    /// New, not yet persisted todo owned by `email`
    pub fn new(email: String, title: String) -> Self {
        Todo {
            id: None,
            email,
            title,
            completed: false,
            created_at: BsonDateTime::from_millis(Utc::now().timestamp_millis()),
        }
    }

    pub fn todo_id(&self) -> Option<TodoId> {
        self.id.map(TodoId::from)
    }
}

/// Partial update: only the supplied fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Request to create a todo
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
}

/// Request to update a todo
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Filter accepted by list and bulk-clear
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Owner email; omitted or empty means every todo
    pub email: Option<String>,
}

/// Todo as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct TodoResponse {
    pub id: String,
    pub email: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        TodoResponse {
            id: t.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: t.email,
            title: t.title,
            completed: t.completed,
            created_at: DateTime::from_timestamp_millis(t.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}
