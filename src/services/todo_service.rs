use crate::{
    database::Store,
    models::{CreateTodoRequest, Todo, TodoChanges, TodoId, TodoResponse, UpdateTodoRequest},
    utils::{normalize_email, normalize_text, AppError},
};

pub fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    TodoId::parse(raw).ok_or(AppError::InvalidId)
}

/// Lists every todo, or only those of `email` (normalized before matching).
/// Only an absent or literally empty filter means "every todo".
pub async fn list_todos(store: &dyn Store, email: Option<&str>) -> Result<Vec<TodoResponse>, AppError> {
    let email = email.filter(|e| !e.is_empty()).map(normalize_email);

    let todos = store
        .list_todos(email.as_deref())
        .await
        .map_err(|e| AppError::database("error fetching todos", e))?;

    Ok(todos.into_iter().map(TodoResponse::from).collect())
}

pub async fn create_todo(store: &dyn Store, request: &CreateTodoRequest) -> Result<TodoResponse, AppError> {
    let email = normalize_email(&request.email);
    let title = normalize_text(&request.title);

    if email.is_empty() || title.is_empty() {
        return Err(AppError::Validation("email and title are required".to_string()));
    }

    let created = store
        .insert_todo(Todo::new(email, title))
        .await
        .map_err(|e| AppError::database("error creating todo", e))?;

    Ok(TodoResponse::from(created))
}

/// Partial update; fields absent from the request keep their stored value
pub async fn update_todo(
    store: &dyn Store,
    id: TodoId,
    request: &UpdateTodoRequest,
) -> Result<TodoResponse, AppError> {
    let mut changes = TodoChanges::default();

    if let Some(title) = &request.title {
        let title = normalize_text(title);
        if title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        changes.title = Some(title);
    }
    changes.completed = request.completed;

    if changes.is_empty() {
        return Err(AppError::Validation("nothing to update".to_string()));
    }

    let updated = store
        .update_todo(id, &changes)
        .await
        .map_err(|e| AppError::database("error updating todo", e))?;

    match updated {
        Some(todo) => Ok(TodoResponse::from(todo)),
        // Never existed, or deleted concurrently
        None => Err(AppError::Internal("error reading updated todo".to_string())),
    }
}

/// Idempotent: an unknown but well-formed id is not an error
pub async fn delete_todo(store: &dyn Store, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id)?;

    let deleted = store
        .delete_todo(id)
        .await
        .map_err(|e| AppError::database("error deleting todo", e))?;

    log::debug!("🗑️  Deleted {} todo(s) with id {}", deleted, id);

    Ok(())
}

/// Test utility. The email filter is matched verbatim, without normalization.
pub async fn clear_todos(store: &dyn Store, email: Option<&str>) -> Result<u64, AppError> {
    let email = email.filter(|e| !e.is_empty());

    store
        .clear_todos(email)
        .await
        .map_err(|e| AppError::database("error clearing todos", e))
}
