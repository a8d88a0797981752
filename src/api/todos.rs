use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::{
    api::MessageResponse,
    models::{CreateTodoRequest, EmailQuery, TodoResponse, UpdateTodoRequest},
    services::todo_service,
    state::AppState,
    utils::AppError,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TodoListResponse {
    pub todos: Vec<TodoResponse>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TodoEnvelope {
    pub todo: TodoResponse,
}

/// GET /todos - every todo, or those of `?email=`
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    params(EmailQuery),
    responses(
        (status = 200, description = "Matching todos", body = TodoListResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn list_todos(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /todos - email: {}", query.email.as_deref().unwrap_or("*"));

    let todos = todo_service::list_todos(state.store.as_ref(), query.email.as_deref()).await?;

    Ok(HttpResponse::Ok().json(TodoListResponse { todos }))
}

/// POST /todos
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoEnvelope),
        (status = 400, description = "Invalid body or empty email/title", body = crate::api::ErrorResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn create_todo(
    state: web::Data<AppState>,
    body: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    let todo = todo_service::create_todo(state.store.as_ref(), &body).await?;
    log::info!("➕ POST /todos - created {} for {}", todo.id, todo.email);

    Ok(HttpResponse::Created().json(TodoEnvelope { todo }))
}

/// PUT /todos/{id} - partial update
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "Todo identifier")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Updated todo", body = TodoEnvelope),
        (status = 400, description = "Invalid id, empty title or nothing to update", body = crate::api::ErrorResponse),
        (status = 500, description = "Store error or todo vanished", body = crate::api::ErrorResponse)
    )
)]
pub async fn update_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let todo_id = path.into_inner();
    log::info!("✏️  PUT /todos/{}", todo_id);

    // The id is checked before the body is decoded
    let id = todo_service::parse_id(&todo_id)?;
    let request: UpdateTodoRequest = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("⚠️  Invalid request body: {}", e);
        AppError::Validation("invalid request body".to_string())
    })?;

    let todo = todo_service::update_todo(state.store.as_ref(), id, &request).await?;

    Ok(HttpResponse::Ok().json(TodoEnvelope { todo }))
}

/// DELETE /todos/{id} - succeeds whether or not the todo existed
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Invalid id", body = crate::api::ErrorResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn delete_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let todo_id = path.into_inner();
    log::info!("🗑️  DELETE /todos/{}", todo_id);

    todo_service::delete_todo(state.store.as_ref(), &todo_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("todo deleted")))
}

/// DELETE /todos - test utility, `?email=` is matched verbatim
#[utoipa::path(
    delete,
    path = "/todos",
    tag = "Testing",
    params(EmailQuery),
    responses(
        (status = 200, description = "Todos removed", body = MessageResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn clear_todos(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let removed = todo_service::clear_todos(state.store.as_ref(), query.email.as_deref()).await?;
    log::info!("🧹 DELETE /todos - removed {} todo(s)", removed);

    Ok(HttpResponse::Ok().json(MessageResponse::new("todos deleted")))
}
