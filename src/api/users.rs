use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::{
    api::MessageResponse,
    models::UserResponse,
    services::user_service,
    state::AppState,
    utils::AppError,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Testing",
    responses(
        (status = 200, description = "Every registered user", body = UserListResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("👥 GET /users");

    let users = user_service::list_users(state.store.as_ref()).await?;

    Ok(HttpResponse::Ok().json(UserListResponse { users }))
}

#[utoipa::path(
    delete,
    path = "/users",
    tag = "Testing",
    responses(
        (status = 200, description = "All users removed", body = MessageResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn clear_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let removed = user_service::clear_users(state.store.as_ref()).await?;
    log::info!("🧹 DELETE /users - removed {} user(s)", removed);

    Ok(HttpResponse::Ok().json(MessageResponse::new("all users have been deleted")))
}
