use actix_web::{web, HttpResponse};
use crate::{
    api::MessageResponse,
    models::CredentialsRequest,
    services::auth_service,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid body or empty email/password", body = crate::api::ErrorResponse),
        (status = 409, description = "User already exists", body = crate::api::ErrorResponse),
        (status = 500, description = "Store error", body = crate::api::ErrorResponse)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /register - email: {}", request.email.trim());

    auth_service::register(state.store.as_ref(), &state.passwords, &request).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("user registered successfully")))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials are valid", body = MessageResponse),
        (status = 400, description = "Invalid body or empty email/password", body = crate::api::ErrorResponse),
        (status = 401, description = "User not found or incorrect password", body = crate::api::ErrorResponse)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /login - email: {}", request.email.trim());

    match auth_service::login(state.store.as_ref(), &state.passwords, &request).await {
        Ok(email) => {
            log::info!("✅ Login successful: {}", email);
            Ok(HttpResponse::Ok().json(MessageResponse::new("login successful")))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email.trim(), e);
            Err(e)
        }
    }
}
