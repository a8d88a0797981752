use crate::{
    database::{Store, StoreError},
    models::{CredentialsRequest, User},
    services::password::PasswordHasher,
    utils::{normalize_email, normalize_text, AppError},
};
use std::sync::Arc;

/// Normalized `(email, password)`, both non-empty
fn normalize_credentials(request: &CredentialsRequest) -> Result<(String, String), AppError> {
    let email = normalize_email(&request.email);
    let password = normalize_text(&request.password);

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("email and password are required".to_string()));
    }

    Ok((email, password))
}

// Hashing is CPU bound, keep it off the async workers
async fn hash_password(passwords: &Arc<dyn PasswordHasher>, password: String) -> Result<String, AppError> {
    let hasher = Arc::clone(passwords);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(AppError::Internal)
}

async fn verify_password(passwords: &Arc<dyn PasswordHasher>, stored: String, supplied: String) -> Result<bool, AppError> {
    let hasher = Arc::clone(passwords);
    tokio::task::spawn_blocking(move || hasher.verify(&stored, &supplied))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
}

// User registration
pub async fn register(
    store: &dyn Store,
    passwords: &Arc<dyn PasswordHasher>,
    request: &CredentialsRequest,
) -> Result<String, AppError> {
    let (email, password) = normalize_credentials(request)?;

    let existing = store
        .find_user(&email)
        .await
        .map_err(|e| AppError::database("error registering user", e))?;

    if existing.is_some() {
        return Err(AppError::Conflict("user already exists".to_string()));
    }

    let new_user = User {
        email,
        password: hash_password(passwords, password).await?,
    };

    // The unique index catches a concurrent registration that passed the lookup
    match store.insert_user(&new_user).await {
        Ok(()) => {}
        Err(StoreError::Duplicate) => {
            return Err(AppError::Conflict("user already exists".to_string()));
        }
        Err(e) => return Err(AppError::database("error registering user", e)),
    }

    log::info!("✅ User registered successfully: {}", new_user.email);

    Ok(new_user.email)
}

// User login; nothing is issued, the caller just learns the pair is valid
pub async fn login(
    store: &dyn Store,
    passwords: &Arc<dyn PasswordHasher>,
    request: &CredentialsRequest,
) -> Result<String, AppError> {
    let (email, password) = normalize_credentials(request)?;

    let user = store
        .find_user(&email)
        .await
        .map_err(|e| AppError::database("error logging in", e))?
        .ok_or_else(|| AppError::Authentication("user not found".to_string()))?;

    if !verify_password(passwords, user.password, password).await? {
        return Err(AppError::Authentication("incorrect password".to_string()));
    }

    Ok(user.email)
}
