use crate::{
    database::Store,
    models::UserResponse,
    utils::AppError,
};

pub async fn list_users(store: &dyn Store) -> Result<Vec<UserResponse>, AppError> {
    let users = store
        .list_users()
        .await
        .map_err(|e| AppError::database("error fetching users", e))?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

/// Test utility: removes every user
pub async fn clear_users(store: &dyn Store) -> Result<u64, AppError> {
    store
        .clear_users()
        .await
        .map_err(|e| AppError::database("error clearing users", e))
}
