use serde::{Deserialize, Serialize};

/// Document stored in the "users" collection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub email: String,     // normalized, unique key
    pub password: String,  // password hash, never projected
}

/// Body of `/register` and `/login`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct UserResponse {
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse { email: u.email }
    }
}
