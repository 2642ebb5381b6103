use crate::models::User;
use serde::Serialize;

/// A user as shown to clients: never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: u64,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
