use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for attaching an identifier to a user.
#[derive(Debug, Deserialize)]
pub struct LinkIdRequest {
    pub user_id: String,
    pub id_to_link: String,
}

#[derive(Debug, Deserialize)]
pub struct ChainDeleteQuery {
    pub user_id: String,
}

/// `{"msg": "..."}` body returned by every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

impl MessageResponse {
    pub const fn new(msg: &'static str) -> Self {
        Self { msg }
    }
}
