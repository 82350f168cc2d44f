use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Project id, or the configured admin username.
    pub username: String,
    pub password: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// "admin" or "owner".
    pub role: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub username: String,
    pub role: String,
}

pub fn validate_login_request(req: &LoginRequest) -> Result<(), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".into(),
        ));
    }
    Ok(())
}
