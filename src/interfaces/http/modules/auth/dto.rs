//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::AuthResult;
use crate::domain::{LoginDto, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginDto {
    fn from(r: LoginRequest) -> Self {
        Self {
            email: r.email,
            password: r.password,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

impl From<AuthResult> for LoginResponse {
    fn from(auth: AuthResult) -> Self {
        Self {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            user: UserInfo::from(&auth.user),
        }
    }
}

/// Caller summary, never includes credentials
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role.to_string(),
        }
    }
}
