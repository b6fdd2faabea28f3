//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateUserDto, UpdateUserDto, User, UserRole};
use crate::interfaces::http::common::reject_null;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub is_default_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role.to_string(),
            is_active: u.is_active,
            is_default_admin: u.is_default_admin,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    /// `user` (default) or `admin`
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "user")]
    pub role: Option<UserRole>,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            email: r.email,
            name: r.name,
            password: r.password,
            role: r.role,
        }
    }
}

/// Update user request. Absent fields are left unchanged; `null` is rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "reject_null")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "reject_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "reject_null")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "admin")]
    pub role: Option<UserRole>,
    #[serde(alias = "is_active")]
    #[serde(default, deserialize_with = "reject_null")]
    pub active: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            email: r.email,
            name: r.name,
            password: r.password,
            role: r.role,
            active: r.active,
        }
    }
}
