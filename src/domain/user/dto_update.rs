use validator::Validate;

use super::UserRole;
use crate::shared::validations::ValidationSchema;

/// Partial update applied by an administrator. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 2, message = "name must be at least 2 characters long"))]
    pub name: Option<String>,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl ValidationSchema for UpdateUserDto {
    const FIELD_ORDER: &'static [&'static str] = &["email", "name", "password"];
}
