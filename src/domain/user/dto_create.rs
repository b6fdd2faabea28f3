use validator::Validate;

use super::UserRole;
use crate::shared::validations::ValidationSchema;

#[derive(Debug, Clone, Validate)]
pub struct CreateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 2, message = "name must be at least 2 characters long"))]
    pub name: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,
    /// Defaults to [`UserRole::User`] when absent.
    pub role: Option<UserRole>,
}

impl ValidationSchema for CreateUserDto {
    const FIELD_ORDER: &'static [&'static str] = &["email", "name", "password"];
}
