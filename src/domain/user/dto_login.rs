use validator::Validate;

use crate::shared::validations::ValidationSchema;

#[derive(Debug, Clone, Validate)]
pub struct LoginDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,
}

impl ValidationSchema for LoginDto {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password"];
}
