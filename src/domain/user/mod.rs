//! User aggregate
//!
//! Contains the User entity, input DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_login;
mod dto_update;

pub use model::{normalize_email, User, UserRole};

pub use dto_create::CreateUserDto;
pub use dto_login::LoginDto;
pub use dto_update::UpdateUserDto;

pub use repository::UserRepositoryInterface;
