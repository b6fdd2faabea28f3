//! Domain layer: entities, input DTOs and repository interfaces

pub mod error;
pub mod user;
pub mod vacation;

pub use error::{DomainError, DomainResult};
pub use user::{
    normalize_email, CreateUserDto, LoginDto, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};
pub use vacation::{
    CreateVacationDto, UpdateVacationDto, VacationOwner, VacationRepositoryInterface,
    VacationRequest, VacationStatus, VacationType,
};
