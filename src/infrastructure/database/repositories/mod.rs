//! SeaORM-backed repository implementations

pub mod repository_provider;
pub mod user_repository;
pub mod vacation_repository;

pub use repository_provider::Repositories;
pub use user_repository::UserRepository;
pub use vacation_repository::VacationRepository;
