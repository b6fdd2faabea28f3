//! Vacation aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use model::{VacationOwner, VacationRequest, VacationStatus, VacationType};

pub use dto_create::CreateVacationDto;
pub use dto_update::UpdateVacationDto;

pub use repository::VacationRepositoryInterface;
