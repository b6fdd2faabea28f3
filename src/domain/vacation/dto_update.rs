use chrono::NaiveDate;
use validator::Validate;

use super::dto_create::check_date_range;
use super::{VacationStatus, VacationType};
use crate::shared::validations::ValidationSchema;

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateVacationDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub vacation_type: Option<VacationType>,
    pub status: Option<VacationStatus>,
}

impl UpdateVacationDto {
    pub fn touches_status(&self) -> bool {
        self.status.is_some()
    }
}

impl ValidationSchema for UpdateVacationDto {
    const FIELD_ORDER: &'static [&'static str] = &["title"];

    fn check_cross_fields(&self) -> Result<(), String> {
        check_date_range(self.start_date, self.end_date)
    }
}
