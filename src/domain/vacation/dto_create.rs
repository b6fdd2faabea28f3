use chrono::NaiveDate;
use validator::Validate;

use super::{VacationStatus, VacationType};
use crate::shared::validations::ValidationSchema;

#[derive(Debug, Clone, Validate)]
pub struct CreateVacationDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vacation_type: Option<VacationType>,
    /// Accepted for compatibility with older clients, always replaced by `pending`.
    pub status: Option<VacationStatus>,
}

impl ValidationSchema for CreateVacationDto {
    const FIELD_ORDER: &'static [&'static str] = &["title"];

    fn check_cross_fields(&self) -> Result<(), String> {
        check_date_range(Some(self.start_date), Some(self.end_date))
    }
}

/// Shared by create and update: both ends present and reversed is a violation.
pub(crate) fn check_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), String> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => {
            Err("end date must not be before start date".to_string())
        }
        _ => Ok(()),
    }
}
