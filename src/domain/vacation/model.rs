//! Vacation request domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CreateVacationDto, UpdateVacationDto};

/// Approval status of a vacation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VacationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of time off requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationType {
    #[default]
    Vacation,
    Sick,
    Personal,
    Other,
}

impl VacationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Sick => "sick",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }
}

/// Owner identity copied onto the record at creation time.
///
/// Not re-synced when the user's profile changes later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationOwner {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Vacation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationRequest {
    pub id: String,
    pub owner: VacationOwner,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    /// Inclusive; never before `start_date`.
    pub end_date: NaiveDate,
    pub vacation_type: VacationType,
    pub status: VacationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VacationRequest {
    /// Build a new pending request owned by `owner`.
    ///
    /// Any status carried by the input is ignored.
    pub fn new(
        id: impl Into<String>,
        owner: VacationOwner,
        dto: CreateVacationDto,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            owner,
            title: dto.title,
            description: dto.description,
            start_date: dto.start_date,
            end_date: dto.end_date,
            vacation_type: dto.vacation_type.unwrap_or_default(),
            status: VacationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner.user_id == user_id
    }

    pub fn has_valid_range(&self) -> bool {
        self.end_date >= self.start_date
    }

    pub fn is_approved(&self) -> bool {
        self.status == VacationStatus::Approved
    }

    /// Return a copy with every field present in `patch` overwritten.
    pub fn patched(&self, patch: &UpdateVacationDto, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = Some(description.clone());
        }
        if let Some(start_date) = patch.start_date {
            next.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            next.end_date = end_date;
        }
        if let Some(vacation_type) = patch.vacation_type {
            next.vacation_type = vacation_type;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        next.updated_at = now;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_owner() -> VacationOwner {
        VacationOwner {
            user_id: "u-1".into(),
            name: "Bob".into(),
            email: "bob@x.com".into(),
        }
    }

    fn sample_request() -> VacationRequest {
        let dto = CreateVacationDto {
            title: "Trip".into(),
            description: None,
            start_date: date("2024-06-01"),
            end_date: date("2024-06-10"),
            vacation_type: None,
            status: Some(VacationStatus::Approved),
        };
        VacationRequest::new("v-1", sample_owner(), dto, Utc::now())
    }

    #[test]
    fn new_request_is_pending_with_default_type() {
        let v = sample_request();
        assert_eq!(v.status, VacationStatus::Pending);
        assert_eq!(v.vacation_type, VacationType::Vacation);
        assert_eq!(v.created_at, v.updated_at);
        assert!(v.is_owned_by("u-1"));
        assert!(!v.is_owned_by("u-2"));
        assert!(v.has_valid_range());
    }

    #[test]
    fn patched_overwrites_only_present_fields() {
        let v = sample_request();
        let later = v.created_at + Duration::minutes(5);
        let patch = UpdateVacationDto {
            description: Some(String::new()),
            status: Some(VacationStatus::Rejected),
            ..Default::default()
        };

        let next = v.patched(&patch, later);
        assert_eq!(next.title, "Trip");
        assert_eq!(next.description.as_deref(), Some(""));
        assert_eq!(next.status, VacationStatus::Rejected);
        assert_eq!(next.created_at, v.created_at);
        assert_eq!(next.updated_at, later);
    }

    #[test]
    fn patched_range_can_become_invalid() {
        let v = sample_request();
        let patch = UpdateVacationDto {
            end_date: Some(date("2024-05-01")),
            ..Default::default()
        };
        assert!(!v.patched(&patch, Utc::now()).has_valid_range());
    }

    #[test]
    fn single_day_range_is_valid() {
        let mut v = sample_request();
        v.end_date = v.start_date;
        assert!(v.has_valid_range());
    }
}
