//! Vacation request DTOs
//!
//! Dates are `YYYY-MM-DD`. Input accepts both `start_date` and the
//! camelCase `startDate` spelling used by older clients. Optional fields
//! may be omitted but never sent as `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CreateVacationDto, UpdateVacationDto, VacationRequest, VacationStatus, VacationType,
};
use crate::interfaces::http::common::reject_null;

/// Vacation request API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VacationDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub vacation_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VacationRequest> for VacationDto {
    fn from(v: VacationRequest) -> Self {
        Self {
            id: v.id,
            user_id: v.owner.user_id,
            user_name: v.owner.name,
            user_email: v.owner.email,
            title: v.title,
            description: v.description,
            start_date: v.start_date,
            end_date: v.end_date,
            vacation_type: v.vacation_type.as_str().to_string(),
            status: v.status.as_str().to_string(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Create vacation request. A supplied `status` is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVacationRequest {
    pub title: String,
    #[serde(default, deserialize_with = "reject_null")]
    pub description: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
    /// `vacation` (default), `sick`, `personal` or `other`
    #[serde(rename = "type", alias = "vacation_type")]
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "vacation")]
    pub vacation_type: Option<VacationType>,
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "pending")]
    pub status: Option<VacationStatus>,
}

impl From<CreateVacationRequest> for CreateVacationDto {
    fn from(r: CreateVacationRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            vacation_type: r.vacation_type,
            status: r.status,
        }
    }
}

/// Update vacation request. Absent fields are left unchanged; only
/// administrators may send `status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVacationRequest {
    #[serde(default, deserialize_with = "reject_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "reject_null")]
    pub description: Option<String>,
    #[serde(alias = "startDate")]
    #[serde(default, deserialize_with = "reject_null")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    #[serde(default, deserialize_with = "reject_null")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type", alias = "vacation_type")]
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "sick")]
    pub vacation_type: Option<VacationType>,
    #[serde(default, deserialize_with = "reject_null")]
    #[schema(value_type = Option<String>, example = "approved")]
    pub status: Option<VacationStatus>,
}

impl From<UpdateVacationRequest> for UpdateVacationDto {
    fn from(r: UpdateVacationRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            vacation_type: r.vacation_type,
            status: r.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_dates_and_type_are_accepted() {
        let raw = r#"{"title":"Trip","startDate":"2024-06-01","endDate":"2024-06-10","type":"sick"}"#;
        let request: CreateVacationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(request.vacation_type, Some(VacationType::Sick));
        assert!(request.status.is_none());
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let raw = r#"{"status":"archived"}"#;
        assert!(serde_json::from_str::<UpdateVacationRequest>(raw).is_err());
    }

    #[test]
    fn null_optional_fields_are_parse_errors() {
        for raw in [
            r#"{"title":"Changed","status":null}"#,
            r#"{"type":null}"#,
            r#"{"start_date":null}"#,
        ] {
            assert!(serde_json::from_str::<UpdateVacationRequest>(raw).is_err(), "{raw}");
        }

        let create = r#"{"title":"Trip","start_date":"2024-06-01","end_date":"2024-06-01","status":null}"#;
        assert!(serde_json::from_str::<CreateVacationRequest>(create).is_err());

        let patch: UpdateVacationRequest = serde_json::from_str(r#"{"title":"Changed"}"#).unwrap();
        assert!(patch.status.is_none());
    }

    #[test]
    fn dto_uses_type_on_the_wire() {
        let raw = r#"{"title":"Trip","start_date":"2024-06-01","end_date":"2024-06-01"}"#;
        let request: CreateVacationRequest = serde_json::from_str(raw).unwrap();
        let owner = crate::domain::VacationOwner {
            user_id: "u".into(),
            name: "Bob".into(),
            email: "bob@x.com".into(),
        };
        let record = VacationRequest::new("v-1", owner, request.into(), Utc::now());
        let json = serde_json::to_value(VacationDto::from(record)).unwrap();
        assert_eq!(json["type"], "vacation");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["start_date"], "2024-06-01");
    }
}
