//! Vacation request service
//!
//! Each mutation runs the same pipeline: schema validation, existence
//! check, authorization, field restriction, merged date-range check,
//! write. The first failing step is reported and nothing is written.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::policy::{
    authorize_vacation, require_active, vacation_list_scope, Caller, ListScope, VacationAction,
};
use crate::domain::{
    CreateVacationDto, DomainError, DomainResult, UpdateVacationDto, VacationOwner,
    VacationRepositoryInterface, VacationRequest,
};
use crate::shared::validations::validate_first;

const INVALID_RANGE: &str = "end date must not be before start date";

#[derive(Clone)]
pub struct VacationService {
    repo: Arc<dyn VacationRepositoryInterface>,
}

impl VacationService {
    pub fn new(repo: Arc<dyn VacationRepositoryInterface>) -> Self {
        Self { repo }
    }

    /// Admins see every record, everyone else only their own.
    pub async fn list(&self, caller: &Caller) -> DomainResult<Vec<VacationRequest>> {
        require_active(caller)?;
        match vacation_list_scope(caller) {
            ListScope::All => self.repo.list_all_vacations().await,
            ListScope::Owner(user_id) => self.repo.list_vacations_for_user(&user_id).await,
        }
    }

    pub async fn get(&self, caller: &Caller, id: &str) -> DomainResult<VacationRequest> {
        let vacation = self.find(id).await?;
        authorize_vacation(caller, VacationAction::ReadOne, &vacation)?;
        Ok(vacation)
    }

    /// Owner comes from the caller and status is always `pending`.
    pub async fn create(
        &self,
        caller: &Caller,
        dto: CreateVacationDto,
    ) -> DomainResult<VacationRequest> {
        validate_first(&dto)?;
        require_active(caller)?;

        let owner = VacationOwner {
            user_id: caller.id.clone(),
            name: caller.name.clone(),
            email: caller.email.clone(),
        };
        let vacation = VacationRequest::new(Uuid::new_v4().to_string(), owner, dto, Utc::now());
        self.repo.insert_vacation(vacation.clone()).await?;

        info!(vacation_id = %vacation.id, user_id = %caller.id, "Vacation request created");
        Ok(vacation)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: &str,
        patch: UpdateVacationDto,
    ) -> DomainResult<VacationRequest> {
        validate_first(&patch)?;
        let current = self.find(id).await?;
        authorize_vacation(caller, VacationAction::Update(&patch), &current)?;

        let next = current.patched(&patch, Utc::now());
        if !next.has_valid_range() {
            return Err(DomainError::validation(INVALID_RANGE));
        }
        self.repo.save_vacation(next.clone()).await?;

        if current.status != next.status {
            info!(
                vacation_id = %next.id,
                user_id = %caller.id,
                from = %current.status,
                to = %next.status,
                "Vacation status changed"
            );
        } else {
            info!(vacation_id = %next.id, user_id = %caller.id, "Vacation request updated");
        }
        Ok(next)
    }

    pub async fn delete(&self, caller: &Caller, id: &str) -> DomainResult<()> {
        let vacation = self.find(id).await?;
        authorize_vacation(caller, VacationAction::Delete, &vacation)?;

        self.repo.delete_vacation(&vacation.id).await?;
        info!(vacation_id = %vacation.id, user_id = %caller.id, "Vacation request deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<VacationRequest> {
        self.repo
            .get_vacation(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vacation request", id))
    }
}
