use async_trait::async_trait;

use super::VacationRequest;
use crate::domain::DomainResult;

/// Vacation record store.
///
/// Listing methods return records ordered by `start_date`, newest first.
#[async_trait]
pub trait VacationRepositoryInterface: Send + Sync {
    async fn insert_vacation(&self, vacation: VacationRequest) -> DomainResult<()>;
    /// Overwrite an existing record. No conflict detection: last write wins.
    async fn save_vacation(&self, vacation: VacationRequest) -> DomainResult<()>;

    async fn get_vacation(&self, id: &str) -> DomainResult<Option<VacationRequest>>;
    async fn list_vacations_for_user(&self, user_id: &str) -> DomainResult<Vec<VacationRequest>>;
    async fn list_all_vacations(&self) -> DomainResult<Vec<VacationRequest>>;

    async fn delete_vacation(&self, id: &str) -> DomainResult<()>;
}
