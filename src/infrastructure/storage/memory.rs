//! In-memory storage implementation
//!
//! Backs the `memory://` database URL and the service tests.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, User, UserRepositoryInterface, VacationRepositoryInterface,
    VacationRequest,
};

/// In-memory credential store
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn insert_user(&self, user: User) -> DomainResult<()> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn save_user(&self, user: User) -> DomainResult<()> {
        if !self.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User", user.id));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().email == email)
            .map(|e| e.value().clone()))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn get_default_admin(&self) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().is_default_admin)
            .map(|e| e.value().clone()))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.users
            .remove(id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        Ok(())
    }
}

/// In-memory vacation record store
#[derive(Default)]
pub struct InMemoryVacationRepository {
    vacations: DashMap<String, VacationRequest>,
}

impl InMemoryVacationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, filter: F) -> Vec<VacationRequest>
    where
        F: Fn(&VacationRequest) -> bool,
    {
        let mut items: Vec<VacationRequest> = self
            .vacations
            .iter()
            .filter(|e| filter(e.value()))
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        items
    }
}

#[async_trait]
impl VacationRepositoryInterface for InMemoryVacationRepository {
    async fn insert_vacation(&self, vacation: VacationRequest) -> DomainResult<()> {
        self.vacations.insert(vacation.id.clone(), vacation);
        Ok(())
    }

    async fn save_vacation(&self, vacation: VacationRequest) -> DomainResult<()> {
        if !self.vacations.contains_key(&vacation.id) {
            return Err(DomainError::not_found("Vacation", vacation.id));
        }
        self.vacations.insert(vacation.id.clone(), vacation);
        Ok(())
    }

    async fn get_vacation(&self, id: &str) -> DomainResult<Option<VacationRequest>> {
        Ok(self.vacations.get(id).map(|v| v.clone()))
    }

    async fn list_vacations_for_user(&self, user_id: &str) -> DomainResult<Vec<VacationRequest>> {
        Ok(self.collect_sorted(|v| v.owner.user_id == user_id))
    }

    async fn list_all_vacations(&self) -> DomainResult<Vec<VacationRequest>> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn delete_vacation(&self, id: &str) -> DomainResult<()> {
        self.vacations
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Vacation", id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::domain::{CreateVacationDto, VacationOwner, VacationStatus};

    fn vacation(id: &str, owner: &str, start: &str) -> VacationRequest {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        VacationRequest::new(
            id,
            VacationOwner {
                user_id: owner.into(),
                name: owner.into(),
                email: format!("{owner}@x.com"),
            },
            CreateVacationDto {
                title: format!("Trip {id}"),
                description: None,
                start_date: start,
                end_date: start,
                vacation_type: None,
                status: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn listings_are_ordered_by_start_date_descending() {
        let repo = InMemoryVacationRepository::new();
        repo.insert_vacation(vacation("a", "bob", "2024-01-10")).await.unwrap();
        repo.insert_vacation(vacation("b", "bob", "2024-03-01")).await.unwrap();
        repo.insert_vacation(vacation("c", "eve", "2024-02-01")).await.unwrap();

        let all: Vec<String> = repo
            .list_all_vacations()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(all, vec!["b", "c", "a"]);

        let bobs: Vec<String> = repo
            .list_vacations_for_user("bob")
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(bobs, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn concurrent_saves_are_last_write_wins() {
        // Known, accepted race: two writers working from the same snapshot
        // silently overwrite each other. There is no conflict detection.
        let repo = InMemoryVacationRepository::new();
        repo.insert_vacation(vacation("a", "bob", "2024-01-10")).await.unwrap();

        let snapshot = repo.get_vacation("a").await.unwrap().unwrap();
        let mut first = snapshot.clone();
        first.title = "Renamed".into();
        let mut second = snapshot;
        second.status = VacationStatus::Approved;

        repo.save_vacation(first).await.unwrap();
        repo.save_vacation(second).await.unwrap();

        let stored = repo.get_vacation("a").await.unwrap().unwrap();
        assert_eq!(stored.status, VacationStatus::Approved);
        assert_eq!(stored.title, "Trip a");
    }

    #[tokio::test]
    async fn delete_missing_vacation_is_not_found() {
        let repo = InMemoryVacationRepository::new();
        let err = repo.delete_vacation("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
