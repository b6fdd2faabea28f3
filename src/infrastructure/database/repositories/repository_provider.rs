//! Repository handles shared by the services and the HTTP layer

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use super::{UserRepository, VacationRepository};
use crate::domain::{
    DomainError, DomainResult, UserRepositoryInterface, VacationRepositoryInterface,
};
use crate::infrastructure::storage::{InMemoryUserRepository, InMemoryVacationRepository};

/// Both stores behind trait objects, so services never see the backend.
///
/// ```ignore
/// let repos = Repositories::sea_orm(db.clone());
/// let user = repos.users.get_user_by_id("...").await?;
/// ```
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepositoryInterface>,
    pub vacations: Arc<dyn VacationRepositoryInterface>,
    db: Option<DatabaseConnection>,
}

impl Repositories {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserRepository::new(db.clone())),
            vacations: Arc::new(VacationRepository::new(db.clone())),
            db: Some(db),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            vacations: Arc::new(InMemoryVacationRepository::new()),
            db: None,
        }
    }

    pub fn connection(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn backend_name(&self) -> &'static str {
        if self.db.is_some() {
            "sqlite"
        } else {
            "memory"
        }
    }

    /// Round-trip to the database. Always succeeds for the in-memory backend.
    pub async fn ping(&self) -> DomainResult<()> {
        let Some(db) = &self.db else {
            return Ok(());
        };
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
        .map_err(|e| DomainError::Internal(format!("Database error: {}", e)))?;
        Ok(())
    }
}
