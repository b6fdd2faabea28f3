use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, DomainResult, VacationOwner, VacationRepositoryInterface, VacationRequest,
    VacationStatus, VacationType,
};
use crate::infrastructure::database::entities::vacation;

pub struct VacationRepository {
    db: DatabaseConnection,
}

impl VacationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: vacation::VacationStatus) -> VacationStatus {
    match status {
        vacation::VacationStatus::Pending => VacationStatus::Pending,
        vacation::VacationStatus::Approved => VacationStatus::Approved,
        vacation::VacationStatus::Rejected => VacationStatus::Rejected,
    }
}

fn status_to_entity(status: VacationStatus) -> vacation::VacationStatus {
    match status {
        VacationStatus::Pending => vacation::VacationStatus::Pending,
        VacationStatus::Approved => vacation::VacationStatus::Approved,
        VacationStatus::Rejected => vacation::VacationStatus::Rejected,
    }
}

fn type_to_domain(kind: vacation::VacationType) -> VacationType {
    match kind {
        vacation::VacationType::Vacation => VacationType::Vacation,
        vacation::VacationType::Sick => VacationType::Sick,
        vacation::VacationType::Personal => VacationType::Personal,
        vacation::VacationType::Other => VacationType::Other,
    }
}

fn type_to_entity(kind: VacationType) -> vacation::VacationType {
    match kind {
        VacationType::Vacation => vacation::VacationType::Vacation,
        VacationType::Sick => vacation::VacationType::Sick,
        VacationType::Personal => vacation::VacationType::Personal,
        VacationType::Other => vacation::VacationType::Other,
    }
}

fn model_to_domain(model: vacation::Model) -> VacationRequest {
    VacationRequest {
        id: model.id,
        owner: VacationOwner {
            user_id: model.user_id,
            name: model.user_name,
            email: model.user_email,
        },
        title: model.title,
        description: model.description,
        start_date: model.start_date,
        end_date: model.end_date,
        vacation_type: type_to_domain(model.vacation_type),
        status: status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn domain_to_active_model(v: VacationRequest) -> vacation::ActiveModel {
    vacation::ActiveModel {
        id: Set(v.id),
        user_id: Set(v.owner.user_id),
        user_name: Set(v.owner.name),
        user_email: Set(v.owner.email),
        title: Set(v.title),
        description: Set(v.description),
        start_date: Set(v.start_date),
        end_date: Set(v.end_date),
        vacation_type: Set(type_to_entity(v.vacation_type)),
        status: Set(status_to_entity(v.status)),
        created_at: Set(v.created_at),
        updated_at: Set(v.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl VacationRepositoryInterface for VacationRepository {
    async fn insert_vacation(&self, v: VacationRequest) -> DomainResult<()> {
        domain_to_active_model(v)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn save_vacation(&self, v: VacationRequest) -> DomainResult<()> {
        let id = v.id.clone();
        domain_to_active_model(v)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Vacation", id),
                other => db_err(other),
            })?;
        Ok(())
    }

    async fn get_vacation(&self, id: &str) -> DomainResult<Option<VacationRequest>> {
        let model = vacation::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_vacations_for_user(&self, user_id: &str) -> DomainResult<Vec<VacationRequest>> {
        let models = vacation::Entity::find()
            .filter(vacation::Column::UserId.eq(user_id))
            .order_by_desc(vacation::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_all_vacations(&self) -> DomainResult<Vec<VacationRequest>> {
        let models = vacation::Entity::find()
            .order_by_desc(vacation::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete_vacation(&self, id: &str) -> DomainResult<()> {
        let result = vacation::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Vacation", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{ConnectionTrait, Database, Statement};
    use sea_orm_migration::MigratorTrait;

    use crate::domain::CreateVacationDto;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> VacationRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        VacationRepository::new(db)
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn vacation(id: &str, owner: &str, start: &str) -> VacationRequest {
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
                start_date: date(start),
                end_date: date(start),
                vacation_type: Some(VacationType::Personal),
                status: None,
            },
            Utc::now(),
        )
    }

    fn ids(items: Vec<VacationRequest>) -> Vec<String> {
        items.into_iter().map(|v| v.id).collect()
    }

    #[tokio::test]
    async fn listings_are_ordered_by_start_date_descending() {
        let repo = repo().await;
        repo.insert_vacation(vacation("a", "bob", "2024-01-10")).await.unwrap();
        repo.insert_vacation(vacation("b", "bob", "2024-03-01")).await.unwrap();
        repo.insert_vacation(vacation("c", "eve", "2024-02-01")).await.unwrap();

        assert_eq!(ids(repo.list_all_vacations().await.unwrap()), vec!["b", "c", "a"]);
        assert_eq!(
            ids(repo.list_vacations_for_user("bob").await.unwrap()),
            vec!["b", "a"]
        );
        assert!(repo.list_vacations_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_and_enums_are_stored_as_strings() {
        let repo = repo().await;
        repo.insert_vacation(vacation("a", "bob", "2024-01-10")).await.unwrap();

        let mut changed = repo.get_vacation("a").await.unwrap().unwrap();
        changed.title = "Renamed".into();
        changed.description = Some("Beach".into());
        changed.end_date = date("2024-01-12");
        changed.status = VacationStatus::Approved;
        repo.save_vacation(changed).await.unwrap();

        let stored = repo.get_vacation("a").await.unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.description.as_deref(), Some("Beach"));
        assert_eq!(stored.end_date, date("2024-01-12"));
        assert_eq!(stored.status, VacationStatus::Approved);
        assert_eq!(stored.vacation_type, VacationType::Personal);
        assert_eq!(stored.owner.email, "bob@x.com");

        let row = repo
            .db
            .query_one(Statement::from_string(
                repo.db.get_database_backend(),
                "SELECT status, vacation_type FROM vacations WHERE id = 'a'".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.try_get::<String>("", "status").unwrap(), "approved");
        assert_eq!(row.try_get::<String>("", "vacation_type").unwrap(), "personal");
    }

    #[tokio::test]
    async fn save_of_missing_record_is_not_found() {
        let repo = repo().await;
        let err = repo
            .save_vacation(vacation("ghost", "bob", "2024-01-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Vacation", .. }));
        assert!(repo.get_vacation("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_once_then_reports_not_found() {
        let repo = repo().await;
        repo.insert_vacation(vacation("a", "bob", "2024-01-10")).await.unwrap();

        repo.delete_vacation("a").await.unwrap();
        assert!(repo.get_vacation("a").await.unwrap().is_none());

        let err = repo.delete_vacation("a").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
