use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        is_default_admin: model.is_default_admin,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn user_to_active_model(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        email: Set(u.email),
        name: Set(u.name),
        password_hash: Set(u.password_hash),
        role: Set(domain_role_to_entity(u.role)),
        is_active: Set(u.is_active),
        is_default_admin: Set(u.is_default_admin),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn insert_user(&self, u: User) -> DomainResult<()> {
        user_to_active_model(u)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn save_user(&self, u: User) -> DomainResult<()> {
        let id = u.id.clone();
        user_to_active_model(u)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("User", id),
                other => db_err(other),
            })?;
        Ok(())
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_default_admin(&self) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::IsDefaultAdmin.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}
