//! User management service
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::policy::{authorize_user_delete, require_active, require_admin, Caller};
use crate::domain::{
    normalize_email, CreateUserDto, DomainError, DomainResult, LoginDto, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::validations::validate_first;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const EMAIL_TAKEN: &str = "User with this email already exists";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Bootstrap administrator credentials
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for DefaultAdmin {
    fn default() -> Self {
        Self {
            email: "admin@company.com".to_string(),
            name: "System Administrator".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// User service: orchestrates all identity and user-management use-cases.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            jwt_config,
            bcrypt_cost,
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Verify email + password and issue a JWT.
    ///
    /// The active flag is checked before the password, so an inactive
    /// account reports 403 even with a wrong password.
    pub async fn login(&self, dto: LoginDto) -> DomainResult<AuthResult> {
        validate_first(&dto)?;

        let Some(user) = self.repo.get_user_by_email(&normalize_email(&dto.email)).await? else {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !user.is_active {
            return Err(DomainError::AccountInactive);
        }

        let valid = verify_password(&dto.password, &user.password_hash).map_err(|e| {
            DomainError::Internal(format!("Unreadable password hash for {}: {}", user.id, e))
        })?;
        if !valid {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = create_token(&user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Resolve a bearer token to a caller, reloading the account so role
    /// and active flag are always current.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Caller> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid or expired token".into()))?;

        let Some(user) = self.repo.get_user_by_id(&claims.sub).await? else {
            return Err(DomainError::Unauthorized("User no longer exists".into()));
        };

        let caller = Caller::from(&user);
        require_active(&caller)?;
        Ok(caller)
    }

    pub async fn profile(&self, caller: &Caller) -> DomainResult<User> {
        self.repo
            .get_user_by_id(&caller.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", caller.id.as_str()))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, caller: &Caller) -> DomainResult<Vec<User>> {
        require_admin(caller)?;
        self.repo.list_users().await
    }

    pub async fn get_user(&self, caller: &Caller, id: &str) -> DomainResult<User> {
        require_admin(caller)?;
        self.find_user(id).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create_user(&self, caller: &Caller, dto: CreateUserDto) -> DomainResult<User> {
        require_admin(caller)?;
        validate_first(&dto)?;

        let email = normalize_email(&dto.email);
        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(EMAIL_TAKEN.into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: dto.name,
            password_hash: self.hash(&dto.password)?,
            role: dto.role.unwrap_or_default(),
            is_active: true,
            is_default_admin: false,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_user(user.clone()).await?;

        info!(user_id = %user.id, role = %user.role, created_by = %caller.id, "User created");
        Ok(user)
    }

    /// Apply an admin patch. Keeping one's own email is not a conflict.
    pub async fn update_user(
        &self,
        caller: &Caller,
        id: &str,
        dto: UpdateUserDto,
    ) -> DomainResult<User> {
        require_admin(caller)?;
        validate_first(&dto)?;

        let mut user = self.find_user(id).await?;

        if let Some(email) = dto.email.as_deref().map(normalize_email) {
            if email != user.email {
                if let Some(other) = self.repo.get_user_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(DomainError::Conflict(EMAIL_TAKEN.into()));
                    }
                }
                user.email = email;
            }
        }
        if let Some(name) = dto.name {
            user.name = name;
        }
        if let Some(password) = dto.password.as_deref() {
            user.password_hash = self.hash(password)?;
        }
        if let Some(role) = dto.role {
            user.role = role;
        }
        if let Some(active) = dto.active {
            user.is_active = active;
        }
        user.updated_at = Utc::now();

        self.repo.save_user(user.clone()).await?;
        info!(user_id = %user.id, updated_by = %caller.id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, caller: &Caller, id: &str) -> DomainResult<()> {
        require_admin(caller)?;
        let user = self.find_user(id).await?;
        authorize_user_delete(&user)?;

        self.repo.delete_user(&user.id).await?;
        info!(user_id = %user.id, deleted_by = %caller.id, "User deleted");
        Ok(())
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Make sure a default administrator exists.
    ///
    /// Returns the account when one was created or promoted, `None` when
    /// a default admin was already present.
    pub async fn ensure_default_admin(&self, admin: &DefaultAdmin) -> DomainResult<Option<User>> {
        if self.repo.get_default_admin().await?.is_some() {
            return Ok(None);
        }

        let email = normalize_email(&admin.email);
        let now = Utc::now();

        if let Some(mut existing) = self.repo.get_user_by_email(&email).await? {
            existing.is_default_admin = true;
            existing.role = UserRole::Admin;
            existing.updated_at = now;
            self.repo.save_user(existing.clone()).await?;
            info!(user_id = %existing.id, email = %existing.email, "Existing account marked as default admin");
            return Ok(Some(existing));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: admin.name.clone(),
            password_hash: self.hash(&admin.password)?,
            role: UserRole::Admin,
            is_active: true,
            is_default_admin: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_user(user.clone()).await?;

        info!(user_id = %user.id, email = %user.email, "Default admin user created");
        warn!("Change the default admin password after the first login");
        Ok(Some(user))
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn find_user(&self, id: &str) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }
}
