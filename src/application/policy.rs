//! Authorization policy
//!
//! Every ownership and role rule for vacations and user management is
//! decided here. Services call these functions after validation and the
//! existence check, never before.

use crate::domain::{DomainError, DomainResult, UpdateVacationDto, User, UserRole, VacationRequest};

pub const ADMIN_REQUIRED: &str = "Admin access required";
pub const ACCESS_DENIED: &str = "Access denied";
pub const STATUS_CHANGE_DENIED: &str = "Only administrators can change vacation status";
pub const DEFAULT_ADMIN_PROTECTED: &str = "Cannot delete the default admin user";

/// Authenticated identity resolved freshly from the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Which vacation records a listing may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    All,
    Owner(String),
}

/// Action on an existing vacation record.
#[derive(Debug, Clone, Copy)]
pub enum VacationAction<'a> {
    ReadOne,
    Update(&'a UpdateVacationDto),
    Delete,
}

/// Inactive callers are rejected before any other rule applies.
pub fn require_active(caller: &Caller) -> DomainResult<()> {
    if caller.is_active {
        Ok(())
    } else {
        Err(DomainError::AccountInactive)
    }
}

pub fn require_admin(caller: &Caller) -> DomainResult<()> {
    require_active(caller)?;
    if caller.is_admin() {
        Ok(())
    } else {
        Err(DomainError::forbidden(ADMIN_REQUIRED))
    }
}

/// Non-admins are silently narrowed to their own records.
pub fn vacation_list_scope(caller: &Caller) -> ListScope {
    if caller.is_admin() {
        ListScope::All
    } else {
        ListScope::Owner(caller.id.clone())
    }
}

/// Ownership check first, then the status field restriction.
///
/// A non-admin patch that carries `status` fails as a whole, even when
/// the value equals the stored one.
pub fn authorize_vacation(
    caller: &Caller,
    action: VacationAction<'_>,
    target: &VacationRequest,
) -> DomainResult<()> {
    require_active(caller)?;
    if caller.is_admin() {
        return Ok(());
    }
    if !target.is_owned_by(&caller.id) {
        return Err(DomainError::forbidden(ACCESS_DENIED));
    }
    if let VacationAction::Update(patch) = action {
        if patch.touches_status() {
            return Err(DomainError::forbidden(STATUS_CHANGE_DENIED));
        }
    }
    Ok(())
}

/// Applies to every caller, admins included.
pub fn authorize_user_delete(target: &User) -> DomainResult<()> {
    if target.is_default_admin {
        Err(DomainError::forbidden(DEFAULT_ADMIN_PROTECTED))
    } else {
        Ok(())
    }
}
