//! User registry.
//!
//! # Responsibility
//! - Create/read/update/delete user profiles.
//! - Cascade user deletion to the statuses the user owns.
//!
//! # Invariants
//! - `user_id` is unique; duplicates are rejected before any write.
//! - Cascade delete is best-effort: statuses are removed row by row, then
//!   the user row, without an enclosing transaction.

use crate::logging::log_value;
use crate::model::user::{User, UserValidationError};
use crate::repo::error::RepoError;
use crate::repo::status_repo::StatusRepository;
use crate::repo::user_repo::UserRepository;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UserResult<T> = Result<T, UserServiceError>;

/// Service error for user use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    /// A field exceeds its length limit.
    Validation(UserValidationError),
    /// Another user already owns this `user_id`.
    DuplicateUser(String),
    /// No user has this `user_id`.
    UserNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUser(user_id) => write!(f, "user already exists: {user_id}"),
            Self::UserNotFound(user_id) => write!(f, "user not found: {user_id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for UserServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UniqueViolation { key, .. } => Self::DuplicateUser(key),
            other => Self::Repo(other),
        }
    }
}

/// Outcome of a cascading user delete.
///
/// Statuses are listed by `status_id` in the order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeDeleteReport {
    /// Whether the user row was found and removed.
    pub user_deleted: bool,
    pub statuses_deleted: Vec<String>,
    /// Statuses listed for the user that were gone by the time of removal.
    pub statuses_missing: Vec<String>,
    /// Statuses whose removal raised a storage error.
    pub statuses_failed: Vec<String>,
}

impl CascadeDeleteReport {
    /// True only when the user and every dependent status were removed.
    pub fn is_complete(&self) -> bool {
        self.user_deleted && self.statuses_missing.is_empty() && self.statuses_failed.is_empty()
    }
}

/// User registry over an injected store.
pub struct UserService<S> {
    store: S,
}

impl<S: UserRepository + StatusRepository> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a new user.
    ///
    /// # Errors
    /// - `Validation` when a length limit is exceeded.
    /// - `DuplicateUser` when `user_id` is taken; the store is left untouched.
    pub fn add_user(&self, user: &User) -> UserResult<()> {
        user.validate()?;
        if self.store.find_user(&user.user_id)?.is_some() {
            return Err(UserServiceError::DuplicateUser(user.user_id.clone()));
        }
        self.store.insert_user(user)?;
        Ok(())
    }

    /// Rewrites email, name and last name of an existing user.
    pub fn update_user(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        last_name: &str,
    ) -> UserResult<()> {
        let user = User::new(user_id, email, name, last_name);
        user.validate()?;
        if self.store.find_user(user_id)?.is_none() {
            return Err(UserServiceError::UserNotFound(user_id.to_string()));
        }
        if self.store.update_user(&user)? == 0 {
            return Err(UserServiceError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    /// Deletes a user after deleting every status it owns.
    ///
    /// Per-status failures are recorded in the report and do not stop the
    /// user row from being deleted. Only failures to list the statuses or to
    /// delete the user row itself are returned as errors.
    pub fn delete_user(&self, user_id: &str) -> UserResult<CascadeDeleteReport> {
        let mut report = CascadeDeleteReport::default();

        for status in self.store.find_statuses_by_user(user_id)? {
            let status_id = status.status_id;
            match self.delete_dependent_status(&status_id) {
                Ok(true) => report.statuses_deleted.push(status_id),
                Ok(false) => {
                    warn!(
                        "event=user_delete module=service status=partial user_id={} status_id={} error_code=status_missing",
                        log_value(user_id),
                        log_value(&status_id)
                    );
                    report.statuses_missing.push(status_id);
                }
                Err(err) => {
                    warn!(
                        "event=user_delete module=service status=partial user_id={} status_id={} error_code=status_delete_failed error={}",
                        log_value(user_id),
                        log_value(&status_id),
                        log_value(err)
                    );
                    report.statuses_failed.push(status_id);
                }
            }
        }

        report.user_deleted = match self.store.find_user(user_id)? {
            Some(_) => self.store.delete_user(user_id)?,
            None => false,
        };

        Ok(report)
    }

    /// Finds one user by id.
    pub fn search_user(&self, user_id: &str) -> UserResult<Option<User>> {
        Ok(self.store.find_user(user_id)?)
    }

    fn delete_dependent_status(&self, status_id: &str) -> Result<bool, RepoError> {
        if self.store.find_status(status_id)?.is_none() {
            return Ok(false);
        }
        self.store.delete_status(status_id)
    }
}
