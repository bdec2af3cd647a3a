//! Status registry.
//!
//! # Responsibility
//! - Create/read/update/delete status posts.
//! - Verify the owning user before writes.
//!
//! # Invariants
//! - A status is inserted only when its owner exists and its id is unused.
//! - Status add is stateless; owner checks always hit the store.

use crate::model::status::Status;
use crate::repo::error::RepoError;
use crate::repo::status_repo::StatusRepository;
use crate::repo::user_repo::UserRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StatusResult<T> = Result<T, StatusServiceError>;

/// Service error for status use-cases.
#[derive(Debug)]
pub enum StatusServiceError {
    /// The referenced owner does not exist.
    UnknownOwner(String),
    /// Another status already uses this `status_id`.
    DuplicateStatus(String),
    /// No status has this `status_id`.
    StatusNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StatusServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOwner(user_id) => write!(f, "owner user does not exist: {user_id}"),
            Self::DuplicateStatus(status_id) => write!(f, "status already exists: {status_id}"),
            Self::StatusNotFound(status_id) => write!(f, "status not found: {status_id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StatusServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StatusServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UniqueViolation { key, .. } => Self::DuplicateStatus(key),
            other => Self::Repo(other),
        }
    }
}

/// Status registry over an injected store.
pub struct StatusService<S> {
    store: S,
}

impl<S: UserRepository + StatusRepository> StatusService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a status for an existing user.
    ///
    /// The owner is checked first, so a missing owner is reported even when
    /// `status_id` is also a duplicate.
    pub fn add_status(&self, status: &Status) -> StatusResult<()> {
        self.ensure_owner_exists(&status.user_id)?;
        if self.store.find_status(&status.status_id)?.is_some() {
            return Err(StatusServiceError::DuplicateStatus(status.status_id.clone()));
        }
        self.store.insert_status(status)?;
        Ok(())
    }

    /// Rewrites owner and text of an existing status.
    pub fn update_status(&self, status: &Status) -> StatusResult<()> {
        self.ensure_owner_exists(&status.user_id)?;
        if self.store.find_status(&status.status_id)?.is_none()
            || self.store.update_status(status)? == 0
        {
            return Err(StatusServiceError::StatusNotFound(status.status_id.clone()));
        }
        Ok(())
    }

    pub fn delete_status(&self, status_id: &str) -> StatusResult<()> {
        if !self.store.delete_status(status_id)? {
            return Err(StatusServiceError::StatusNotFound(status_id.to_string()));
        }
        Ok(())
    }

    /// Finds one status by id.
    pub fn search_status(&self, status_id: &str) -> StatusResult<Option<Status>> {
        Ok(self.store.find_status(status_id)?)
    }

    /// Lists statuses owned by `user_id`, ordered by `status_id`.
    pub fn list_statuses_for_user(&self, user_id: &str) -> StatusResult<Vec<Status>> {
        Ok(self.store.find_statuses_by_user(user_id)?)
    }

    /// Removes statuses whose owner no longer exists. Returns how many.
    pub fn delete_orphaned_statuses(&self) -> StatusResult<usize> {
        Ok(self.store.delete_orphaned_statuses()?)
    }

    fn ensure_owner_exists(&self, user_id: &str) -> StatusResult<()> {
        if self.store.find_user(user_id)?.is_none() {
            return Err(StatusServiceError::UnknownOwner(user_id.to_string()));
        }
        Ok(())
    }
}
