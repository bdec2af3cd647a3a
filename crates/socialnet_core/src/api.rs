//! Record operation surface for menu/CLI callers.
//!
//! # Responsibility
//! - Expose every user/status/load operation as a boolean or optional
//!   result.
//! - Log each failure once with its cause.
//!
//! # Invariants
//! - No operation panics or returns an error; failures become `false` or
//!   `None`.
//! - Both registries share the one injected store.

use crate::loader::{self, LoadError, LoadReport};
use crate::logging::log_value;
use crate::model::status::Status;
use crate::model::user::User;
use crate::repo::status_repo::StatusRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::status_service::StatusService;
use crate::service::user_service::UserService;
use log::{error, info, warn};
use std::error::Error;
use std::path::Path;

/// Facade bundling the user and status registries over one store.
pub struct SocialNetwork<S> {
    users: UserService<S>,
    statuses: StatusService<S>,
}

impl<S> SocialNetwork<S>
where
    S: UserRepository + StatusRepository + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            users: UserService::new(store.clone()),
            statuses: StatusService::new(store),
        }
    }

    pub fn add_user(&self, user_id: &str, email: &str, name: &str, last_name: &str) -> bool {
        let user = User::new(user_id, email, name, last_name);
        report("add_user", user_id, self.users.add_user(&user))
    }

    pub fn update_user(&self, user_id: &str, email: &str, name: &str, last_name: &str) -> bool {
        report(
            "update_user",
            user_id,
            self.users.update_user(user_id, email, name, last_name),
        )
    }

    /// Deletes a user and its statuses; `true` only if every row went away.
    pub fn delete_user(&self, user_id: &str) -> bool {
        match self.users.delete_user(user_id) {
            Ok(outcome) if outcome.is_complete() => {
                info!(
                    "event=delete_user module=api status=ok id={} statuses_deleted={}",
                    log_value(user_id),
                    outcome.statuses_deleted.len()
                );
                true
            }
            Ok(outcome) => {
                warn!(
                    "event=delete_user module=api status=error id={} user_deleted={} statuses_deleted={} statuses_missing={} statuses_failed={}",
                    log_value(user_id),
                    outcome.user_deleted,
                    outcome.statuses_deleted.len(),
                    outcome.statuses_missing.len(),
                    outcome.statuses_failed.len()
                );
                false
            }
            Err(err) => {
                error!(
                    "event=delete_user module=api status=error id={} error={}",
                    log_value(user_id),
                    log_value(err)
                );
                false
            }
        }
    }

    pub fn search_user(&self, user_id: &str) -> Option<User> {
        lookup("search_user", user_id, self.users.search_user(user_id))
    }

    pub fn add_status(&self, status_id: &str, user_id: &str, text: &str) -> bool {
        let status = Status::new(status_id, user_id, text);
        report("add_status", status_id, self.statuses.add_status(&status))
    }

    pub fn update_status(&self, status_id: &str, user_id: &str, text: &str) -> bool {
        let status = Status::new(status_id, user_id, text);
        report(
            "update_status",
            status_id,
            self.statuses.update_status(&status),
        )
    }

    pub fn delete_status(&self, status_id: &str) -> bool {
        report(
            "delete_status",
            status_id,
            self.statuses.delete_status(status_id),
        )
    }

    pub fn search_status(&self, status_id: &str) -> Option<Status> {
        lookup(
            "search_status",
            status_id,
            self.statuses.search_status(status_id),
        )
    }

    /// Removes statuses whose owner is gone. Returns the count, or `None`
    /// on storage failure.
    pub fn prune_orphaned_statuses(&self) -> Option<usize> {
        match self.statuses.delete_orphaned_statuses() {
            Ok(removed) => {
                info!("event=prune_orphans module=api status=ok removed={removed}");
                Some(removed)
            }
            Err(err) => {
                error!(
                    "event=prune_orphans module=api status=error error={}",
                    log_value(err)
                );
                None
            }
        }
    }

    /// Loads users from a CSV file.
    pub fn load_users(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        report_load(
            "load_users",
            path,
            loader::load_users(path, &self.users),
        )
    }

    /// Loads statuses from a CSV file.
    pub fn load_status_updates(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        report_load(
            "load_status_updates",
            path,
            loader::load_statuses(path, &self.statuses),
        )
    }
}

fn report<E: Error>(event: &'static str, id: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            info!("event={event} module=api status=ok id={}", log_value(id));
            true
        }
        Err(err) => {
            warn!(
                "event={event} module=api status=error id={} error={}",
                log_value(id),
                log_value(err)
            );
            false
        }
    }
}

fn lookup<T, E: Error>(event: &'static str, id: &str, result: Result<Option<T>, E>) -> Option<T> {
    match result {
        Ok(Some(found)) => Some(found),
        Ok(None) => {
            info!("event={event} module=api status=not_found id={}", log_value(id));
            None
        }
        Err(err) => {
            error!(
                "event={event} module=api status=error id={} error={}",
                log_value(id),
                log_value(err)
            );
            None
        }
    }
}

fn report_load(event: &'static str, path: &Path, result: Result<LoadReport, LoadError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            error!(
                "event={event} module=api status=error path={} error={}",
                log_value(path.display()),
                log_value(err)
            );
            false
        }
    }
}
