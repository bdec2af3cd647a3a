//! Status collection contract.

use crate::model::status::Status;
use crate::repo::error::RepoResult;

/// Row-level access to the `statuses` collection.
pub trait StatusRepository {
    /// Finds one status by `status_id`.
    fn find_status(&self, status_id: &str) -> RepoResult<Option<Status>>;
    /// Lists every status owned by `user_id`, ordered by `status_id`.
    fn find_statuses_by_user(&self, user_id: &str) -> RepoResult<Vec<Status>>;
    /// Inserts one status row.
    fn insert_status(&self, status: &Status) -> RepoResult<()>;
    /// Rewrites owner and text of the row keyed by `status.status_id` in one
    /// transaction. Returns the number of rows changed.
    fn update_status(&self, status: &Status) -> RepoResult<usize>;
    /// Deletes the row keyed by `status_id`. Returns `false` when absent.
    fn delete_status(&self, status_id: &str) -> RepoResult<bool>;
    /// Deletes, in one transaction, statuses whose owner no longer exists.
    fn delete_orphaned_statuses(&self) -> RepoResult<usize>;
}
