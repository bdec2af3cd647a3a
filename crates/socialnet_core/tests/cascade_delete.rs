use socialnet_core::db::open_db_in_memory;
use socialnet_core::{
    RepoError, RepoResult, SocialNetwork, SqliteSocialStore, Status, StatusRepository, User,
    UserRepository, UserService,
};

/// How the wrapped store misbehaves for one status id.
#[derive(Debug, Clone, Copy)]
enum Fault {
    /// `find_status` reports the row as absent.
    Vanished(&'static str),
    /// `delete_status` fails with a storage error.
    DeleteFails(&'static str),
}

/// Store wrapper that injects one status-level fault.
#[derive(Debug, Clone, Copy)]
struct FaultyStore<'conn> {
    inner: SqliteSocialStore<'conn>,
    fault: Fault,
}

impl UserRepository for FaultyStore<'_> {
    fn find_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        self.inner.find_user(user_id)
    }

    fn insert_user(&self, user: &User) -> RepoResult<()> {
        self.inner.insert_user(user)
    }

    fn update_user(&self, user: &User) -> RepoResult<usize> {
        self.inner.update_user(user)
    }

    fn delete_user(&self, user_id: &str) -> RepoResult<bool> {
        self.inner.delete_user(user_id)
    }
}

impl StatusRepository for FaultyStore<'_> {
    fn find_status(&self, status_id: &str) -> RepoResult<Option<Status>> {
        match self.fault {
            Fault::Vanished(id) if id == status_id => Ok(None),
            _ => self.inner.find_status(status_id),
        }
    }

    fn find_statuses_by_user(&self, user_id: &str) -> RepoResult<Vec<Status>> {
        self.inner.find_statuses_by_user(user_id)
    }

    fn insert_status(&self, status: &Status) -> RepoResult<()> {
        self.inner.insert_status(status)
    }

    fn update_status(&self, status: &Status) -> RepoResult<usize> {
        self.inner.update_status(status)
    }

    fn delete_status(&self, status_id: &str) -> RepoResult<bool> {
        match self.fault {
            Fault::DeleteFails(id) if id == status_id => {
                Err(RepoError::MissingRequiredTable("statuses"))
            }
            _ => self.inner.delete_status(status_id),
        }
    }

    fn delete_orphaned_statuses(&self) -> RepoResult<usize> {
        self.inner.delete_orphaned_statuses()
    }
}

fn seed(store: SqliteSocialStore<'_>) {
    let network = SocialNetwork::new(store);
    assert!(network.add_user("SC", "s@uw.edu", "Sesame", "Chan"));
    assert!(network.add_status("st1", "SC", "hi"));
    assert!(network.add_status("st2", "SC", "again"));
}

#[test]
fn delete_user_removes_user_and_all_statuses() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSocialStore::try_new(&conn).unwrap();
    seed(store);
    let network = SocialNetwork::new(store);

    assert!(network.delete_user("SC"));
    assert!(network.search_user("SC").is_none());
    assert!(network.search_status("st1").is_none());
    assert!(network.search_status("st2").is_none());
}

#[test]
fn vanished_status_still_deletes_user_but_reports_failure() {
    let conn = open_db_in_memory().unwrap();
    let inner = SqliteSocialStore::try_new(&conn).unwrap();
    seed(inner);
    let users = UserService::new(FaultyStore {
        inner,
        fault: Fault::Vanished("st1"),
    });

    let report = users.delete_user("SC").unwrap();

    assert!(report.user_deleted);
    assert_eq!(report.statuses_missing, vec!["st1"]);
    assert_eq!(report.statuses_deleted, vec!["st2"]);
    assert!(!report.is_complete());
    assert!(inner.find_user("SC").unwrap().is_none());
}

#[test]
fn failing_status_delete_is_best_effort() {
    let conn = open_db_in_memory().unwrap();
    let inner = SqliteSocialStore::try_new(&conn).unwrap();
    seed(inner);
    let network = SocialNetwork::new(FaultyStore {
        inner,
        fault: Fault::DeleteFails("st2"),
    });

    assert!(!network.delete_user("SC"));

    assert!(network.search_user("SC").is_none());
    assert!(network.search_status("st1").is_none());
    // The failed row survives as an orphan until pruned.
    assert!(network.search_status("st2").is_some());
    assert_eq!(network.prune_orphaned_statuses(), Some(1));
    assert!(network.search_status("st2").is_none());
}
