use rusqlite::Connection;
use socialnet_core::db::open_db_in_memory;
use socialnet_core::{
    SqliteSocialStore, Status, StatusService, StatusServiceError, User, UserService,
};

type Store<'conn> = SqliteSocialStore<'conn>;

fn setup(conn: &Connection) -> (UserService<Store<'_>>, StatusService<Store<'_>>) {
    let store = SqliteSocialStore::try_new(conn).unwrap();
    (UserService::new(store), StatusService::new(store))
}

fn add_sesame(users: &UserService<Store<'_>>) {
    users
        .add_user(&User::new("SC", "s@uw.edu", "Sesame", "Chan"))
        .unwrap();
}

#[test]
fn status_requires_existing_owner() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);

    let err = statuses
        .add_status(&Status::new("st1", "SC", "hi"))
        .unwrap_err();
    assert!(matches!(err, StatusServiceError::UnknownOwner(ref id) if id == "SC"));

    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();
}

#[test]
fn unknown_owner_wins_over_duplicate_status_id() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();

    let err = statuses
        .add_status(&Status::new("st1", "ghost", "boo"))
        .unwrap_err();
    assert!(matches!(err, StatusServiceError::UnknownOwner(_)));
}

#[test]
fn add_then_search_roundtrips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);

    let status = Status::new("st1", "SC", "first post, with a comma");
    statuses.add_status(&status).unwrap();

    assert_eq!(statuses.search_status("st1").unwrap(), Some(status));
}

#[test]
fn duplicate_status_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();

    let err = statuses
        .add_status(&Status::new("st1", "SC", "again"))
        .unwrap_err();
    assert!(matches!(err, StatusServiceError::DuplicateStatus(ref id) if id == "st1"));
    assert_eq!(statuses.search_status("st1").unwrap().unwrap().text, "hi");
}

#[test]
fn update_rewrites_owner_and_text() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    users
        .add_user(&User::new("SF", "safe@uw.edu", "Sabrina", "Fechtner"))
        .unwrap();
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();

    let moved = Status::new("st1", "SF", "edited");
    statuses.update_status(&moved).unwrap();

    assert_eq!(statuses.search_status("st1").unwrap(), Some(moved));
}

#[test]
fn update_fails_for_unknown_owner_or_missing_status() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();

    let owner_err = statuses
        .update_status(&Status::new("st1", "ghost", "edited"))
        .unwrap_err();
    assert!(matches!(owner_err, StatusServiceError::UnknownOwner(_)));

    let missing_err = statuses
        .update_status(&Status::new("st9", "SC", "edited"))
        .unwrap_err();
    assert!(matches!(missing_err, StatusServiceError::StatusNotFound(ref id) if id == "st9"));

    assert_eq!(statuses.search_status("st1").unwrap().unwrap().text, "hi");
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "hi")).unwrap();

    statuses.delete_status("st1").unwrap();
    assert!(statuses.search_status("st1").unwrap().is_none());

    let err = statuses.delete_status("st1").unwrap_err();
    assert!(matches!(err, StatusServiceError::StatusNotFound(_)));
}

#[test]
fn list_statuses_for_user_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    for id in ["st3", "st1", "st2"] {
        statuses.add_status(&Status::new(id, "SC", "x")).unwrap();
    }

    let ids: Vec<String> = statuses
        .list_statuses_for_user("SC")
        .unwrap()
        .into_iter()
        .map(|status| status.status_id)
        .collect();
    assert_eq!(ids, vec!["st1", "st2", "st3"]);
    assert!(statuses.list_statuses_for_user("ghost").unwrap().is_empty());
}

#[test]
fn delete_orphaned_statuses_removes_only_ownerless_rows() {
    let conn = open_db_in_memory().unwrap();
    let (users, statuses) = setup(&conn);
    add_sesame(&users);
    statuses.add_status(&Status::new("st1", "SC", "kept")).unwrap();
    conn.execute(
        "INSERT INTO statuses (status_id, user_id, status_text)
         VALUES ('orphan1', 'gone', 'x'), ('orphan2', 'gone', 'y');",
        [],
    )
    .unwrap();

    assert_eq!(statuses.delete_orphaned_statuses().unwrap(), 2);
    assert!(statuses.search_status("st1").unwrap().is_some());
    assert!(statuses.search_status("orphan1").unwrap().is_none());
    assert_eq!(statuses.delete_orphaned_statuses().unwrap(), 0);
}
