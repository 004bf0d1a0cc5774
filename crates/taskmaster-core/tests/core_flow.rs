use chrono::Utc;
use taskmaster_core::auth::{self, AuthPolicy};
use taskmaster_core::config::Config;
use taskmaster_core::datastore::DataStore;
use taskmaster_core::task::Task;
use tempfile::tempdir;

fn policy() -> AuthPolicy {
    AuthPolicy::from_config(&Config::default())
}

#[test]
fn tasks_round_trip_per_owner_in_insertion_order() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = Utc::now();

    let milk = Task::new("u1", "Buy milk".to_string(), false, now);
    let rent = Task::new("u1", "Pay rent".to_string(), true, now);
    let other = Task::new("u2", "Not yours".to_string(), false, now);

    store.add_task(milk.clone()).expect("add milk");
    store.add_task(other.clone()).expect("add other");
    store.add_task(rent.clone()).expect("add rent");

    let mine = store.tasks_for_owner("u1").expect("list u1");
    assert_eq!(mine, vec![milk.clone(), rent.clone()]);

    let reopened = DataStore::open(temp.path()).expect("reopen datastore");
    assert_eq!(reopened.load_tasks().expect("load all").len(), 3);

    assert!(reopened.delete_task("u1", &other.id).is_err());
    let removed = reopened.delete_task("u1", &milk.id).expect("delete milk");
    assert_eq!(removed.title, "Buy milk");
    assert_eq!(
        reopened.tasks_for_owner("u1").expect("list u1"),
        vec![rent]
    );
    assert!(reopened.delete_task("u1", &milk.id).is_err());
}

#[test]
fn sign_up_then_sign_in_restores_session() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = Utc::now();

    let (account, session) = auth::sign_up(
        &store,
        &policy(),
        "Ada@Example.com",
        "analytical",
        Some(" Ada ".to_string()),
        now,
    )
    .expect("sign up");
    assert_eq!(account.email, "ada@example.com");
    assert_eq!(account.display_name.as_deref(), Some("Ada"));
    assert_eq!(session.uid, account.uid);

    let current = auth::current_account(&store).expect("current");
    assert_eq!(current.map(|a| a.uid), Some(account.uid.clone()));

    auth::sign_out(&store).expect("sign out");
    assert!(auth::current_account(&store).expect("current").is_none());

    let err = auth::sign_in(&store, "ada@example.com", "wrong password", now)
        .expect_err("wrong password");
    assert_eq!(err.to_string(), "invalid email or password");
    assert!(auth::current_account(&store).expect("current").is_none());

    let (again, _) =
        auth::sign_in(&store, "ADA@example.com", "analytical", now).expect("sign in");
    assert_eq!(again.uid, account.uid);

    let reopened = DataStore::open(temp.path()).expect("reopen datastore");
    assert_eq!(
        auth::current_account(&reopened)
            .expect("current")
            .map(|a| a.uid),
        Some(account.uid)
    );
}

#[test]
fn sign_up_rejects_duplicates_and_weak_passwords() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = Utc::now();

    auth::sign_up(&store, &policy(), "bob@example.com", "password1", None, now)
        .expect("first sign up");

    let dup = auth::sign_up(&store, &policy(), "BOB@example.com", "password2", None, now)
        .expect_err("duplicate email");
    assert!(dup.to_string().contains("already exists"));

    let weak = auth::sign_up(&store, &policy(), "carol@example.com", "short", None, now)
        .expect_err("weak password");
    assert!(weak.to_string().contains("at least 8"));

    let unknown = auth::sign_in(&store, "nobody@example.com", "password1", now)
        .expect_err("unknown account");
    assert_eq!(unknown.to_string(), "invalid email or password");
}

#[test]
fn dangling_session_is_cleared() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");

    let session = taskmaster_core::account::Session::start("ghost", Utc::now());
    store.save_session(Some(&session)).expect("save session");
    assert_eq!(store.load_session().expect("load"), Some(session));

    assert!(auth::current_account(&store).expect("current").is_none());
    assert!(store.load_session().expect("load").is_none());
}
