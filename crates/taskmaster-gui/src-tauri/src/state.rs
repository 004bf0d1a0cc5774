use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use taskmaster_core::account::Account;
use taskmaster_core::auth::{self, AuthPolicy};
use taskmaster_core::config::{self, Config};
use taskmaster_core::datastore::DataStore;
use taskmaster_core::task::Task;
use taskmaster_gui_shared::validate::validate_task_title;
use taskmaster_gui_shared::{
    LimitsDto, SignInArgs, SignUpArgs, TaskCreate, TaskDeleteArgs, TaskDto, TasksListArgs,
    UserDto,
};
use tracing::{debug, info, instrument};

/// Settings resolved before the datastore
/// is opened, so logging can be set up in
/// between.
#[derive(Debug)]
pub struct Settings {
    pub cfg: Config,
    pub data_dir: PathBuf,
    pub limits: LimitsDto,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let override_dir = std::env::var_os("TASKMASTER_DATA").map(PathBuf::from);
        Self::load_from(None, override_dir.as_deref())
    }

    pub fn load_from(rc: Option<&Path>, override_dir: Option<&Path>) -> anyhow::Result<Self> {
        let cfg = Config::load(rc).context("failed to load taskmasterrc")?;
        let data_dir = config::resolve_data_dir(&cfg, override_dir)?;
        let limits = LimitsDto {
            min_password_len: cfg.min_password_len(),
            title_max_len: cfg.title_max_len(),
        };
        Ok(Self {
            cfg,
            data_dir,
            limits,
        })
    }
}

pub struct AppState {
    store: Mutex<DataStore>,
    policy: AuthPolicy,
    title_max_len: usize,
}

impl AppState {
    pub fn open(settings: &Settings) -> anyhow::Result<Self> {
        let store = DataStore::open(&settings.data_dir).with_context(|| {
            format!(
                "failed to open GUI datastore at {}",
                settings.data_dir.display()
            )
        })?;
        Ok(Self::with_limits(store, settings.limits))
    }

    pub fn with_store(store: DataStore, cfg: &Config) -> Self {
        Self::with_limits(
            store,
            LimitsDto {
                min_password_len: cfg.min_password_len(),
                title_max_len: cfg.title_max_len(),
            },
        )
    }

    fn with_limits(store: DataStore, limits: LimitsDto) -> Self {
        Self {
            store: Mutex::new(store),
            policy: AuthPolicy {
                min_password_len: limits.min_password_len,
            },
            title_max_len: limits.title_max_len,
        }
    }

    pub fn limits(&self) -> LimitsDto {
        LimitsDto {
            min_password_len: self.policy.min_password_len,
            title_max_len: self.title_max_len,
        }
    }

    #[instrument(skip(self))]
    pub fn current_user(&self) -> anyhow::Result<Option<UserDto>> {
        let store = self.store.lock();
        Ok(auth::current_account(&store)?.map(account_to_dto))
    }

    /// Hashing runs before the store lock is
    /// taken; the lock covers the duplicate
    /// check and the insert.
    #[instrument(skip(self, args), fields(email = %args.email))]
    pub fn sign_up(&self, args: SignUpArgs) -> anyhow::Result<UserDto> {
        let now = Utc::now();
        let account = auth::new_account(
            &self.policy,
            &args.email,
            &args.password,
            args.display_name,
            now,
        )?;
        let store = self.store.lock();
        let (account, _session) = auth::register(&store, account, now)?;
        Ok(account_to_dto(account))
    }

    #[instrument(skip(self, args), fields(email = %args.email))]
    pub fn sign_in(&self, args: SignInArgs) -> anyhow::Result<UserDto> {
        let account = auth::find_for_sign_in(&self.store.lock(), &args.email)?;
        auth::check_password(&account, &args.password)?;
        auth::start_session(&self.store.lock(), &account, Utc::now())?;
        info!(uid = %account.uid, "signed in");
        Ok(account_to_dto(account))
    }

    #[instrument(skip(self))]
    pub fn sign_out(&self) -> anyhow::Result<()> {
        let store = self.store.lock();
        auth::sign_out(&store)
    }

    #[instrument(skip(self))]
    pub fn list(&self, args: TasksListArgs) -> anyhow::Result<Vec<TaskDto>> {
        let store = self.store.lock();
        require_session_user(&store, &args.user_id)?;

        let tasks: Vec<TaskDto> = store
            .tasks_for_owner(&args.user_id)?
            .into_iter()
            .map(task_to_dto)
            .collect();
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    #[instrument(skip(self, create), fields(user_id = %create.user_id))]
    pub fn add(&self, create: TaskCreate) -> anyhow::Result<TaskDto> {
        let title = validate_task_title(&create.title, self.title_max_len).map_err(|e| anyhow!(e))?;

        let store = self.store.lock();
        require_session_user(&store, &create.user_id)?;

        let task = Task::new(&create.user_id, title, create.completed, Utc::now());
        store.add_task(task.clone())?;
        info!(id = %task.id, completed = task.completed, "task created");
        Ok(task_to_dto(task))
    }

    #[instrument(skip(self))]
    pub fn delete(&self, args: TaskDeleteArgs) -> anyhow::Result<()> {
        let store = self.store.lock();
        require_session_user(&store, &args.user_id)?;
        store.delete_task(&args.user_id, &args.id)?;
        Ok(())
    }
}

/// Only the signed-in user may touch their own tasks.
fn require_session_user(store: &DataStore, user_id: &str) -> anyhow::Result<()> {
    let session = store
        .load_session()?
        .ok_or_else(|| anyhow!("not signed in"))?;
    if session.uid != user_id {
        return Err(anyhow!("cannot access tasks of another user"));
    }
    Ok(())
}

fn account_to_dto(account: Account) -> UserDto {
    UserDto {
        uid: account.uid,
        email: account.email,
        display_name: account.display_name,
        created: Some(account.created.to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
}

fn task_to_dto(task: Task) -> TaskDto {
    TaskDto {
        id: task.id,
        title: task.title,
        completed: task.completed,
        created: Some(task.entry.to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn state_in(dir: &std::path::Path) -> AppState {
        let store = DataStore::open(dir).expect("open datastore");
        AppState::with_store(store, &Config::default())
    }

    fn sign_up(state: &AppState, email: &str) -> UserDto {
        state
            .sign_up(SignUpArgs {
                email: email.to_string(),
                password: "password123".to_string(),
                display_name: None,
            })
            .expect("sign up")
    }

    #[test]
    fn signed_in_user_creates_lists_and_deletes() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());
        let user = sign_up(&state, "u1@example.com");

        for (title, completed) in [("Buy milk", false), ("Pay rent", true)] {
            state
                .add(TaskCreate {
                    user_id: user.uid.clone(),
                    title: title.to_string(),
                    completed,
                })
                .expect("add task");
        }

        let listed = state
            .list(TasksListArgs {
                user_id: user.uid.clone(),
            })
            .expect("list");
        let titles: Vec<(&str, bool)> = listed
            .iter()
            .map(|t| (t.title.as_str(), t.completed))
            .collect();
        assert_eq!(titles, [("Buy milk", false), ("Pay rent", true)]);
        assert!(listed.iter().all(|t| t.created.is_some()));

        state
            .delete(TaskDeleteArgs {
                user_id: user.uid.clone(),
                id: listed[0].id.clone(),
            })
            .expect("delete");
        let remaining = state
            .list(TasksListArgs { user_id: user.uid })
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Pay rent");
    }

    #[test]
    fn requests_need_the_matching_session() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());
        let first = sign_up(&state, "first@example.com");
        let second = sign_up(&state, "second@example.com");

        let err = state
            .list(TasksListArgs { user_id: first.uid })
            .expect_err("other user's tasks");
        assert_eq!(err.to_string(), "cannot access tasks of another user");

        state.sign_out().expect("sign out");
        assert_eq!(state.current_user().expect("current"), None);
        let err = state
            .list(TasksListArgs { user_id: second.uid })
            .expect_err("signed out");
        assert_eq!(err.to_string(), "not signed in");
    }

    #[test]
    fn blank_titles_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());
        let user = sign_up(&state, "u1@example.com");

        let err = state
            .add(TaskCreate {
                user_id: user.uid,
                title: "   ".to_string(),
                completed: false,
            })
            .expect_err("blank title");
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn limits_follow_the_rc_file() {
        let temp = tempdir().expect("tempdir");
        let rc = temp.path().join("taskmasterrc");
        std::fs::write(
            &rc,
            "auth.min_password_len = 12\ntask.title_max_len = 40\n",
        )
        .expect("write rc");
        let data = temp.path().join("data");

        let settings = Settings::load_from(Some(&rc), Some(&data)).expect("settings");
        assert_eq!(settings.data_dir, data);
        assert_eq!(settings.limits.title_max_len, 40);
        let state = AppState::open(&settings).expect("open state");
        assert_eq!(
            state.limits(),
            LimitsDto {
                min_password_len: 12,
                title_max_len: 40,
            }
        );
        assert!(data.join("tasks.data").exists());

        let err = state
            .sign_up(SignUpArgs {
                email: "u1@example.com".to_string(),
                password: "password123".to_string(),
                display_name: None,
            })
            .expect_err("password below rc minimum");
        assert!(err.to_string().contains("at least 12"));
    }

    #[test]
    fn concurrent_sign_ups_register_one_account() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());

        let results: Vec<anyhow::Result<UserDto>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        state.sign_up(SignUpArgs {
                            email: "race@example.com".to_string(),
                            password: "password123".to_string(),
                            display_name: None,
                        })
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("sign-up thread"))
                .collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(err.to_string().contains("already exists"));
        }

        let user = state
            .sign_in(SignInArgs {
                email: "race@example.com".to_string(),
                password: "password123".to_string(),
            })
            .expect("sign in");
        assert_eq!(state.current_user().expect("current"), Some(user));
    }
}
